use crate::{
    foundation::core::Point,
    foundation::error::{SpreadError, SpreadResult},
    ident::key::{EdgeKey, InstitutionKey},
};

/// One row of the node table: an institution and its data-space coordinate.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Institution {
    pub name: String,
    pub key: InstitutionKey,
    pub position: Point,
}

/// One row of the edge table. Endpoint coordinates are stored on the row itself.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EdgeRow {
    pub from: Point,
    pub to: Point,
    /// Member of the precomputed minimum spanning tree.
    pub spanning: bool,
    pub source: Option<String>,
    pub target: Option<String>,
}

impl EdgeRow {
    pub fn source_key(&self) -> InstitutionKey {
        InstitutionKey::from_optional(self.source.as_deref())
    }

    pub fn target_key(&self) -> InstitutionKey {
        InstitutionKey::from_optional(self.target.as_deref())
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source_key(), self.target_key())
    }
}

fn csv_reader<R: std::io::Read>(r: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(r)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    table: &str,
    column: &str,
) -> SpreadResult<&'r str> {
    record.get(idx).ok_or_else(|| {
        SpreadError::data(format!(
            "{table} table line {}: missing column '{column}'",
            line_of(record)
        ))
    })
}

fn number(record: &csv::StringRecord, idx: usize, table: &str, column: &str) -> SpreadResult<f64> {
    let raw = field(record, idx, table, column)?;
    let v = raw.parse::<f64>().map_err(|_| {
        SpreadError::data(format!(
            "{table} table line {}: column '{column}' is not a number ('{raw}')",
            line_of(record)
        ))
    })?;
    if !v.is_finite() {
        return Err(SpreadError::data(format!(
            "{table} table line {}: column '{column}' must be finite",
            line_of(record)
        )));
    }
    Ok(v)
}

fn optional_name(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}

fn spanning_flag(raw: &str) -> bool {
    match raw.parse::<f64>() {
        Ok(v) => v == 1.0,
        Err(_) => raw.eq_ignore_ascii_case("true"),
    }
}

/// Parse the node table (`name,x,y`; the header row is discarded).
pub fn read_node_table<R: std::io::Read>(r: R) -> SpreadResult<Vec<Institution>> {
    let mut rdr = csv_reader(r);
    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| SpreadError::data(format!("node table: {e}")))?;
        let name = field(&record, 0, "node", "name")?.to_owned();
        if name.is_empty() {
            return Err(SpreadError::data(format!(
                "node table line {}: empty institution name",
                line_of(&record)
            )));
        }
        let x = number(&record, 1, "node", "x")?;
        let y = number(&record, 2, "node", "y")?;
        out.push(Institution {
            key: InstitutionKey::from_name(&name),
            name,
            position: Point::new(x, y),
        });
    }
    Ok(out)
}

/// Parse the edge table (`x1,y1,x2,y2,spanning,source,target`; header discarded).
pub fn read_edge_table<R: std::io::Read>(r: R) -> SpreadResult<Vec<EdgeRow>> {
    let mut rdr = csv_reader(r);
    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| SpreadError::data(format!("edge table: {e}")))?;
        let x1 = number(&record, 0, "edge", "x1")?;
        let y1 = number(&record, 1, "edge", "y1")?;
        let x2 = number(&record, 2, "edge", "x2")?;
        let y2 = number(&record, 3, "edge", "y2")?;
        let spanning = spanning_flag(field(&record, 4, "edge", "spanning")?);
        let source = record.get(5).and_then(optional_name);
        let target = record.get(6).and_then(optional_name);
        out.push(EdgeRow {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            spanning,
            source,
            target,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/data/tables.rs"]
mod tests;
