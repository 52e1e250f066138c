use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    data::epidemic::{EpidemicRun, matching_runs, read_epidemics},
    data::tables::{EdgeRow, Institution, read_edge_table, read_node_table},
    foundation::core::Point,
    foundation::error::{SpreadError, SpreadResult},
    ident::key::InstitutionKey,
};

/// Locations of the three input files.
#[derive(Clone, Debug)]
pub struct DataPaths {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub epidemics: PathBuf,
}

/// Immutable, session-wide input data.
///
/// Built once at load and shared (behind an `Arc`) by the scene builder and the timeline
/// animator. Nothing in the show mutates it.
#[derive(Clone, Debug)]
pub struct Session {
    institutions: Vec<Institution>,
    edges: Vec<EdgeRow>,
    runs: Vec<EpidemicRun>,
    coords: HashMap<InstitutionKey, Point>,
}

impl Session {
    pub fn new(
        institutions: Vec<Institution>,
        edges: Vec<EdgeRow>,
        runs: Vec<EpidemicRun>,
    ) -> Self {
        let mut coords = HashMap::with_capacity(institutions.len());
        for inst in &institutions {
            if coords.contains_key(&inst.key) {
                tracing::warn!(
                    name = %inst.name,
                    key = %inst.key,
                    "institution name normalizes to an existing key; keeping the first coordinate"
                );
                continue;
            }
            coords.insert(inst.key.clone(), inst.position);
        }
        Self {
            institutions,
            edges,
            runs,
            coords,
        }
    }

    pub fn from_readers<N, E, J>(nodes: N, edges: E, epidemics: J) -> SpreadResult<Self>
    where
        N: std::io::Read,
        E: std::io::Read,
        J: std::io::Read,
    {
        let institutions = read_node_table(nodes)?;
        let edges = read_edge_table(edges)?;
        let runs = read_epidemics(epidemics)?;
        Ok(Self::new(institutions, edges, runs))
    }

    #[tracing::instrument]
    pub fn from_paths(paths: &DataPaths) -> SpreadResult<Self> {
        let session = Self::from_readers(
            open(&paths.nodes)?,
            open(&paths.edges)?,
            open(&paths.epidemics)?,
        )?;
        tracing::info!(
            institutions = session.institutions.len(),
            edges = session.edges.len(),
            runs = session.runs.len(),
            "loaded session data"
        );
        Ok(session)
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    pub fn edges(&self) -> &[EdgeRow] {
        &self.edges
    }

    pub fn runs(&self) -> &[EpidemicRun] {
        &self.runs
    }

    pub fn run(&self, idx: usize) -> SpreadResult<&EpidemicRun> {
        self.runs
            .get(idx)
            .ok_or_else(|| SpreadError::data(format!("epidemic run index {idx} out of range")))
    }

    /// Data-space coordinate of an institution by normalized key.
    pub fn coords_of(&self, key: &InstitutionKey) -> Option<Point> {
        self.coords.get(key).copied()
    }

    pub fn matching_runs(&self, p: f64, source: &str) -> Vec<usize> {
        matching_runs(&self.runs, p, source)
    }
}

fn open(path: &Path) -> SpreadResult<BufReader<File>> {
    let f = File::open(path)
        .with_context(|| format!("open input '{}'", path.display()))
        .map_err(SpreadError::from)?;
    Ok(BufReader::new(f))
}

#[cfg(test)]
#[path = "../../tests/unit/data/session.rs"]
mod tests;
