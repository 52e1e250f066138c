/// Strip every space, ampersand and comma from an institution name.
///
/// `None` maps to the empty string, which is what an edge row without a far endpoint keys to.
/// The result is stable under repetition: `normalize_name(Some(&normalize_name(x))) ==
/// normalize_name(x)`.
pub fn normalize_name(name: Option<&str>) -> String {
    match name {
        None => String::new(),
        Some(s) => s.chars().filter(|c| !matches!(c, ' ' | '&' | ',')).collect(),
    }
}

/// Normalized institution name used as the join key between tables, runs and scene elements.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct InstitutionKey(String);

impl InstitutionKey {
    pub fn from_name(name: &str) -> Self {
        Self(normalize_name(Some(name)))
    }

    pub fn from_optional(name: Option<&str>) -> Self {
        Self(normalize_name(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for InstitutionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unordered pair of institution keys identifying one edge of the network.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: InstitutionKey,
    hi: InstitutionKey,
}

impl EdgeKey {
    pub fn new(a: InstitutionKey, b: InstitutionKey) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn from_names(a: Option<&str>, b: Option<&str>) -> Self {
        Self::new(InstitutionKey::from_optional(a), InstitutionKey::from_optional(b))
    }

    pub fn contains(&self, key: &InstitutionKey) -> bool {
        &self.lo == key || &self.hi == key
    }
}

/// Element id of an edge in its row orientation (`{source}-{target}`).
pub fn edge_element_id(source: &InstitutionKey, target: &InstitutionKey) -> String {
    format!("{source}-{target}")
}

#[cfg(test)]
#[path = "../../tests/unit/ident/key.rs"]
mod tests;
