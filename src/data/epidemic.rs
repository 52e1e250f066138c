use crate::foundation::error::{SpreadError, SpreadResult};

/// A precomputed infection trace for one (probability, source institution) pair.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EpidemicRun {
    pub p: f64,
    pub source_inst: String,
    pub path: Vec<PathEntry>,
}

/// One infection event. A `None` source marks the seed and is never animated.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PathEntry {
    pub timestep: u32,
    #[serde(default)]
    pub source: Option<String>,
    pub target: String,
}

impl EpidemicRun {
    /// Entries that transition at `tick`, in dataset order. Seed entries are excluded.
    pub fn entries_at(&self, tick: i32) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.path.iter().filter_map(move |e| {
            if i64::from(e.timestep) != i64::from(tick) {
                return None;
            }
            e.source.as_deref().map(|src| (src, e.target.as_str()))
        })
    }

    pub fn matches(&self, p: f64, source: &str) -> bool {
        (self.p - p).abs() <= PROBABILITY_TOLERANCE && self.source_inst == source
    }
}

/// Two probabilities closer than this select the same run.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Indices of every run for probability `p` seeded at `source`, in dataset order.
pub fn matching_runs(runs: &[EpidemicRun], p: f64, source: &str) -> Vec<usize> {
    runs.iter()
        .enumerate()
        .filter(|(_, r)| r.matches(p, source))
        .map(|(i, _)| i)
        .collect()
}

/// Parse the epidemic dataset (a JSON array of runs).
pub fn read_epidemics<R: std::io::Read>(r: R) -> SpreadResult<Vec<EpidemicRun>> {
    serde_json::from_reader(r)
        .map_err(|e| SpreadError::data(format!("parse epidemic dataset JSON: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/data/epidemic.rs"]
mod tests;
