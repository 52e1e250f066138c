use crate::{
    config::ShowConfig,
    data::epidemic::{EpidemicRun, matching_runs},
    foundation::core::Panel,
    timeline::animator::TimelineAnimator,
};

/// Pick one run per panel for the configured probability and panel source.
///
/// A panel without a match gets `None` and sits the cycle out; with several matches the last in
/// dataset order wins.
pub fn select_runs(runs: &[EpidemicRun], config: &ShowConfig) -> [Option<usize>; 3] {
    Panel::ALL.map(|panel| {
        let source = config.sources.for_panel(panel);
        let found = matching_runs(runs, config.probability, source);
        match found.as_slice() {
            [] => {
                tracing::warn!(
                    panel = panel.label(),
                    source,
                    p = config.probability,
                    "no epidemic run matches; panel stays idle this cycle"
                );
                None
            }
            [only] => Some(*only),
            [.., last] => {
                tracing::warn!(
                    panel = panel.label(),
                    source,
                    matches = found.len(),
                    "several epidemic runs match; using the last"
                );
                Some(*last)
            }
        }
    })
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlannedTransition {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TickPlan {
    pub tick: i32,
    /// Offset from the cycle start.
    pub at_ms: u64,
    pub transitions: Vec<PlannedTransition>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PanelPlan {
    pub panel: Panel,
    pub source: String,
    pub run: Option<usize>,
    pub ticks: Vec<TickPlan>,
}

/// Dry run of one cycle: which run each panel plays and what every tick will animate.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelinePlan {
    pub probability: f64,
    pub reset_at_ms: u64,
    pub cycle_ms: u64,
    pub panels: Vec<PanelPlan>,
}

impl TimelinePlan {
    pub fn from_runs(runs: &[EpidemicRun], config: &ShowConfig) -> Self {
        let timing = &config.timing;
        let selected = select_runs(runs, config);

        let panels = Panel::ALL
            .iter()
            .map(|&panel| {
                let run = selected[panel.index()];
                let ticks = (timing.first_tick..=timing.last_tick)
                    .map(|tick| TickPlan {
                        tick,
                        at_ms: timing.tick_offset_ms(tick),
                        transitions: match run {
                            Some(idx) if tick >= 0 => runs[idx]
                                .entries_at(tick)
                                .map(|(source, target)| PlannedTransition {
                                    source: source.to_owned(),
                                    target: target.to_owned(),
                                })
                                .collect(),
                            _ => Vec::new(),
                        },
                    })
                    .collect();
                PanelPlan {
                    panel,
                    source: config.sources.for_panel(panel).to_owned(),
                    run,
                    ticks,
                }
            })
            .collect();

        Self {
            probability: config.probability,
            reset_at_ms: timing.reset_offset_ms(),
            cycle_ms: timing.cycle_ms(),
            panels,
        }
    }

    pub fn transition_count(&self) -> usize {
        self.panels
            .iter()
            .flat_map(|p| &p.ticks)
            .map(|t| t.transitions.len())
            .sum()
    }
}

impl TimelineAnimator {
    /// Plan one cycle without touching a surface.
    pub fn plan(&self) -> TimelinePlan {
        TimelinePlan::from_runs(self.session().runs(), self.config())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/plan.rs"]
mod tests;
