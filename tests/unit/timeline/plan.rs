use super::*;
use crate::{config::PanelSources, data::epidemic::read_epidemics};
use std::io::Cursor;

const RUNS: &str = r#"[
  { "p": 0.0750000000001, "source_inst": "Alpha", "path": [] },
  { "p": 0.075, "source_inst": "Alpha", "path": [
    { "timestep": 0, "source": null, "target": "Alpha" },
    { "timestep": 1, "source": "Alpha", "target": "Beta" },
    { "timestep": 1, "source": "Alpha", "target": "Gamma" }
  ] },
  { "p": 0.2, "source_inst": "Beta", "path": [] }
]"#;

fn config() -> ShowConfig {
    ShowConfig {
        sources: PanelSources {
            high: "Alpha".to_owned(),
            mid: "Beta".to_owned(),
            low: "Gamma".to_owned(),
        },
        ..ShowConfig::default()
    }
}

#[test]
fn last_match_wins_and_missing_panels_are_none() {
    let runs = read_epidemics(Cursor::new(RUNS)).unwrap();
    assert_eq!(select_runs(&runs, &config()), [Some(1), None, None]);
}

#[test]
fn last_of_several_exact_matches_wins() {
    let json = r#"[
  { "p": 0.075, "source_inst": "Alpha", "path": [] },
  { "p": 0.075, "source_inst": "Beta", "path": [] },
  { "p": 0.075, "source_inst": "Alpha", "path": [] }
]"#;
    let runs = read_epidemics(Cursor::new(json)).unwrap();
    assert_eq!(select_runs(&runs, &config()), [Some(2), Some(1), None]);
}

#[test]
fn plan_lists_transitions_per_tick() {
    let runs = read_epidemics(Cursor::new(RUNS)).unwrap();
    let plan = TimelinePlan::from_runs(&runs, &config());

    assert_eq!(plan.reset_at_ms, 7200);
    assert_eq!(plan.cycle_ms, 7450);
    assert_eq!(plan.transition_count(), 2);

    let high = &plan.panels[0];
    assert_eq!(high.ticks.len(), 6);
    assert_eq!(high.ticks[0].tick, -1);
    assert!(high.ticks[1].transitions.is_empty());
    assert_eq!(high.ticks[2].at_ms, 2400);
    assert_eq!(
        high.ticks[2].transitions[1],
        PlannedTransition {
            source: "Alpha".to_owned(),
            target: "Gamma".to_owned(),
        }
    );
    assert!(plan.panels[1].ticks.iter().all(|t| t.transitions.is_empty()));
}

#[test]
fn plan_serializes_to_json() {
    let runs = read_epidemics(Cursor::new(RUNS)).unwrap();
    let json = serde_json::to_value(TimelinePlan::from_runs(&runs, &config())).unwrap();
    assert_eq!(json["panels"][0]["panel"], "high");
    assert_eq!(json["panels"][2]["run"], serde_json::Value::Null);
}
