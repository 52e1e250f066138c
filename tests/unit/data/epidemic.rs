use super::*;
use std::io::Cursor;

const DATASET: &str = r#"[
  {
    "p": 0.075,
    "source_inst": "Alpha U",
    "size": 0.4,
    "path": [
      { "timestep": 0, "source": null, "target": "Alpha U" },
      { "timestep": 1, "source": "Alpha U", "target": "Beta U" },
      { "timestep": 1, "source": "Alpha U", "target": "Gamma" },
      { "timestep": 2, "target": "Delta" }
    ]
  },
  { "p": 0.5, "source_inst": "Alpha U", "path": [] }
]"#;

#[test]
fn parses_runs_and_ignores_unknown_fields() {
    let runs = read_epidemics(Cursor::new(DATASET)).unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].path.len(), 4);
    assert_eq!(runs[0].path[0].source, None);
    assert_eq!(runs[0].path[3].source, None);
    assert_eq!(runs[1].path.len(), 0);
}

#[test]
fn entries_at_skips_seed_and_keeps_order() {
    let runs = read_epidemics(Cursor::new(DATASET)).unwrap();
    let run = &runs[0];
    assert_eq!(run.entries_at(0).count(), 0);
    assert_eq!(
        run.entries_at(1).collect::<Vec<_>>(),
        vec![("Alpha U", "Beta U"), ("Alpha U", "Gamma")]
    );
    assert_eq!(run.entries_at(2).count(), 0);
    assert_eq!(run.entries_at(-1).count(), 0);
}

#[test]
fn matches_uses_probability_tolerance() {
    let runs = read_epidemics(Cursor::new(DATASET)).unwrap();
    assert!(runs[0].matches(0.075, "Alpha U"));
    assert!(runs[0].matches(0.075 + 1e-12, "Alpha U"));
    assert!(!runs[0].matches(0.08, "Alpha U"));
    assert!(!runs[0].matches(0.075, "Beta U"));
}

#[test]
fn negative_timestep_is_rejected() {
    let bad = r#"[{ "p": 0.1, "source_inst": "A", "path": [{ "timestep": -1, "target": "A" }] }]"#;
    let err = read_epidemics(Cursor::new(bad)).unwrap_err();
    assert!(err.to_string().contains("data error"));
}
