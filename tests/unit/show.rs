use super::*;
use crate::{config::PanelSources, scene::surface::ElementId};
use std::io::Cursor;

const NODES: &str = "name,x,y\nA,154,141\nB,157,145\n";
const EDGES: &str = "x1,y1,x2,y2,spanning,source,target\n154,141,157,145,1,A,B\n";
const RUNS: &str = r#"[
  { "p": 0.075, "source_inst": "A", "path": [
    { "timestep": 1, "source": "A", "target": "B" }
  ] }
]"#;

fn show(width: f64) -> Show {
    let session =
        Session::from_readers(Cursor::new(NODES), Cursor::new(EDGES), Cursor::new(RUNS)).unwrap();
    let config = ShowConfig {
        sources: PanelSources {
            high: "A".to_owned(),
            mid: "A".to_owned(),
            low: "B".to_owned(),
        },
        ..ShowConfig::default()
    };
    Show::new(Arc::new(session), Arc::new(config), Viewport::new(width).unwrap()).unwrap()
}

fn same_elements(a: &SceneGraph, b: &SceneGraph) -> bool {
    a.element_count() == b.element_count()
        && (0..a.element_count() as u32).all(|i| a.element(ElementId(i)) == b.element(ElementId(i)))
}

#[test]
fn nothing_happens_before_start() {
    let mut s = show(1200.0);
    assert!(s.advance_to(Millis(10_000)).unwrap().is_empty());
    assert_eq!(s.state(), AnimatorState::Idle);
    assert_eq!(s.now(), Millis(10_000));
}

#[test]
fn first_cycle_begins_after_startup_delay() {
    let mut s = show(1200.0);
    s.start(Millis::ZERO).unwrap();
    assert!(s.advance_to(Millis(249)).unwrap().is_empty());

    let outcomes = s.advance_to(Millis(250)).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0], CueOutcome::Started { cycle: 0 });
    assert!(matches!(&outcomes[1], CueOutcome::Ticked(r) if r.tick == -1));
    assert_eq!(s.state(), AnimatorState::Playing { tick: -1 });
}

#[test]
fn full_cycle_wraps_around() {
    let mut s = show(1200.0);
    s.start(Millis::ZERO).unwrap();
    let outcomes = s.advance_to(Millis(250 + 7200 + 250)).unwrap();
    // Start, six ticks, reset, next start, next cycle's first tick.
    assert_eq!(outcomes.len(), 10);
    assert_eq!(outcomes[7], CueOutcome::Reset { cycle: 0 });
    assert_eq!(outcomes[8], CueOutcome::Started { cycle: 1 });
    assert_eq!(s.cycle(), 1);
}

#[test]
fn resize_twice_matches_resize_once() {
    let mut once = show(1200.0);
    let mut twice = show(1200.0);
    for s in [&mut once, &mut twice] {
        s.start(Millis::ZERO).unwrap();
        s.advance_to(Millis(2700)).unwrap();
    }
    once.resize(900.0).unwrap();
    twice.resize(900.0).unwrap();
    twice.resize(900.0).unwrap();
    assert!(same_elements(once.scene(), twice.scene()));
    assert_eq!(twice.viewport().width, 900.0);
}

#[test]
fn resize_mid_animation_keeps_running_transitions() {
    let mut s = show(1200.0);
    s.start(Millis::ZERO).unwrap();
    // Tick 1 fires at 250 + 2400; the draw-in runs for 500 ms.
    s.advance_to(Millis(2650 + 100)).unwrap();
    assert!(s.scene().in_flight() > 0);
    s.resize(800.0).unwrap();
    assert!(s.scene().in_flight() > 0);
    s.advance_to(Millis(2650 + 600)).unwrap();
    assert_eq!(s.scene().in_flight(), 0);
}

#[test]
fn invalid_width_is_rejected() {
    let mut s = show(1200.0);
    assert!(s.resize(0.0).is_err());
    assert_eq!(s.viewport().width, 1200.0);
}
