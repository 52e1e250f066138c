use super::*;
use std::io::Cursor;

#[test]
fn empty_object_yields_reference_defaults() {
    let cfg = ShowConfig::from_reader(Cursor::new("{}")).unwrap();
    assert_eq!(cfg, ShowConfig::default());
    assert_eq!(cfg.probability, 0.075);
    assert_eq!(cfg.sources.for_panel(Panel::High), "Stanford University");
    assert_eq!(
        cfg.sources.for_panel(Panel::Low),
        "University of Nebraska at Lincoln"
    );
    assert_eq!(cfg.timing.tick_interval_ms, 1200);
    assert_eq!(cfg.palette.source, Color::rgb(0xaf, 0x00, 0x2d));
}

#[test]
fn partial_sections_keep_other_defaults() {
    let json = r##"{ "timing": { "tick_interval_ms": 100 }, "palette": { "lit": "#010203" } }"##;
    let cfg = ShowConfig::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(cfg.timing.tick_interval_ms, 100);
    assert_eq!(cfg.timing.recolor_ms, 300);
    assert_eq!(cfg.palette.lit, Color::rgb(1, 2, 3));
    assert_eq!(cfg.palette.lit_edge, Color::rgb(0x44, 0x44, 0x44));
}

#[test]
fn default_timing_matches_six_tick_cycle() {
    let t = Timing::default();
    assert_eq!(t.tick_count(), 6);
    assert_eq!(t.tick_offset_ms(-1), 0);
    assert_eq!(t.tick_offset_ms(0), 1200);
    assert_eq!(t.tick_offset_ms(4), 6000);
    assert_eq!(t.reset_offset_ms(), 7200);
    assert_eq!(t.cycle_ms(), 7450);
}

#[test]
fn validation_rejects_bad_values() {
    let mut cfg = ShowConfig::default();
    cfg.timing.tick_interval_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = ShowConfig::default();
    cfg.timing.last_tick = -2;
    assert!(cfg.validate().is_err());

    let mut cfg = ShowConfig::default();
    cfg.layout.domain_x = [3.0, 3.0];
    assert!(cfg.validate().is_err());

    let mut cfg = ShowConfig::default();
    cfg.sources.mid = "  ".to_owned();
    assert!(cfg.validate().is_err());

    let mut cfg = ShowConfig::default();
    cfg.probability = 1.5;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ShowConfig::from_reader(Cursor::new("{ not json")).unwrap_err();
    assert!(matches!(err, SpreadError::Serde(_)));
}

#[test]
fn easing_defaults_to_linear_and_parses_by_name() {
    let t = Timing::default();
    assert_eq!((t.recolor_ease, t.draw_in_ease), (Ease::Linear, Ease::Linear));

    let json = r#"{ "timing": { "draw_in_ease": "in_out_cubic" } }"#;
    let cfg = ShowConfig::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(cfg.timing.draw_in_ease, Ease::InOutCubic);
    assert_eq!(cfg.timing.recolor_ease, Ease::Linear);
}
