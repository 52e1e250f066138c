use super::*;

#[test]
fn panel_indices_round_trip() {
    for panel in Panel::ALL {
        assert_eq!(Panel::from_index(panel.index()).unwrap(), panel);
    }
    assert!(Panel::from_index(3).is_err());
}

#[test]
fn panel_labels_are_layer_prefixes() {
    assert_eq!(Panel::High.label(), "high-prestige");
    assert_eq!(Panel::Mid.label(), "mid-prestige");
    assert_eq!(Panel::Low.label(), "low-prestige");
}

#[test]
fn viewport_rejects_non_positive_width() {
    assert!(Viewport::new(0.0).is_err());
    assert!(Viewport::new(-5.0).is_err());
    assert!(Viewport::new(f64::NAN).is_err());
    assert_eq!(Viewport::new(1280.0).unwrap().width, 1280.0);
}

#[test]
fn millis_saturates() {
    assert_eq!(Millis(u64::MAX).saturating_add(5), Millis(u64::MAX));
    assert_eq!(Millis(3).saturating_sub(Millis(10)), 0);
    assert_eq!(Millis(10).saturating_sub(Millis(3)), 7);
}
