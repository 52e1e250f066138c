use super::*;

#[test]
fn dist_is_euclidean() {
    assert_eq!(dist(0.0, 0.0, 3.0, 4.0), 5.0);
    assert_eq!(dist(3.0, 4.0, 0.0, 0.0), 5.0);
    assert_eq!(dist(1.5, 1.5, 1.5, 1.5), 0.0);
}

#[test]
fn linear_scale_maps_endpoints_and_extrapolates() {
    let s = LinearScale::new([154.0, 677.0], [20.0, 300.0]).unwrap();
    assert!((s.apply(154.0) - 20.0).abs() < 1e-9);
    assert!((s.apply(677.0) - 300.0).abs() < 1e-9);
    let mid = s.apply((154.0 + 677.0) / 2.0);
    assert!((mid - 160.0).abs() < 1e-9);
    assert!(s.apply(100.0) < 20.0);
}

#[test]
fn linear_scale_rejects_degenerate_domain() {
    assert!(LinearScale::new([5.0, 5.0], [0.0, 1.0]).is_err());
    assert!(LinearScale::new([0.0, 1.0], [0.0, f64::INFINITY]).is_err());
}
