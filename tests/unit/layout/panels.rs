use super::*;

fn layout(width: f64) -> PanelLayout {
    PanelLayout::new(Viewport::new(width).unwrap(), &LayoutConfig::default()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn panel_offsets_are_equally_spaced_thirds() {
    let l = layout(1170.0);
    let offset = l.panel_offset(Panel::Mid);
    assert_eq!(l.panel_offset(Panel::High), 0.0);
    assert!(close(offset, 390.0));
    assert!(close(l.panel_offset(Panel::Low), 2.0 * offset));
}

#[test]
fn network_width_gap_and_radius_follow_viewport() {
    let l = layout(1170.0);
    assert!(close(l.network_width(), 300.0));
    assert!(close(l.gap(), 90.0));
    assert!(close(l.node_radius(false), 3.75));
    assert!(close(l.node_radius(true), 3.75 * 7.0 / 6.0));
    assert!(close(l.canvas_height(), 370.0));
}

#[test]
fn place_maps_domain_corners_into_each_panel() {
    let l = layout(1170.0);
    let lo = l.place(Point::new(154.0, 141.0), Panel::High);
    let hi = l.place(Point::new(677.0, 665.0), Panel::High);
    assert!(close(lo.x, 20.0) && close(lo.y, 20.0));
    assert!(close(hi.x, 300.0) && close(hi.y, 300.0));

    let shifted = l.place(Point::new(154.0, 141.0), Panel::Low);
    assert!(close(shifted.x, 20.0 + 780.0));
    assert!(close(shifted.y, 20.0));
}

#[test]
fn relative_layout_is_stable_across_widths() {
    let a = layout(1170.0);
    let b = layout(2340.0);
    let p = Point::new(400.0, 500.0);
    for panel in Panel::ALL {
        let pa = a.place(p, panel);
        let pb = b.place(p, panel);
        assert!(close(pa.x - a.place(p, Panel::High).x, a.panel_offset(panel)));
        assert!(close(pb.x - b.place(p, Panel::High).x, b.panel_offset(panel)));
        assert!(close(pa.y, a.place(p, Panel::Low).y));
        assert!(close(
            a.panel_offset(panel) / a.viewport().width,
            b.panel_offset(panel) / b.viewport().width
        ));
    }
}

#[test]
fn same_width_is_idempotent() {
    assert_eq!(layout(987.0), layout(987.0));
}

#[test]
fn legend_sits_below_panels() {
    let l = layout(1170.0);
    let legend = l.legend();
    assert!(close(legend.source_swatch.x, 420.0));
    assert!(close(legend.source_swatch.y, 340.0));
    assert!(close(legend.source_label.x, 435.0));
    assert!(close(legend.infected_swatch.x, 650.0));
    assert!(close(legend.infected_label.y, 345.0));
}
