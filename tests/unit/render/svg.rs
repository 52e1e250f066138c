use super::*;
use crate::scene::surface::{DrawingSurface, Property, ShapeSpec, Value};

fn scene() -> SceneGraph {
    let mut g = SceneGraph::new();
    g.set_canvas_size(100.0, 50.0);
    let edges = g.create_layer("edges");
    let labels = g.create_layer("legend");
    let line = g
        .create_element(
            edges,
            ShapeSpec::Line {
                x1: 1.0,
                y1: 2.0,
                x2: 30.5,
                y2: 40.0,
            },
        )
        .unwrap();
    g.set_color(line, Property::Stroke, Color::rgb(0x44, 0x44, 0x44))
        .unwrap();
    g.set_number(line, Property::StrokeWidth, 0.6).unwrap();
    g.set_number(line, Property::DashArray, 5.0).unwrap();
    g.set_number(line, Property::DashOffset, 2.5).unwrap();

    let text = g
        .create_element(
            labels,
            ShapeSpec::Text {
                x: 10.0,
                y: 45.0,
                content: "A & B <C>".to_owned(),
                font_family: "Helvetica".to_owned(),
                font_size: 14.0,
            },
        )
        .unwrap();
    g.set_color(text, Property::Fill, Color::rgb(0, 0, 0)).unwrap();
    g
}

#[test]
fn emits_layers_in_order_with_dash_attributes() {
    let svg = to_svg(&scene());
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50""#));
    let edges = svg.find(r#"<g id="edges">"#).unwrap();
    let legend = svg.find(r#"<g id="legend">"#).unwrap();
    assert!(edges < legend);
    assert!(svg.contains(concat!(
        r##"<line x1="1" y1="2" x2="30.5" y2="40" fill="none" stroke="#444444" "##,
        r#"stroke-width="0.6" stroke-dasharray="5 5" stroke-dashoffset="2.5"/>"#,
    )));
    assert!(svg.contains(">A &amp; B &lt;C&gt;</text>"));
}

#[test]
fn flipped_line_is_written_back_to_front() {
    let mut g = scene();
    let line = g.layers()[0].children[0];
    g.set(line, Property::Flipped, Value::Flag(true)).unwrap();
    let svg = to_svg(&g);
    assert!(svg.contains(r#"<line x1="30.5" y1="40" x2="1" y2="2""#));
}

#[test]
fn output_is_deterministic() {
    assert_eq!(to_svg(&scene()), to_svg(&scene()));
}

#[test]
fn numbers_are_trimmed() {
    assert_eq!(num(3.0), "3");
    assert_eq!(num(0.125), "0.125");
    assert_eq!(num(1.0 / 3.0), "0.333");
    assert_eq!(num(-0.0001), "0");
    assert_eq!(num(f64::NAN), "0");
}
