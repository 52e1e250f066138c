use super::*;

fn settings() -> RenderSettings {
    RenderSettings {
        clear_rgba: Some([255, 255, 255, 255]),
        system_fonts: false,
    }
}

#[test]
fn rasterizes_circle_over_clear_colour() {
    let svg = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10">"#,
        r##"<circle cx="5" cy="5" r="4" fill="#af002d"/></svg>"##,
    );
    let frame = rasterize_svg(svg, &settings()).unwrap();
    assert_eq!((frame.width, frame.height), (20, 10));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(5, 5), Some([0xaf, 0x00, 0x2d, 255]));
    assert_eq!(frame.pixel(15, 5), Some([255, 255, 255, 255]));
}

#[test]
fn transparent_when_no_clear_colour() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"></svg>"#;
    let frame = rasterize_svg(
        svg,
        &RenderSettings {
            clear_rgba: None,
            system_fonts: false,
        },
    )
    .unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn malformed_svg_is_a_render_error() {
    let err = rasterize_svg("<svg", &settings()).unwrap_err();
    assert!(matches!(err, SpreadError::Render(_)));
}
