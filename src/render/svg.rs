use std::fmt::Write as _;

use crate::{
    foundation::color::Color,
    scene::graph::{Element, Geometry, SceneGraph, Style},
};

/// Serialize the scene as a standalone SVG document.
///
/// Output depends only on the scene state, so two scenes with equal elements and paint order
/// serialize to identical strings.
pub fn to_svg(scene: &SceneGraph) -> String {
    let w = num(scene.width());
    let h = num(scene.height());
    let mut out = String::with_capacity(256 + scene.element_count() * 160);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    out.push('\n');

    for layer in scene.layers() {
        let _ = writeln!(out, r#"<g id="{}">"#, escape(&layer.name));
        for &id in &layer.children {
            if let Some(el) = scene.element(id) {
                write_element(&mut out, el);
            }
        }
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    out
}

fn write_element(out: &mut String, el: &Element) {
    let id = el
        .dom_id
        .as_deref()
        .map(|d| format!(r#" id="{}""#, escape(d)))
        .unwrap_or_default();
    match &el.geometry {
        Geometry::Circle { cx, cy, r } => {
            let _ = write!(
                out,
                r#"<circle{id} cx="{}" cy="{}" r="{}""#,
                num(*cx),
                num(*cy),
                num(*r)
            );
            write_style(out, &el.style);
            out.push_str("/>\n");
        }
        Geometry::Line {
            x1,
            y1,
            x2,
            y2,
            flipped,
        } => {
            // Dashes run from (x1, y1); a flipped line is emitted back to front.
            let (a, b) = if *flipped {
                ((*x2, *y2), (*x1, *y1))
            } else {
                ((*x1, *y1), (*x2, *y2))
            };
            let _ = write!(
                out,
                r#"<line{id} x1="{}" y1="{}" x2="{}" y2="{}""#,
                num(a.0),
                num(a.1),
                num(b.0),
                num(b.1)
            );
            write_style(out, &el.style);
            out.push_str("/>\n");
        }
        Geometry::Text {
            x,
            y,
            content,
            font_family,
            font_size,
        } => {
            let _ = write!(
                out,
                r#"<text{id} x="{}" y="{}" font-family="{}" font-size="{}""#,
                num(*x),
                num(*y),
                escape(font_family),
                num(*font_size)
            );
            write_style(out, &el.style);
            let _ = writeln!(out, ">{}</text>", escape(content));
        }
    }
}

fn write_style(out: &mut String, style: &Style) {
    let _ = write!(out, r#" fill="{}""#, paint(style.fill));
    if let Some(stroke) = style.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.to_hex(),
            num(style.stroke_width)
        );
    }
    if let Some(dash) = style.dash_array {
        let d = num(dash);
        let _ = write!(
            out,
            r#" stroke-dasharray="{d} {d}" stroke-dashoffset="{}""#,
            num(style.dash_offset)
        );
    }
}

fn paint(c: Option<Color>) -> String {
    c.map_or_else(|| "none".to_owned(), Color::to_hex)
}

/// Fixed three-decimal rendering with trailing zeros trimmed.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_owned();
    }
    s
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
