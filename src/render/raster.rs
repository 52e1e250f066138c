use std::sync::Arc;

use crate::{
    foundation::error::{SpreadError, SpreadResult},
    render::frame::{FrameRGBA, RenderSettings},
};

const MAX_DIM: u32 = 16_384;

/// Parses and rasterizes SVG documents with a shared font database.
///
/// Building the font database is the expensive part, so keep one rasterizer per worker.
#[derive(Clone, Debug)]
pub struct SvgRasterizer {
    settings: RenderSettings,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    pub fn new(settings: RenderSettings) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if settings.system_fonts {
            db.load_system_fonts();
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self {
            settings,
            fontdb: Arc::new(db),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn rasterize(&self, svg: &str) -> SpreadResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| SpreadError::render(format!("parse svg: {e}")))?;

        let size = tree.size();
        let width = to_px(size.width())?;
        let height = to_px(size.height())?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| SpreadError::render("failed to allocate pixmap"))?;
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
        }
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

/// One-shot convenience over [`SvgRasterizer`].
pub fn rasterize_svg(svg: &str, settings: &RenderSettings) -> SpreadResult<FrameRGBA> {
    SvgRasterizer::new(settings.clone()).rasterize(svg)
}

fn to_px(v: f32) -> SpreadResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(SpreadError::render("svg has invalid width/height"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(SpreadError::render(format!(
            "svg raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
