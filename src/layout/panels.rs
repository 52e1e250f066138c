use crate::{
    config::LayoutConfig,
    foundation::core::{Panel, Point, Viewport},
    foundation::error::SpreadResult,
    foundation::math::LinearScale,
};

/// Legend swatch radius in device pixels; independent of viewport width.
pub const LEGEND_SWATCH_RADIUS: f64 = 5.5;
pub const LEGEND_FONT_FAMILY: &str = "Helvetica";
pub const LEGEND_FONT_SIZE: f64 = 14.0;

/// Device-space geometry of the three panels for one viewport width.
///
/// Pure function of the viewport width and [`LayoutConfig`]; rebuilding it for the same width
/// yields an identical value.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLayout {
    viewport: Viewport,
    network_width: f64,
    gap: f64,
    radius: f64,
    legend_band: f64,
    map_x: LinearScale,
    map_y: LinearScale,
}

/// Positions of the two legend swatches and their labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendLayout {
    pub source_swatch: Point,
    pub source_label: Point,
    pub infected_swatch: Point,
    pub infected_label: Point,
}

impl PanelLayout {
    pub fn new(viewport: Viewport, cfg: &LayoutConfig) -> SpreadResult<Self> {
        let network_width = viewport.width / cfg.width_fraction;
        let gap = viewport.width / 3.0 - network_width;
        let map_x = LinearScale::new(cfg.domain_x, [cfg.margin, network_width])?;
        let map_y = LinearScale::new(cfg.domain_y, [cfg.margin, network_width])?;
        Ok(Self {
            viewport,
            network_width,
            gap,
            radius: network_width * cfg.radius_fraction,
            legend_band: cfg.legend_band,
            map_x,
            map_y,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Side length of one panel's square.
    pub fn network_width(&self) -> f64 {
        self.network_width
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Horizontal offset of `panel`: `(network_width + gap) * index`.
    pub fn panel_offset(&self, panel: Panel) -> f64 {
        (self.network_width + self.gap) * panel.index() as f64
    }

    /// Map a data-space coordinate into device space within `panel`.
    pub fn place(&self, data: Point, panel: Panel) -> Point {
        Point::new(
            self.map_x.apply(data.x) + self.panel_offset(panel),
            self.map_y.apply(data.y),
        )
    }

    pub fn node_radius(&self, is_source: bool) -> f64 {
        if is_source {
            self.radius + self.radius / 6.0
        } else {
            self.radius
        }
    }

    pub fn canvas_height(&self) -> f64 {
        self.network_width + self.legend_band
    }

    pub fn legend(&self) -> LegendLayout {
        let nw = self.network_width;
        LegendLayout {
            source_swatch: Point::new(nw * 1.4, nw + 40.0),
            source_label: Point::new(nw * 1.4 + 15.0, nw + 45.0),
            infected_swatch: Point::new(nw * 2.2 - 10.0, nw + 40.0),
            infected_label: Point::new(nw * 2.2 + 5.0, nw + 45.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/panels.rs"]
mod tests;
