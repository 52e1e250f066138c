use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::ease::Ease,
    foundation::{
        color::Color,
        core::Panel,
        error::{SpreadError, SpreadResult},
    },
};

/// Everything that parameterizes a show. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Spreading probability selecting one epidemic run per panel.
    pub probability: f64,
    /// Designated source institution (display name) per panel.
    pub sources: PanelSources,
    pub timing: Timing,
    pub layout: LayoutConfig,
    pub palette: Palette,
    pub strokes: StrokeWidths,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            probability: 0.075,
            sources: PanelSources::default(),
            timing: Timing::default(),
            layout: LayoutConfig::default(),
            palette: Palette::default(),
            strokes: StrokeWidths::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelSources {
    pub high: String,
    pub mid: String,
    pub low: String,
}

impl Default for PanelSources {
    fn default() -> Self {
        Self {
            high: "Stanford University".to_owned(),
            mid: "University of Colorado at Boulder".to_owned(),
            low: "University of Nebraska at Lincoln".to_owned(),
        }
    }
}

impl PanelSources {
    pub fn for_panel(&self, panel: Panel) -> &str {
        match panel {
            Panel::High => &self.high,
            Panel::Mid => &self.mid,
            Panel::Low => &self.low,
        }
    }
}

/// Timeline pacing, in virtual milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timing {
    pub tick_interval_ms: u64,
    /// First tick of a cycle. Negative ticks only delay the first visible change.
    pub first_tick: i32,
    pub last_tick: i32,
    pub recolor_ms: u64,
    pub recolor_ease: Ease,
    pub draw_in_ms: u64,
    pub draw_in_ease: Ease,
    /// Pause between scene build (or loop reset) and the next cycle's first tick.
    pub startup_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1200,
            first_tick: -1,
            last_tick: 4,
            recolor_ms: 300,
            recolor_ease: Ease::Linear,
            draw_in_ms: 500,
            draw_in_ease: Ease::Linear,
            startup_delay_ms: 250,
        }
    }
}

impl Timing {
    pub fn tick_count(&self) -> u64 {
        (i64::from(self.last_tick) - i64::from(self.first_tick) + 1).max(0) as u64
    }

    /// Offset of `tick` from the start of its cycle.
    pub fn tick_offset_ms(&self, tick: i32) -> u64 {
        let steps = (i64::from(tick) - i64::from(self.first_tick)).max(0) as u64;
        steps.saturating_mul(self.tick_interval_ms)
    }

    /// Offset of the loop reset from the start of its cycle (one interval after the last tick).
    pub fn reset_offset_ms(&self) -> u64 {
        self.tick_count().saturating_mul(self.tick_interval_ms)
    }

    /// Length of one full cycle including the startup delay that precedes the next one.
    pub fn cycle_ms(&self) -> u64 {
        self.reset_offset_ms().saturating_add(self.startup_delay_ms)
    }
}

/// Layout Engine parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Panel side length is `viewport_width / width_fraction`.
    pub width_fraction: f64,
    /// Data-space x bounds mapped onto `[margin, network_width]`.
    pub domain_x: [f64; 2],
    pub domain_y: [f64; 2],
    pub margin: f64,
    /// Node radius as a fraction of panel side length.
    pub radius_fraction: f64,
    /// Vertical band below the panels holding the legend.
    pub legend_band: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_fraction: 3.9,
            domain_x: [154.0, 677.0],
            domain_y: [141.0, 665.0],
            margin: 20.0,
            radius_fraction: 0.0125,
            legend_band: 70.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub source: Color,
    pub source_stroke: Color,
    pub node_fill: Color,
    pub node_stroke: Color,
    /// Fill of infected nodes.
    pub lit: Color,
    /// Stroke of infected nodes.
    pub lit_stroke: Color,
    /// Stroke of edges once drawn in.
    pub lit_edge: Color,
    pub edge: Color,
    pub spanning_edge: Color,
    pub legend_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            source: Color::rgb(0xaf, 0x00, 0x2d),
            source_stroke: Color::WHITE,
            node_fill: Color::rgb(250, 250, 250),
            node_stroke: Color::rgb(105, 105, 105),
            lit: Color::rgb(0x2b, 0x2b, 0x2b),
            lit_stroke: Color::WHITE,
            lit_edge: Color::rgb(0x44, 0x44, 0x44),
            edge: Color::rgb(211, 211, 211),
            spanning_edge: Color::rgb(170, 170, 170),
            legend_text: Color::rgb(0, 0, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeWidths {
    pub node: f64,
    pub source: f64,
    pub edge: f64,
    pub spanning_edge: f64,
    /// Width edges snap to when their draw-in starts.
    pub active_edge: f64,
}

impl Default for StrokeWidths {
    fn default() -> Self {
        Self {
            node: 0.85,
            source: 0.7,
            edge: 0.5,
            spanning_edge: 1.25,
            active_edge: 0.6,
        }
    }
}

impl ShowConfig {
    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> SpreadResult<Self> {
        let cfg: ShowConfig = serde_json::from_reader(r)
            .map_err(|e| SpreadError::serde(format!("parse show config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> SpreadResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SpreadError::validation(format!("open show config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> SpreadResult<()> {
        if !self.probability.is_finite() || !(0.0..=1.0).contains(&self.probability) {
            return Err(SpreadError::validation(format!(
                "probability must be within [0, 1] (got {})",
                self.probability
            )));
        }
        for panel in Panel::ALL {
            if self.sources.for_panel(panel).trim().is_empty() {
                return Err(SpreadError::validation(format!(
                    "source institution for panel {} must not be empty",
                    panel.label()
                )));
            }
        }

        let t = &self.timing;
        if t.tick_interval_ms == 0 {
            return Err(SpreadError::validation("timing.tick_interval_ms must be > 0"));
        }
        if t.last_tick < t.first_tick {
            return Err(SpreadError::validation(
                "timing.last_tick must be >= timing.first_tick",
            ));
        }

        let l = &self.layout;
        if !l.width_fraction.is_finite() || l.width_fraction <= 0.0 {
            return Err(SpreadError::validation("layout.width_fraction must be > 0"));
        }
        for (name, d) in [("domain_x", l.domain_x), ("domain_y", l.domain_y)] {
            if !(d[0].is_finite() && d[1].is_finite()) || d[0] == d[1] {
                return Err(SpreadError::validation(format!(
                    "layout.{name} must be two distinct finite values"
                )));
            }
        }
        if !l.radius_fraction.is_finite() || l.radius_fraction <= 0.0 {
            return Err(SpreadError::validation("layout.radius_fraction must be > 0"));
        }

        let s = &self.strokes;
        for (name, w) in [
            ("node", s.node),
            ("source", s.source),
            ("edge", s.edge),
            ("spanning_edge", s.spanning_edge),
            ("active_edge", s.active_edge),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(SpreadError::validation(format!(
                    "strokes.{name} must be a finite width >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
