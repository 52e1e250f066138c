use crate::foundation::error::{SpreadError, SpreadResult};

pub use kurbo::Point;

/// Virtual clock time in milliseconds since the show was constructed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn saturating_add(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    pub fn saturating_sub(self, other: Self) -> u64 {
        self.0.saturating_sub(other.0)
    }
}

/// One of the three side-by-side graph copies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    High,
    Mid,
    Low,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::High, Panel::Mid, Panel::Low];

    pub fn index(self) -> usize {
        match self {
            Self::High => 0,
            Self::Mid => 1,
            Self::Low => 2,
        }
    }

    pub fn from_index(idx: usize) -> SpreadResult<Self> {
        Self::ALL
            .get(idx)
            .copied()
            .ok_or_else(|| SpreadError::validation(format!("panel index {idx} out of range 0..3")))
    }

    /// Prefix used for layer names (`high-prestige-edges`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high-prestige",
            Self::Mid => "mid-prestige",
            Self::Low => "low-prestige",
        }
    }
}

/// Width of the area the three panels are laid out in, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
}

impl Viewport {
    pub fn new(width: f64) -> SpreadResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(SpreadError::validation(format!(
                "viewport width must be finite and > 0 (got {width})"
            )));
        }
        Ok(Self { width })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
