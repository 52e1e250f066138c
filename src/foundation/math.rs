use crate::foundation::error::{SpreadError, SpreadResult};

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`.
pub fn dist(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = (x1 - x2).abs();
    let dy = (y1 - y2).abs();
    (dx * dx + dy * dy).sqrt()
}

/// Affine map from a closed `domain` interval onto a `range` interval. Values outside the
/// domain extrapolate linearly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> SpreadResult<Self> {
        let span = domain[1] - domain[0];
        if !span.is_finite() || span == 0.0 {
            return Err(SpreadError::validation(format!(
                "scale domain [{}, {}] is degenerate",
                domain[0], domain[1]
            )));
        }
        if !range[0].is_finite() || !range[1].is_finite() {
            return Err(SpreadError::validation("scale range must be finite"));
        }
        Ok(Self { domain, range })
    }

    pub fn apply(&self, v: f64) -> f64 {
        let t = (v - self.domain[0]) / (self.domain[1] - self.domain[0]);
        self.range[0] + (self.range[1] - self.range[0]) * t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
