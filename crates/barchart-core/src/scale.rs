// File: crates/barchart-core/src/scale.rs
// Summary: Value domain derivation, custom-scale overrides, and the vertical pixel scale.

use crate::error::ChartError;

/// Numeric range mapped onto the vertical pixel extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Replace either endpoint independently. Callers decide whether the
    /// override is in effect at all (custom-scale mode is an explicit
    /// opt-in; a recorded override is otherwise ignored).
    pub fn apply_override(self, ov: ScaleOverride) -> Self {
        Self {
            min: ov.min.unwrap_or(self.min),
            max: ov.max.unwrap_or(self.max),
        }
    }

    pub fn span(&self) -> f64 { self.max - self.min }
}

/// Optional user-supplied endpoints; each side applies independently.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ScaleOverride {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

/// Derive the domain from observed values. An empty slice is rejected
/// explicitly rather than letting NaN propagate out of the fold.
pub fn derive_domain(values: &[f64]) -> Result<Domain, ChartError> {
    if values.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    Ok(Domain { min, max })
}

/// Vertical value scale mapping `domain` onto `[0, range_px]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub domain: Domain,
    pub range_px: f64,
}

impl ValueScale {
    pub const fn new(domain: Domain, range_px: f64) -> Self {
        Self { domain, range_px }
    }

    /// Pixel height for `value`: `(v - min) / (max - min) * range`.
    ///
    /// Degenerate domains (all values equal, inverted or non-finite span)
    /// yield 0.0: every bar renders at zero height instead of erroring or
    /// dividing by zero. Values outside the domain scale past the range
    /// endpoints without clamping.
    #[inline]
    pub fn to_px(&self, value: f64) -> f64 {
        let span = self.domain.span();
        if !span.is_finite() || span <= 0.0 {
            return 0.0;
        }
        (value - self.domain.min) / span * self.range_px
    }
}
