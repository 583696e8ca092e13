// File: crates/barchart-core/src/layout.rs
// Summary: Horizontal slot layout solver (bar width, spacing, left positions).

use log::warn;

/// Solved horizontal layout for `count` bars inside a fixed inner width.
///
/// Bars are twice as wide as the gap between them, with the same gap on both
/// outer edges; capping the width redistributes the slack into the gaps so
/// `count * bar_width + (count + 1) * spacing` still equals the inner width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlotLayout {
    pub bar_width: f64,
    pub spacing: f64,
    pub count: usize,
}

impl SlotLayout {
    /// Solve for `count` bars across `inner_width` pixels, optionally
    /// capping the bar width.
    ///
    /// `count == 0` returns the zero layout. Negative inputs cannot produce
    /// a negative width or spacing: both clamp to zero (with a warning)
    /// rather than rendering inverted rectangles.
    pub fn solve(inner_width: f64, count: usize, max_bar_width: Option<f64>) -> Self {
        if count == 0 {
            return Self { bar_width: 0.0, spacing: 0.0, count: 0 };
        }
        let total = if inner_width < 0.0 {
            warn!("inner width {inner_width} is negative; clamping layout to zero");
            0.0
        } else {
            inner_width
        };
        let n = count as f64;
        let base_spacing = total / (3.0 * n + 1.0);
        let standard_width = 2.0 * base_spacing;

        let mut bar_width = match max_bar_width {
            Some(cap) => standard_width.min(cap),
            None => standard_width,
        };
        if bar_width < 0.0 {
            warn!("bar width cap {max_bar_width:?} is negative; clamping bar width to zero");
            bar_width = 0.0;
        }

        let mut spacing = (total - n * bar_width) / (n + 1.0);
        if spacing < 0.0 {
            warn!("computed spacing {spacing} is negative; clamping to zero");
            spacing = 0.0;
        }

        Self { bar_width, spacing, count }
    }

    /// Left edge of the bar at `index` in current display order.
    #[inline]
    pub fn left(&self, index: usize) -> f64 {
        self.spacing + index as f64 * (self.spacing + self.bar_width)
    }
}
