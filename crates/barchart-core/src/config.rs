// File: crates/barchart-core/src/config.rs
// Summary: Chart configuration with defaults.

/// Which `DataPoint` field feeds the always-visible bar label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelSource {
    Key,
    Description,
}

/// Default per-phase animation length, in milliseconds.
pub const DEFAULT_TRANSITION_MS: u32 = 500;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Opt-in for the recorded scale override. Without this flag a supplied
    /// override is kept but ignored, matching the original contract.
    pub use_custom_scale: bool,
    /// Cap on rendered bar width; slack is redistributed into the gaps.
    pub max_bar_width: Option<f64>,
    /// Always-visible bar label, if any.
    pub display_label: Option<LabelSource>,
    /// Enables the per-key tooltip toggles on the controller.
    pub show_tooltips: bool,
    /// Length of each animation phase.
    pub transition_duration_ms: u32,
    /// Rotate bar labels vertically.
    pub use_vertical_labels: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            use_custom_scale: false,
            max_bar_width: None,
            display_label: None,
            show_tooltips: false,
            transition_duration_ms: DEFAULT_TRANSITION_MS,
            use_vertical_labels: false,
        }
    }
}
