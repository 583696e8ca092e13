// File: crates/barchart-core/src/surface.rs
// Summary: Abstract render surface: create/update/remove styled elements with
// optional animated transitions. Renderer-agnostic; backends own the clock.

/// Opaque handle to one element on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Partial style update. `None` fields are left untouched by the receiving
/// surface; label text is opaque content, never interpreted by the core.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StylePatch {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub opacity: Option<f64>,
    /// Opaque label/tooltip text. An empty string clears the label.
    pub label: Option<String>,
    /// Render the label rotated vertically.
    pub vertical_label: Option<bool>,
    /// Element class hint for backends ("container", "bar", "reference").
    /// Set once at creation.
    pub class: Option<String>,
}

impl StylePatch {
    pub fn left(mut self, v: f64) -> Self { self.left = Some(v); self }
    pub fn top(mut self, v: f64) -> Self { self.top = Some(v); self }
    pub fn width(mut self, v: f64) -> Self { self.width = Some(v); self }
    pub fn height(mut self, v: f64) -> Self { self.height = Some(v); self }
    pub fn opacity(mut self, v: f64) -> Self { self.opacity = Some(v); self }
    pub fn label(mut self, text: impl Into<String>) -> Self { self.label = Some(text.into()); self }
    pub fn vertical_label(mut self, v: bool) -> Self { self.vertical_label = Some(v); self }
    pub fn class(mut self, name: impl Into<String>) -> Self { self.class = Some(name.into()); self }
}

/// Animated application of a style patch: the change starts `delay_ms` after
/// the command is issued and interpolates over `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub duration_ms: u32,
    pub delay_ms: u32,
}

impl Transition {
    pub const fn new(duration_ms: u32) -> Self {
        Self { duration_ms, delay_ms: 0 }
    }
    pub const fn delayed(duration_ms: u32, delay_ms: u32) -> Self {
        Self { duration_ms, delay_ms }
    }
}

/// Minimal capability set the engine draws through.
///
/// Supersede contract: a later `update` touching a property replaces any
/// pending or in-flight transition for that property, retargeting from
/// whatever value the property holds when the new transition starts. A full
/// redraw therefore cancels-and-restarts an in-flight one; there is no
/// separate cancellation call.
pub trait Surface {
    /// Create an element with initial style attributes; unspecified numeric
    /// properties default to 0.0 and opacity to 1.0.
    fn create(&mut self, style: StylePatch) -> ElementId;
    /// Apply a style patch, immediately (`None`) or animated.
    fn update(&mut self, id: ElementId, style: StylePatch, transition: Option<Transition>);
    /// Remove the element `delay_ms` after this command is issued.
    fn remove(&mut self, id: ElementId, delay_ms: u32);
}
