// File: crates/barchart-core/src/chart.rs
// Summary: Chart controller: owned state, fluent configuration API, and the
// redraw pipeline (layout -> reconcile -> sequence -> retain).

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::config::{ChartConfig, LabelSource};
use crate::data::{DataPoint, Dataset, Key};
use crate::error::ChartError;
use crate::geometry::{clamp, BarGeometry};
use crate::layout::SlotLayout;
use crate::reconcile::reconcile;
use crate::scale::{derive_domain, Domain, ScaleOverride, ValueScale};
use crate::surface::{ElementId, StylePatch, Surface, Transition};
use crate::transition::{BarTarget, PhaseSchedule, Sequencer};
use crate::types::{Insets, HEIGHT, LABEL_BAND, WIDTH};

/// Strategy seam for bar placement and sizing. The default reproduces the
/// standard slot layout and linear value scale; callers may inject an
/// alternative (e.g. logarithmic heights) without touching the controller.
pub trait GeometryPolicy {
    /// Horizontal position (inner coordinates) of the bar at `index` in
    /// display order.
    fn left(&self, layout: &SlotLayout, index: usize) -> f64 {
        layout.left(index)
    }
    /// Pixel height for `value` under `scale`.
    fn height(&self, scale: &ValueScale, value: f64) -> f64 {
        scale.to_px(value)
    }
}

/// Default placement/sizing strategy.
pub struct StandardGeometry;

impl GeometryPolicy for StandardGeometry {}

struct ReferenceLine {
    value: f64,
    label: String,
    element: Option<ElementId>,
}

/// Animated bar chart over an abstract render surface.
///
/// All state lives here: the surface is mutated only through `redraw` and
/// the explicit mutators, and a redraw issues its complete command schedule
/// synchronously before returning. Because the surface contract makes a
/// later update supersede an in-flight transition per property, calling
/// `redraw` again mid-animation cancels-and-restarts cleanly.
pub struct BarChart<S: Surface> {
    surface: S,
    config: ChartConfig,
    insets: Insets,
    width: f64,
    height: f64,
    dataset: Option<Dataset>,
    derived_domain: Option<Domain>,
    scale_override: ScaleOverride,
    layout: SlotLayout,
    policy: Box<dyn GeometryPolicy>,
    container: ElementId,
    bars: HashMap<Key, ElementId>,
    prev_keys: Vec<Key>,
    reference: Option<ReferenceLine>,
    tooltips_open: HashSet<Key>,
}

impl<S: Surface> std::fmt::Debug for BarChart<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarChart")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> BarChart<S> {
    pub fn new(mut surface: S) -> Self {
        let container = surface.create(
            StylePatch::default().class("container").width(WIDTH).height(HEIGHT),
        );
        Self {
            surface,
            config: ChartConfig::default(),
            insets: Insets::default(),
            width: WIDTH,
            height: HEIGHT,
            dataset: None,
            derived_domain: None,
            scale_override: ScaleOverride::default(),
            layout: SlotLayout::default(),
            policy: Box::new(StandardGeometry),
            container,
            bars: HashMap::new(),
            prev_keys: Vec::new(),
            reference: None,
            tooltips_open: HashSet::new(),
        }
    }

    // ---- fluent configuration ----------------------------------------------

    /// Store a keyed dataset, rejecting duplicate keys, and derive its value
    /// domain. An empty dataset is legal and renders zero bars. Does not
    /// redraw.
    pub fn with_data(&mut self, points: impl Into<Dataset>) -> Result<&mut Self, ChartError> {
        let dataset = points.into();
        dataset.validate_keys()?;
        self.derived_domain = if dataset.is_empty() {
            None
        } else {
            Some(derive_domain(&dataset.values())?)
        };
        self.dataset = Some(dataset);
        Ok(self)
    }

    /// Ingest bare numbers, auto-keyed by ordinal position (see
    /// [`Dataset::from_values`] for the identity caveat).
    pub fn with_values(&mut self, values: &[f64]) -> &mut Self {
        self.derived_domain = derive_domain(values).ok();
        self.dataset = Some(Dataset::from_values(values));
        self
    }

    /// Record a scale override. Applied only while `use_custom_scale` is
    /// enabled; otherwise kept but ignored.
    pub fn with_scale(&mut self, ov: ScaleOverride) -> &mut Self {
        self.scale_override = ov;
        self
    }

    /// Outer container width; resizes the container element immediately.
    pub fn with_width(&mut self, px: f64) -> &mut Self {
        self.width = px;
        self.resize_container();
        self
    }

    /// Outer container height; resizes the container element immediately.
    pub fn with_height(&mut self, px: f64) -> &mut Self {
        self.height = px;
        self.resize_container();
        self
    }

    pub fn with_insets(&mut self, insets: Insets) -> &mut Self {
        self.insets = insets;
        self
    }

    pub fn with_config(&mut self, config: ChartConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Inject an alternative placement/sizing strategy.
    pub fn with_geometry_policy(&mut self, policy: impl GeometryPolicy + 'static) -> &mut Self {
        self.policy = Box::new(policy);
        self
    }

    /// Set or replace the single horizontal reference line. Its position is
    /// (re)animated on the next redraw.
    pub fn set_reference_line(&mut self, value: f64, label: impl Into<String>) -> &mut Self {
        match self.reference.as_mut() {
            Some(line) => {
                line.value = value;
                line.label = label.into();
            }
            None => {
                self.reference = Some(ReferenceLine {
                    value,
                    label: label.into(),
                    element: None,
                });
            }
        }
        self
    }

    pub fn clear_reference_line(&mut self) -> &mut Self {
        if let Some(line) = self.reference.take() {
            if let Some(id) = line.element {
                self.surface.remove(id, 0);
            }
        }
        self
    }

    // ---- tooltips ----------------------------------------------------------

    /// Open the tooltip for `key`, putting its description (or the key
    /// itself) on the bar. No-op unless tooltips are enabled and the bar is
    /// currently rendered.
    pub fn show_tooltip(&mut self, key: &str) -> &mut Self {
        if !self.config.show_tooltips {
            return self;
        }
        let text = match self.dataset.as_ref().and_then(|ds| ds.get(key)) {
            Some(point) => point
                .description
                .clone()
                .unwrap_or_else(|| point.key.clone()),
            None => return self,
        };
        if let Some(&id) = self.bars.get(key) {
            self.tooltips_open.insert(key.to_string());
            self.surface.update(id, StylePatch::default().label(text), None);
        }
        self
    }

    /// Close the tooltip for `key`, reverting the bar to its configured
    /// label (or no label).
    pub fn hide_tooltip(&mut self, key: &str) -> &mut Self {
        if !self.tooltips_open.remove(key) {
            return self;
        }
        let fallback = self
            .dataset
            .as_ref()
            .and_then(|ds| ds.get(key))
            .and_then(|p| configured_label(&self.config, p))
            .unwrap_or_default();
        if let Some(&id) = self.bars.get(key) {
            self.surface.update(id, StylePatch::default().label(fallback), None);
        }
        self
    }

    pub fn tooltip_is_open(&self, key: &str) -> bool {
        self.tooltips_open.contains(key)
    }

    // ---- redraw ------------------------------------------------------------

    /// Recompute layout and geometry, diff against the previously rendered
    /// bars, and drive the full animation schedule. Fails fast with
    /// `NotConfigured` before any dataset has been supplied.
    pub fn redraw(&mut self) -> Result<PhaseSchedule, ChartError> {
        let dataset = match self.dataset.as_ref() {
            Some(ds) => ds,
            None => return Err(ChartError::NotConfigured),
        };

        let inner_w = (self.width - self.insets.hsum() as f64).max(0.0);
        let inner_h = (self.height - self.insets.vsum() as f64).max(0.0);
        let origin_x = self.insets.left as f64;
        let origin_y = self.insets.top as f64;
        let baseline = origin_y + inner_h;

        let layout = SlotLayout::solve(inner_w, dataset.len(), self.config.max_bar_width);
        let scale = self.effective_domain().map(|d| ValueScale::new(d, inner_h));
        let plan = reconcile(&self.prev_keys, dataset);

        let mut targets: HashMap<Key, BarTarget> = HashMap::with_capacity(dataset.len());
        let mut clamped = 0usize;
        for (i, point) in dataset.points.iter().enumerate() {
            let mut height = match &scale {
                Some(sc) => self.policy.height(sc, point.value),
                None => 0.0,
            };
            if height < 0.0 {
                clamped += 1;
                height = 0.0;
            }
            let geometry = BarGeometry::new(
                origin_x + self.policy.left(&layout, i),
                layout.bar_width,
                baseline - height,
                height,
            );
            let label = self.bar_label(point);
            targets.insert(point.key.clone(), BarTarget { geometry, label });
        }
        if clamped > 0 {
            warn!("{clamped} bar height(s) fell below zero under the current domain; clamped to zero");
        }
        let new_keys: Vec<Key> = dataset.keys().cloned().collect();

        let sequencer = Sequencer::new(self.config.transition_duration_ms);
        let schedule = sequencer.run(
            &mut self.surface,
            &mut self.bars,
            &plan,
            &targets,
            baseline,
            self.config.use_vertical_labels,
        );

        self.prev_keys = new_keys;
        self.layout = layout;
        let bars = &self.bars;
        self.tooltips_open.retain(|k| bars.contains_key(k));
        self.animate_reference(origin_x, origin_y, inner_w, baseline, scale);
        Ok(schedule)
    }

    // ---- accessors ---------------------------------------------------------

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Layout solved by the most recent redraw.
    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    /// Keys rendered by the most recent redraw, in display order.
    pub fn rendered_keys(&self) -> &[Key] {
        &self.prev_keys
    }

    pub fn bar_element(&self, key: &str) -> Option<ElementId> {
        self.bars.get(key).copied()
    }

    pub fn container_element(&self) -> ElementId {
        self.container
    }

    // ---- helpers -----------------------------------------------------------

    fn resize_container(&mut self) {
        self.surface.update(
            self.container,
            StylePatch::default().width(self.width).height(self.height),
            None,
        );
    }

    fn effective_domain(&self) -> Option<Domain> {
        let derived = self.derived_domain?;
        Some(if self.config.use_custom_scale {
            derived.apply_override(self.scale_override)
        } else {
            derived
        })
    }

    fn bar_label(&self, point: &DataPoint) -> Option<String> {
        // An open tooltip wins over the configured label.
        if self.config.show_tooltips && self.tooltips_open.contains(&point.key) {
            return Some(
                point
                    .description
                    .clone()
                    .unwrap_or_else(|| point.key.clone()),
            );
        }
        configured_label(&self.config, point)
    }

    fn animate_reference(
        &mut self,
        origin_x: f64,
        origin_y: f64,
        inner_w: f64,
        baseline: f64,
        scale: Option<ValueScale>,
    ) {
        let duration = self.config.transition_duration_ms;
        let Some(line) = self.reference.as_mut() else { return };
        let height_px = scale.map(|sc| sc.to_px(line.value)).unwrap_or(0.0);
        // Keep the line clear of its caption band and inside the plot.
        let band = if line.label.is_empty() { 0.0 } else { LABEL_BAND };
        let top = clamp(baseline - height_px, origin_y + band, baseline);
        match line.element {
            Some(id) => {
                self.surface.update(
                    id,
                    StylePatch::default().top(top).label(line.label.clone()),
                    Some(Transition::new(duration)),
                );
            }
            None => {
                let id = self.surface.create(
                    StylePatch::default()
                        .class("reference")
                        .left(origin_x)
                        .width(inner_w)
                        .top(top)
                        .height(0.0)
                        .label(line.label.clone()),
                );
                line.element = Some(id);
            }
        }
    }
}

impl<S: Surface> Drop for BarChart<S> {
    fn drop(&mut self) {
        for (_, id) in self.bars.drain() {
            self.surface.remove(id, 0);
        }
        if let Some(line) = self.reference.take() {
            if let Some(id) = line.element {
                self.surface.remove(id, 0);
            }
        }
        self.surface.remove(self.container, 0);
    }
}

fn configured_label(config: &ChartConfig, point: &DataPoint) -> Option<String> {
    match config.display_label {
        Some(LabelSource::Key) => Some(point.key.clone()),
        Some(LabelSource::Description) => point.description.clone(),
        None => None,
    }
}
