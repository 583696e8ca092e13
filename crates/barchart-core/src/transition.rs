// File: crates/barchart-core/src/transition.rs
// Summary: Phase sequencer: exit, conditional delay, entry, horizontal move,
// vertical rescale — issued as timed surface commands in one pass.

use std::collections::HashMap;

use log::debug;

use crate::data::Key;
use crate::geometry::BarGeometry;
use crate::reconcile::ReconcilePlan;
use crate::surface::{ElementId, StylePatch, Surface, Transition};

/// Target state for one bar after the redraw settles.
#[derive(Clone, Debug, PartialEq)]
pub struct BarTarget {
    pub geometry: BarGeometry,
    /// Label text to show on the bar, empty to clear.
    pub label: Option<String>,
}

/// Timing report for one redraw, offsets in milliseconds from issue time.
///
/// Phases run strictly in order: exits finish at `duration_ms` (when any
/// exist), entries snap in at `entry_delay_ms`, horizontal movement spans
/// `[horizontal_start_ms, vertical_start_ms)`, vertical rescaling spans
/// `[vertical_start_ms, total_ms)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseSchedule {
    pub duration_ms: u32,
    pub entered: usize,
    pub exited: usize,
    pub retained: usize,
    pub entry_delay_ms: u32,
    pub horizontal_start_ms: u32,
    pub vertical_start_ms: u32,
    pub total_ms: u32,
}

/// Drives one redraw's animation against a surface. Stateless between
/// redraws: retained state (key-to-element bindings) is owned by the
/// controller and passed in.
#[derive(Clone, Copy, Debug)]
pub struct Sequencer {
    pub duration_ms: u32,
}

impl Sequencer {
    pub const fn new(duration_ms: u32) -> Self {
        Self { duration_ms }
    }

    /// Issue the full exit/enter/horizontal/vertical command schedule.
    ///
    /// `bars` is mutated in place: exiting bindings are dropped, entering
    /// ones inserted. `targets` must cover every entering and retained key;
    /// `baseline_px` is the vertical position bars shrink toward.
    pub fn run<S: Surface>(
        &self,
        surface: &mut S,
        bars: &mut HashMap<Key, ElementId>,
        plan: &ReconcilePlan,
        targets: &HashMap<Key, BarTarget>,
        baseline_px: f64,
        vertical_labels: bool,
    ) -> PhaseSchedule {
        let d = self.duration_ms;

        // Exit phase: shrink to the baseline, fade, then leave the surface.
        for key in &plan.exiting {
            if let Some(id) = bars.remove(key) {
                surface.update(
                    id,
                    StylePatch::default().top(baseline_px).height(0.0).opacity(0.0),
                    Some(Transition::new(d)),
                );
                surface.remove(id, d);
            }
        }

        // Everything after the exits waits for them to clear visually.
        let entry_delay = if plan.exiting.is_empty() { 0 } else { d };

        // Entry phase: new bars materialize at their final horizontal slot,
        // flat on the baseline, and become visible once the exits are done.
        for key in &plan.entering {
            let Some(target) = targets.get(key) else { continue };
            let mut style = StylePatch::default()
                .class("bar")
                .left(target.geometry.left)
                .width(target.geometry.width)
                .top(baseline_px)
                .height(0.0)
                .opacity(0.0)
                .vertical_label(vertical_labels);
            if let Some(text) = &target.label {
                style = style.label(text.clone());
            }
            let id = surface.create(style);
            surface.update(
                id,
                StylePatch::default().opacity(1.0),
                Some(Transition::delayed(0, entry_delay)),
            );
            bars.insert(key.clone(), id);
        }

        // Horizontal phase: everything slides and resizes into its new slot.
        for key in plan.retained.iter().chain(plan.entering.iter()) {
            let (Some(&id), Some(target)) = (bars.get(key), targets.get(key)) else { continue };
            let mut style = StylePatch::default()
                .left(target.geometry.left)
                .width(target.geometry.width);
            if let Some(text) = &target.label {
                style = style.label(text.clone());
            }
            surface.update(id, style, Some(Transition::delayed(d, entry_delay)));
        }

        // Vertical phase: grow/shrink to the value-derived height.
        let vertical_delay = entry_delay + d;
        for key in plan.retained.iter().chain(plan.entering.iter()) {
            let (Some(&id), Some(target)) = (bars.get(key), targets.get(key)) else { continue };
            surface.update(
                id,
                StylePatch::default().top(target.geometry.top).height(target.geometry.height),
                Some(Transition::delayed(d, vertical_delay)),
            );
        }

        let survivors = plan.retained.len() + plan.entering.len();
        let total = if survivors > 0 {
            vertical_delay + d
        } else if plan.exiting.is_empty() {
            0
        } else {
            d
        };
        debug!(
            "sequenced redraw: {} exit, {} enter, {} retain; entry delayed {}ms, settled at {}ms",
            plan.exiting.len(),
            plan.entering.len(),
            plan.retained.len(),
            entry_delay,
            total
        );

        PhaseSchedule {
            duration_ms: d,
            entered: plan.entering.len(),
            exited: plan.exiting.len(),
            retained: plan.retained.len(),
            entry_delay_ms: entry_delay,
            horizontal_start_ms: entry_delay,
            vertical_start_ms: vertical_delay,
            total_ms: total,
        }
    }
}
