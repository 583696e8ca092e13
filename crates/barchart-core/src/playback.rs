// File: crates/barchart-core/src/playback.rs
// Summary: Headless surface with a virtual clock; computes interpolated
// styles on demand. Backs the test suite and offline frame sampling.

use std::collections::HashMap;

use crate::surface::{ElementId, StylePatch, Surface, Transition};

const PROP_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Prop {
    Left = 0,
    Top = 1,
    Width = 2,
    Height = 3,
    Opacity = 4,
}

/// One scheduled interpolation over a property. Segments within a track are
/// sorted by start time and never overlap.
#[derive(Clone, Copy, Debug)]
struct Segment {
    start: u64,
    end: u64,
    from: f64,
    to: f64,
}

#[derive(Clone, Debug)]
struct Track {
    base: f64,
    segments: Vec<Segment>,
}

impl Track {
    fn new(base: f64) -> Self {
        Self { base, segments: Vec::new() }
    }

    fn value_at(&self, t: u64) -> f64 {
        let mut v = self.base;
        for seg in &self.segments {
            if t >= seg.end {
                v = seg.to;
            } else if t >= seg.start {
                let span = (seg.end - seg.start) as f64;
                let frac = (t - seg.start) as f64 / span;
                v = seg.from + (seg.to - seg.from) * frac;
            } else {
                break;
            }
        }
        v
    }

    /// Schedule a new target, superseding anything at or after its start.
    /// A zero duration snaps to `to` at the start instant.
    fn retarget(&mut self, now: u64, delay: u64, duration: u64, to: f64) {
        let start = now + delay;
        let from = self.value_at(start);
        self.segments.retain(|s| s.start < start);
        if let Some(last) = self.segments.last_mut() {
            if last.end > start {
                last.end = start;
                last.to = from;
            }
        }
        self.segments.push(Segment { start, end: start + duration, from, to });
    }
}

#[derive(Clone, Debug)]
struct ElementState {
    tracks: [Track; PROP_COUNT],
    label: Option<String>,
    vertical_label: bool,
    class: Option<String>,
    removal_at: Option<u64>,
}

/// Style of one element sampled at the surface's current time.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub label: Option<String>,
    pub vertical_label: bool,
    pub class: Option<String>,
}

/// Surface implementation driven by an explicit virtual clock. Commands are
/// recorded at the current time; `advance` moves time forward and applies
/// scheduled removals. No wall clock, no threads.
#[derive(Debug, Default)]
pub struct MemorySurface {
    now: u64,
    next_id: u64,
    elements: HashMap<ElementId, ElementState>,
    order: Vec<ElementId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now
    }

    /// Move the clock forward, dropping elements whose scheduled removal has
    /// come due.
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
        let now = self.now;
        self.elements.retain(|_, el| el.removal_at.map_or(true, |t| t > now));
        let live = &self.elements;
        self.order.retain(|id| live.contains_key(id));
    }

    /// Live element ids in creation order.
    pub fn elements(&self) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.is_live(*id))
            .collect()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.is_live(id)
    }

    /// Sample an element's style at the current time. `None` once removed.
    pub fn style_of(&self, id: ElementId) -> Option<ComputedStyle> {
        if !self.is_live(id) {
            return None;
        }
        let el = self.elements.get(&id)?;
        Some(ComputedStyle {
            left: el.tracks[Prop::Left as usize].value_at(self.now),
            top: el.tracks[Prop::Top as usize].value_at(self.now),
            width: el.tracks[Prop::Width as usize].value_at(self.now),
            height: el.tracks[Prop::Height as usize].value_at(self.now),
            opacity: el.tracks[Prop::Opacity as usize].value_at(self.now),
            label: el.label.clone(),
            vertical_label: el.vertical_label,
            class: el.class.clone(),
        })
    }

    fn is_live(&self, id: ElementId) -> bool {
        match self.elements.get(&id) {
            Some(el) => el.removal_at.map_or(true, |t| t > self.now),
            None => false,
        }
    }

    fn apply_patch(el: &mut ElementState, now: u64, style: StylePatch, transition: Option<Transition>) {
        let (duration, delay) = match transition {
            Some(t) => (t.duration_ms as u64, t.delay_ms as u64),
            None => (0, 0),
        };
        let numeric = [
            (Prop::Left, style.left),
            (Prop::Top, style.top),
            (Prop::Width, style.width),
            (Prop::Height, style.height),
            (Prop::Opacity, style.opacity),
        ];
        for (prop, value) in numeric {
            if let Some(v) = value {
                el.tracks[prop as usize].retarget(now, delay, duration, v);
            }
        }
        // Text attributes are not animated; they apply at issue time.
        if let Some(label) = style.label {
            el.label = if label.is_empty() { None } else { Some(label) };
        }
        if let Some(v) = style.vertical_label {
            el.vertical_label = v;
        }
    }
}

impl Surface for MemorySurface {
    fn create(&mut self, style: StylePatch) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let mut el = ElementState {
            tracks: [
                Track::new(style.left.unwrap_or(0.0)),
                Track::new(style.top.unwrap_or(0.0)),
                Track::new(style.width.unwrap_or(0.0)),
                Track::new(style.height.unwrap_or(0.0)),
                Track::new(style.opacity.unwrap_or(1.0)),
            ],
            label: None,
            vertical_label: style.vertical_label.unwrap_or(false),
            class: style.class.clone(),
            removal_at: None,
        };
        if let Some(label) = style.label {
            if !label.is_empty() {
                el.label = Some(label);
            }
        }
        self.elements.insert(id, el);
        self.order.push(id);
        id
    }

    fn update(&mut self, id: ElementId, style: StylePatch, transition: Option<Transition>) {
        let now = self.now;
        if let Some(el) = self.elements.get_mut(&id) {
            Self::apply_patch(el, now, style, transition);
        }
    }

    fn remove(&mut self, id: ElementId, delay_ms: u32) {
        let at = self.now + delay_ms as u64;
        if let Some(el) = self.elements.get_mut(&id) {
            el.removal_at = Some(at);
        }
    }
}
