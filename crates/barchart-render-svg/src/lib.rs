// File: crates/barchart-render-svg/src/lib.rs
// Summary: SVG backend; samples the headless surface clock into deterministic
// <svg> snapshots (bars, labels, reference line).

use std::fmt::Write as _;

use barchart_core::{ComputedStyle, ElementId, MemorySurface, StylePatch, Surface, Transition};

const BAR_FILL: &str = "steelblue";
const REFERENCE_STROKE: &str = "#c44";
const BACKGROUND: &str = "#fafafc";
const LABEL_SIZE: f64 = 12.0;

/// Render surface producing SVG text. Wraps the headless surface: the chart
/// issues its timed commands as usual, the caller advances the virtual clock
/// and serializes a frame whenever one is wanted.
#[derive(Debug, Default)]
pub struct SvgSurface {
    inner: MemorySurface,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self { inner: MemorySurface::new() }
    }

    /// Advance the animation clock.
    pub fn advance(&mut self, ms: u64) {
        self.inner.advance(ms);
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.now_ms()
    }

    pub fn inner(&self) -> &MemorySurface {
        &self.inner
    }

    /// Serialize the scene at the current clock time.
    pub fn to_svg(&self) -> String {
        let elements = self.inner.elements();
        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for id in &elements {
            if let Some(style) = self.inner.style_of(*id) {
                if style.class.as_deref() == Some("container") {
                    width = style.width;
                    height = style.height;
                    break;
                }
            }
        }

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"##
        );
        let _ = writeln!(svg, r##"  <rect width="100%" height="100%" fill="{BACKGROUND}"/>"##);
        for id in &elements {
            let Some(style) = self.inner.style_of(*id) else { continue };
            match style.class.as_deref() {
                Some("bar") => write_bar(&mut svg, &style),
                Some("reference") => write_reference(&mut svg, &style),
                _ => {}
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn create(&mut self, style: StylePatch) -> ElementId {
        self.inner.create(style)
    }

    fn update(&mut self, id: ElementId, style: StylePatch, transition: Option<Transition>) {
        self.inner.update(id, style, transition);
    }

    fn remove(&mut self, id: ElementId, delay_ms: u32) {
        self.inner.remove(id, delay_ms);
    }
}

// ---- helpers ----------------------------------------------------------------

fn write_bar(out: &mut String, s: &ComputedStyle) {
    if s.opacity <= 0.0 {
        return;
    }
    let _ = writeln!(
        out,
        r##"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{BAR_FILL}" opacity="{:.3}"/>"##,
        s.left, s.top, s.width, s.height, s.opacity
    );
    if let Some(label) = &s.label {
        let cx = s.left + s.width / 2.0;
        let y = s.top - 4.0;
        if s.vertical_label {
            let _ = writeln!(
                out,
                r##"  <text x="{cx:.2}" y="{y:.2}" font-size="{LABEL_SIZE:.0}" text-anchor="start" transform="rotate(-90 {cx:.2} {y:.2})" opacity="{:.3}">{}</text>"##,
                s.opacity,
                xml_escape(label)
            );
        } else {
            let _ = writeln!(
                out,
                r##"  <text x="{cx:.2}" y="{y:.2}" font-size="{LABEL_SIZE:.0}" text-anchor="middle" opacity="{:.3}">{}</text>"##,
                s.opacity,
                xml_escape(label)
            );
        }
    }
}

fn write_reference(out: &mut String, s: &ComputedStyle) {
    let x2 = s.left + s.width;
    let _ = writeln!(
        out,
        r##"  <line x1="{:.2}" y1="{:.2}" x2="{x2:.2}" y2="{:.2}" stroke="{REFERENCE_STROKE}" stroke-dasharray="6 4"/>"##,
        s.left, s.top, s.top
    );
    if let Some(label) = &s.label {
        let _ = writeln!(
            out,
            r##"  <text x="{:.2}" y="{:.2}" font-size="{LABEL_SIZE:.0}" fill="{REFERENCE_STROKE}">{}</text>"##,
            s.left + 4.0,
            s.top - 4.0,
            xml_escape(label)
        );
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
