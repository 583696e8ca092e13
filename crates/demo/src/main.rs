// File: crates/demo/src/main.rs
// Summary: Demo loads a delimited label/value file (or a built-in sample),
// drives the chart through two redraws, and writes SVG frames to target/out.

use anyhow::{Context, Result};
use barchart_core::{BarChart, ChartConfig, DataPoint, LabelSource, ScaleOverride};
use barchart_render_svg::SvgSurface;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One input row. The source files are semicolon-delimited:
/// `label;value[;description]`.
#[derive(Debug, Deserialize)]
struct Row {
    label: String,
    value: f64,
    #[serde(default)]
    description: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut chart = BarChart::new(SvgSurface::new());
    chart.with_width(700.0).with_height(500.0);

    let (first, second) = match std::env::args().nth(1) {
        Some(path) => {
            let rows = load_rows(Path::new(&path))
                .with_context(|| format!("failed to load '{path}'"))?;
            println!("Loaded {} rows from {path}", rows.len());
            chart.with_config(ChartConfig {
                display_label: Some(LabelSource::Key),
                show_tooltips: true,
                ..ChartConfig::default()
            });
            let second = shuffled_subset(&rows);
            (rows, second)
        }
        None => {
            // The classic sample: bare numbers under a fixed 0..20 scale.
            println!("No input file given; using the built-in sample");
            chart.with_config(ChartConfig {
                use_custom_scale: true,
                ..ChartConfig::default()
            });
            chart.with_scale(ScaleOverride::new(Some(0.0), Some(20.0)));
            let first: Vec<DataPoint> = [1.0, 12.0, 4.0, 7.0, 5.0, 6.0, 7.0]
                .iter()
                .enumerate()
                .map(|(i, &v)| DataPoint::new(i.to_string(), v))
                .collect();
            let second: Vec<DataPoint> = [2.0, 9.0, 4.0, 7.0, 12.0, 6.0]
                .iter()
                .enumerate()
                .map(|(i, &v)| DataPoint::new(i.to_string(), v))
                .collect();
            (first, second)
        }
    };

    let average = mean(&first);
    chart.set_reference_line(average, format!("avg {average:.1}"));

    chart.with_data(first)?;
    let schedule = chart.redraw()?;
    println!(
        "First draw: {} entering, settled after {}ms",
        schedule.entered, schedule.total_ms
    );
    write_frames(&mut chart, "draw1", schedule.total_ms.max(1))?;

    let average = mean(&second);
    chart.set_reference_line(average, format!("avg {average:.1}"));
    chart.with_data(second)?;
    let schedule = chart.redraw()?;
    println!(
        "Second draw: {} entering, {} exiting, {} retained, settled after {}ms",
        schedule.entered, schedule.exited, schedule.retained, schedule.total_ms
    );
    write_frames(&mut chart, "draw2", schedule.total_ms.max(1))?;

    Ok(())
}

/// Sample the animation timeline and write one SVG per step.
fn write_frames(chart: &mut BarChart<SvgSurface>, tag: &str, total_ms: u32) -> Result<()> {
    let out_dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir).context("creating target/out")?;

    let steps = 6u32;
    let mut elapsed = 0u32;
    for i in 0..=steps {
        let t = total_ms * i / steps;
        chart.surface_mut().advance((t - elapsed) as u64);
        elapsed = t;
        let path = out_dir.join(format!("{tag}_{t:04}ms.svg"));
        std::fs::write(&path, chart.surface().to_svg())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn load_rows(path: &Path) -> Result<Vec<DataPoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        let row: Row = rec?;
        let mut point = DataPoint::new(row.label, row.value);
        if let Some(text) = row.description {
            point = point.with_description(text);
        }
        out.push(point);
    }
    Ok(out)
}

/// Second-act dataset: reversed order, first row dropped, one new row —
/// enough churn to exercise exit, entry, and repositioning at once.
fn shuffled_subset(rows: &[DataPoint]) -> Vec<DataPoint> {
    let mut out: Vec<DataPoint> = rows.iter().skip(1).rev().cloned().collect();
    let fresh = mean(rows);
    out.push(DataPoint::new("newcomer", fresh).with_description("added in act two"));
    out
}

fn mean(rows: &[DataPoint]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|p| p.value).sum::<f64>() / rows.len() as f64
}
