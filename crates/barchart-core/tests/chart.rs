// File: crates/barchart-core/tests/chart.rs
// Purpose: Validate the controller contract: fluent API, failure modes,
// scale opt-in, idempotent redraws, tooltips, insets.

use barchart_core::{
    BarChart, ChartConfig, ChartError, ComputedStyle, DataPoint, GeometryPolicy, Insets,
    LabelSource, MemorySurface, ScaleOverride, ValueScale,
};

const EPS: f64 = 1e-9;

fn settle(chart: &mut BarChart<MemorySurface>) {
    chart.surface_mut().advance(2000);
}

#[test]
fn redraw_before_data_fails_fast() {
    let mut chart = BarChart::new(MemorySurface::new());
    assert!(matches!(chart.redraw(), Err(ChartError::NotConfigured)));
}

#[test]
fn duplicate_keys_are_rejected_at_ingestion() {
    let mut chart = BarChart::new(MemorySurface::new());
    let err = chart
        .with_data(vec![DataPoint::new("A", 1.0), DataPoint::new("A", 2.0)])
        .unwrap_err();
    assert!(matches!(err, ChartError::DuplicateKey(k) if k == "A"));
}

#[test]
fn empty_dataset_renders_zero_bars() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_data(Vec::<DataPoint>::new()).unwrap();
    let schedule = chart.redraw().unwrap();
    assert_eq!(schedule.entered, 0);
    assert_eq!(schedule.total_ms, 0);
    // only the container exists
    assert_eq!(chart.surface().elements().len(), 1);
}

#[test]
fn bare_numbers_are_auto_keyed_and_scaled_to_their_extremes() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_values(&[1.0, 12.0, 4.0, 7.0, 5.0, 6.0, 7.0]);
    chart.redraw().unwrap();
    settle(&mut chart);

    let keys: Vec<_> = chart.rendered_keys().to_vec();
    assert_eq!(keys, vec!["0", "1", "2", "3", "4", "5", "6"]);

    // derived domain {1, 12}: the max value fills the range, the min sits flat
    let tallest = style_of(&chart, "1");
    assert!((tallest.height - 500.0).abs() < EPS);
    assert!((tallest.top - 0.0).abs() < EPS);

    let flattest = style_of(&chart, "0");
    assert!((flattest.height - 0.0).abs() < EPS);
    assert!((flattest.top - 500.0).abs() < EPS);
}

#[test]
fn custom_scale_applies_only_with_the_opt_in() {
    // opt-in enabled: heights follow the 0..20 override
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_config(ChartConfig { use_custom_scale: true, ..ChartConfig::default() });
    chart.with_scale(ScaleOverride::new(Some(0.0), Some(20.0)));
    chart.with_values(&[1.0, 12.0, 4.0, 7.0, 5.0, 6.0, 7.0]);
    chart.redraw().unwrap();
    settle(&mut chart);

    let tallest = style_of(&chart, "1");
    assert!((tallest.height - 12.0 / 20.0 * 500.0).abs() < EPS);
    assert!((tallest.top - 200.0).abs() < EPS);

    // same override without the opt-in: recorded but ignored
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_scale(ScaleOverride::new(Some(0.0), Some(20.0)));
    chart.with_values(&[1.0, 12.0, 4.0, 7.0, 5.0, 6.0, 7.0]);
    chart.redraw().unwrap();
    settle(&mut chart);

    let tallest = style_of(&chart, "1");
    assert!((tallest.height - 500.0).abs() < EPS);
}

#[test]
fn repeated_redraw_with_unchanged_data_is_idempotent() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart
        .with_data(vec![
            DataPoint::new("A", 3.0),
            DataPoint::new("B", 9.0),
            DataPoint::new("C", 6.0),
        ])
        .unwrap();
    chart.redraw().unwrap();
    settle(&mut chart);
    let before: Vec<ComputedStyle> = snapshot(&chart, &["A", "B", "C"]);

    let schedule = chart.redraw().unwrap();
    assert_eq!(schedule.entered, 0);
    assert_eq!(schedule.exited, 0);
    assert_eq!(schedule.retained, 3);
    settle(&mut chart);
    let after: Vec<ComputedStyle> = snapshot(&chart, &["A", "B", "C"]);

    for (a, b) in before.iter().zip(after.iter()) {
        assert!((a.left - b.left).abs() < EPS);
        assert!((a.top - b.top).abs() < EPS);
        assert!((a.width - b.width).abs() < EPS);
        assert!((a.height - b.height).abs() < EPS);
        assert!((a.opacity - b.opacity).abs() < EPS);
    }
}

#[test]
fn resizing_updates_the_container_immediately() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_width(900.0).with_height(250.0);
    let style = chart.surface().style_of(chart.container_element()).unwrap();
    assert!((style.width - 900.0).abs() < EPS);
    assert!((style.height - 250.0).abs() < EPS);
}

#[test]
fn insets_shift_bars_and_shrink_the_plot() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_insets(Insets::new(50, 50, 20, 30));
    chart.with_values(&[7.0]);
    chart.redraw().unwrap();
    settle(&mut chart);

    // inner width 600, one bar: gap 150, width 300, offset by the left inset
    let style = style_of(&chart, "0");
    assert!((style.left - 200.0).abs() < EPS);
    assert!((style.width - 300.0).abs() < EPS);
    // single-value domain is degenerate: zero height at the baseline
    assert!((style.height - 0.0).abs() < EPS);
    assert!((style.top - 470.0).abs() < EPS);
}

#[test]
fn tooltips_toggle_opaque_text_per_key() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_config(ChartConfig { show_tooltips: true, ..ChartConfig::default() });
    chart
        .with_data(vec![
            DataPoint::new("A", 1.0).with_description("alpha"),
            DataPoint::new("B", 2.0),
        ])
        .unwrap();
    chart.redraw().unwrap();

    chart.show_tooltip("A");
    assert!(chart.tooltip_is_open("A"));
    assert_eq!(style_of(&chart, "A").label.as_deref(), Some("alpha"));

    chart.hide_tooltip("A");
    assert!(!chart.tooltip_is_open("A"));
    assert_eq!(style_of(&chart, "A").label, None);

    // a key without a description falls back to the key itself
    chart.show_tooltip("B");
    assert_eq!(style_of(&chart, "B").label.as_deref(), Some("B"));
}

#[test]
fn tooltips_are_inert_unless_enabled() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart
        .with_data(vec![DataPoint::new("A", 1.0).with_description("alpha")])
        .unwrap();
    chart.redraw().unwrap();

    chart.show_tooltip("A");
    assert!(!chart.tooltip_is_open("A"));
    assert_eq!(style_of(&chart, "A").label, None);
}

#[test]
fn configured_labels_reach_the_surface() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_config(ChartConfig {
        display_label: Some(LabelSource::Key),
        use_vertical_labels: true,
        ..ChartConfig::default()
    });
    chart.with_data(vec![DataPoint::new("A", 1.0)]).unwrap();
    chart.redraw().unwrap();

    let style = style_of(&chart, "A");
    assert_eq!(style.label.as_deref(), Some("A"));
    assert!(style.vertical_label);
}

#[test]
fn injected_geometry_policy_replaces_the_standard_one() {
    struct FixedHeights;
    impl GeometryPolicy for FixedHeights {
        fn height(&self, _scale: &ValueScale, _value: f64) -> f64 {
            100.0
        }
    }

    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_geometry_policy(FixedHeights);
    chart.with_values(&[1.0, 50.0, 9.0]);
    chart.redraw().unwrap();
    settle(&mut chart);

    for key in ["0", "1", "2"] {
        let style = style_of(&chart, key);
        assert!((style.height - 100.0).abs() < EPS);
        assert!((style.top - 400.0).abs() < EPS);
    }
}

#[test]
fn removing_a_middle_value_shifts_ordinal_identity() {
    let mut chart = BarChart::new(MemorySurface::new());
    chart.with_values(&[1.0, 2.0, 3.0]);
    chart.redraw().unwrap();
    settle(&mut chart);

    // dropping the middle number re-keys the tail: the last ordinal exits
    // even though "3.0" is still present
    chart.with_values(&[1.0, 3.0]);
    let schedule = chart.redraw().unwrap();
    assert_eq!(schedule.exited, 1);
    assert_eq!(schedule.entered, 0);
    assert_eq!(schedule.retained, 2);
}

// ---- helpers ----------------------------------------------------------------

fn style_of(chart: &BarChart<MemorySurface>, key: &str) -> ComputedStyle {
    let id = chart.bar_element(key).expect("bar exists");
    chart.surface().style_of(id).expect("style exists")
}

fn snapshot(chart: &BarChart<MemorySurface>, keys: &[&str]) -> Vec<ComputedStyle> {
    keys.iter().map(|k| style_of(chart, k)).collect()
}
