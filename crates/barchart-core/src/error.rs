// File: crates/barchart-core/src/error.rs
// Summary: Typed error taxonomy for dataset ingestion and redraw.

/// Errors surfaced by the fluent API. All are local to the `with_data` or
/// `redraw` call that produced them; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// A numeric domain cannot be derived from zero values.
    #[error("cannot derive a value domain from an empty dataset")]
    EmptyDataset,
    /// Two data points within one dataset share a key.
    #[error("duplicate key `{0}` in dataset")]
    DuplicateKey(String),
    /// `redraw()` was requested before any dataset was supplied.
    #[error("redraw requested before any dataset was supplied")]
    NotConfigured,
}
