// File: crates/barchart-core/src/lib.rs
// Summary: Core library entry point; exports the bar chart engine public API.

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod playback;
pub mod reconcile;
pub mod scale;
pub mod surface;
pub mod transition;
pub mod types;

pub use chart::{BarChart, GeometryPolicy, StandardGeometry};
pub use config::{ChartConfig, LabelSource, DEFAULT_TRANSITION_MS};
pub use data::{DataPoint, Dataset, Key};
pub use error::ChartError;
pub use geometry::BarGeometry;
pub use layout::SlotLayout;
pub use playback::{ComputedStyle, MemorySurface};
pub use reconcile::{reconcile, ReconcilePlan};
pub use scale::{derive_domain, Domain, ScaleOverride, ValueScale};
pub use surface::{ElementId, StylePatch, Surface, Transition};
pub use transition::{BarTarget, PhaseSchedule, Sequencer};
pub use types::Insets;
