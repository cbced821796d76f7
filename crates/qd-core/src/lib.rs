//! Core functionality for the earthquake dashboard
//!
//! This crate holds the domain model and the view state shared by every
//! panel: the loaded dataset, the filter thresholds, the map model and the
//! derived stats, list and chart series. It has no UI dependencies so each
//! piece can be exercised against an injected state snapshot.

pub mod chart;
pub mod controller;
pub mod dataset;
pub mod events;
pub mod filter;
pub mod list;
pub mod magnitude;
pub mod map;
pub mod overlay;
pub mod quake;
pub mod settings;
pub mod stats;

// Re-export commonly used types
pub use chart::{YearBucket, YearSeries, MagnitudeAxis};
pub use controller::DashboardController;
pub use dataset::Dataset;
pub use events::{EventBus, Event, EventHandler, handler_from_fn};
pub use filter::FilterThresholds;
pub use list::ListRow;
pub use magnitude::MagnitudeBand;
pub use map::{MapLayer, MarkerHandle, RenderedMarker, Viewpoint};
pub use overlay::{OverlayKind, OverlayState, RiskZone, FaultLine, RiskLevel};
pub use quake::{Quake, GeoCoord, QuakePopup};
pub use settings::DashboardSettings;
pub use stats::{StatsSummary, StatCard, StatKind};
