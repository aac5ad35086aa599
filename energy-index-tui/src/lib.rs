/// Energy Index TUIs - Shared Library
///
/// This library backs the two dashboard binaries:
/// - energy-dashboard: 30s snapshot refresh
/// - energy-dashboard-live: 10s refresh with update counter and highlighted activity
///
/// The library includes:
/// - Snapshot types for the index service's JSON endpoint
/// - HTTP fetcher behind the `SnapshotSource` trait
/// - Rolling history, derived metrics and the view composer
/// - The refresh loop controller and its ratatui renderer
pub mod shared;

pub use shared::config::{DashboardConfig, Mode};
pub use shared::controller::{CycleOutcome, Dashboard, DashboardState, LoopState};
pub use shared::error::{ConfigError, FetchError};
pub use shared::fetcher::{HttpFetcher, SnapshotSource};
pub use shared::history::{RefreshState, RollingHistory, SeriesBuffer};
pub use shared::metrics::{
    change_is_positive, classify_activity, correlation_pct, ActivityClass, ClassifiedActivity,
    DerivedMetrics,
};
pub use shared::types::{Historical, Snapshot};
pub use shared::view::{
    compose_degraded, compose_full, ChartState, DashboardView, DegradedView, FullView, ViewInput,
};
pub use shared::widget::render_dashboard;
