/// Energy Index Dashboard
///
/// Polls the index service every 30 seconds and redraws the full layout.
/// Configure with DASHBOARD_ENDPOINT, DASHBOARD_INTERVAL_SECS,
/// DASHBOARD_TIMEOUT_SECS, DASHBOARD_WINDOW_SIZE and DASHBOARD_LOG_FILE.
use std::error::Error;

use energy_index_tui::{shared::app, Mode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    app::run(Mode::Snapshot).await
}
