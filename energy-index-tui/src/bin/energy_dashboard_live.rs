/// Energy Index Dashboard - LIVE
///
/// 10 second refresh with an update counter and keyword-highlighted
/// activity stream. Same DASHBOARD_* configuration as `energy-dashboard`.
use std::error::Error;

use energy_index_tui::{shared::app, Mode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    app::run(Mode::Live).await
}
