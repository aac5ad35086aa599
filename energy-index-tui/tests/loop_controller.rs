mod common;

use std::time::Duration;

use common::{snapshot, ScriptedSource};
use energy_index_tui::{
    Dashboard, DashboardConfig, DashboardView, FetchError, LoopState, Mode, Snapshot,
};
use ratatui::{backend::TestBackend, Terminal};

fn dashboard(mode: Mode, script: Vec<Result<Snapshot, FetchError>>) -> Dashboard<ScriptedSource> {
    Dashboard::new(DashboardConfig::new(mode), ScriptedSource::new(script))
}

/// Failures on even cycles, successes on odd ones
fn alternating(cycles: u64) -> Vec<Result<Snapshot, FetchError>> {
    (0..cycles)
        .map(|i| {
            if i % 2 == 0 {
                Err(FetchError::Status(500))
            } else {
                Ok(snapshot(i, vec![1.0; i as usize + 1], vec![0.5]))
            }
        })
        .collect()
}

#[tokio::test]
async fn test_failure_isolation() {
    let mut dashboard = dashboard(
        Mode::Live,
        vec![
            Ok(snapshot(10, vec![1.0, 2.0], vec![0.1, 0.2])),
            Err(FetchError::Request("connection reset".to_string())),
            Ok(snapshot(11, vec![1.0, 2.0, 3.0], vec![0.1, 0.2, 0.3])),
        ],
    );

    let first = dashboard.run_cycle().await;
    assert_eq!(first.state, LoopState::Running);
    assert_eq!(dashboard.state().refresh.refresh_count(), 1);
    let before_failure = dashboard.state().history.clone();

    let failed = dashboard.run_cycle().await;
    assert_eq!(failed.state, LoopState::Degraded);
    assert!(failed.view.is_degraded());
    assert_eq!(dashboard.last_state(), LoopState::Degraded);
    assert_eq!(dashboard.state().refresh.refresh_count(), 2);
    assert_eq!(dashboard.state().history, before_failure);

    let recovered = dashboard.run_cycle().await;
    assert_eq!(recovered.state, LoopState::Running);
    assert_eq!(dashboard.state().refresh.refresh_count(), 3);
    assert_eq!(dashboard.state().history.prices.to_vec(), vec![1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn test_timeout_yields_degraded_view_without_cards() {
    let mut dashboard = dashboard(
        Mode::Snapshot,
        vec![
            Ok(snapshot(5, vec![4.0, 5.0], vec![1.0])),
            Err(FetchError::Timeout(Duration::from_secs(10))),
        ],
    );

    dashboard.run_cycle().await;
    let before = dashboard.state().history.clone();

    let outcome = dashboard.run_cycle().await;
    assert!(outcome.view.metric_cards().is_empty());
    match &outcome.view {
        DashboardView::Degraded(degraded) => {
            assert_eq!(degraded.headline, "Offline");
            assert_eq!(degraded.cause, "request timed out after 10s");
        }
        DashboardView::Full(_) => panic!("expected degraded view"),
    }
    assert_eq!(dashboard.state().history, before);
}

#[tokio::test]
async fn test_snapshot_mode_does_not_count_refreshes() {
    let mut dashboard = dashboard(
        Mode::Snapshot,
        vec![
            Ok(snapshot(1, vec![1.0], vec![1.0])),
            Err(FetchError::Status(503)),
        ],
    );

    dashboard.run_cycle().await;
    dashboard.run_cycle().await;
    assert_eq!(dashboard.state().refresh.refresh_count(), 0);
}

#[tokio::test]
async fn test_live_view_reports_current_refresh() {
    let mut dashboard = dashboard(
        Mode::Live,
        vec![
            Err(FetchError::Status(502)),
            Ok(snapshot(300, vec![1.0], vec![])),
        ],
    );

    dashboard.run_cycle().await;
    let outcome = dashboard.run_cycle().await;

    match outcome.view {
        DashboardView::Full(view) => {
            assert_eq!(view.banner.refresh_count, Some(2));
            assert_eq!(view.metric_cards[3].value, "100%");
            // one point is not enough for a live chart
            assert!(!view.price_chart.is_ready());
        }
        DashboardView::Degraded(_) => panic!("expected full view"),
    }
}

#[tokio::test]
async fn test_refresh_draws_to_terminal() {
    let mut dashboard = dashboard(
        Mode::Live,
        vec![
            Ok(snapshot(42, vec![1.0, 1.5, 1.2], vec![0.2, 0.4, 0.3])),
            Err(FetchError::Status(504)),
        ],
    );
    let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();

    let state = dashboard.refresh(&mut terminal).await.unwrap();
    assert_eq!(state, LoopState::Running);

    let state = dashboard.refresh(&mut terminal).await.unwrap();
    assert_eq!(state, LoopState::Degraded);

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Connection Lost"));
    assert!(!screen.contains("TOKEN PRICE"));
}

#[tokio::test(start_paused = true)]
async fn test_run_repeats_after_failures_every_interval() {
    let mut dashboard = dashboard(Mode::Live, alternating(6));
    let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();

    // cycles start at 0, 10, 20, 30, 40 and 50 seconds
    let result = tokio::time::timeout(
        Duration::from_secs(55),
        dashboard.run(&mut terminal, std::future::pending()),
    )
    .await;

    assert!(result.is_err(), "run returned on its own: {result:?}");
    assert_eq!(dashboard.source().calls(), 6);
    assert_eq!(dashboard.state().refresh.refresh_count(), 6);
    assert_eq!(dashboard.last_state(), LoopState::Running);
    assert_eq!(dashboard.state().history.prices.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_run_sleeps_after_each_cycle_completes() {
    let source = ScriptedSource::new(alternating(10)).with_delay(Duration::from_secs(3));
    let mut dashboard = Dashboard::new(DashboardConfig::new(Mode::Live), source);
    let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();

    // a 3s fetch plus a 10s pause puts cycles at 0, 13, 26 and 39 seconds
    dashboard
        .run(&mut terminal, tokio::time::sleep(Duration::from_secs(50)))
        .await
        .unwrap();

    assert_eq!(dashboard.source().calls(), 4);
    assert_eq!(dashboard.source().max_in_flight(), 1);
    assert_eq!(dashboard.state().refresh.refresh_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_mid_cycle_on_shutdown() {
    let source = ScriptedSource::new(alternating(4)).with_delay(Duration::from_secs(5));
    let mut dashboard = Dashboard::new(DashboardConfig::new(Mode::Snapshot), source);
    let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();

    dashboard
        .run(&mut terminal, tokio::time::sleep(Duration::from_secs(2)))
        .await
        .unwrap();

    assert_eq!(dashboard.source().calls(), 1);
    assert!(dashboard.state().history.prices.is_empty());
}
