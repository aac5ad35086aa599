/// Refresh loop: fetch, derive, compose, draw, sleep, repeat
///
/// The controller is the only owner of the rolling history and refresh
/// counter. A failed fetch is absorbed here and never stops the loop.
use std::{future::Future, io};

use chrono::Utc;
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info, warn};

use super::config::DashboardConfig;
use super::fetcher::SnapshotSource;
use super::history::{RefreshState, RollingHistory};
use super::metrics::DerivedMetrics;
use super::view::{compose_degraded, compose_full, DashboardView, ViewInput};
use super::widget::render_dashboard;

/// Outcome of the most recent cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Degraded,
}

/// State carried from one cycle to the next
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub history: RollingHistory,
    pub refresh: RefreshState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    pub state: LoopState,
    pub view: DashboardView,
}

pub struct Dashboard<S> {
    config: DashboardConfig,
    source: S,
    state: DashboardState,
    last_state: LoopState,
}

impl<S: SnapshotSource> Dashboard<S> {
    pub fn new(config: DashboardConfig, source: S) -> Self {
        let history = RollingHistory::new(config.history_capacity);
        Self {
            config,
            source,
            state: DashboardState {
                history,
                refresh: RefreshState::new(),
            },
            last_state: LoopState::Running,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn last_state(&self) -> LoopState {
        self.last_state
    }

    /// Run one fetch → derive → compose cycle
    ///
    /// The refresh counter counts the cycle being composed, so the first
    /// screen of a live dashboard reads `Updates: 1`.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let mode = self.config.mode;
        if mode.tracks_refreshes() {
            self.state.refresh.increment();
        }

        let (state, view) = match self.source.fetch().await {
            Ok(snapshot) => {
                let trimmed = self.state.history.absorb(&snapshot.historical);
                if trimmed > 0 {
                    debug!(
                        trimmed,
                        capacity = self.config.history_capacity,
                        "Upstream history exceeds capacity, oldest points dropped"
                    );
                }
                let metrics = DerivedMetrics::derive(&snapshot, self.config.window_size);

                info!(
                    total_cycles = snapshot.total_cycles,
                    price = snapshot.price,
                    correlation_pct = metrics.correlation_pct,
                    "Snapshot received"
                );

                let view = compose_full(ViewInput {
                    mode,
                    interval: self.config.interval,
                    snapshot: &snapshot,
                    metrics: &metrics,
                    history: &self.state.history,
                    refresh: &self.state.refresh,
                    now: Utc::now(),
                });
                (LoopState::Running, view)
            }
            Err(error) => {
                warn!("Fetch from {} failed: {}", self.config.endpoint, error);
                (LoopState::Degraded, compose_degraded(mode, &error))
            }
        };

        if state != self.last_state {
            info!("Dashboard state {:?} -> {:?}", self.last_state, state);
        }
        self.last_state = state;

        CycleOutcome { state, view }
    }

    /// Run one cycle and draw the result
    pub async fn refresh<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<LoopState> {
        let outcome = self.run_cycle().await;
        terminal.draw(|f| render_dashboard(f, &outcome.view))?;
        Ok(outcome.state)
    }

    /// Refresh until `shutdown` resolves, pausing `interval` after each
    /// completed cycle
    ///
    /// Cycles never overlap: the next fetch starts only after the previous
    /// cycle has drawn and slept. A cycle in flight when `shutdown` fires is
    /// dropped. Returns early only on terminal I/O failure.
    pub async fn run<B, F>(&mut self, terminal: &mut Terminal<B>, shutdown: F) -> io::Result<()>
    where
        B: Backend,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping refresh loop");
                    return Ok(());
                }
                result = self.refresh_then_sleep(terminal) => result?,
            }
        }
    }

    async fn refresh_then_sleep<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.refresh(terminal).await?;
        debug!("Next refresh in {:?}", self.config.interval);
        tokio::time::sleep(self.config.interval).await;
        Ok(())
    }
}
