//! Render tree for one refresh cycle
//!
//! Composition is pure data: it decides *what* is on screen (labels, formatted
//! values, placeholders, tones) and leaves colors and layout to the widget
//! module. A failed cycle replaces the whole tree with [`DegradedView`].

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::config::Mode;
use super::error::FetchError;
use super::history::{RefreshState, RollingHistory, SeriesBuffer};
use super::metrics::{ActivityClass, DerivedMetrics};
use super::types::Snapshot;

const FEED_PLACEHOLDER: &str = "Waiting for activity...";

/// Token contract on Base
pub const CONTRACT_ADDRESS: &str = "0x9177ea9636bfde40f02c45f7e5f6b04b04cb7ba3";

/// Fixed component weights of the energy index
pub const COMPONENT_WEIGHTS: [(&str, u8); 4] = [("OIL", 40), ("GAS", 30), ("XLE", 20), ("RIGS", 10)];

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Full(Box<FullView>),
    Degraded(DegradedView),
}

impl DashboardView {
    pub fn is_degraded(&self) -> bool {
        matches!(self, DashboardView::Degraded(_))
    }

    /// Metric cards on screen (none when degraded)
    pub fn metric_cards(&self) -> &[MetricCard] {
        match self {
            DashboardView::Full(view) => &view.metric_cards,
            DashboardView::Degraded(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FullView {
    pub banner: StatusBanner,
    pub metric_cards: [MetricCard; 4],
    pub price_chart: ChartPanel,
    pub score_chart: ChartPanel,
    pub components: [ComponentCard; 4],
    pub activity: ActivityPanel,
    /// Contract and network line
    pub network: String,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    /// "SYSTEM ONLINE" or "LIVE NOW"
    pub status: &'static str,
    pub uptime_hours: f64,
    pub total_cycles: u64,
    /// Present in live mode only
    pub refresh_count: Option<u64>,
    /// Service status badge, live mode only
    pub service_status: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub delta: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Ready(Vec<f64>),
    /// Not enough points yet; carries the placeholder text
    Building(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub title: &'static str,
    pub state: ChartState,
}

impl ChartPanel {
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ChartState::Ready(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentCard {
    pub label: &'static str,
    pub weight_pct: u8,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLine {
    pub text: String,
    pub class: ActivityClass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPanel {
    pub title: &'static str,
    /// Most recent first
    pub lines: Vec<ActivityLine>,
    /// Color lines by class (live mode)
    pub highlight: bool,
    /// `HH:MM` render time prefixed to each line (live mode)
    pub stamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DegradedView {
    pub headline: &'static str,
    pub detail: Option<&'static str>,
    pub cause: String,
}

/// Everything a full view is composed from
pub struct ViewInput<'a> {
    pub mode: Mode,
    pub interval: Duration,
    pub snapshot: &'a Snapshot,
    pub metrics: &'a DerivedMetrics,
    pub history: &'a RollingHistory,
    pub refresh: &'a RefreshState,
    pub now: DateTime<Utc>,
}

pub fn compose_full(input: ViewInput<'_>) -> DashboardView {
    let ViewInput {
        mode,
        interval,
        snapshot,
        metrics,
        history,
        refresh,
        now,
    } = input;

    let banner = StatusBanner {
        status: match mode {
            Mode::Snapshot => "SYSTEM ONLINE",
            Mode::Live => "LIVE NOW",
        },
        uptime_hours: snapshot.uptime_hours,
        total_cycles: snapshot.total_cycles,
        refresh_count: mode.tracks_refreshes().then(|| refresh.refresh_count()),
        service_status: (mode == Mode::Live).then_some("ACTIVE"),
    };

    let (price_title, score_title) = match mode {
        Mode::Snapshot => ("Price History", "Energy Index Score"),
        Mode::Live => ("Price Movement", "Index Score"),
    };

    let footer = match mode {
        Mode::Snapshot => format!(
            "Updated: {} UTC • Refresh: {}s",
            now.format("%H:%M:%S"),
            interval.as_secs()
        ),
        Mode::Live => format!(
            "Last update: {} • Refreshing in {} seconds...",
            now.format("%H:%M:%S"),
            interval.as_secs()
        ),
    };

    DashboardView::Full(Box::new(FullView {
        banner,
        metric_cards: metric_cards(mode, snapshot, metrics),
        price_chart: chart_panel(mode, price_title, "price", &history.prices),
        score_chart: chart_panel(mode, score_title, "score", &history.scores),
        components: component_cards(snapshot),
        activity: activity_panel(mode, metrics, now),
        network: network_line(mode),
        footer,
    }))
}

pub fn compose_degraded(mode: Mode, error: &FetchError) -> DashboardView {
    let (headline, detail) = match mode {
        Mode::Snapshot => ("Offline", None),
        Mode::Live => ("Connection Lost", Some("Reconnecting...")),
    };

    DashboardView::Degraded(DegradedView {
        headline,
        detail,
        cause: error.cause(),
    })
}

fn metric_cards(mode: Mode, snapshot: &Snapshot, metrics: &DerivedMetrics) -> [MetricCard; 4] {
    let change_tone = if metrics.change_is_positive {
        Tone::Positive
    } else {
        Tone::Negative
    };
    let (buys, sells) = snapshot.trade_split();

    [
        MetricCard {
            label: "TOKEN PRICE",
            value: format!("${:.6}", snapshot.price),
            delta: format!("{:+.2}% (24h)", snapshot.price_24h_change),
            tone: change_tone,
        },
        MetricCard {
            label: "ENERGY INDEX",
            value: format!("{:+.2}%", snapshot.score),
            delta: match mode {
                Mode::Snapshot => "Live tracking".to_string(),
                Mode::Live => "Live".to_string(),
            },
            tone: Tone::Neutral,
        },
        MetricCard {
            label: "TOTAL TRADES",
            value: snapshot.total_trades.to_string(),
            delta: format!("↑{} ↓{}", buys, sells),
            tone: Tone::Neutral,
        },
        MetricCard {
            label: "CORRELATION",
            value: format!("{:.0}%", metrics.correlation_pct),
            delta: match mode {
                Mode::Snapshot => "Target: >70%".to_string(),
                Mode::Live => "Improving".to_string(),
            },
            tone: Tone::Neutral,
        },
    ]
}

fn chart_panel(mode: Mode, title: &'static str, series_name: &str, series: &SeriesBuffer) -> ChartPanel {
    let state = if series.is_chartable(mode.min_chart_points()) {
        ChartState::Ready(series.to_vec())
    } else {
        match mode {
            Mode::Snapshot => ChartState::Building("Building history...".to_string()),
            Mode::Live => ChartState::Building(format!(
                "Building {series_name} history... (Need 2+ cycles)"
            )),
        }
    };

    ChartPanel { title, state }
}

fn component_cards(snapshot: &Snapshot) -> [ComponentCard; 4] {
    let [oil, gas, xle, rigs] = COMPONENT_WEIGHTS;
    [
        component_card(oil, format!("${:.2}", snapshot.oil)),
        component_card(gas, format!("${:.2}", snapshot.gas)),
        component_card(xle, format!("${:.2}", snapshot.xle)),
        component_card(rigs, snapshot.rigs.to_string()),
    ]
}

fn component_card((label, weight_pct): (&'static str, u8), value: String) -> ComponentCard {
    ComponentCard {
        label,
        weight_pct,
        value,
    }
}

fn network_line(mode: Mode) -> String {
    match mode {
        Mode::Snapshot => format!("Contract: {} • Network: Base", CONTRACT_ADDRESS),
        Mode::Live => format!(
            "Contract: {}...{} • Network: Base • API: Live",
            &CONTRACT_ADDRESS[..6],
            &CONTRACT_ADDRESS[CONTRACT_ADDRESS.len() - 4..]
        ),
    }
}

fn activity_panel(mode: Mode, metrics: &DerivedMetrics, now: DateTime<Utc>) -> ActivityPanel {
    let mut lines: Vec<ActivityLine> = metrics
        .activity_newest_first()
        .map(|entry| ActivityLine {
            text: entry.text.clone(),
            class: entry.class,
        })
        .collect();

    if lines.is_empty() && mode == Mode::Live {
        lines.push(ActivityLine {
            text: FEED_PLACEHOLDER.to_string(),
            class: ActivityClass::Normal,
        });
    }

    ActivityPanel {
        title: match mode {
            Mode::Snapshot => "Live Activity",
            Mode::Live => "LIVE Activity Stream",
        },
        lines,
        highlight: mode.highlights_activity(),
        stamp: (mode == Mode::Live).then(|| now.format("%H:%M").to_string()),
    }
}
