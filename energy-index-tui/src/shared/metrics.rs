//! Display metrics derived from a single snapshot
//!
//! Everything here is pure: the same snapshot always yields the same metrics.

use super::history::trailing;
use super::types::Snapshot;

/// Correlation shown before any cycles have run
const CORRELATION_BASE: f64 = 70.0;
/// Correlation gained per completed upstream cycle
const CORRELATION_PER_CYCLE: f64 = 0.1;
const CORRELATION_CAP: f64 = 100.0;

const TRADE_KEYWORDS: [&str; 3] = ["Trade", "BUY", "SELL"];
const ERROR_KEYWORDS: [&str; 2] = ["ERROR", "Failed"];
const CYCLE_KEYWORD: &str = "UPDATE CYCLE";

/// Keyword class of one activity feed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityClass {
    Normal,
    Trade,
    Error,
    CycleBoundary,
}

/// Activity entry paired with its class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedActivity {
    pub text: String,
    pub class: ActivityClass,
}

/// Metrics recomputed from scratch every cycle
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub correlation_pct: f64,
    pub change_is_positive: bool,
    /// Trailing feed window, oldest first
    pub activity: Vec<ClassifiedActivity>,
}

impl DerivedMetrics {
    pub fn derive(snapshot: &Snapshot, window: usize) -> Self {
        let activity = trailing(&snapshot.activity_feed, window)
            .iter()
            .map(|text| ClassifiedActivity {
                class: classify_activity(text),
                text: text.clone(),
            })
            .collect();

        Self {
            correlation_pct: correlation_pct(snapshot.total_cycles),
            change_is_positive: change_is_positive(snapshot.price_24h_change),
            activity,
        }
    }

    /// Classified entries, most recent first
    pub fn activity_newest_first(&self) -> impl Iterator<Item = &ClassifiedActivity> {
        self.activity.iter().rev()
    }
}

/// Confidence proxy that grows with upstream cycles and saturates at 100%.
///
/// Not a statistical correlation; kept as the index service displays it.
pub fn correlation_pct(total_cycles: u64) -> f64 {
    (CORRELATION_BASE + total_cycles as f64 * CORRELATION_PER_CYCLE).min(CORRELATION_CAP)
}

pub fn change_is_positive(price_24h_change: f64) -> bool {
    price_24h_change >= 0.0
}

/// First matching rule wins: trade, then error, then cycle boundary
pub fn classify_activity(entry: &str) -> ActivityClass {
    if TRADE_KEYWORDS.iter().any(|k| entry.contains(k)) {
        ActivityClass::Trade
    } else if ERROR_KEYWORDS.iter().any(|k| entry.contains(k)) {
        ActivityClass::Error
    } else if entry.contains(CYCLE_KEYWORD) {
        ActivityClass::CycleBoundary
    } else {
        ActivityClass::Normal
    }
}
