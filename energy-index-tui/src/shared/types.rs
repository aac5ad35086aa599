/// Core data types for the energy index dashboard
///
/// These types mirror the JSON payload served by the index service's
/// `/api/data` endpoint.
use serde::{Deserialize, Serialize};

/// One fetched payload from the index service
///
/// Every field is required. A payload missing any of them is rejected at
/// decode time rather than rendered partially.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    pub price: f64,
    /// 24h price change in percent
    pub price_24h_change: f64,
    /// Energy index score in percent
    pub score: f64,
    pub total_cycles: u64,
    pub total_trades: u64,
    pub buy_trades: u64,
    pub sell_trades: u64,
    pub uptime_hours: f64,
    pub oil: f64,
    pub gas: f64,
    pub xle: f64,
    pub rigs: u64,
    /// Upstream activity log, oldest first
    pub activity_feed: Vec<String>,
    pub historical: Historical,
}

/// Full price/score history as kept by the index service
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Historical {
    pub prices: Vec<f64>,
    pub scores: Vec<f64>,
}

impl Snapshot {
    /// Buy/sell split as reported upstream (not reconciled against `total_trades`)
    pub fn trade_split(&self) -> (u64, u64) {
        (self.buy_trades, self.sell_trades)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn snapshot() -> Snapshot {
        Snapshot {
            price: 0.000123,
            price_24h_change: 2.5,
            score: 1.25,
            total_cycles: 42,
            total_trades: 7,
            buy_trades: 4,
            sell_trades: 3,
            uptime_hours: 3.5,
            oil: 78.12,
            gas: 2.71,
            xle: 91.4,
            rigs: 483,
            activity_feed: vec![
                "UPDATE CYCLE 41".to_string(),
                "BUY 1200 BSE".to_string(),
                "Fetched oil price".to_string(),
            ],
            historical: Historical {
                prices: vec![0.000120, 0.000121, 0.000123],
                scores: vec![0.5, 1.0, 1.25],
            },
        }
    }
}
