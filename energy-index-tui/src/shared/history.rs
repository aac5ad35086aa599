//! Rolling display history and refresh bookkeeping
//!
//! The index service already returns its full price/score history with every
//! payload; this module only bounds and windows it for display.

use std::collections::VecDeque;

use super::types::Historical;

/// Ring buffer holding the N most recent points of one series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuffer {
    points: VecDeque<f64>,
    max_size: usize,
}

impl SeriesBuffer {
    pub fn new(max_size: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Replace contents with the tail of `points` that fits the buffer
    ///
    /// Returns how many leading points did not fit.
    pub fn replace(&mut self, points: &[f64]) -> usize {
        self.points.clear();
        let start = points.len().saturating_sub(self.max_size);
        self.points.extend(&points[start..]);
        start
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.points.iter().copied().collect()
    }

    /// True once the series has enough points to draw
    pub fn is_chartable(&self, min_points: usize) -> bool {
        !self.points.is_empty() && self.points.len() >= min_points
    }
}

/// Price and score history retained across cycles
///
/// Charts show the upstream history as sent, up to `capacity` points per
/// series. Anything older than that is dropped and reported by
/// [`absorb`](Self::absorb) so the caller can log it.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingHistory {
    pub prices: SeriesBuffer,
    pub scores: SeriesBuffer,
}

impl RollingHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            prices: SeriesBuffer::new(capacity),
            scores: SeriesBuffer::new(capacity),
        }
    }

    /// Adopt the upstream history from a freshly fetched snapshot
    ///
    /// Returns the number of points trimmed to fit, across both series.
    pub fn absorb(&mut self, historical: &Historical) -> usize {
        self.prices.replace(&historical.prices) + self.scores.replace(&historical.scores)
    }
}

/// Number of refresh cycles completed by this process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshState {
    refresh_count: u64,
}

impl RefreshState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.refresh_count = self.refresh_count.saturating_add(1);
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }
}

/// Last `window` entries of the feed in their original (oldest first) order
pub fn trailing(feed: &[String], window: usize) -> &[String] {
    &feed[feed.len().saturating_sub(window)..]
}
