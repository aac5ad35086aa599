#![allow(dead_code)]
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use energy_index_tui::{FetchError, Historical, Snapshot, SnapshotSource};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

pub fn snapshot(total_cycles: u64, prices: Vec<f64>, scores: Vec<f64>) -> Snapshot {
    Snapshot {
        price: 0.000125,
        price_24h_change: 1.1,
        score: 2.4,
        total_cycles,
        total_trades: 12,
        buy_trades: 8,
        sell_trades: 4,
        uptime_hours: 6.0,
        oil: 79.5,
        gas: 2.9,
        xle: 92.3,
        rigs: 480,
        activity_feed: vec![format!("UPDATE CYCLE {total_cycles}")],
        historical: Historical { prices, scores },
    }
}

/// Source that replays a fixed script of fetch results
///
/// Counts calls and the most fetches ever in flight at once; an optional
/// delay makes each fetch take virtual time.
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<Snapshot, FetchError>>>,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(results: Vec<Result<Snapshot, FetchError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Request("script exhausted".to_string())));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Serve one canned HTTP response on a throwaway port, returning the endpoint URL
pub async fn serve_once(response: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/api/data")
}

/// Accept one connection and never answer
pub async fn serve_silence(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(hold).await;
    });

    format!("http://{addr}/api/data")
}
