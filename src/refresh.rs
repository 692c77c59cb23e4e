//! Refresh cycle
//!
//! Every tick fetches all configured tokens one after another. If any fetch
//! fails the whole batch is discarded and the board falls back to placeholder
//! prices with the error attached. The next successful tick replaces the
//! placeholders with live data again.
//!
//! Ticks run on a dedicated thread with its own tokio runtime. Finished boards
//! are handed to the UI over a channel, so the UI only ever observes results.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender};
use serde::Serialize;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use crate::core::{placeholder_records, FetchError, PriceRecord, PriceSource};

/// Whether the last batch produced live data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickerState {
    /// Cards show live prices
    Normal,
    /// Cards show placeholder prices and an error banner
    Degraded,
}

/// Result of one refresh batch
#[derive(Debug, Clone, Serialize)]
pub struct PriceBoard {
    pub state: TickerState,
    pub records: Vec<PriceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl PriceBoard {
    /// Board holding live prices
    pub fn normal(records: Vec<PriceRecord>) -> Self {
        Self {
            state: TickerState::Normal,
            records,
            error: None,
            updated_at: Utc::now(),
        }
    }

    /// Placeholder board for a failed batch
    pub fn degraded(error: &FetchError) -> Self {
        Self {
            state: TickerState::Degraded,
            records: placeholder_records(),
            error: Some(error.to_string()),
            updated_at: Utc::now(),
        }
    }
}

/// Fetch every token in order and build the board for this tick
pub async fn refresh_batch(source: &dyn PriceSource, tokens: &[String]) -> PriceBoard {
    match fetch_all(source, tokens).await {
        Ok(records) => {
            tracing::debug!("Refreshed {} prices from {}", records.len(), source.name());
            PriceBoard::normal(records)
        }
        Err(e) => {
            tracing::warn!("Price refresh failed, using placeholder data: {}", e);
            PriceBoard::degraded(&e)
        }
    }
}

async fn fetch_all(
    source: &dyn PriceSource,
    tokens: &[String],
) -> Result<Vec<PriceRecord>, FetchError> {
    let mut records = Vec::with_capacity(tokens.len());
    for token in tokens {
        records.push(source.fetch(token).await?);
    }
    Ok(records)
}

/// Background thread driving refresh ticks
pub struct RefreshScheduler {
    refresh_now: Arc<Notify>,
    _handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Start ticking: once immediately, then every `interval`.
    ///
    /// `on_board` runs after each board is published (used to wake the UI).
    /// The thread exits at the first tick after the receiver is dropped.
    pub fn spawn<F>(
        source: Arc<dyn PriceSource>,
        tokens: Vec<String>,
        interval: Duration,
        on_board: F,
    ) -> anyhow::Result<(Self, Receiver<PriceBoard>)>
    where
        F: Fn() + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        let refresh_now = Arc::new(Notify::new());
        let notify = Arc::clone(&refresh_now);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let handle = std::thread::Builder::new()
            .name("price-refresh".to_string())
            .spawn(move || {
                runtime.block_on(run_loop(source, tokens, interval, notify, tx, on_board));
                tracing::debug!("Refresh thread stopped");
            })?;

        Ok((
            Self {
                refresh_now,
                _handle: handle,
            },
            rx,
        ))
    }

    /// Run a tick as soon as the current one (if any) finishes
    pub fn refresh_now(&self) {
        self.refresh_now.notify_one();
    }
}

async fn run_loop<F>(
    source: Arc<dyn PriceSource>,
    tokens: Vec<String>,
    interval: Duration,
    refresh_now: Arc<Notify>,
    tx: Sender<PriceBoard>,
    on_board: F,
) where
    F: Fn(),
{
    tracing::info!(
        "Refreshing {} tokens every {}s",
        tokens.len(),
        interval.as_secs()
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh_now.notified() => {
                tracing::debug!("Manual refresh requested");
                ticker.reset();
            }
        }

        let board = refresh_batch(source.as_ref(), &tokens).await;
        if tx.send(board).is_err() {
            break;
        }
        on_board();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Source answering from a fixed table, optionally failing every call
    struct FakeSource {
        prices: Vec<PriceRecord>,
        failing: AtomicBool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(prices: Vec<PriceRecord>) -> Self {
            Self {
                prices,
                failing: AtomicBool::new(false),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PriceSource for FakeSource {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn fetch(&self, token: &str) -> Result<PriceRecord, FetchError> {
            self.calls.lock().unwrap().push(token.to_string());
            if self.failing.load(Ordering::SeqCst) {
                return Err(FetchError::Network("connection refused".to_string()));
            }
            self.prices
                .iter()
                .find(|r| r.token == token)
                .cloned()
                .ok_or_else(|| FetchError::MissingField {
                    token: token.to_string(),
                    field: "usd",
                })
        }
    }

    fn tokens(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn live_prices() -> Vec<PriceRecord> {
        vec![
            PriceRecord::new("bitcoin", 101000.5, 1.25),
            PriceRecord::new("dogecoin", 0.21, -4.0),
            PriceRecord::new("cardano", 0.9, 0.5),
        ]
    }

    #[tokio::test]
    async fn test_batch_success_keeps_config_order() {
        let source = FakeSource::new(live_prices());
        let board = refresh_batch(&source, &tokens(&["cardano", "bitcoin"])).await;

        assert_eq!(board.state, TickerState::Normal);
        assert!(board.error.is_none());
        let names: Vec<&str> = board.records.iter().map(|r| r.token.as_str()).collect();
        assert_eq!(names, vec!["cardano", "bitcoin"]);
        assert_eq!(board.records[1].price, 101000.5);
    }

    #[tokio::test]
    async fn test_single_failure_degrades_whole_batch() {
        let source = FakeSource::new(live_prices());
        let board = refresh_batch(&source, &tokens(&["bitcoin", "notacoin", "cardano"])).await;

        assert_eq!(board.state, TickerState::Degraded);
        assert_eq!(board.records, placeholder_records());
        assert!(board.error.as_deref().unwrap().contains("notacoin"));
        // The batch stops at the first failure
        assert_eq!(*source.calls.lock().unwrap(), tokens(&["bitcoin", "notacoin"]));
    }

    #[test]
    fn test_degraded_then_recovers() {
        let source = FakeSource::new(live_prices());
        let configured = tokens(&["dogecoin"]);

        source.failing.store(true, Ordering::SeqCst);
        let board = tokio_test::block_on(refresh_batch(&source, &configured));
        assert_eq!(board.state, TickerState::Degraded);
        assert!(board.error.unwrap().contains("connection refused"));

        source.failing.store(false, Ordering::SeqCst);
        let board = tokio_test::block_on(refresh_batch(&source, &configured));
        assert_eq!(board.state, TickerState::Normal);
        assert_eq!(board.records, vec![PriceRecord::new("dogecoin", 0.21, -4.0)]);
    }

    #[test]
    fn test_scheduler_publishes_boards() {
        let source = Arc::new(FakeSource::new(live_prices()));
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakeups);

        let (scheduler, rx) = RefreshScheduler::spawn(
            source.clone(),
            tokens(&["bitcoin"]),
            Duration::from_secs(3600),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        )
        .unwrap();

        // First tick fires immediately
        let board = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(board.state, TickerState::Normal);

        // Second tick only comes from a manual request
        scheduler.refresh_now();
        let board = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(board.records.len(), 1);
        assert_eq!(source.calls.lock().unwrap().len(), 2);

        // on_board runs after the send, give it a moment
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(wakeups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_board_serializes_state() {
        let board = PriceBoard::degraded(&FetchError::Status(429));
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["state"], "degraded");
        assert_eq!(json["records"].as_array().unwrap().len(), 3);
        assert!(json["error"].as_str().unwrap().contains("429"));
    }
}
