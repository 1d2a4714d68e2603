//! Background refresh loop for the reviewer dashboard snapshot.
//!
//! The worklist is pull-based: the loop recomputes on a fixed interval and
//! on explicit invalidation after a membership-changing mutation. Each
//! dispatch is stamped with a generation number, and a result is published
//! only while no newer dispatch exists (last-dispatched-wins), so a slow
//! computation can never overwrite the result of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::{watch, Notify};
use tracing::{debug, error};

use crate::domains::pending_review::aggregator::{self, PendingReview};

/// Dashboard refresh interval.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// One published dashboard snapshot.
#[derive(Debug, Clone)]
pub struct PendingReviewSnapshot {
    pub generation: u64,
    pub computed_at: DateTime<Utc>,
    pub review: PendingReview,
}

/// Cheap clonable handle to the poller: request a refresh, read the latest
/// snapshot.
#[derive(Clone)]
pub struct PendingReviewHandle {
    refresh: Arc<Notify>,
    snapshot: watch::Receiver<Option<PendingReviewSnapshot>>,
}

impl PendingReviewHandle {
    /// Ask the poller to recompute ahead of its next tick. Non-blocking;
    /// safe to call from inside a mutation.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    /// The most recent snapshot, if the first computation has finished.
    pub fn snapshot(&self) -> Option<PendingReviewSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// A handle with no poller behind it (CLI tools, unit tests).
    /// `refresh_now` is a no-op and `snapshot` stays empty.
    pub fn detached() -> Self {
        let (_tx, rx) = watch::channel(None);
        Self {
            refresh: Arc::new(Notify::new()),
            snapshot: rx,
        }
    }
}

/// Spawn the refresh loop and return its handle.
pub fn spawn_poller(pool: PgPool, interval: Duration) -> PendingReviewHandle {
    let (tx, rx) = watch::channel(None);
    let refresh = Arc::new(Notify::new());

    let handle = PendingReviewHandle {
        refresh: refresh.clone(),
        snapshot: rx,
    };

    tokio::spawn(run_loop(pool, interval, tx, refresh));

    handle
}

async fn run_loop(
    pool: PgPool,
    interval: Duration,
    tx: watch::Sender<Option<PendingReviewSnapshot>>,
    refresh: Arc<Notify>,
) {
    // Monotonic dispatch counter shared with in-flight computations.
    let dispatched = Arc::new(AtomicU64::new(0));

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        // The first tick fires immediately, so the dashboard has a snapshot
        // right after boot.
        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh.notified() => {}
        }

        let generation = dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        let pool = pool.clone();
        let tx = tx.clone();
        let dispatched = dispatched.clone();

        // The computation runs detached so a slow query cannot block the
        // next dispatch; supersession is handled at publish time.
        tokio::spawn(async move {
            let today = Utc::now().date_naive();
            match aggregator::aggregate_for_dashboard(today, &pool).await {
                Ok(review) => {
                    if dispatched.load(Ordering::SeqCst) != generation {
                        debug!(generation, "Discarding superseded worklist result");
                        return;
                    }
                    let snapshot = PendingReviewSnapshot {
                        generation,
                        computed_at: Utc::now(),
                        review,
                    };
                    // Guarded publish: never let an older generation replace
                    // a newer one, even if both raced past the check above.
                    tx.send_if_modified(|slot| match slot {
                        Some(current) if current.generation > generation => false,
                        _ => {
                            *slot = Some(snapshot);
                            true
                        }
                    });
                }
                Err(e) => {
                    // The stale snapshot stays published; the next tick retries.
                    error!(error = %e, generation, "Pending-review refresh failed");
                }
            }
        });
    }
}
