//! Background retention sweeper that deletes pastes older than the window.

use crate::{AppError, Database, RetentionConfig};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// What the sweeper is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    Idle,
    Sweeping,
}

/// Delete every paste created before `now - retention_window`.
///
/// # Returns
/// Number of pastes removed.
///
/// # Errors
/// Returns an error if the window cannot be represented as a cutoff or the
/// deletion fails. Nothing is deleted on error.
pub fn sweep_once(db: &Database, retention: &RetentionConfig) -> Result<usize, AppError> {
    let window = chrono::Duration::from_std(retention.retention_window).map_err(|err| {
        AppError::StorageMessage(format!("Retention window out of range: {}", err))
    })?;
    let cutoff = Utc::now().checked_sub_signed(window).ok_or_else(|| {
        AppError::StorageMessage("Retention window reaches before the epoch".to_string())
    })?;
    db.pastes.delete_expired(cutoff)
}

struct SweepTracker {
    state: watch::Sender<SweeperState>,
    completed: AtomicU64,
}

impl SweepTracker {
    fn run(&self, db: &Database, retention: &RetentionConfig) {
        self.state.send_replace(SweeperState::Sweeping);
        match sweep_once(db, retention) {
            Ok(0) => debug!("Retention sweep found nothing to delete"),
            Ok(deleted) => info!("Retention sweep deleted {} expired pastes", deleted),
            Err(err) => warn!("Retention sweep failed: {}", err),
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(SweeperState::Idle);
    }
}

/// Periodic deletion of expired pastes.
pub struct RetentionSweeper {
    db: Arc<Database>,
    retention: RetentionConfig,
}

impl RetentionSweeper {
    /// Prepare a sweeper over `db`.
    pub fn new(db: Arc<Database>, retention: RetentionConfig) -> Self {
        Self { db, retention }
    }

    /// Run one sweep on the calling thread, then keep sweeping every
    /// `sweep_interval` on the Tokio runtime until the handle is shut down
    /// or dropped.
    ///
    /// Sweep failures are logged and never stop the schedule.
    ///
    /// # Returns
    /// A [`SweeperHandle`] that observes and stops the background task.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn start(self) -> SweeperHandle {
        let (state_tx, state_rx) = watch::channel(SweeperState::Idle);
        let tracker = Arc::new(SweepTracker {
            state: state_tx,
            completed: AtomicU64::new(0),
        });

        tracker.run(&self.db, &self.retention);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run_sweep_loop(
            self.db,
            self.retention,
            tracker.clone(),
            shutdown_rx,
        ));

        SweeperHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
            state: state_rx,
            tracker,
        }
    }
}

async fn run_sweep_loop(
    db: Arc<Database>,
    retention: RetentionConfig,
    tracker: Arc<SweepTracker>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    // tokio panics on a zero period.
    let period = retention.sweep_interval.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Retention sweeper running every {:?}, window {:?}",
        period, retention.retention_window
    );

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,
            _ = ticker.tick() => {
                let db = db.clone();
                let tracker = tracker.clone();
                if let Err(err) =
                    tokio::task::spawn_blocking(move || tracker.run(&db, &retention)).await
                {
                    warn!("Retention sweep task panicked: {}", err);
                }
            }
        }
    }

    debug!("Retention sweeper stopped");
}

/// Handle to a running [`RetentionSweeper`].
///
/// Dropping the handle stops the schedule after any in-flight sweep.
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    state: watch::Receiver<SweeperState>,
    tracker: Arc<SweepTracker>,
}

impl SweeperHandle {
    /// Current sweeper state.
    pub fn state(&self) -> SweeperState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SweeperState> {
        self.state.clone()
    }

    /// Sweeps finished so far, including failed ones and the startup sweep.
    pub fn completed_sweeps(&self) -> u64 {
        self.tracker.completed.load(Ordering::SeqCst)
    }

    /// Stop the schedule and wait for the background task to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("Retention sweeper task failed: {}", err);
            }
        }
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
