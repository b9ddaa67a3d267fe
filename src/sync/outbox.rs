//! Feedback outbox
//!
//! Swipes and ratings never wait on the network. Each event is recorded in an
//! in-memory ledger and handed to a single worker that delivers events in
//! FIFO order, retrying a bounded number of times before marking the event
//! failed.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::FeedbackSink;
use crate::models::FeedbackEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboxPolicy {
    pub max_attempts: u32,
    /// Base delay; attempt `n` waits `n * retry_delay` before the next try
    pub retry_delay: Duration,
    /// Delivered records kept in the ledger; failed ones are never pruned
    pub delivered_retention: usize,
}

impl Default for OutboxPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_millis(250),
            delivered_retention: 500,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Failed,
}

#[derive(Clone, Debug)]
pub struct OutboxRecord {
    pub id: Uuid,
    pub event: FeedbackEvent,
    pub status: DeliveryStatus,
    pub attempts: u32,
    pub enqueued_at: String,
    pub last_error: Option<String>,
}

enum Command {
    Deliver(Uuid, FeedbackEvent),
    Flush(oneshot::Sender<()>),
}

type Ledger = Arc<Mutex<Vec<OutboxRecord>>>;

pub struct FeedbackOutbox {
    sender: mpsc::UnboundedSender<Command>,
    ledger: Ledger,
    worker: JoinHandle<()>,
}

impl FeedbackOutbox {
    /// Start the delivery worker. Must be called inside a tokio runtime.
    pub fn spawn(sink: Arc<dyn FeedbackSink>, policy: OutboxPolicy) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ledger: Ledger = Arc::new(Mutex::new(Vec::new()));

        let worker = tokio::spawn(run_worker(receiver, sink, policy, ledger.clone()));

        Self {
            sender,
            ledger,
            worker,
        }
    }

    /// Record the event and queue it for delivery. Never blocks.
    pub fn enqueue(&self, event: FeedbackEvent) -> Uuid {
        let id = Uuid::new_v4();
        tracing::debug!(
            "Outbox: queued {} for book {} ({})",
            event.action,
            event.book_id,
            id
        );

        lock(&self.ledger).push(OutboxRecord {
            id,
            event: event.clone(),
            status: DeliveryStatus::Pending,
            attempts: 0,
            enqueued_at: chrono::Utc::now().to_rfc3339(),
            last_error: None,
        });

        if self.sender.send(Command::Deliver(id, event)).is_err() {
            tracing::error!("Outbox worker is gone; dropping feedback {}", id);
            update(&self.ledger, id, |r| {
                r.status = DeliveryStatus::Failed;
                r.last_error = Some("outbox closed".to_string());
            });
        }

        id
    }

    /// Snapshot of the ledger in enqueue order. Pending and failed events are
    /// always present; only the newest `delivered_retention` deliveries are kept.
    pub fn records(&self) -> Vec<OutboxRecord> {
        lock(&self.ledger).clone()
    }

    pub fn pending(&self) -> usize {
        lock(&self.ledger)
            .iter()
            .filter(|r| r.status == DeliveryStatus::Pending)
            .count()
    }

    /// Resolves once every event enqueued before this call is delivered or failed.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(Command::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    pub async fn shutdown(self) {
        self.flush().await;

        let FeedbackOutbox { sender, worker, .. } = self;
        drop(sender);

        if let Err(e) = worker.await {
            tracing::error!("Outbox worker ended abnormally: {}", e);
        }
    }
}

fn lock(ledger: &Ledger) -> std::sync::MutexGuard<'_, Vec<OutboxRecord>> {
    ledger.lock().unwrap_or_else(PoisonError::into_inner)
}

fn update(ledger: &Ledger, id: Uuid, f: impl FnOnce(&mut OutboxRecord)) {
    if let Some(record) = lock(ledger).iter_mut().find(|r| r.id == id) {
        f(record);
    }
}

/// Drop the oldest delivered records beyond `keep`
fn prune_delivered(ledger: &Ledger, keep: usize) {
    let mut records = lock(ledger);
    let delivered = records
        .iter()
        .filter(|r| r.status == DeliveryStatus::Delivered)
        .count();
    let mut excess = delivered.saturating_sub(keep);
    if excess == 0 {
        return;
    }

    tracing::debug!("Outbox: pruning {} delivered records", excess);
    records.retain(|r| {
        if excess > 0 && r.status == DeliveryStatus::Delivered {
            excess -= 1;
            false
        } else {
            true
        }
    });
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<Command>,
    sink: Arc<dyn FeedbackSink>,
    policy: OutboxPolicy,
    ledger: Ledger,
) {
    tracing::info!("Feedback outbox started");

    while let Some(command) = receiver.recv().await {
        match command {
            Command::Deliver(id, event) => deliver(sink.as_ref(), &policy, &ledger, id, &event).await,
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    tracing::info!("Feedback outbox stopped");
}

async fn deliver(
    sink: &dyn FeedbackSink,
    policy: &OutboxPolicy,
    ledger: &Ledger,
    id: Uuid,
    event: &FeedbackEvent,
) {
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match sink.submit_feedback(event).await {
            Ok(()) => {
                update(ledger, id, |r| {
                    r.status = DeliveryStatus::Delivered;
                    r.attempts = attempt;
                    r.last_error = None;
                });
                prune_delivered(ledger, policy.delivered_retention);
                return;
            }
            Err(e) => {
                tracing::warn!(
                    "Feedback {} for book {} failed (attempt {}/{}): {}",
                    event.action,
                    event.book_id,
                    attempt,
                    max_attempts,
                    e
                );
                update(ledger, id, |r| {
                    r.attempts = attempt;
                    r.last_error = Some(e.to_string());
                });
                if attempt < max_attempts {
                    tokio::time::sleep(policy.retry_delay * attempt).await;
                }
            }
        }
    }

    tracing::error!(
        "Giving up on {} for book {} after {} attempts",
        event.action,
        event.book_id,
        max_attempts
    );
    update(ledger, id, |r| r.status = DeliveryStatus::Failed);
}
