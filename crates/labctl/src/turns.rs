//! Turn runner - plays turn scripts on a background task
//!
//! Questions are queued and played strictly one after another, so steps
//! from two turns never interleave. Every turn is stamped with the session
//! epoch at submission; clearing the chat bumps the epoch and the worker
//! abandons anything older.

use lab_common::script::TurnScript;
use lab_common::ChatMessage;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// One scripted message, ready to append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEvent {
    pub epoch: u64,
    pub message: ChatMessage,
    /// Final step of its turn
    pub last: bool,
}

struct QueuedTurn {
    epoch: u64,
    script: TurnScript,
}

pub struct TurnRunner {
    queue: mpsc::UnboundedSender<QueuedTurn>,
    epoch: watch::Sender<u64>,
    pace: f64,
}

impl TurnRunner {
    /// Start the worker. Must be called inside a tokio runtime.
    pub fn spawn(pace: f64) -> (Self, mpsc::Receiver<TurnEvent>) {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::channel(32);
        let (epoch_tx, epoch_rx) = watch::channel(0);

        tokio::spawn(run_worker(queue_rx, epoch_rx, events_tx));

        let runner = Self {
            queue: queue_tx,
            epoch: epoch_tx,
            pace,
        };
        (runner, events_rx)
    }

    pub fn epoch(&self) -> u64 {
        *self.epoch.borrow()
    }

    /// Queue a question. Blank questions are ignored and return false.
    pub fn submit(&self, question: &str) -> bool {
        if question.trim().is_empty() {
            return false;
        }

        let script = TurnScript::plan(question, &mut rand::thread_rng()).scaled(self.pace);
        let epoch = self.epoch();
        info!(epoch, steps = script.len(), "Turn queued");

        self.queue.send(QueuedTurn { epoch, script }).is_ok()
    }

    /// Abandon queued and running turns; returns the new epoch.
    /// A step the worker is currently waiting on is cut short.
    pub fn clear(&self) -> u64 {
        self.epoch.send_modify(|epoch| *epoch += 1);
        let next = self.epoch();
        info!(epoch = next, "Session cleared");
        next
    }
}

async fn run_worker(
    mut queue: mpsc::UnboundedReceiver<QueuedTurn>,
    mut epoch: watch::Receiver<u64>,
    events: mpsc::Sender<TurnEvent>,
) {
    while let Some(turn) = queue.recv().await {
        let total = turn.script.len();

        for (i, step) in turn.script.steps.into_iter().enumerate() {
            if *epoch.borrow() != turn.epoch {
                debug!(epoch = turn.epoch, step = i, "Abandoning stale turn");
                break;
            }

            if !step.delay.is_zero() && !wait_step(step.delay, &mut epoch, turn.epoch).await {
                debug!(epoch = turn.epoch, step = i, "Abandoning stale turn");
                break;
            }

            debug!(epoch = turn.epoch, step = i, role = ?step.message.role, "Turn step");
            let event = TurnEvent {
                epoch: turn.epoch,
                message: step.message,
                last: i + 1 == total,
            };
            if events.send(event).await.is_err() {
                // Receiver gone, the UI has shut down
                return;
            }
        }
    }
}

/// Sleep for `delay` unless the session moves past `turn_epoch` first.
/// Returns false when the turn went stale.
async fn wait_step(delay: Duration, epoch: &mut watch::Receiver<u64>, turn_epoch: u64) -> bool {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return *epoch.borrow() == turn_epoch,
            changed = epoch.changed() => {
                if changed.is_err() {
                    // Runner dropped, nothing can clear any more
                    sleep.as_mut().await;
                    return *epoch.borrow() == turn_epoch;
                }
                if *epoch.borrow_and_update() != turn_epoch {
                    return false;
                }
            }
        }
    }
}
