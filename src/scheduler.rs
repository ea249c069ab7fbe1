//! Delayed delivery of automated-turn tickets on the tokio runtime.
//!
//! The controller never sleeps. The host hands each [`PendingTurn`] to a
//! [`TurnScheduler`], which sends it back on a channel once the turn delay has
//! elapsed. Only one ticket is in flight at a time; scheduling a new one or
//! calling [`TurnScheduler::cancel`] aborts the previous timer.

use crate::games::tictactoe::PendingTurn;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Fires automated-turn tickets after a fixed delay.
#[derive(Debug)]
pub struct TurnScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<PendingTurn>,
    pending: Option<JoinHandle<()>>,
}

impl TurnScheduler {
    /// Creates a scheduler and the receiver its tickets arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<PendingTurn>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts the timer for `ticket`, replacing any timer already running.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&mut self, ticket: PendingTurn) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(ticket).is_err() {
                debug!("Ticket receiver dropped before delivery");
            }
        }));
    }

    /// Aborts the running timer, if any.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending automated turn");
            }
            handle.abort();
        }
    }

    /// Whether a timer is still waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TurnScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
