//! Trailing-edge debouncing on the tokio timer.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delivers only the last value of a burst, once the input has been quiet for
/// `delay`.
///
/// Every [`call`](Self::call) aborts the pending timer task and starts a new
/// one, so the delay restarts on each input and an earlier value is never
/// delivered after a later one. Delivery happens over the channel given at
/// construction, tagged with the generation it was scheduled under.
///
/// A value can already sit in the channel when a newer call or a
/// [`cancel`](Self::cancel) happens. Both bump the generation, so the receiver
/// checks [`is_current`](Self::is_current) before acting on what it reads.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: UnboundedSender<(u64, T)>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer delivering to `tx`.
    #[must_use]
    pub const fn new(delay: Duration, tx: UnboundedSender<(u64, T)>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
            generation: 0,
        }
    }

    /// Schedules `value`, replacing any value still waiting or already
    /// delivered but not yet handled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&mut self, value: T) {
        self.cancel();

        let delay = self.delay;
        let tx = self.tx.clone();
        let generation = self.generation;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send((generation, value)).is_err() {
                tracing::trace!("debounce receiver dropped");
            }
        }));
    }

    /// Drops the waiting value, if any, and invalidates one that has already
    /// been delivered.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a delivered value tagged `generation` is still the latest.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Whether a value is waiting for its quiet period to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// The configured quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
