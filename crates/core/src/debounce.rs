//! Debounced value primitive.
//!
//! Delays propagation of a rapidly-changing input until it has been
//! stable for a full delay. Modeled as a small state machine (idle ->
//! pending -> published) driven by a background task: every new input
//! restarts the timer, and dropping the handle aborts the task so a
//! pending value is never published after the consumer is gone.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay used by the identifier lookup flow.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// A value that settles only after its input stops changing.
///
/// Feed raw updates with [`set`](Self::set); read the last settled
/// value with [`settled`](Self::settled) or await new settlements via
/// [`subscribe`](Self::subscribe). Only the last value of a burst is
/// ever published ("last stable value wins").
#[derive(Debug)]
pub struct Debounced<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    worker: JoinHandle<()>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Spawn the debounce worker. Must be called within a Tokio runtime.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, mut input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);

        let worker = tokio::spawn(async move {
            // Idle until the first change, then keep restarting the
            // timer while inputs arrive faster than `delay`.
            while input_rx.changed().await.is_ok() {
                loop {
                    let candidate = input_rx.borrow_and_update().clone();
                    tokio::select! {
                        changed = input_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            // Superseded before the timer fired; restart.
                        }
                        _ = tokio::time::sleep(delay) => {
                            output_tx.send_if_modified(|current| {
                                if *current == candidate {
                                    false
                                } else {
                                    *current = candidate;
                                    true
                                }
                            });
                            break;
                        }
                    }
                }
            }
        });

        Self {
            input,
            output,
            worker,
        }
    }

    /// Feed a new raw value, (re)starting the delay timer. A value equal
    /// to the current input is ignored.
    pub fn set(&self, value: T) {
        self.input.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    /// The last settled value.
    pub fn settled(&self) -> T {
        self.output.borrow().clone()
    }

    /// A receiver whose `changed()` resolves on every new settlement.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
