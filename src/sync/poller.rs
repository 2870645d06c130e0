//! Generic polling engine.
//!
//! A [`Poller`] runs one tokio task per active sync. On every interval tick
//! it issues a fetch, tagged with a monotonically increasing sequence
//! number, unless the in-flight limit is reached, in which case the tick is
//! skipped rather than queued. A completed fetch is applied to the state
//! only if its sequence number is newer than the last applied one, so a
//! slow response can never overwrite a fresher one.
//!
//! State is published through a [`watch`] channel. Stopping the handle
//! aborts the task; in-flight fetches live in a [`JoinSet`] owned by that
//! task, so they are aborted with it and their results are never applied.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Something that can be fetched periodically and folded into a state.
#[async_trait]
pub trait PollSource: Send + Sync + 'static {
    /// Result of one fetch.
    type Output: Send + 'static;
    /// Published state.
    type State: Clone + Send + Sync + 'static;

    /// Short description used in log lines.
    fn describe(&self) -> String;

    /// Perform one fetch. Must not panic on backend misbehaviour.
    async fn fetch(&self) -> Self::Output;

    /// Fold a completed fetch into the state.
    fn apply(&self, state: &mut Self::State, output: Self::Output);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    /// Upper bound on concurrently outstanding fetches.
    pub max_in_flight: usize,
}

impl PollOptions {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            max_in_flight: 1,
        }
    }

    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }
}

/// Spawns polling tasks.
pub struct Poller;

impl Poller {
    /// Start polling `source` immediately, then every `options.interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<P: PollSource>(
        source: P,
        initial: P::State,
        options: PollOptions,
    ) -> PollHandle<P::State> {
        let label = source.describe();
        let (tx, rx) = watch::channel(initial);

        tracing::info!(
            "Poller started for {} (interval: {}ms)",
            label,
            options.interval.as_millis()
        );

        let task = tokio::spawn(run(Arc::new(source), tx, options));

        PollHandle {
            state: rx,
            task: Some(task),
            label,
        }
    }
}

async fn run<P: PollSource>(source: Arc<P>, tx: watch::Sender<P::State>, options: PollOptions) {
    let label = source.describe();
    let mut ticker = tokio::time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut in_flight: JoinSet<(u64, P::Output)> = JoinSet::new();
    let mut issued: u64 = 0;
    let mut applied: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if in_flight.len() >= options.max_in_flight {
                    tracing::debug!("{}: fetch still in flight, skipping tick", label);
                    continue;
                }
                issued += 1;
                let seq = issued;
                let source = Arc::clone(&source);
                tracing::debug!("{}: issuing fetch #{}", label, seq);
                in_flight.spawn(async move { (seq, source.fetch().await) });
            }

            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok((seq, output)) if seq > applied => {
                        applied = seq;
                        tx.send_modify(|state| source.apply(state, output));
                    }
                    Ok((seq, _)) => {
                        tracing::debug!(
                            "{}: dropping fetch #{} (already applied #{})",
                            label, seq, applied
                        );
                    }
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => tracing::error!("{}: fetch task failed: {}", label, e),
                }
            }

            _ = tx.closed() => {
                tracing::debug!("{}: all readers gone, stopping", label);
                break;
            }
        }
    }
}

/// Owner's handle on a running poller.
///
/// Dropping the handle stops the poller.
#[derive(Debug)]
pub struct PollHandle<S> {
    state: watch::Receiver<S>,
    task: Option<JoinHandle<()>>,
    label: String,
}

impl<S: Clone> PollHandle<S> {
    /// Clone of the latest published state.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Run `f` against the latest state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    /// A receiver for consumers that want to await changes.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    /// True if the state changed since the last [`mark_seen`](Self::mark_seen).
    pub fn has_changed(&self) -> bool {
        self.state.has_changed().unwrap_or(false)
    }

    pub fn mark_seen(&mut self) {
        self.state.borrow_and_update();
    }

    /// Wait for the next state change. Returns false once the poller is gone.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop polling. Idempotent, and safe with no fetch in flight.
    ///
    /// The last published state stays readable.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("Poller stopped for {}", self.label);
        }
    }
}

impl<S> Drop for PollHandle<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
