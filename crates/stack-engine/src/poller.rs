//! Background polling of engine state
//!
//! A [`Poller`] owns a named thread that polls [`LiveState`] once on
//! start and then on a fixed cadence. The thread is driven by a channel:
//! the handle can ask for an out-of-band poll or for shutdown. Ticks are
//! scheduled against absolute deadlines, so out-of-band polls never shift
//! the cadence.

use crate::query::EngineQuery;
use crate::tracker::{LiveState, PollReport};
use crate::{Error, Result};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const THREAD_NAME: &str = "stackmix-poller";

enum Signal {
    Refresh,
    Stop,
}

/// Spawns polling threads.
pub struct Poller;

impl Poller {
    /// Start polling `state` through `query` every `interval`.
    ///
    /// `on_refresh` runs on the polling thread after every poll, timed or
    /// requested.
    pub fn spawn<Q, F>(
        state: Arc<LiveState>,
        query: Q,
        interval: Duration,
        on_refresh: F,
    ) -> Result<PollerHandle>
    where
        Q: EngineQuery + 'static,
        F: FnMut(&PollReport) + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let thread = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run(&state, &query, interval, receiver, on_refresh))
            .map_err(|source| Error::Spawn {
                program: THREAD_NAME.to_string(),
                source,
            })?;

        tracing::debug!(interval_secs = interval.as_secs_f64(), "Started poller");
        Ok(PollerHandle {
            sender: Some(sender),
            thread: Some(thread),
        })
    }
}

fn run<F>(
    state: &LiveState,
    query: &dyn EngineQuery,
    interval: Duration,
    receiver: mpsc::Receiver<Signal>,
    mut on_refresh: F,
) where
    F: FnMut(&PollReport),
{
    let mut poll = || {
        let report = state.poll(query);
        on_refresh(&report);
    };

    // The first deadline is now, so the initial poll fires immediately
    let mut next_tick = Instant::now();
    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match receiver.recv_timeout(timeout) {
            Ok(Signal::Refresh) => {
                if drain_refreshes(&receiver) {
                    break;
                }
                poll();
            }
            Err(RecvTimeoutError::Timeout) => {
                poll();
                next_tick += interval;
                let now = Instant::now();
                if next_tick <= now {
                    // A poll overran whole periods; resume from now
                    next_tick = now + interval;
                }
            }
            Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    tracing::debug!("Poller stopped");
}

/// Collapse a burst of queued refresh requests into one. Returns true
/// when a stop was queued behind them.
fn drain_refreshes(receiver: &mpsc::Receiver<Signal>) -> bool {
    loop {
        match receiver.try_recv() {
            Ok(Signal::Refresh) => {}
            Ok(Signal::Stop) | Err(TryRecvError::Disconnected) => return true,
            Err(TryRecvError::Empty) => return false,
        }
    }
}

/// Control handle for a running poller. Dropping it stops the poller.
pub struct PollerHandle {
    sender: Option<Sender<Signal>>,
    thread: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Request an immediate poll. Returns false once the poller has exited.
    pub fn refresh(&self) -> bool {
        self.sender
            .as_ref()
            .is_some_and(|s| s.send(Signal::Refresh).is_ok())
    }

    /// Stop polling and wait for the thread. An in-flight poll completes
    /// first.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(Signal::Stop);
        }
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::warn!("Poller thread panicked");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
