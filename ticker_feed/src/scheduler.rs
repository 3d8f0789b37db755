//! Recurring tick scheduling and snapshot broadcasting.
//!
//! `Schedule::start` moves a `QuoteSimulator` onto a dedicated timer thread that
//! waits on a `crossbeam_channel::tick` and a cancellation channel with `select!`.
//! Each timer event advances the simulator once and hands the new snapshot to
//! the `on_tick` callback. Ticks are serialized: the single thread never starts
//! tick N+1 before the callback for tick N has returned.
//!
//! Event model for channel consumers (`Schedule::broadcast`):
//! - `FeedEvent::Snapshot(Arc<Snapshot>)`: a freshly published snapshot.
//! - `FeedEvent::Shutdown`: the timer thread has stopped; nothing follows.
//!
//! Cancellation: `ScheduleHandle::cancel` raises a flag that is checked before
//! and after every tick computation, closes the cancellation channel and joins
//! the thread. Once `cancel` returns no callback runs again. Dropping the handle
//! cancels as well.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, select, unbounded};
use log::{debug, info, warn};
use ticker_common::{Result, Snapshot, TickerError};

use crate::model::simulator::QuoteSimulator;

/// Message published by a broadcasting schedule.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// New snapshot produced by a tick.
    Snapshot(Arc<Snapshot>),
    /// The schedule has stopped.
    Shutdown,
}

/// Entry point for running a simulator on a fixed cadence.
pub struct Schedule;

impl Schedule {
    /// Start ticking `simulator` every `interval`, calling `on_tick` with each
    /// new snapshot. Returns the handle that stops the timer.
    pub fn start<F>(
        simulator: QuoteSimulator,
        interval: Duration,
        on_tick: F,
    ) -> Result<ScheduleHandle>
    where
        F: FnMut(Arc<Snapshot>) + Send + 'static,
    {
        Self::spawn(simulator, interval, on_tick, || {})
    }

    /// Start ticking `simulator` and publish every snapshot to `tx`.
    ///
    /// `FeedEvent::Shutdown` is sent once the timer thread exits. A closed
    /// receiver does not stop the timer; cancel the handle for that.
    pub fn broadcast(
        simulator: QuoteSimulator,
        interval: Duration,
        tx: Sender<FeedEvent>,
    ) -> Result<ScheduleHandle> {
        let shutdown_tx = tx.clone();
        Self::spawn(
            simulator,
            interval,
            move |snapshot| {
                if tx.send(FeedEvent::Snapshot(snapshot)).is_err() {
                    debug!("Snapshot dropped: subscriber is gone");
                }
            },
            move || {
                let _ = shutdown_tx.send(FeedEvent::Shutdown);
            },
        )
    }

    fn spawn<F, S>(
        mut simulator: QuoteSimulator,
        interval: Duration,
        mut on_tick: F,
        on_stop: S,
    ) -> Result<ScheduleHandle>
    where
        F: FnMut(Arc<Snapshot>) + Send + 'static,
        S: FnOnce() + Send + 'static,
    {
        if interval.is_zero() {
            return Err(TickerError::InvalidInterval);
        }
        let cancelled = Arc::new(AtomicBool::new(false));
        let (cancel_tx, cancel_rx) = unbounded::<()>();
        let flag = Arc::clone(&cancelled);

        let worker = thread::Builder::new()
            .name(String::from("quote-simulator"))
            .spawn(move || {
                info!(
                    "Quote simulator started (Thread ID: {:?}, interval {:?})",
                    thread::current().id(),
                    interval
                );
                let ticker = crossbeam_channel::tick(interval);
                loop {
                    select! {
                        recv(cancel_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            if flag.load(Ordering::SeqCst) {
                                break;
                            }
                            let snapshot = simulator.advance();
                            if flag.load(Ordering::SeqCst) {
                                break;
                            }
                            on_tick(snapshot);
                        }
                    }
                }
                on_stop();
                info!("Quote simulator stopped");
            })?;

        Ok(ScheduleHandle {
            cancel_tx: Some(cancel_tx),
            cancelled,
            worker: Some(worker),
        })
    }
}

/// Cancellation handle for a running schedule.
pub struct ScheduleHandle {
    cancel_tx: Option<Sender<()>>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ScheduleHandle {
    /// Stop the schedule. Idempotent.
    ///
    /// Blocks until an in-flight tick has finished, unless called from the
    /// timer thread itself (from inside `on_tick`), in which case the loop
    /// exits right after the callback returns.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.cancel_tx.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        if worker.thread().id() == thread::current().id() {
            return;
        }
        if worker.join().is_err() {
            warn!("Quote simulator thread panicked");
        }
    }

    /// True once `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::delta::FixedDeltas;
    use std::sync::atomic::AtomicUsize;
    use ticker_common::SeedEntry;

    fn simulator() -> QuoteSimulator {
        let seed = vec![SeedEntry::new("AAPL", 170.12), SeedEntry::new("MSFT", 370.95)];
        QuoteSimulator::new(&seed, Box::new(FixedDeltas::new(vec![0.01]))).unwrap()
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = Schedule::start(simulator(), Duration::ZERO, |_| {});
        assert!(matches!(result, Err(TickerError::InvalidInterval)));
    }

    #[test]
    fn ticks_fire_in_sequence() {
        let (tx, rx) = unbounded();
        let on_tick = move |s: Arc<Snapshot>| {
            let _ = tx.send(s.sequence);
        };
        let mut handle = Schedule::start(simulator(), Duration::from_millis(5), on_tick).unwrap();
        let received: Vec<u64> = (0..3)
            .map(|_| rx.recv_timeout(Duration::from_secs(2)).unwrap())
            .collect();
        handle.cancel();
        assert_eq!(received, vec![1, 2, 3]);
    }

    #[test]
    fn no_ticks_after_cancel() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut handle = Schedule::start(simulator(), Duration::from_millis(5), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        thread::sleep(Duration::from_millis(30));
        handle.cancel();
        assert!(handle.is_cancelled());
        let at_cancel = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), at_cancel);
    }

    #[test]
    fn cancel_is_idempotent_and_drop_is_safe() {
        let mut handle = Schedule::start(simulator(), Duration::from_millis(5), |_| {}).unwrap();
        handle.cancel();
        handle.cancel();
        drop(handle);
    }

    #[test]
    fn broadcast_ends_with_shutdown() {
        let (tx, rx) = unbounded();
        let mut handle = Schedule::broadcast(simulator(), Duration::from_millis(5), tx).unwrap();
        match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            FeedEvent::Snapshot(snapshot) => assert_eq!(snapshot.sequence, 1),
            FeedEvent::Shutdown => panic!("shutdown before first tick"),
        }
        handle.cancel();
        let last = rx.iter().last();
        assert!(matches!(last, Some(FeedEvent::Shutdown)));
    }
}
