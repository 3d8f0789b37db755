//! The ticker component: mount, subscribe, re-render, unmount.
//!
//! State machine:
//! - `Mounted`: the schedule is running and every new snapshot is rendered.
//! - `Unmounted`: the schedule is cancelled, queued snapshots are discarded and
//!   no further render happens. The transition is immediate and irreversible.
//!
//! A configuration error at mount does not fail the host: the marquee draws an
//! empty placeholder, keeps the fault for inspection and never starts a timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};
use log::{debug, error, info, warn};
use strum_macros::Display;
use ticker_common::{Result, Snapshot, TickerConfig, TickerError};
use ticker_feed::{DeltaSource, FeedEvent, QuoteSimulator, Schedule, ScheduleHandle, UniformDelta};

use crate::sink::RenderSink;
use crate::strip::{Strip, render};

/// Lifecycle state of a marquee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MarqueeState {
    /// Subscribed and rendering.
    Mounted,
    /// Timer released; inert.
    Unmounted,
}

/// Scrolling ticker bound to a render sink.
pub struct Marquee<S: RenderSink> {
    state: MarqueeState,
    sink: S,
    schedule: Option<ScheduleHandle>,
    events: Option<Receiver<FeedEvent>>,
    last: Option<Arc<Snapshot>>,
    strip: Strip,
    renders: usize,
    fault: Option<TickerError>,
}

impl<S: RenderSink> Marquee<S> {
    /// Mount with deltas drawn from the OS-seeded random source.
    pub fn mount(config: &TickerConfig, sink: S) -> Result<Self> {
        match UniformDelta::from_os(config.max_delta) {
            Ok(deltas) => Self::mount_with(config, Box::new(deltas), sink),
            Err(e) => Self::placeholder(e, sink),
        }
    }

    /// Mount with an explicit delta source.
    ///
    /// Renders the initial snapshot, then starts the schedule. Only sink and
    /// thread spawn failures are returned as errors.
    pub fn mount_with(
        config: &TickerConfig,
        deltas: Box<dyn DeltaSource + Send>,
        sink: S,
    ) -> Result<Self> {
        let simulator = match QuoteSimulator::from_config(config, deltas) {
            Ok(simulator) => simulator,
            Err(e) if e.is_configuration() => return Self::placeholder(e, sink),
            Err(e) => return Err(e),
        };

        let mut marquee = Self::detached(sink);
        marquee.receive(simulator.snapshot())?;

        let (event_tx, event_rx) = unbounded::<FeedEvent>();
        marquee.schedule = Some(Schedule::broadcast(simulator, config.interval(), event_tx)?);
        marquee.events = Some(event_rx);
        info!(
            "Marquee mounted: {} instruments, tick every {} ms",
            config.seed.len(),
            config.interval_ms
        );
        Ok(marquee)
    }

    /// Mounted marquee with no simulator attached. Snapshots arrive through
    /// `receive` only.
    pub fn detached(sink: S) -> Self {
        Marquee {
            state: MarqueeState::Mounted,
            sink,
            schedule: None,
            events: None,
            last: None,
            strip: Strip::placeholder(),
            renders: 0,
            fault: None,
        }
    }

    /// Mounted marquee showing the empty placeholder because of `fault`.
    pub fn placeholder(fault: TickerError, sink: S) -> Result<Self> {
        error!("Ticker not started: {}", fault);
        let mut marquee = Self::detached(sink);
        marquee.sink.draw(&marquee.strip)?;
        marquee.fault = Some(fault);
        Ok(marquee)
    }

    /// Render `snapshot` unless it is the one already on screen.
    ///
    /// Returns `Ok(true)` when a render happened. A snapshot whose length or
    /// symbol order differs from the previous one unmounts the marquee and
    /// returns `RenderInconsistency`.
    pub fn receive(&mut self, snapshot: Arc<Snapshot>) -> Result<bool> {
        if self.state == MarqueeState::Unmounted {
            debug!("Snapshot {} ignored: marquee unmounted", snapshot.sequence);
            return Ok(false);
        }
        if let Some(last) = &self.last {
            if Arc::ptr_eq(last, &snapshot) {
                return Ok(false);
            }
            if let Err(e) = last.ensure_same_shape(&snapshot) {
                error!("Fatal render invariant violation: {}", e);
                self.unmount();
                return Err(e);
            }
        }

        let strip = render(&snapshot);
        self.sink.draw(&strip)?;
        debug!("Rendered snapshot {} ({} cells)", snapshot.sequence, strip.len());
        self.strip = strip;
        self.last = Some(snapshot);
        self.renders += 1;
        Ok(true)
    }

    /// Wait up to `timeout` for published snapshots and render them.
    ///
    /// Returns the number of renders performed. Without a schedule this just
    /// sleeps for `timeout`.
    pub fn pump(&mut self, timeout: Duration) -> Result<usize> {
        if self.state == MarqueeState::Unmounted {
            return Ok(0);
        }
        let Some(events) = self.events.clone() else {
            thread::sleep(timeout);
            return Ok(0);
        };

        let mut rendered = 0;
        let mut next = match events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Snapshot feed disconnected");
                self.unmount();
                return Ok(0);
            }
        };
        while let Some(event) = next {
            match event {
                FeedEvent::Snapshot(snapshot) => {
                    if self.receive(snapshot)? {
                        rendered += 1;
                    }
                }
                FeedEvent::Shutdown => {
                    info!("Snapshot feed stopped");
                    self.unmount();
                }
            }
            if self.state == MarqueeState::Unmounted {
                break;
            }
            next = events.try_recv().ok();
        }
        Ok(rendered)
    }

    /// Host loop: pump snapshots and advance sink animation every `frame`
    /// until `shutdown` is raised, `max_renders` is reached or the marquee
    /// unmounts. Always leaves the marquee unmounted.
    pub fn run_until(
        &mut self,
        shutdown: &AtomicBool,
        frame: Duration,
        max_renders: Option<usize>,
    ) -> Result<()> {
        let result = self.run_loop(shutdown, frame, max_renders);
        self.unmount();
        result
    }

    fn run_loop(
        &mut self,
        shutdown: &AtomicBool,
        frame: Duration,
        max_renders: Option<usize>,
    ) -> Result<()> {
        while self.is_mounted() && !shutdown.load(Ordering::SeqCst) {
            if let Some(max) = max_renders {
                if self.renders >= max {
                    info!("Render limit {} reached", max);
                    break;
                }
            }
            self.pump(frame)?;
            if self.is_mounted() {
                self.sink.frame()?;
            }
        }
        Ok(())
    }

    /// Cancel the schedule and go inert. Idempotent.
    pub fn unmount(&mut self) {
        if self.state == MarqueeState::Unmounted {
            return;
        }
        self.state = MarqueeState::Unmounted;
        if let Some(mut schedule) = self.schedule.take() {
            schedule.cancel();
        }
        if let Some(events) = self.events.take() {
            let discarded = events.try_iter().count();
            if discarded > 0 {
                debug!("Discarded {} queued feed events", discarded);
            }
        }
        info!("Marquee unmounted after {} renders", self.renders);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MarqueeState {
        self.state
    }

    /// True while mounted.
    pub fn is_mounted(&self) -> bool {
        self.state == MarqueeState::Mounted
    }

    /// The strip currently on screen.
    pub fn strip(&self) -> &Strip {
        &self.strip
    }

    /// Renders performed so far, the initial one included.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// The configuration error that put up the placeholder, if any.
    pub fn fault(&self) -> Option<&TickerError> {
        self.fault.as_ref()
    }

    /// Take ownership of the placeholder's fault.
    pub fn take_fault(&mut self) -> Option<TickerError> {
        self.fault.take()
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: RenderSink> Drop for Marquee<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
