use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Session ticks advance the countdown by whole seconds
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum BreathEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source went away; nothing more will arrive
    Disconnected,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait BreathEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<BreathEvent, RecvTimeoutError>;
}

/// Production event source using crossterm.
///
/// Only key presses (picker, start/stop, quit) and resizes (redraw the
/// circle) matter to the breathing screen; other terminal events are dropped.
pub struct CrosstermEventSource {
    rx: Receiver<BreathEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(BreathEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(BreathEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<BreathEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Period of the session trigger; [`TICK_INTERVAL`] in the app, shorter in
/// tests so a whole session can be driven in milliseconds
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker; `default()` is one engine second
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<BreathEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<BreathEvent>) -> Self {
        Self { rx }
    }
}

impl BreathEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<BreathEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Ticks are only produced while the runner is armed. Arm it when a session
/// starts and disarm it as soon as the session stops, whichever way it
/// stopped; dropping the runner releases the trigger as well.
pub struct Runner<E: BreathEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Option<Instant>,
}

impl<E: BreathEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            next_tick: None,
        }
    }

    /// Start the periodic trigger; the first tick fires one interval from now.
    /// Re-arming an armed runner keeps the current schedule.
    pub fn arm(&mut self) {
        if self.next_tick.is_none() {
            self.next_tick = Some(Instant::now() + self.ticker.interval());
        }
    }

    pub fn disarm(&mut self) {
        self.next_tick = None;
    }

    pub fn set_armed(&mut self, armed: bool) {
        if armed {
            self.arm();
        } else {
            self.disarm();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Blocks until the next event, or until the tick deadline when armed.
    ///
    /// Deadlines are absolute: a tick that is already due is returned before
    /// any queued event, so a stream of key presses cannot postpone it. Ticks
    /// missed during a stall are dropped, not replayed in a burst.
    pub fn step(&mut self) -> BreathEvent {
        loop {
            let timeout = match self.next_tick {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        self.reschedule(deadline, now);
                        return BreathEvent::Tick;
                    }
                    deadline - now
                }
                None => self.ticker.interval(),
            };

            match self.event_source.recv_timeout(timeout) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Disconnected) => return BreathEvent::Disconnected,
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(deadline) = self.next_tick {
                        self.reschedule(deadline, Instant::now());
                        return BreathEvent::Tick;
                    }
                }
            }
        }
    }

    fn reschedule(&mut self, deadline: Instant, now: Instant) {
        let interval = self.ticker.interval();
        let next = deadline + interval;
        self.next_tick = Some(if next > now { next } else { now + interval });
    }
}
