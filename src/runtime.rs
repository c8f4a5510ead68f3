use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of app events (input, resizes, ticks)
pub trait EventSource {
    /// Block until the next event. Err means every producer hung up.
    fn next_event(&self) -> Result<SessionEvent, RecvError>;
}

/// Production source: a crossterm input thread and a tick thread feeding
/// one channel. The tick thread sleeps toward an absolute deadline, so
/// the cadence holds over a long session instead of drifting by the
/// send/draw overhead of each iteration.
pub struct TerminalEvents {
    rx: Receiver<SessionEvent>,
}

impl TerminalEvents {
    pub fn spawn(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        thread::spawn(move || {
            let mut deadline = Instant::now() + tick_interval;
            loop {
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }
                deadline += tick_interval;

                if tick_tx.send(SessionEvent::Tick).is_err() {
                    break;
                }
            }
        });

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(SessionEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(SessionEvent::Resize).is_err() {
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

impl EventSource for TerminalEvents {
    fn next_event(&self) -> Result<SessionEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test source fed by hand; the loop sees exactly what a test sends
pub struct ChannelEvents {
    rx: Receiver<SessionEvent>,
}

impl ChannelEvents {
    pub fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }

    pub fn pair() -> (Sender<SessionEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl EventSource for ChannelEvents {
    fn next_event(&self) -> Result<SessionEvent, RecvError> {
        self.rx.recv()
    }
}
