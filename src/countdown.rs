//! Display-only countdown ticker.
//!
//! Runs on its own thread and reports remaining whole seconds over a channel.
//! It never sees game state; the only thing shared with the control thread is
//! the stop flag, which is raised (and the thread joined) as soon as the
//! answer read returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::core::constants::COUNTDOWN_TICK_MS;

pub struct Countdown {
    stop: Arc<AtomicBool>,
    ticks: Receiver<u64>,
    handle: Option<JoinHandle<()>>,
    last_seen: u64,
}

impl Countdown {
    /// Starts counting down from `limit`.
    pub fn start(limit: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, ticks) = mpsc::channel();
        let thread_stop = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let started = Instant::now();
            let mut last_sent = None;
            while !thread_stop.load(Ordering::Relaxed) {
                let remaining = limit.saturating_sub(started.elapsed());
                let secs = whole_secs_left(remaining);
                if last_sent != Some(secs) {
                    if tx.send(secs).is_err() {
                        break;
                    }
                    last_sent = Some(secs);
                }
                if remaining.is_zero() {
                    break;
                }
                thread::sleep(Duration::from_millis(COUNTDOWN_TICK_MS));
            }
        });

        Self {
            stop,
            ticks,
            handle: Some(handle),
            last_seen: whole_secs_left(limit),
        }
    }

    /// Latest remaining whole seconds reported by the ticker.
    pub fn remaining_secs(&mut self) -> u64 {
        if let Some(secs) = self.ticks.try_iter().last() {
            self.last_seen = secs;
        }
        self.last_seen
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Raises the stop flag and waits for the ticker to exit.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            join_ticker(handle);
        }
    }
}

/// Joins the ticker thread. A panic there only costs the display, so it is
/// logged rather than propagated.
fn join_ticker(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        tracing::warn!("countdown ticker panicked");
    }
}

/// Seconds left, rounded up so the display reads `5` until a full second has passed.
fn whole_secs_left(remaining: Duration) -> u64 {
    remaining.as_millis().div_ceil(1000) as u64
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
