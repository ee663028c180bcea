//! Wall-clock wake-ups for live playback. A `Ticker` is a scoped resource:
//! dropping it stops and joins its thread, so no wake-up is posted after the
//! owner lets go.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct Ticker {
    interval: Duration,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Posts `make()` on `tx` every `interval` until dropped or until the
    /// receiving side hangs up.
    pub fn spawn<T, F>(interval: Duration, tx: Sender<T>, make: F) -> io::Result<Self>
    where
        T: Send + 'static,
        F: Fn() -> T + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("spin_ticker".to_string())
            .spawn(move || {
                loop {
                    thread::park_timeout(interval);
                    if thread_stop.load(Ordering::Acquire) {
                        break;
                    }
                    if tx.send(make()).is_err() {
                        break;
                    }
                }
            })?;
        log::debug!("ticker started ({interval:?})");
        Ok(Self {
            interval,
            stop,
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                log::warn!("ticker thread panicked");
            }
        }
        log::debug!("ticker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn ticks_until_dropped() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::spawn(Duration::from_millis(2), tx, || ()).expect("spawn ticker");
        rx.recv_timeout(Duration::from_secs(5)).expect("first tick");
        drop(ticker);
        // The sender went away with the joined thread.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv().is_err());
    }

    #[test]
    fn exits_when_receiver_hangs_up() {
        let (tx, rx) = mpsc::channel::<()>();
        drop(rx);
        let ticker = Ticker::spawn(Duration::from_millis(1), tx, || ()).expect("spawn ticker");
        assert_eq!(ticker.interval(), Duration::from_millis(1));
        drop(ticker);
    }
}
