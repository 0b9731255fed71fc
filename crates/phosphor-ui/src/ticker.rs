//! In-process spinner animation.
//!
//! A [`SpinnerTicker`] owns one repeating task that advances the frame index
//! every interval. The task lives exactly as long as the ticker: dropping it
//! (normally, on an early return, or while unwinding) aborts the task, after
//! which the frame never changes again.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::spinner::{SPINNER_FRAMES, SPINNER_INTERVAL};

/// Handle to a running spinner animation.
#[derive(Debug)]
pub struct SpinnerTicker {
    frame: watch::Receiver<usize>,
    task: JoinHandle<()>,
}

impl SpinnerTicker {
    /// Start ticking at [`SPINNER_INTERVAL`]. Must be called inside a tokio runtime.
    pub fn start() -> Self {
        Self::with_interval(SPINNER_INTERVAL)
    }

    /// Start ticking at a custom interval.
    pub fn with_interval(period: Duration) -> Self {
        let (tx, rx) = watch::channel(0usize);

        let task = tokio::spawn(async move {
            // Frame 0 holds for a full period before the first advance.
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut index = 0;
            loop {
                interval.tick().await;
                index = (index + 1) % SPINNER_FRAMES.len();
                if tx.send(index).is_err() {
                    break;
                }
            }
        });

        Self { frame: rx, task }
    }

    /// Index of the frame currently shown.
    pub fn index(&self) -> usize {
        *self.frame.borrow()
    }

    /// Frame currently shown.
    pub fn frame(&self) -> char {
        SPINNER_FRAMES[self.index()]
    }

    /// Observe frame changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.frame.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the animation.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for SpinnerTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn cycles_through_frames_in_order() {
        let ticker = SpinnerTicker::start();
        let mut rx = ticker.subscribe();

        let mut seen = vec![SPINNER_FRAMES[*rx.borrow_and_update()]];
        for _ in 0..4 {
            rx.changed().await.unwrap();
            seen.push(SPINNER_FRAMES[*rx.borrow_and_update()]);
        }

        assert_eq!(seen, vec!['|', '/', '-', '\\', '|']);
    }

    #[tokio::test(start_paused = true)]
    async fn holds_each_frame_for_one_interval() {
        let ticker = SpinnerTicker::start();

        time::sleep(Duration::from_millis(119)).await;
        assert_eq!(ticker.frame(), '|');

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(ticker.frame(), '/');

        time::sleep(SPINNER_INTERVAL * 3).await;
        assert_eq!(ticker.frame(), '|');
    }

    #[tokio::test(start_paused = true)]
    async fn stops_advancing_after_drop() {
        let ticker = SpinnerTicker::start();
        let mut rx = ticker.subscribe();

        time::sleep(SPINNER_INTERVAL * 2 + Duration::from_millis(10)).await;
        let last = *rx.borrow_and_update();
        assert_eq!(SPINNER_FRAMES[last], '-');

        ticker.stop();
        time::sleep(SPINNER_INTERVAL * 10).await;

        assert_eq!(*rx.borrow(), last);
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_during_unwind_cancels_task() {
        let rx = {
            let ticker = SpinnerTicker::start();
            let rx = ticker.subscribe();
            let result = tokio::spawn(async move {
                let _held = ticker;
                panic!("widget failed");
            })
            .await;
            assert!(result.is_err());
            rx
        };

        time::sleep(SPINNER_INTERVAL * 5).await;

        assert_eq!(*rx.borrow(), 0);
        assert!(rx.has_changed().is_err());
    }
}
