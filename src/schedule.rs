//! Cancellable scheduled tasks
//!
//! Wraps tokio tasks for the two kinds of timers the widget needs: a callback
//! repeated on a fixed period, and a one-shot callback after a delay. Every
//! task is owned by a [`TaskHandle`]; dropping or cancelling the handle stops
//! the task, so nothing keeps running after its owner is gone.

use std::time::Duration;
use tokio::task::JoinHandle;

/// Owning handle for a scheduled task
#[derive(Debug)]
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    /// Returns true once the task has run to completion or been cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the task and waits until it has been torn down
    pub async fn cancel(mut self) {
        self.handle.abort();
        // The join result is either a cancellation or a completed task.
        let _ = (&mut self.handle).await;
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs `tick` every `period`, starting one period from now
///
/// Must be called from within a tokio runtime.
pub fn every<F>(period: Duration, mut tick: F) -> TaskHandle
where
    F: FnMut() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // Skip the first tick (immediate)
        interval.tick().await;

        loop {
            interval.tick().await;
            tick();
        }
    });

    TaskHandle { handle }
}

/// Runs `fire` once after `delay`
///
/// Must be called from within a tokio runtime.
pub fn after<F>(delay: Duration, fire: F) -> TaskHandle
where
    F: FnOnce() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        fire();
    });

    TaskHandle { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_skips_immediate_tick() {
        let (count, tick) = counter();
        let _task = every(Duration::from_millis(1000), tick);

        tokio::time::sleep(Duration::from_millis(999)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_fires_once_per_period() {
        let (count, tick) = counter();
        let _task = every(Duration::from_millis(1000), tick);

        tokio::time::sleep(Duration::from_millis(3500)).await;

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_repeating_task() {
        let (count, tick) = counter();
        let task = every(Duration::from_millis(1000), tick);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        task.cancel().await;
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_repeating_task() {
        let (count, tick) = counter();
        let task = every(Duration::from_millis(1000), tick);

        drop(task);
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once_and_finishes() {
        let (count, tick) = counter();
        let task = after(Duration::from_millis(300), tick);

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::task::yield_now().await;
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_delay_never_fires() {
        let (count, tick) = counter();
        let task = after(Duration::from_millis(300), tick);

        task.cancel().await;
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
