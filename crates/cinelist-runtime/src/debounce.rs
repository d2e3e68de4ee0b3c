//! Trailing-edge debouncer.
//!
//! Each call cancels the pending invocation and schedules a new one `delay`
//! after itself, so a burst of calls produces exactly one invocation with the
//! arguments of the last call.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Type alias for debounced handlers.
type Handler<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Debounces calls to a handler on the tokio timer.
///
/// Must be called from within a tokio runtime.
pub struct Debouncer<A> {
    delay: Duration,
    handler: Handler<A>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Create a debouncer around `handler`.
    pub fn new<F>(delay: Duration, handler: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            delay,
            handler: Arc::new(handler),
            pending: Mutex::new(None),
        }
    }

    /// Schedule the handler with `args`, replacing any pending call.
    pub fn call(&self, args: A) {
        // Deadline is fixed now, not when the task is first polled
        let deadline = Instant::now() + self.delay;
        let handler = self.handler.clone();

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            handler(args);
        }));
    }

    /// Drop the pending call, if any.
    ///
    /// Returns true if a call was still waiting.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Check if a call is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    type Calls = Arc<Mutex<Vec<(u32, Duration)>>>;

    fn recorder(delay: Duration) -> (Debouncer<u32>, Calls) {
        let start = Instant::now();
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let debouncer = Debouncer::new(delay, move |arg| {
            sink.lock().push((arg, start.elapsed()));
        });
        (debouncer, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_args() {
        let (debouncer, calls) = recorder(Duration::from_millis(150));

        debouncer.call(0);
        advance(Duration::from_millis(40)).await;
        debouncer.call(40);
        advance(Duration::from_millis(20)).await;
        debouncer.call(60);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*calls.lock(), vec![(60, Duration::from_millis(210))]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_gaps_fire_each_call() {
        let (debouncer, calls) = recorder(Duration::from_millis(100));

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(150)).await;

        let args: Vec<u32> = calls.lock().iter().map(|(arg, _)| *arg).collect();
        assert_eq!(args, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_call() {
        let (debouncer, calls) = recorder(Duration::from_millis(100));

        debouncer.call(1);
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(calls.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_pending_after_firing() {
        let (debouncer, calls) = recorder(Duration::from_millis(10));

        debouncer.call(7);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.lock().len(), 1);
        assert!(!debouncer.is_pending());
    }
}
