//! Background jobs with latest-wins completion.
//!
//! A [`TaskSlot`] runs one kind of blocking job (a network request, a file
//! read) on a worker thread and hands the result back to the single-threaded
//! controller, which polls for it. Every job gets a monotonically increasing
//! token; only the result of the most recently spawned, not yet invalidated
//! job is delivered. Anything else is stale and dropped.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use web_time::Instant;

/// Identifier of a spawned job.
pub type TaskToken = u64;

/// One slot of background work whose latest result wins.
#[derive(Debug)]
pub struct TaskSlot<T> {
    /// Thread name prefix, also used in log messages
    name: &'static str,
    /// Sender cloned into every worker
    result_tx: Sender<(TaskToken, T)>,
    /// Completed results from workers
    result_rx: Receiver<(TaskToken, T)>,
    /// Token handed to the next job
    next_token: TaskToken,
    /// Token whose result is still wanted
    current: Option<TaskToken>,
}

impl<T: Send + 'static> TaskSlot<T> {
    /// Create an idle slot.
    pub fn new(name: &'static str) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            name,
            result_tx,
            result_rx,
            next_token: 0,
            current: None,
        }
    }

    /// Run `job` on a worker thread. Any job still in flight becomes stale.
    pub fn spawn<F>(&mut self, job: F) -> std::io::Result<TaskToken>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let token = self.next_token;
        let result_tx = self.result_tx.clone();
        let name = self.name;

        thread::Builder::new()
            .name(format!("{}-{}", name, token))
            .spawn(move || {
                let output = job();
                if result_tx.send((token, output)).is_err() {
                    log::debug!("{} #{} finished after its slot was dropped", name, token);
                }
            })?;

        self.next_token += 1;
        if let Some(stale) = self.current.replace(token) {
            log::debug!("{} #{} superseded by #{}", name, stale, token);
        }
        log::debug!("{} #{} started", name, token);
        Ok(token)
    }

    /// Whether a wanted result is still outstanding.
    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Token of the outstanding job, if any.
    pub fn current(&self) -> Option<TaskToken> {
        self.current
    }

    /// Forget the outstanding job; its result will be discarded on arrival.
    pub fn invalidate(&mut self) {
        if let Some(token) = self.current.take() {
            log::debug!("{} #{} invalidated", self.name, token);
        }
    }

    /// Take the wanted result if it has arrived. Non-blocking.
    pub fn poll(&mut self) -> Option<T> {
        loop {
            match self.result_rx.try_recv() {
                Ok((token, output)) => {
                    if let Some(output) = self.accept(token, output) {
                        return Some(output);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Block until the wanted result arrives or `timeout` elapses.
    ///
    /// Returns `None` immediately when nothing is outstanding. A timeout too
    /// large to represent as a deadline waits without limit.
    pub fn wait(&mut self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now().checked_add(timeout);

        while self.current.is_some() {
            let received = match deadline {
                Some(deadline) => self
                    .result_rx
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self
                    .result_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok((token, output)) => {
                    if let Some(output) = self.accept(token, output) {
                        return Some(output);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!("{} still pending after {:?}", self.name, timeout);
                    return None;
                }
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
        None
    }

    fn accept(&mut self, token: TaskToken, output: T) -> Option<T> {
        if self.current == Some(token) {
            self.current = None;
            Some(output)
        } else {
            log::warn!("Discarding stale {} result #{}", self.name, token);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_idle_slot() {
        let mut slot: TaskSlot<u32> = TaskSlot::new("test");
        assert!(!slot.is_pending());
        assert_eq!(slot.poll(), None);
        assert_eq!(slot.wait(TIMEOUT), None);
    }

    #[test]
    fn test_result_delivered_once() {
        let mut slot = TaskSlot::new("test");
        let token = slot.spawn(|| 42).unwrap();

        assert_eq!(slot.current(), Some(token));
        assert_eq!(slot.wait(TIMEOUT), Some(42));
        assert!(!slot.is_pending());
        assert_eq!(slot.poll(), None);
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let mut slot = TaskSlot::new("test");

        // The first job blocks until released, so it finishes after the second.
        let first = slot
            .spawn(move || {
                let _ = release_rx.recv();
                "first"
            })
            .unwrap();
        let second = slot.spawn(|| "second").unwrap();
        assert!(second > first);

        assert_eq!(slot.wait(TIMEOUT), Some("second"));

        release_tx.send(()).unwrap();
        // The first result arrives later and must not surface.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(slot.poll(), None);
    }

    #[test]
    fn test_wait_with_unbounded_timeout() {
        let mut slot = TaskSlot::new("test");
        slot.spawn(|| "done").unwrap();

        assert_eq!(slot.wait(Duration::from_secs(u64::MAX)), Some("done"));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_invalidated_result_is_discarded() {
        let mut slot = TaskSlot::new("test");
        slot.spawn(|| 7).unwrap();
        slot.invalidate();

        assert!(!slot.is_pending());
        assert_eq!(slot.wait(TIMEOUT), None);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(slot.poll(), None);
    }
}
