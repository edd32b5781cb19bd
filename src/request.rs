use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::{MoonPhaseError, Result};

/// One background request that delivers a single result.
///
/// No retries: a failed request stays failed until the caller starts a new one.
/// Dropping the handle abandons the result.
pub struct PendingRequest<T> {
    label: &'static str,
    rx: Option<Receiver<Result<T>>>,
}

impl<T: Send + 'static> PendingRequest<T> {
    pub fn spawn<F>(label: &'static str, job: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name(format!("fetch-{label}"))
            .spawn(move || {
                // receiver may already be gone if the request was cancelled
                let _ = tx.send(job());
            });
        if let Err(e) = spawned {
            tracing::error!(target: "request", label, "Failed to spawn request thread: {}", e);
            return Self { label, rx: None };
        }
        tracing::debug!(target: "request", label, "request started");
        Self { label, rx: Some(rx) }
    }
}

impl<T> PendingRequest<T> {
    /// Non-blocking. Yields the result exactly once, then `None` forever after.
    pub fn poll(&mut self) -> Option<Result<T>> {
        let rx = match self.rx.as_ref() {
            Some(rx) => rx,
            None => return None,
        };
        let outcome = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(MoonPhaseError::Abandoned),
        };
        self.rx = None;
        Some(outcome)
    }

    /// Blocks until the result arrives.
    pub fn wait(mut self) -> Result<T> {
        match self.rx.take() {
            Some(rx) => rx.recv().unwrap_or(Err(MoonPhaseError::Abandoned)),
            None => Err(MoonPhaseError::Abandoned),
        }
    }

    pub fn cancel(&mut self) {
        if self.rx.take().is_some() {
            tracing::debug!(target: "request", label = self.label, "request cancelled");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.rx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_single_result_then_none() {
        let mut request = PendingRequest::spawn("test", || Ok(42));
        let mut result = None;
        for _ in 0..200 {
            if let Some(r) = request.poll() {
                result = Some(r);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(result.unwrap().unwrap(), 42);
        assert!(request.poll().is_none());
        assert!(request.is_finished());
    }

    #[test]
    fn test_failure_is_delivered_once() {
        let request: PendingRequest<u8> =
            PendingRequest::spawn("failing", || Err(MoonPhaseError::MissingLocation));
        assert!(matches!(request.wait(), Err(MoonPhaseError::MissingLocation)));
    }

    #[test]
    fn test_cancelled_request_yields_nothing() {
        let mut request = PendingRequest::spawn("slow", || {
            thread::sleep(Duration::from_millis(20));
            Ok("late")
        });
        request.cancel();
        assert!(request.is_finished());
        thread::sleep(Duration::from_millis(40));
        assert!(request.poll().is_none());
    }

    #[test]
    fn test_panicking_job_reports_abandoned() {
        let request: PendingRequest<u8> = PendingRequest::spawn("panics", || panic!("boom"));
        assert!(matches!(request.wait(), Err(MoonPhaseError::Abandoned)));
    }
}
