use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

use super::PipelineError;

pub const DEFAULT_MAX_CONCURRENT_STAGES: usize = 16;

/// Bounded pool that runs pipeline stages on their own tokio tasks.
///
/// At most `max_concurrent` stages across all in-flight runs hold a permit;
/// the rest wait in line. A panicking stage surfaces as
/// [`PipelineError::Worker`] instead of tearing down the caller, and a
/// stage whose caller goes away is aborted so its permit is released.
#[derive(Clone)]
pub struct StagePool {
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

impl Default for StagePool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT_STAGES)
    }
}

impl StagePool {
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Run `stage` on a worker task and wait for its output
    pub async fn dispatch<F, T>(&self, name: &'static str, stage: F) -> Result<T, PipelineError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| PipelineError::PoolClosed)?;

        debug!("Dispatching stage '{}' ({} permits left)", name, self.available());

        let mut task = AbortOnDrop(tokio::spawn(async move {
            let _permit = permit;
            stage.await
        }));

        (&mut task.0).await.map_err(|e| PipelineError::Worker {
            stage: name,
            message: e.to_string(),
        })
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Aborts the spawned stage if the dispatching future is dropped first
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_dispatch_returns_output() {
        let pool = StagePool::new(2);
        let value = pool.dispatch("double", async { 21 * 2 }).await.unwrap();
        assert_eq!(value, 42);
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_reports_panics() {
        let pool = StagePool::new(1);
        let result: Result<(), _> = pool.dispatch("boom", async { panic!("stage exploded") }).await;

        match result {
            Err(PipelineError::Worker { stage, .. }) => assert_eq!(stage, "boom"),
            other => panic!("expected worker error, got {:?}", other),
        }
        assert_eq!(pool.available(), 1);
    }

    #[tokio::test]
    async fn test_dropped_caller_releases_permit() {
        let pool = StagePool::new(1);
        let finished = Arc::new(AtomicUsize::new(0));

        let stage_finished = finished.clone();
        let abandoned = tokio::time::timeout(
            Duration::from_millis(50),
            pool.dispatch("slow", async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                stage_finished.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .await;
        assert!(abandoned.is_err());

        // The next stage gets the only permit instead of waiting out the slow one
        let value = tokio::time::timeout(Duration::from_secs(1), pool.dispatch("next", async { 7 }))
            .await
            .expect("permit was not released")
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(pool.available(), 1);
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let pool = StagePool::new(0);
        assert_eq!(pool.max_concurrent(), 1);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let pool = StagePool::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let pool = pool.clone();
            let running = running.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(async move {
                pool.dispatch("sleepy", async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                })
                .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
