//! Collapses concurrent requests for the same key into one in-flight future.

use crate::core::error::{AppError, Result};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Output of a producer run: its value, or the message of the panic that
/// ended it.
type Outcome<T> = std::result::Result<T, Arc<str>>;

struct Pending<T: Clone> {
    id: u64,
    future: Shared<BoxFuture<'static, Outcome<T>>>,
}

/// Map of in-flight producers keyed by a caller-chosen string.
pub struct Deduplicator<T: Clone> {
    pending: Mutex<HashMap<String, Pending<T>>>,
    next_id: Mutex<u64>,
}

fn panic_message(payload: Box<dyn Any + Send>) -> Arc<str> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Arc::from(*s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Arc::from(s.as_str())
    } else {
        Arc::from("producer panicked")
    }
}

impl<T> Deduplicator<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            next_id: Mutex::new(0),
        }
    }

    /// Runs `producer` for `key` unless a run for the same key is already in
    /// flight, in which case that run's output is awaited instead.
    ///
    /// The entry is registered before anything is awaited and removed once
    /// the run finishes, whether it returned or panicked. A panic is caught
    /// and reported to every waiter as [`AppError::Task`], so the key is
    /// never left pointing at a poisoned future.
    pub async fn run<F, Fut>(&self, key: &str, producer: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (id, future) = {
            let mut pending = self.pending.lock();
            if let Some(existing) = pending.get(key) {
                tracing::debug!(target: "dedup", "Joining in-flight request for {}", key);
                (existing.id, existing.future.clone())
            } else {
                let id = {
                    let mut next = self.next_id.lock();
                    *next += 1;
                    *next
                };
                let future = AssertUnwindSafe(producer())
                    .catch_unwind()
                    .map(|outcome| outcome.map_err(panic_message))
                    .boxed()
                    .shared();
                pending.insert(
                    key.to_string(),
                    Pending {
                        id,
                        future: future.clone(),
                    },
                );
                (id, future)
            }
        };

        let outcome = future.await;

        {
            let mut pending = self.pending.lock();
            if pending.get(key).is_some_and(|p| p.id == id) {
                pending.remove(key);
            }
        }

        outcome.map_err(|msg| {
            tracing::error!(target: "dedup", "Run for {} panicked: {}", key, msg);
            AppError::Task(format!("validation of {} panicked: {}", key, msg))
        })
    }

    /// Number of keys with a run in flight.
    pub fn in_flight(&self) -> usize {
        self.pending.lock().len()
    }
}

impl<T> Default for Deduplicator<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn concurrent_calls_share_one_run() {
        let dedup = Arc::new(Deduplicator::<usize>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..5 {
            let dedup = dedup.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                dedup
                    .run("user@example.com", move || async move {
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        calls.fetch_add(1, Ordering::SeqCst) + 41
                    })
                    .await
            }));
        }

        let results = futures::future::join_all(handles).await;
        for r in results {
            assert_eq!(r.unwrap().unwrap(), 41);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(dedup.in_flight(), 0);
    }

    #[tokio::test]
    async fn sequential_calls_run_again() {
        let dedup = Deduplicator::<u32>::new();
        assert_eq!(dedup.run("k", || async { 1 }).await.unwrap(), 1);
        assert_eq!(dedup.run("k", || async { 2 }).await.unwrap(), 2);
        assert_eq!(dedup.in_flight(), 0);
    }

    #[tokio::test]
    async fn failed_runs_do_not_poison_the_key() {
        let dedup = Deduplicator::<std::result::Result<u32, String>>::new();
        let first = dedup.run("k", || async { Err("boom".to_string()) }).await.unwrap();
        assert!(first.is_err());
        let second = dedup.run("k", || async { Ok(7) }).await.unwrap();
        assert_eq!(second, Ok(7));
    }

    async fn explode() -> u32 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        panic!("resolver exploded")
    }

    #[tokio::test]
    async fn panicking_run_releases_the_key() {
        let dedup = Deduplicator::<u32>::new();

        let (a, b) = tokio::join!(
            dedup.run("k", explode),
            dedup.run("k", || async { 99 })
        );
        for outcome in [a, b] {
            match outcome {
                Err(AppError::Task(msg)) => assert!(msg.contains("resolver exploded"), "{}", msg),
                other => panic!("expected a task error, got {:?}", other),
            }
        }
        assert_eq!(dedup.in_flight(), 0);

        assert_eq!(dedup.run("k", || async { 7 }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn different_keys_do_not_share() {
        let dedup = Deduplicator::<&'static str>::new();
        let (a, b) = tokio::join!(
            dedup.run("a", || async { "a" }),
            dedup.run("b", || async { "b" })
        );
        assert_eq!((a.unwrap(), b.unwrap()), ("a", "b"));
    }
}
