//! Retry-coordinated execution of idempotent typesetting units.
//!
//! A unit of work either finishes ([`Attempt::Ready`]) or reports the
//! [`Dependency`] it is missing ([`Attempt::Pending`]). The
//! [`RetryCoordinator`] waits until the dependency is marked ready on the
//! shared [`ReadinessBoard`] and then re-runs the unit from the start.

use alloc::sync::Arc;
use core::fmt;
use core::time::Duration;
use std::sync::{Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, watch};
use tracing::{debug, warn};

use crate::namespace::KeyMap;
use crate::types::{Diagnostic, ErrorKind, Settings};

/// Something a unit of work can be waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dependency {
    /// A deferred font variant that has not been provided yet.
    FontVariant(String),
    /// Any other externally loaded resource.
    Asset(String),
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontVariant(name) => write!(f, "font:{name}"),
            Self::Asset(name) => write!(f, "asset:{name}"),
        }
    }
}

/// Outcome of one run of a unit of work.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<T> {
    /// The unit finished.
    Ready(T),
    /// The unit needs `Dependency` before it can finish.
    Pending(Dependency),
}

impl<T> Attempt<T> {
    /// The value, if ready.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// Whether the unit finished.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Maps the ready value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attempt<U> {
        match self {
            Self::Ready(value) => Attempt::Ready(f(value)),
            Self::Pending(dep) => Attempt::Pending(dep),
        }
    }

    /// Converts into a `Result` so `?` can propagate pending dependencies.
    pub fn into_result(self) -> Result<T, Dependency> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Pending(dep) => Err(dep),
        }
    }
}

impl<T> From<Result<T, Dependency>> for Attempt<T> {
    fn from(result: Result<T, Dependency>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(dep) => Self::Pending(dep),
        }
    }
}

/// Shared readiness flags, one watch channel per dependency.
#[derive(Debug, Default)]
pub struct ReadinessBoard {
    channels: Mutex<KeyMap<Dependency, watch::Sender<bool>>>,
}

impl ReadinessBoard {
    fn sender(&self, dep: &Dependency) -> watch::Sender<bool> {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(dep.clone())
            .or_insert_with(|| watch::Sender::new(false))
            .clone()
    }

    /// Marks `dep` ready and wakes every waiter.
    pub fn mark_ready(&self, dep: &Dependency) {
        debug!(dependency = %dep, "dependency ready");
        self.sender(dep).send_replace(true);
    }

    /// Whether `dep` has been marked ready.
    #[must_use]
    pub fn is_ready(&self, dep: &Dependency) -> bool {
        let channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels.get(dep).is_some_and(|sender| *sender.borrow())
    }

    /// Number of runs currently subscribed to `dep`.
    #[must_use]
    pub fn waiters(&self, dep: &Dependency) -> usize {
        let channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels.get(dep).map_or(0, watch::Sender::receiver_count)
    }

    /// Resolves once `dep` is ready. Returns immediately if it already is.
    pub async fn wait_ready(&self, dep: &Dependency) -> bool {
        let mut rx = self.sender(dep).subscribe();
        rx.wait_for(|ready| *ready).await.is_ok()
    }
}

/// A document's lock entry, removed from the coordinator when the last run
/// holding it finishes or is dropped.
struct DocumentSlot<'a> {
    coordinator: &'a RetryCoordinator,
    document: &'a str,
    lock: Arc<AsyncMutex<()>>,
}

impl Drop for DocumentSlot<'_> {
    fn drop(&mut self) {
        self.coordinator.release_document(self.document, &self.lock);
    }
}

/// Re-runs units of work until their dependencies are satisfied.
///
/// Runs for the same document are serialized; different documents proceed
/// independently.
#[derive(Debug)]
pub struct RetryCoordinator {
    board: Arc<ReadinessBoard>,
    documents: Mutex<KeyMap<String, Arc<AsyncMutex<()>>>>,
    max_retries: usize,
    wait_timeout: Duration,
}

impl RetryCoordinator {
    /// Creates a coordinator over `board`.
    #[must_use]
    pub fn new(board: Arc<ReadinessBoard>, max_retries: usize, wait_timeout: Duration) -> Self {
        Self {
            board,
            documents: Mutex::default(),
            max_retries,
            wait_timeout,
        }
    }

    /// Creates a coordinator with the retry bounds from `settings`.
    #[must_use]
    pub fn from_settings(board: Arc<ReadinessBoard>, settings: &Settings) -> Self {
        Self::new(board, settings.max_retries, settings.wait_timeout)
    }

    /// The board dependencies are awaited on.
    #[must_use]
    pub const fn board(&self) -> &Arc<ReadinessBoard> {
        &self.board
    }

    fn document_lock(&self, document: &str) -> Arc<AsyncMutex<()>> {
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(documents.entry(document.to_owned()).or_default())
    }

    /// Number of documents with a run in flight.
    #[must_use]
    pub fn active_documents(&self) -> usize {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drops the entry for `document` unless another run still holds it.
    /// `held` is the caller's own handle, so the map plus it make two.
    fn release_document(&self, document: &str, held: &Arc<AsyncMutex<()>>) {
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        if documents
            .get(document)
            .is_some_and(|lock| Arc::ptr_eq(lock, held) && Arc::strong_count(lock) == 2)
        {
            documents.remove(document);
        }
    }

    /// Runs `unit` until it is ready.
    ///
    /// Each `Pending` result waits for its dependency (bounded by the wait
    /// timeout) and then re-invokes `unit` from scratch. More than
    /// `max_retries` pending results, or a wait that times out, fail with
    /// `DependencyTimeout`. Dropping the returned future drops the
    /// subscription and the document lock.
    pub async fn run<T, F>(&self, document: &str, mut unit: F) -> Result<T, Diagnostic>
    where
        F: FnMut() -> Attempt<T>,
    {
        let slot = DocumentSlot {
            coordinator: self,
            document,
            lock: self.document_lock(document),
        };
        let _guard = slot.lock.lock().await;
        self.run_locked(document, &mut unit).await
    }

    async fn run_locked<T>(
        &self,
        document: &str,
        unit: &mut impl FnMut() -> Attempt<T>,
    ) -> Result<T, Diagnostic> {
        let mut attempts = 0;
        loop {
            let dep = match unit() {
                Attempt::Ready(value) => return Ok(value),
                Attempt::Pending(dep) => dep,
            };
            attempts += 1;
            let timed_out = || {
                Diagnostic::new(ErrorKind::DependencyTimeout {
                    dependency: dep.to_string(),
                    attempts,
                })
            };
            if attempts > self.max_retries {
                warn!(document, dependency = %dep, attempts, "retry limit reached");
                return Err(timed_out());
            }
            debug!(document, dependency = %dep, attempts, "waiting for dependency");
            match tokio::time::timeout(self.wait_timeout, self.board.wait_ready(&dep)).await {
                Ok(true) => {}
                Ok(false) | Err(_) => {
                    warn!(document, dependency = %dep, attempts, "dependency wait timed out");
                    return Err(timed_out());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorCode;
    use core::cell::Cell;

    fn coordinator(max_retries: usize) -> RetryCoordinator {
        RetryCoordinator::new(
            Arc::new(ReadinessBoard::default()),
            max_retries,
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn ready_unit_runs_once() {
        let coordinator = coordinator(3);
        let calls = Cell::new(0);
        let out = coordinator
            .run("doc", || {
                calls.set(calls.get() + 1);
                Attempt::Ready(42)
            })
            .await
            .unwrap();
        assert_eq!(out, 42);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_unit_reruns_after_dependency_is_ready() {
        let coordinator = coordinator(3);
        let board = Arc::clone(coordinator.board());
        let dep = Dependency::FontVariant("double-struck".to_owned());
        let marker = {
            let dep = dep.clone();
            let board = Arc::clone(&board);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                board.mark_ready(&dep);
            })
        };
        let calls = Cell::new(0);
        let out = coordinator
            .run("doc", || {
                calls.set(calls.get() + 1);
                if board.is_ready(&dep) {
                    Attempt::Ready("done")
                } else {
                    Attempt::Pending(dep.clone())
                }
            })
            .await
            .unwrap();
        marker.await.unwrap();
        assert_eq!(out, "done");
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_is_bounded_by_timeout() {
        let coordinator = coordinator(3);
        let err = coordinator
            .run("doc", || {
                Attempt::<()>::Pending(Dependency::Asset("never".to_owned()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DependencyTimeout);
        assert!(err.message().contains("asset:never"));
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        let coordinator = coordinator(2);
        let dep = Dependency::Asset("flaky".to_owned());
        coordinator.board().mark_ready(&dep);
        let calls = Cell::new(0);
        let err = coordinator
            .run("doc", || {
                calls.set(calls.get() + 1);
                Attempt::<()>::Pending(dep.clone())
            })
            .await
            .unwrap_err();
        assert_eq!(calls.get(), 3);
        assert_eq!(
            *err.kind,
            ErrorKind::DependencyTimeout {
                dependency: "asset:flaky".to_owned(),
                attempts: 3,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn same_document_is_serialized() {
        let coordinator = coordinator(3);
        let board = Arc::clone(coordinator.board());
        let dep = Dependency::Asset("image".to_owned());
        let log = Mutex::new(Vec::new());
        let push = |entry: &'static str| log.lock().unwrap().push(entry);

        let first = coordinator.run("a", || {
            if board.is_ready(&dep) {
                push("a1");
                Attempt::Ready(())
            } else {
                Attempt::Pending(dep.clone())
            }
        });
        let second = coordinator.run("a", || {
            push("a2");
            Attempt::Ready(())
        });
        let other = coordinator.run("b", || {
            push("b");
            Attempt::Ready(())
        });
        let release = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            board.mark_ready(&dep);
        };

        let (r1, r2, r3, ()) = tokio::join!(first, second, other, release);
        r1.unwrap();
        r2.unwrap();
        r3.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["b", "a1", "a2"]);
        assert_eq!(coordinator.active_documents(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_runs_release_their_document() {
        let coordinator = coordinator(3);
        let dep = Dependency::FontVariant("fraktur".to_owned());
        for i in 0..100 {
            let document = format!("doc-{i}");
            let run = coordinator.run(&document, || Attempt::<()>::Pending(dep.clone()));
            let abandoned = tokio::time::timeout(Duration::from_millis(10), run).await;
            assert!(abandoned.is_err());
        }
        assert_eq!(coordinator.active_documents(), 0);
        assert_eq!(coordinator.board().waiters(&dep), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_run_unblocks_the_next_one() {
        let coordinator = coordinator(3);
        let dep = Dependency::Asset("slow".to_owned());
        let first = coordinator.run("doc", || Attempt::<()>::Pending(dep.clone()));
        assert!(tokio::time::timeout(Duration::from_millis(10), first).await.is_err());
        let out = coordinator.run("doc", || Attempt::Ready(7)).await.unwrap();
        assert_eq!(out, 7);
        assert_eq!(coordinator.active_documents(), 0);
    }
}
