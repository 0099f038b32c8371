//! Scoped metadata for asynchronous code.
//!
//! A wrapped future owns its own context map and installs it around every
//! poll, so metadata stays attached to the logical task rather than the
//! physical worker thread. The worker's own map is parked for the
//! duration of each poll and reinstated before the poll returns, which
//! also covers cancellation: a task dropped mid-flight leaves nothing
//! behind on a pooled thread.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project::pin_project;

use crate::context::map;

/// Future bound to its own context map.
#[pin_project]
#[derive(Debug)]
pub struct ScopedFuture<F> {
    #[pin]
    inner: F,
    /// The task's bound map. `None` only while a poll of `inner` runs.
    context: Option<HashMap<String, String>>,
}

impl<F> ScopedFuture<F> {
    /// Bind `future` to a copy of the caller's current context with
    /// `entries` applied on top.
    ///
    /// Entries apply in order; a `None` value removes the key from the
    /// bound map, exactly as in the synchronous scope.
    pub fn new(future: F, entries: &[(&str, Option<&str>)]) -> Self {
        let mut context = map::snapshot();
        for &(key, value) in entries {
            match value {
                Some(v) => {
                    context.insert(key.to_string(), v.to_string());
                }
                None => {
                    context.remove(key);
                }
            }
        }

        Self {
            inner: future,
            context: Some(context),
        }
    }
}

/// Reinstates a parked worker map when a poll unwinds.
struct ParkedMap {
    previous: Option<HashMap<String, String>>,
}

impl Drop for ParkedMap {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            map::swap(previous);
        }
    }
}

impl<F: Future> Future for ScopedFuture<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        // Install the task's map for this poll. Mutations the body makes
        // survive into the next poll because they land in the map swapped
        // back out here.
        let mut parked = ParkedMap {
            previous: Some(map::swap(this.context.take().unwrap_or_default())),
        };
        let result = this.inner.poll(cx);
        if let Some(previous) = parked.previous.take() {
            *this.context = Some(map::swap(previous));
        }

        result
    }
}

/// Run a future with the given metadata entries bound to its logical task.
///
/// Identical semantics to [`with_metadata`](crate::context::with_metadata):
/// the entries are visible to everything the body does, on whichever
/// worker thread resumes it, and the caller's context is untouched once
/// the future completes or is dropped.
///
/// # Examples
/// ```
/// use ctxlog_core::context::{self, scoped};
///
/// # async fn demo() {
/// scoped(&[("request_id", Some("req-1"))], async {
///     assert_eq!(context::get("request_id"), Some("req-1".to_string()));
/// })
/// .await;
/// assert_eq!(context::get("request_id"), None);
/// # }
/// ```
pub async fn scoped<F: Future>(entries: &[(&str, Option<&str>)], future: F) -> F::Output {
    ScopedFuture::new(future, entries).await
}

/// Combinators for binding context to futures.
pub trait FutureExt: Future + Sized {
    /// Bind the caller's current context plus `entries` to this future.
    fn with_metadata(self, entries: &[(&str, Option<&str>)]) -> ScopedFuture<Self>;

    /// Bind a copy of the caller's current context to this future as-is.
    fn with_current_context(self) -> ScopedFuture<Self>;
}

impl<F: Future> FutureExt for F {
    fn with_metadata(self, entries: &[(&str, Option<&str>)]) -> ScopedFuture<Self> {
        ScopedFuture::new(self, entries)
    }

    fn with_current_context(self) -> ScopedFuture<Self> {
        ScopedFuture::new(self, &[])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::task::{Wake, Waker};

    use super::*;

    struct NoopWaker;

    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    fn poll_once<F: Future>(future: Pin<&mut F>) -> Poll<F::Output> {
        let waker = Waker::from(Arc::new(NoopWaker));
        let mut cx = Context::from_waker(&waker);
        future.poll(&mut cx)
    }

    /// Future that reports the ambient value of a key and stays pending
    /// on its first poll.
    struct Inspect {
        key: &'static str,
        polled: bool,
    }

    impl Future for Inspect {
        type Output = Option<String>;

        fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
            if self.polled {
                Poll::Ready(map::get(self.key))
            } else {
                self.polled = true;
                Poll::Pending
            }
        }
    }

    #[test]
    fn test_bound_map_visible_during_poll() {
        let mut future = ScopedFuture::new(
            Inspect {
                key: "future_k1",
                polled: true,
            },
            &[("future_k1", Some("bound"))],
        );
        let mut future = Pin::new(&mut future);

        match poll_once(future.as_mut()) {
            Poll::Ready(seen) => assert_eq!(seen, Some("bound".to_string())),
            Poll::Pending => panic!("future should have completed"),
        }
        assert_eq!(map::get("future_k1"), None);
    }

    #[test]
    fn test_worker_map_restored_between_polls() {
        map::insert("future_k2", "worker");

        let mut future = ScopedFuture::new(
            Inspect {
                key: "future_k2",
                polled: false,
            },
            &[("future_k2", Some("task"))],
        );
        let mut future = Pin::new(&mut future);

        assert!(poll_once(future.as_mut()).is_pending());
        // The task is suspended; this thread's own view is back.
        assert_eq!(map::get("future_k2"), Some("worker".to_string()));

        match poll_once(future.as_mut()) {
            Poll::Ready(seen) => assert_eq!(seen, Some("task".to_string())),
            Poll::Pending => panic!("future should have completed"),
        }
        assert_eq!(map::get("future_k2"), Some("worker".to_string()));
        map::remove("future_k2");
    }

    #[test]
    fn test_dropped_mid_flight_leaves_no_trace() {
        map::insert("future_k3", "worker");

        {
            let mut future = ScopedFuture::new(
                Inspect {
                    key: "future_k3",
                    polled: false,
                },
                &[("future_k3", Some("task"))],
            );
            let pinned = Pin::new(&mut future);
            assert!(poll_once(pinned).is_pending());
        }

        assert_eq!(map::get("future_k3"), Some("worker".to_string()));
        map::remove("future_k3");
    }

    #[test]
    fn test_body_mutations_survive_suspension() {
        struct Mutate {
            polled: bool,
        }

        impl Future for Mutate {
            type Output = Option<String>;

            fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
                if self.polled {
                    Poll::Ready(map::get("future_k4"))
                } else {
                    self.polled = true;
                    map::insert("future_k4", "set-in-body");
                    Poll::Pending
                }
            }
        }

        let mut future = Mutate { polled: false }.with_current_context();
        let mut future = Pin::new(&mut future);

        assert!(poll_once(future.as_mut()).is_pending());
        assert_eq!(map::get("future_k4"), None);

        match poll_once(future.as_mut()) {
            Poll::Ready(seen) => assert_eq!(seen, Some("set-in-body".to_string())),
            Poll::Pending => panic!("future should have completed"),
        }
        assert_eq!(map::get("future_k4"), None);
    }

    #[test]
    fn test_panicking_poll_restores_worker_map() {
        struct Explode;

        impl Future for Explode {
            type Output = ();

            fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
                panic!("body failed");
            }
        }

        map::insert("future_k6", "worker");

        let mut future = Explode.with_metadata(&[("future_k6", Some("task"))]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            poll_once(Pin::new(&mut future))
        }));

        assert!(result.is_err());
        assert_eq!(map::get("future_k6"), Some("worker".to_string()));
        map::remove("future_k6");
    }

    #[test]
    fn test_none_entry_removes_from_bound_map() {
        map::insert("future_k5", "caller");

        let mut future = ScopedFuture::new(
            Inspect {
                key: "future_k5",
                polled: true,
            },
            &[("future_k5", None)],
        );
        let pinned = Pin::new(&mut future);

        match poll_once(pinned) {
            Poll::Ready(seen) => assert_eq!(seen, None),
            Poll::Pending => panic!("future should have completed"),
        }
        assert_eq!(map::get("future_k5"), Some("caller".to_string()));
        map::remove("future_k5");
    }
}
