//! # Call Context
//!
//! Deadline and cancellation handling for a remote call. A context is passed
//! in to every call; it is the only thing that bounds how long a call can
//! take.

use crate::errors::RpcError;
use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError, Weak},
    time::Duration,
};
use tokio::{sync::watch, time::Instant};

/// Lifetime of one or more calls.
///
/// Clones share the same deadline and cancellation signal.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<Arc<CancelSignal>>,
}

/// Cancels every call that runs under the paired [`CallContext`], its clones
/// and contexts derived from it.
#[derive(Debug)]
pub struct Canceller {
    signal: Arc<CancelSignal>,
}

impl Canceller {
    /// Cancels paired contexts. In-flight calls are aborted and new calls
    /// fail without sending a request.
    pub fn cancel(&self) {
        self.signal.cancel();
    }
}

/// Cancellation flag of a context, linked to the flags of its derived
/// contexts.
#[derive(Debug)]
struct CancelSignal {
    sender: watch::Sender<bool>,
    children: Mutex<Vec<Weak<CancelSignal>>>,
}

impl CancelSignal {
    fn new() -> Arc<Self> {
        let (sender, _) = watch::channel(false);

        Arc::new(Self {
            sender,
            children: Mutex::new(Vec::new()),
        })
    }

    /// Creates a signal that is cancelled together with `self`.
    fn child(&self) -> Arc<Self> {
        let child = Self::new();

        {
            let mut children = self.children.lock().unwrap_or_else(PoisonError::into_inner);
            children.retain(|c| c.strong_count() > 0);
            children.push(Arc::downgrade(&child));
        }

        // Flag is set before children are taken in `cancel`, so a cancel
        // racing with this registration is seen here.
        if self.is_cancelled() {
            child.cancel();
        }

        child
    }

    fn cancel(&self) {
        self.sender.send_replace(true);

        let children =
            std::mem::take(&mut *self.children.lock().unwrap_or_else(PoisonError::into_inner));
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }

    fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();

        // Sender lives as long as `self`, so waiting can't fail.
        let signalled = receiver.wait_for(|cancelled| *cancelled).await.is_ok();
        if !signalled {
            std::future::pending::<()>().await
        }
    }
}

impl CallContext {
    /// Creates a context that never expires and can't be cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a copy of this context that expires at `deadline`. An earlier
    /// deadline of the parent context is kept.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        };

        Self {
            deadline: Some(deadline),
            cancel: self.cancel.clone(),
        }
    }

    /// Returns a copy of this context that expires after `timeout`. If
    /// `timeout` is too far in the future to be represented, the copy keeps
    /// this context's deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.clone(),
        }
    }

    /// Returns a copy of this context that can be cancelled with the returned
    /// [`Canceller`].
    ///
    /// Parent's deadline is kept, and cancelling the parent cancels the copy
    /// too. Cancelling the copy doesn't affect the parent.
    pub fn with_cancel(&self) -> (Self, Canceller) {
        let signal = match &self.cancel {
            Some(parent) => parent.child(),
            None => CancelSignal::new(),
        };

        let context = Self {
            deadline: self.deadline,
            cancel: Some(signal.clone()),
        };

        (context, Canceller { signal })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.is_cancelled())
    }

    /// Returns the reason this context is done, or `None` if calls can still
    /// run under it.
    pub fn err(&self) -> Option<RpcError> {
        if self.is_cancelled() {
            return Some(RpcError::Cancelled);
        }

        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(RpcError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Runs `call` until it completes or this context is done, whichever
    /// happens first. If context is already done, `call` is never polled.
    pub async fn run<T, E, F>(&self, call: F) -> Result<T, RpcError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<RpcError>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        let cancelled = async {
            match &self.cancel {
                Some(cancel) => cancel.cancelled().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;

            _ = cancelled => Err(RpcError::Cancelled),
            _ = deadline => Err(RpcError::DeadlineExceeded),
            res = call => res.map_err(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CallContext;
    use crate::errors::RpcError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    async fn slow_call() -> Result<u32, RpcError> {
        tokio::time::sleep(Duration::from_secs(30)).await;

        Ok(1)
    }

    #[tokio::test]
    async fn background_never_expires() {
        let ctx = CallContext::background();

        assert!(ctx.err().is_none());
        assert!(ctx.deadline().is_none());

        let res = ctx.run(async { Ok::<_, RpcError>(42) }).await.unwrap();
        assert_eq!(res, 42);
    }

    #[tokio::test]
    async fn expired_context_does_not_poll() {
        let ctx = CallContext::background().with_deadline(Instant::now());
        let polled = AtomicBool::new(false);

        let res = ctx
            .run(async {
                polled.store(true, Ordering::SeqCst);
                Ok::<u32, RpcError>(0)
            })
            .await;

        assert!(matches!(res, Err(RpcError::DeadlineExceeded)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn deadline_aborts_in_flight_call() {
        let ctx = CallContext::background().with_timeout(Duration::from_millis(50));

        let start = Instant::now();
        let res = ctx.run(slow_call()).await;

        assert!(matches!(res, Err(RpcError::DeadlineExceeded)));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn cancel_aborts_in_flight_call() {
        let (ctx, canceller) = CallContext::background().with_cancel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        let res = ctx.run(slow_call()).await;

        assert!(matches!(res, Err(RpcError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn cancel_is_shared_between_clones() {
        let (ctx, canceller) = CallContext::background().with_cancel();
        let cloned = ctx.clone();

        canceller.cancel();

        assert!(ctx.is_cancelled());
        assert!(cloned.is_cancelled());
        assert!(matches!(cloned.err(), Some(RpcError::Cancelled)));
        assert!(matches!(
            cloned.run(async { Ok::<_, RpcError>(()) }).await,
            Err(RpcError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn dropped_canceller_never_cancels() {
        let (ctx, canceller) = CallContext::background().with_cancel();
        drop(canceller);

        let res = ctx.run(async { Ok::<_, RpcError>(7) }).await.unwrap();
        assert_eq!(res, 7);
    }

    #[tokio::test]
    async fn parent_cancel_reaches_derived_contexts() {
        let (parent, canceller) = CallContext::background().with_cancel();
        let (child, _child_canceller) = parent.with_cancel();
        let grandchild = child.with_timeout(Duration::from_secs(60));

        let in_flight = tokio::spawn({
            let child = child.clone();
            async move { child.run(slow_call()).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        canceller.cancel();

        assert!(matches!(parent.err(), Some(RpcError::Cancelled)));
        assert!(matches!(child.err(), Some(RpcError::Cancelled)));
        assert!(matches!(grandchild.err(), Some(RpcError::Cancelled)));
        assert!(matches!(
            in_flight.await.unwrap(),
            Err(RpcError::Cancelled)
        ));
    }

    #[test]
    fn child_cancel_does_not_reach_parent() {
        let (parent, _canceller) = CallContext::background().with_cancel();
        let (child, child_canceller) = parent.with_cancel();

        child_canceller.cancel();

        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn derived_from_cancelled_parent_is_cancelled() {
        let (parent, canceller) = CallContext::background().with_cancel();
        canceller.cancel();

        let (child, _) = parent.with_cancel();
        assert!(matches!(child.err(), Some(RpcError::Cancelled)));
    }

    #[test]
    fn huge_timeout_does_not_overflow() {
        let ctx = CallContext::background().with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());
        assert!(ctx.err().is_none());

        let now = Instant::now();
        let bounded = CallContext::background()
            .with_deadline(now + Duration::from_secs(1))
            .with_timeout(Duration::MAX);
        assert_eq!(bounded.deadline(), Some(now + Duration::from_secs(1)));
    }

    #[test]
    fn earlier_deadline_is_kept() {
        let now = Instant::now();
        let ctx = CallContext::background().with_deadline(now + Duration::from_secs(1));

        let later = ctx.with_deadline(now + Duration::from_secs(10));
        assert_eq!(later.deadline(), Some(now + Duration::from_secs(1)));

        let sooner = ctx.with_timeout(Duration::from_millis(1));
        assert!(sooner.deadline().unwrap() < now + Duration::from_secs(1));
    }
}
