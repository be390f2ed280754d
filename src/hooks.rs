//! The three per-unit hooks: guard, action, handler.
//!
//! Guards and handlers run inline; only actions suspend. Each hook has an
//! explicit default ([`Guard::always`], [`Noop`], [`Handler::rethrow`]) that
//! builders substitute when the caller leaves a slot empty.

use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;

use crate::sink::ErrorSink;

/// Predicate deciding whether a unit runs for a given context.
pub struct Guard<X> {
    test: Arc<dyn Fn(&X) -> bool + Send + Sync>,
}

impl<X: 'static> Guard<X> {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&X) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    /// The default guard: every context passes.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    pub fn test(&self, context: &X) -> bool {
        (self.test)(context)
    }
}

impl<X> Clone for Guard<X> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

/// The work a worker performs. May suspend on external I/O.
#[async_trait]
pub trait Action<X>: Send + Sync {
    async fn process(&self, context: &mut X) -> Result<()>;
}

/// The default action. Does nothing and succeeds.
pub struct Noop;

#[async_trait]
impl<X: Send> Action<X> for Noop {
    async fn process(&self, _context: &mut X) -> Result<()> {
        Ok(())
    }
}

/// Adapts a closure returning a boxed future into an [`Action`].
///
/// ```
/// use workchain::{Action, FnAction};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> anyhow::Result<()> {
/// let bump = FnAction::new(|hits: &mut u32| {
///     Box::pin(async move {
///         *hits += 1;
///         Ok(())
///     })
/// });
///
/// let mut hits = 0;
/// bump.process(&mut hits).await?;
/// assert_eq!(hits, 1);
/// # Ok(())
/// # }
/// ```
pub struct FnAction<F> {
    f: F,
}

impl<F> FnAction<F> {
    pub fn new<X>(f: F) -> Self
    where
        F: for<'a> Fn(&'a mut X) -> BoxFuture<'a, Result<()>>,
    {
        Self { f }
    }
}

#[async_trait]
impl<X, F> Action<X> for FnAction<F>
where
    X: Send,
    F: for<'a> Fn(&'a mut X) -> BoxFuture<'a, Result<()>> + Send + Sync,
{
    async fn process(&self, context: &mut X) -> Result<()> {
        (self.f)(context).await
    }
}

/// Receives a failure that escaped an action (or a chain's children).
/// Returning `Ok` absorbs it; returning `Err` propagates it.
pub struct Handler<X> {
    handle: Arc<dyn Fn(&mut X, anyhow::Error) -> Result<()> + Send + Sync>,
}

impl<X: 'static> Handler<X> {
    pub fn new<F>(handle: F) -> Self
    where
        F: Fn(&mut X, anyhow::Error) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// The default handler: hand the error back unchanged.
    pub fn rethrow() -> Self {
        Self::new(|_, error| Err(error))
    }

    pub fn handle(&self, context: &mut X, error: anyhow::Error) -> Result<()> {
        (self.handle)(context, error)
    }
}

impl<X: ErrorSink + 'static> Handler<X> {
    /// Absorb the error by appending it to the context's error slot.
    pub fn record() -> Self {
        Self::new(|context: &mut X, error| {
            context.record_error(error);
            Ok(())
        })
    }
}

impl<X> Clone for Handler<X> {
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}
