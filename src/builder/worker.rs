use anyhow::Result;
use futures::future::BoxFuture;
use std::sync::Arc;

use crate::consts::DEFAULT_WORKER_NAME;
use crate::hooks::{Action, FnAction, Guard, Handler, Noop};
use crate::sink::ErrorSink;
use crate::worker::Worker;

/// Staging area for a [`Worker`]. Every setter overwrites its slot.
pub struct WorkerBuilder<X> {
    name: String,
    description: String,
    guard: Option<Guard<X>>,
    action: Option<Arc<dyn Action<X>>>,
    handler: Option<Handler<X>>,
}

impl<X: Send + 'static> WorkerBuilder<X> {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_WORKER_NAME.to_string(),
            description: String::new(),
            guard: None,
            action: None,
            handler: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Run only when `test` passes for the context.
    pub fn guard<F>(mut self, test: F) -> Self
    where
        F: Fn(&X) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(test));
        self
    }

    /// Set the action from a closure returning a boxed future:
    /// `.action(|ctx| Box::pin(async move { ...; Ok(()) }))`.
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a mut X) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(FnAction::new(f)));
        self
    }

    /// Set the action from any [`Action`] implementation.
    pub fn processor(mut self, action: impl Action<X> + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn handler<F>(mut self, handle: F) -> Self
    where
        F: Fn(&mut X, anyhow::Error) -> Result<()> + Send + Sync + 'static,
    {
        self.handler = Some(Handler::new(handle));
        self
    }

    /// Freeze into an immutable worker, filling empty slots with defaults.
    pub fn build(self) -> Worker<X> {
        Worker::new(
            self.name,
            self.description,
            self.guard.unwrap_or_else(Guard::always),
            self.action.unwrap_or_else(|| Arc::new(Noop) as Arc<dyn Action<X>>),
            self.handler.unwrap_or_else(Handler::rethrow),
        )
    }
}

impl<X: ErrorSink + Send + 'static> WorkerBuilder<X> {
    /// Absorb action failures into the context's error slot.
    pub fn record_errors(mut self) -> Self {
        self.handler = Some(Handler::record());
        self
    }
}

impl<X: Send + 'static> Default for WorkerBuilder<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X> Clone for WorkerBuilder<X> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
            handler: self.handler.clone(),
        }
    }
}
