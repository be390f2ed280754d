use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::hooks::{Action, Guard, Handler};
use crate::unit::ExecutionUnit;

/// A leaf unit: one guard, one action, one handler. Holds no per-call state.
pub struct Worker<X> {
    name: String,
    description: String,
    guard: Guard<X>,
    action: Arc<dyn Action<X>>,
    handler: Handler<X>,
}

impl<X: Send + 'static> Worker<X> {
    /// Assemble a worker from its parts. Usually reached through
    /// [`WorkerBuilder::build`](crate::builder::WorkerBuilder::build).
    pub fn new(
        name: String,
        description: String,
        guard: Guard<X>,
        action: Arc<dyn Action<X>>,
        handler: Handler<X>,
    ) -> Self {
        Self {
            name,
            description,
            guard,
            action,
            handler,
        }
    }

    /// Whether the guard lets this context through.
    pub fn test(&self, context: &X) -> bool {
        self.guard.test(context)
    }

    /// Run the action against the context, without consulting the guard.
    pub async fn process(&self, context: &mut X) -> Result<()> {
        self.action.process(context).await
    }

    /// Hand an action failure to the handler. `Ok` means it was absorbed.
    pub fn on_exception(&self, context: &mut X, error: anyhow::Error) -> Result<()> {
        self.handler.handle(context, error)
    }
}

#[async_trait]
impl<X: Send + 'static> ExecutionUnit<X> for Worker<X> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, context: &mut X) -> Result<()> {
        if !self.test(context) {
            tracing::trace!(unit = %self.name, "guard rejected, skipping worker");
            return Ok(());
        }

        tracing::debug!(unit = %self.name, "processing");
        match self.process(context).await {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::debug!(unit = %self.name, error = %error, "action failed, invoking handler");
                let outcome = self.on_exception(context, error);
                if let Err(e) = &outcome {
                    tracing::warn!(unit = %self.name, error = %e, "failure escaped worker");
                }
                outcome
            }
        }
    }
}
