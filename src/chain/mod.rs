use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::hooks::{Guard, Handler};
use crate::unit::ExecutionUnit;

/// A composite unit running a fixed sequence of children, one after another,
/// against the same context.
///
/// The first child failure that escapes stops the sequence; the remaining
/// siblings never run and the failure goes to this chain's handler.
pub struct Chain<X> {
    name: String,
    description: String,
    guard: Guard<X>,
    handler: Handler<X>,
    children: Vec<Arc<dyn ExecutionUnit<X>>>,
}

impl<X: Send + 'static> Chain<X> {
    /// Assemble a chain from its parts. Usually reached through
    /// [`ChainBuilder::build`](crate::builder::ChainBuilder::build).
    pub fn new(
        name: String,
        description: String,
        guard: Guard<X>,
        handler: Handler<X>,
        children: Vec<Arc<dyn ExecutionUnit<X>>>,
    ) -> Self {
        Self {
            name,
            description,
            guard,
            handler,
            children,
        }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the chain has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    async fn run_children(&self, context: &mut X) -> Result<()> {
        for child in &self.children {
            child.execute(context).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<X: Send + 'static> ExecutionUnit<X> for Chain<X> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn children(&self) -> &[Arc<dyn ExecutionUnit<X>>] {
        &self.children
    }

    async fn execute(&self, context: &mut X) -> Result<()> {
        if !self.guard.test(context) {
            tracing::trace!(unit = %self.name, "guard rejected, skipping chain");
            return Ok(());
        }

        tracing::debug!(unit = %self.name, children = self.children.len(), "running chain");
        if let Err(error) = self.run_children(context).await {
            tracing::debug!(unit = %self.name, error = %error, "child failure reached chain handler");
            return self.handler.handle(context, error);
        }
        Ok(())
    }
}
