use anyhow::Result;
use std::sync::Arc;

use super::WorkerBuilder;
use crate::chain::Chain;
use crate::consts::DEFAULT_CHAIN_NAME;
use crate::hooks::{Guard, Handler};
use crate::sink::ErrorSink;
use crate::unit::ExecutionUnit;

enum Child<X> {
    Worker(WorkerBuilder<X>),
    Chain(ChainBuilder<X>),
    Built(Arc<dyn ExecutionUnit<X>>),
}

impl<X> Clone for Child<X> {
    fn clone(&self) -> Self {
        match self {
            Child::Worker(w) => Child::Worker(w.clone()),
            Child::Chain(c) => Child::Chain(c.clone()),
            Child::Built(u) => Child::Built(Arc::clone(u)),
        }
    }
}

/// Staging area for a [`Chain`]. Children are kept in the order they are added.
///
/// ```
/// use workchain::{ChainBuilder, ErrorSink};
///
/// let processor = ChainBuilder::<Vec<anyhow::Error>>::new()
///     .name("audit")
///     .worker(|w| {
///         w.name("check")
///             .action(|_| Box::pin(async { Err(anyhow::anyhow!("missing field")) }))
///             .record_errors()
///     })
///     .chain(|c| c.name("publish").guard(|errors| !errors.has_errors()))
///     .build();
///
/// assert_eq!(processor.len(), 2);
/// ```
pub struct ChainBuilder<X> {
    name: String,
    description: String,
    guard: Option<Guard<X>>,
    handler: Option<Handler<X>>,
    children: Vec<Child<X>>,
}

impl<X: Send + 'static> ChainBuilder<X> {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_CHAIN_NAME.to_string(),
            description: String::new(),
            guard: None,
            handler: None,
            children: Vec::new(),
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

    /// Skip the whole chain unless `test` passes.
    pub fn guard<F>(mut self, test: F) -> Self
    where
        F: Fn(&X) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(test));
        self
    }

    /// Receives failures that escape any child. Return `Ok` to absorb.
    pub fn handler<F>(mut self, handle: F) -> Self
    where
        F: Fn(&mut X, anyhow::Error) -> Result<()> + Send + Sync + 'static,
    {
        self.handler = Some(Handler::new(handle));
        self
    }

    /// Append a worker configured by `configure`.
    pub fn worker<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(WorkerBuilder<X>) -> WorkerBuilder<X>,
    {
        self.children.push(Child::Worker(configure(WorkerBuilder::new())));
        self
    }

    /// Append a nested chain configured by `configure`.
    pub fn chain<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(ChainBuilder<X>) -> ChainBuilder<X>,
    {
        self.children.push(Child::Chain(configure(ChainBuilder::new())));
        self
    }

    /// Append an already-built unit, e.g. a sub-chain shared between processors.
    pub fn unit(mut self, unit: Arc<dyn ExecutionUnit<X>>) -> Self {
        self.children.push(Child::Built(unit));
        self
    }

    /// Freeze this builder and every nested builder into an immutable chain.
    pub fn build(self) -> Chain<X> {
        let children = self
            .children
            .into_iter()
            .map(|child| -> Arc<dyn ExecutionUnit<X>> {
                match child {
                    Child::Worker(w) => Arc::new(w.build()),
                    Child::Chain(c) => Arc::new(c.build()),
                    Child::Built(u) => u,
                }
            })
            .collect();

        Chain::new(
            self.name,
            self.description,
            self.guard.unwrap_or_else(Guard::always),
            self.handler.unwrap_or_else(Handler::rethrow),
            children,
        )
    }
}

impl<X: ErrorSink + Send + 'static> ChainBuilder<X> {
    /// Absorb escaping child failures into the context's error slot.
    pub fn record_errors(mut self) -> Self {
        self.handler = Some(Handler::record());
        self
    }
}

impl<X: Send + 'static> Default for ChainBuilder<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X> Clone for ChainBuilder<X> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            guard: self.guard.clone(),
            handler: self.handler.clone(),
            children: self.children.clone(),
        }
    }
}
