//! Dictionary lookup, wired as a processor chain.
//!
//! A host builds the processor once with [`build_processor`] and runs one
//! fresh [`LookupContext`] through it per request, then reads a
//! [`LookupReport`] back out of the context.

pub mod memory;
mod processor;

pub use processor::build_processor;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::chain::Chain;
use crate::sink::ErrorSink;
use crate::unit::ExecutionUnit;

/// Business-level lookup failures. Recorded into the context, not propagated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no word given")]
    EmptyWord,

    #[error("no definition for {0:?}")]
    NotFound(String),
}

/// Where definitions come from.
#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Look up a normalized word. Missing words fail with [`LookupError::NotFound`].
    async fn define(&self, word: &str) -> Result<String>;
}

/// Per-request state threaded through the lookup processor.
#[derive(Debug, Default)]
pub struct LookupContext {
    pub word: String,
    pub normalized: String,
    pub definition: Option<String>,
    pub errors: Vec<anyhow::Error>,
}

impl LookupContext {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    pub fn report(&self) -> LookupReport {
        LookupReport {
            word: self.word.clone(),
            definition: self.definition.clone(),
            errors: self.errors.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl ErrorSink for LookupContext {
    fn record_error(&mut self, error: anyhow::Error) {
        self.errors.push(error);
    }

    fn recorded_errors(&self) -> &[anyhow::Error] {
        &self.errors
    }
}

/// What a caller gets back for one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Run every word through `processor` concurrently, each with its own
/// context. Reports come back in input order, whatever order the lookups
/// finish in. A lookup whose failure escapes the processor yields `Err`.
pub async fn lookup_all<I>(
    processor: &Chain<LookupContext>,
    words: I,
) -> Vec<Result<LookupReport>>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let lookups = words.into_iter().map(|word| {
        let mut ctx = LookupContext::new(word);
        async move { processor.execute(&mut ctx).await.map(|()| ctx.report()) }
    });
    futures::future::join_all(lookups).await
}
