use std::sync::Arc;

use super::{Dictionary, LookupContext, LookupError};
use crate::builder::ChainBuilder;
use crate::chain::Chain;
use crate::sink::ErrorSink;

/// Build the lookup processor: validate, normalize, then resolve against
/// `dictionary`. Business failures land in `LookupContext::errors`.
pub fn build_processor(dictionary: Arc<dyn Dictionary>) -> Chain<LookupContext> {
    ChainBuilder::<LookupContext>::new()
        .name("lookup")
        .description("resolve a word to its definition")
        .worker(|w| {
            w.name("validate")
                .description("reject blank input")
                .action(|ctx| {
                    Box::pin(async move {
                        if ctx.word.trim().is_empty() {
                            anyhow::bail!(LookupError::EmptyWord);
                        }
                        Ok(())
                    })
                })
                .record_errors()
        })
        .worker(|w| {
            w.name("normalize")
                .description("trim and lowercase")
                .guard(|ctx| !ctx.has_errors())
                .action(|ctx| {
                    Box::pin(async move {
                        ctx.normalized = ctx.word.trim().to_lowercase();
                        Ok(())
                    })
                })
        })
        .chain(|c| {
            c.name("resolve")
                .guard(|ctx| !ctx.has_errors())
                .worker(|w| {
                    w.name("define")
                        .description("query the dictionary")
                        .action(move |ctx| {
                            let dictionary = Arc::clone(&dictionary);
                            Box::pin(async move {
                                let definition = dictionary.define(&ctx.normalized).await?;
                                ctx.definition = Some(definition);
                                Ok(())
                            })
                        })
                        .record_errors()
                })
        })
        .build()
}
