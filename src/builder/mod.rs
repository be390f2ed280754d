//! Builders that stage a unit's configuration and freeze it on `build()`.
//!
//! `build` takes the builder by value, so a builder cannot be touched once it
//! has produced a unit. Cloning a builder before `build` gives an independent
//! staging copy; nothing done to the copy reaches units built from the original.

mod chain;
mod worker;

pub use chain::ChainBuilder;
pub use worker::WorkerBuilder;
