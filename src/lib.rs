//! workchain
//!
//! A chain-of-responsibility execution engine. Leaf [`Worker`]s and composite
//! [`Chain`]s share the [`ExecutionUnit`] contract: `execute(&mut context)`.
//! Graphs are staged with [`ChainBuilder`] / [`WorkerBuilder`] and frozen on
//! `build()` into immutable units that any number of contexts may run
//! concurrently.
//!
//! ```
//! use workchain::{ChainBuilder, ExecutionUnit};
//!
//! #[derive(Default)]
//! struct Order {
//!     quantity: u32,
//!     total: u32,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let processor = ChainBuilder::<Order>::new()
//!     .name("checkout")
//!     .worker(|w| {
//!         w.name("price").action(|ctx| {
//!             Box::pin(async move {
//!                 ctx.total = ctx.quantity * 3;
//!                 Ok(())
//!             })
//!         })
//!     })
//!     .build();
//!
//! let mut ctx = Order { quantity: 2, ..Order::default() };
//! processor.execute(&mut ctx).await?;
//! assert_eq!(ctx.total, 6);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod chain;
pub mod config;
pub mod consts;
pub mod dictionary;
pub mod hooks;
pub mod sink;
pub mod unit;
pub mod worker;

pub use builder::{ChainBuilder, WorkerBuilder};
pub use chain::Chain;
pub use hooks::{Action, FnAction, Guard, Handler, Noop};
pub use sink::ErrorSink;
pub use unit::{ExecutionUnit, outline};
pub use worker::Worker;
