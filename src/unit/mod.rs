use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Write;
use std::sync::Arc;

/// The uniform executable shape shared by workers and chains.
/// Outcomes travel through `context`; only unhandled failures come back as `Err`.
#[async_trait]
pub trait ExecutionUnit<X>: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Child units in execution order. Leaves have none.
    fn children(&self) -> &[Arc<dyn ExecutionUnit<X>>] {
        &[]
    }

    async fn execute(&self, context: &mut X) -> Result<()>;
}

/// Render a unit tree as an indented listing, one line per unit.
pub fn outline<X, U>(unit: &U) -> String
where
    U: ExecutionUnit<X> + ?Sized,
{
    let mut out = String::new();
    write_outline::<X, U>(unit, 0, &mut out);
    out
}

fn write_outline<X, U>(unit: &U, depth: usize, out: &mut String)
where
    U: ExecutionUnit<X> + ?Sized,
{
    let indent = "  ".repeat(depth);
    let marker = if unit.children().is_empty() { "-" } else { "+" };
    // Writing to a String cannot fail.
    let _ = if unit.description().is_empty() {
        writeln!(out, "{indent}{marker} {}", unit.name())
    } else {
        writeln!(out, "{indent}{marker} {}: {}", unit.name(), unit.description())
    };
    for child in unit.children() {
        write_outline::<X, dyn ExecutionUnit<X>>(&**child, depth + 1, out);
    }
}
