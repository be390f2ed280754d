use std::sync::Arc;
use std::time::Duration;

use workchain::builder::{ChainBuilder, WorkerBuilder};
use workchain::chain::Chain;
use workchain::sink::ErrorSink;
use workchain::unit::ExecutionUnit;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0} failed")]
struct StepFailed(&'static str);

#[derive(Debug, Default)]
struct Trace {
    input: u64,
    total: u64,
    log: Vec<&'static str>,
    errors: Vec<anyhow::Error>,
}

impl ErrorSink for Trace {
    fn record_error(&mut self, error: anyhow::Error) {
        self.errors.push(error);
    }

    fn recorded_errors(&self) -> &[anyhow::Error] {
        &self.errors
    }
}

fn step(w: WorkerBuilder<Trace>, name: &'static str) -> WorkerBuilder<Trace> {
    w.name(name).action(move |ctx| {
        Box::pin(async move {
            ctx.log.push(name);
            Ok(())
        })
    })
}

fn failing(w: WorkerBuilder<Trace>, name: &'static str) -> WorkerBuilder<Trace> {
    w.name(name).action(move |ctx| {
        Box::pin(async move {
            ctx.log.push(name);
            Err(anyhow::Error::new(StepFailed(name)))
        })
    })
}

/// `[A, nested[B, C], D]` with `B` failing and no handlers anywhere.
fn a_nested_bc_d() -> ChainBuilder<Trace> {
    ChainBuilder::<Trace>::new()
        .name("outer")
        .worker(|w| step(w, "A"))
        .chain(|c| {
            c.name("nested")
                .worker(|w| failing(w, "B"))
                .worker(|w| step(w, "C"))
        })
        .worker(|w| step(w, "D"))
}

#[tokio::test]
async fn children_run_in_declared_order() {
    let forward = ChainBuilder::<Trace>::new()
        .worker(|w| step(w, "A"))
        .worker(|w| step(w, "B"))
        .worker(|w| step(w, "C"))
        .build();
    let reordered = ChainBuilder::<Trace>::new()
        .worker(|w| step(w, "C"))
        .worker(|w| step(w, "A"))
        .worker(|w| step(w, "B"))
        .build();

    let mut ctx = Trace::default();
    forward.execute(&mut ctx).await.unwrap();
    assert_eq!(ctx.log, ["A", "B", "C"]);

    let mut ctx = Trace::default();
    reordered.execute(&mut ctx).await.unwrap();
    assert_eq!(ctx.log, ["C", "A", "B"]);
}

#[tokio::test]
async fn siblings_never_overlap() {
    let chain = ChainBuilder::<Trace>::new()
        .worker(|w| {
            w.action(|ctx| {
                Box::pin(async move {
                    ctx.log.push("slow start");
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    ctx.log.push("slow end");
                    Ok(())
                })
            })
        })
        .worker(|w| step(w, "fast"))
        .build();

    let mut ctx = Trace::default();
    chain.execute(&mut ctx).await.unwrap();

    assert_eq!(ctx.log, ["slow start", "slow end", "fast"]);
}

#[tokio::test]
async fn chain_guard_false_skips_every_child() {
    let chain = ChainBuilder::<Trace>::new()
        .guard(|ctx| ctx.input > 0)
        .worker(|w| step(w, "A"))
        .chain(|c| c.worker(|w| failing(w, "B")))
        .build();

    let mut ctx = Trace::default();
    chain.execute(&mut ctx).await.unwrap();

    assert!(ctx.log.is_empty());
}

#[tokio::test]
async fn unhandled_nested_failure_aborts_remaining_siblings() {
    let chain = a_nested_bc_d().build();

    let mut ctx = Trace::default();
    let err = chain.execute(&mut ctx).await.unwrap_err();

    assert_eq!(ctx.log, ["A", "B"]);
    assert_eq!(err.downcast_ref::<StepFailed>(), Some(&StepFailed("B")));
    assert_eq!(err.to_string(), "B failed");
}

#[tokio::test]
async fn outer_handler_receives_escaping_failure() {
    let chain = a_nested_bc_d().record_errors().build();

    let mut ctx = Trace::default();
    chain.execute(&mut ctx).await.unwrap();

    assert_eq!(ctx.log, ["A", "B"]);
    assert_eq!(ctx.errors.len(), 1);
    assert_eq!(
        ctx.errors[0].downcast_ref::<StepFailed>(),
        Some(&StepFailed("B"))
    );
}

#[tokio::test]
async fn nested_handler_contains_failure_to_its_scope() {
    let chain = ChainBuilder::<Trace>::new()
        .worker(|w| step(w, "A"))
        .chain(|c| {
            c.worker(|w| failing(w, "B"))
                .worker(|w| step(w, "C"))
                .record_errors()
        })
        .worker(|w| step(w, "D"))
        .build();

    let mut ctx = Trace::default();
    chain.execute(&mut ctx).await.unwrap();

    // The nested chain stops at B but swallows the error, so D still runs.
    assert_eq!(ctx.log, ["A", "B", "D"]);
    assert_eq!(ctx.errors.len(), 1);
}

#[tokio::test]
async fn child_handler_runs_before_parent_and_parent_never_sees_it() {
    let chain = ChainBuilder::<Trace>::new()
        .handler(|ctx: &mut Trace, error| {
            ctx.log.push("outer handler");
            Err(error)
        })
        .worker(|w| failing(w, "B").record_errors())
        .worker(|w| step(w, "C"))
        .build();

    let mut ctx = Trace::default();
    chain.execute(&mut ctx).await.unwrap();

    assert_eq!(ctx.log, ["B", "C"]);
    assert_eq!(ctx.errors.len(), 1);
}

#[tokio::test]
async fn handler_is_not_inherited_by_grandchildren() {
    let chain = ChainBuilder::<Trace>::new()
        .chain(|c| {
            c.name("middle")
                .handler(|ctx: &mut Trace, error| {
                    ctx.log.push("middle handler");
                    Err(error)
                })
                .chain(|c| c.name("inner").worker(|w| failing(w, "leaf")))
        })
        .record_errors()
        .build();

    let mut ctx = Trace::default();
    chain.execute(&mut ctx).await.unwrap();

    // The leaf has no handler of its own; the failure climbs scope by scope.
    assert_eq!(ctx.log, ["leaf", "middle handler"]);
    assert_eq!(ctx.errors.len(), 1);
}

#[tokio::test]
async fn empty_chain_is_a_noop() {
    let chain = ChainBuilder::<Trace>::new().build();
    assert!(chain.is_empty());

    let mut ctx = Trace::default();
    chain.execute(&mut ctx).await.unwrap();
    assert!(ctx.log.is_empty());
}

fn summing_chain() -> Chain<Trace> {
    ChainBuilder::<Trace>::new()
        .name("sum")
        .worker(|w| {
            w.name("double").action(|ctx| {
                Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(5 * (ctx.input % 3))).await;
                    ctx.total = ctx.input * 2;
                    Ok(())
                })
            })
        })
        .worker(|w| {
            w.name("reject-odd")
                .guard(|ctx| ctx.input % 2 == 1)
                .action(|ctx| {
                    Box::pin(async move { Err(anyhow::anyhow!("odd input {}", ctx.input)) })
                })
                .record_errors()
        })
        .worker(|w| {
            w.name("increment").action(|ctx| {
                Box::pin(async move {
                    ctx.total += 1;
                    Ok(())
                })
            })
        })
        .build()
}

#[tokio::test]
async fn concurrent_contexts_stay_independent() {
    let chain = Arc::new(summing_chain());

    let handles: Vec<_> = (0..16u64)
        .map(|input| {
            let chain = Arc::clone(&chain);
            tokio::spawn(async move {
                let mut ctx = Trace {
                    input,
                    ..Trace::default()
                };
                chain.execute(&mut ctx).await.map(|()| ctx)
            })
        })
        .collect();

    for (input, handle) in (0..16u64).zip(handles) {
        let ctx = handle.await.unwrap().unwrap();
        assert_eq!(ctx.total, input * 2 + 1);
        assert_eq!(ctx.errors.len(), (input % 2) as usize);
    }
}

#[tokio::test]
async fn built_unit_can_be_shared_between_chains() {
    let shared: Arc<dyn ExecutionUnit<Trace>> = Arc::new(
        ChainBuilder::<Trace>::new()
            .name("shared")
            .worker(|w| step(w, "S"))
            .build(),
    );

    let first = ChainBuilder::<Trace>::new()
        .worker(|w| step(w, "1"))
        .unit(Arc::clone(&shared))
        .build();
    let second = ChainBuilder::<Trace>::new()
        .unit(Arc::clone(&shared))
        .worker(|w| step(w, "2"))
        .build();

    let mut ctx = Trace::default();
    first.execute(&mut ctx).await.unwrap();
    second.execute(&mut ctx).await.unwrap();

    assert_eq!(ctx.log, ["1", "S", "S", "2"]);
    assert_eq!(first.children()[1].name(), "shared");
}
