//! Behavioural tests for composition, execution and drawing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use phasegraph::graph::Graph;
use phasegraph::step::{self, step, Step, StepExt};
use phasegraph::{
    activity, concurrent, sequential, spawn_async, Conditional, ExecutionContext, PhaseError,
    Pipeline, SharedStage, StageExt, Statement, Uml,
};

fn counted(name: &str, calls: &Arc<AtomicUsize>, fail: bool) -> SharedStage {
    let calls = Arc::clone(calls);
    let label = name.to_string();
    activity(name, move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        if fail {
            Err(PhaseError::step(label.clone(), "failed"))
        } else {
            Ok(())
        }
    })
    .shared()
}

#[test]
fn sequential_stops_at_first_failure() {
    let a = Arc::new(AtomicUsize::new(0));
    let b = Arc::new(AtomicUsize::new(0));
    let c = Arc::new(AtomicUsize::new(0));
    let pipeline = Pipeline::new(sequential(vec![
        counted("a", &a, false),
        counted("b", &b, true),
        counted("c", &c, false),
    ]));

    let err = pipeline.run_fresh().unwrap_err();
    assert!(matches!(err, PhaseError::Step { ref step, .. } if step == "b"));
    assert_eq!(
        [a.load(Ordering::SeqCst), b.load(Ordering::SeqCst), c.load(Ordering::SeqCst)],
        [1, 1, 0]
    );
}

#[test]
fn concurrent_runs_every_branch_even_when_all_fail() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stages = (0..10)
        .map(|i| counted(&format!("branch {i}"), &calls, true))
        .collect();
    let err = Pipeline::new(concurrent(stages)).run_fresh().unwrap_err();
    assert!(matches!(err, PhaseError::Step { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[test]
fn last_failing_branch_wins() {
    let err = spawn_async(3, |i| {
        if i == 0 {
            thread::sleep(Duration::from_millis(200));
        }
        Err(PhaseError::step(format!("branch {i}"), "failed"))
    })
    .unwrap_err();
    assert!(matches!(err, PhaseError::Step { ref step, .. } if step == "branch 0"));

    for _ in 0..20 {
        let err = spawn_async(8, |i| {
            if i == 5 {
                Err(PhaseError::step("only", "failed"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
        assert!(matches!(err, PhaseError::Step { ref step, .. } if step == "only"));
    }
}

#[test]
fn conditional_runs_exactly_one_branch() {
    for flag in [true, false] {
        let yes = Arc::new(AtomicUsize::new(0));
        let no = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new(
            Conditional::new(Statement::new("flag?", |ctx: &ExecutionContext| {
                ctx.get_bool("flag").0
            }))
            .then(counted("yes", &yes, false))
            .otherwise(counted("no", &no, false)),
        );
        let ctx = ExecutionContext::new();
        ctx.set("flag", flag);
        pipeline.run(&ctx).unwrap();
        assert_eq!(yes.load(Ordering::SeqCst), usize::from(flag));
        assert_eq!(no.load(Ordering::SeqCst), usize::from(!flag));
    }
}

#[test]
fn context_accessor_contract() {
    let ctx = ExecutionContext::new();
    ctx.set("k", 123);
    assert_eq!(ctx.get_string("k"), (String::new(), true));
    assert!(ctx.get("missing").is_none());
    ctx.delete("absent");
    assert!(ctx.get("absent").is_none());
}

#[test]
fn diagram_text_round_trip() {
    let mut uml = Uml::new();
    uml.add_activity("beginning");
    uml.add_concurrency(&[
        &|g: &mut dyn Graph| g.add_activity("branch 1"),
        &|g: &mut dyn Graph| {
            g.add_decision(
                "is this a test?",
                &|g: &mut dyn Graph| g.add_activity("yes, this is a test"),
                &|g: &mut dyn Graph| g.add_activity("seems this isn't a test"),
            )
        },
    ]);
    assert_eq!(
        uml.body(),
        ":beginning;\nfork\n:branch 1;\nfork again\nif (is this a test?) then (yes)\n\
         :yes, this is a test;\nelse (no)\n:seems this isn't a test;\nendif\nend fork\n"
    );
}

#[test]
fn same_tree_draws_as_combinators_nest() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = Pipeline::new(sequential(vec![
        counted("beginning", &calls, false),
        concurrent(vec![
            counted("branch 1", &calls, false),
            Conditional::new(Statement::named("is this a test?"))
                .then(counted("yes, this is a test", &calls, false))
                .otherwise(counted("seems this isn't a test", &calls, false))
                .shared(),
        ])
        .shared(),
    ]));
    let mut uml = Uml::new();
    pipeline.draw(&mut uml);
    assert!(uml.text().contains(
        "start\n:beginning;\nfork\n:branch 1;\nfork again\nif (is this a test?) then (yes)\n"
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn typed_steps_compose() {
    let pipeline = step("words", |s: String| {
        Ok(s.split_whitespace().map(str::to_string).collect::<Vec<_>>())
    })
    .then(step::Concurrent::new(
        vec![
            step("count", |w: Vec<String>| Ok(w.len())).shared(),
            step("longest", |w: Vec<String>| {
                Ok(w.iter().map(String::len).max().unwrap_or(0))
            })
            .shared(),
        ],
        |a, b| Ok(a * 100 + b),
    ))
    .then(step::Optional::new(
        Statement::new("big?", |n: &usize| *n > 1000),
        step("clamp", |_: usize| Ok(1000)),
    ));

    assert_eq!(pipeline.run("a quick brown fox".to_string()).unwrap(), 405);
    assert_eq!(
        pipeline
            .run("one two three four five six seven eight nine ten eleven".to_string())
            .unwrap(),
        1000
    );
}

#[test]
fn lifecycle_hooks_nest_around_pipeline() {
    let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let (o1, o2, o3) = (order.clone(), order.clone(), order.clone());
    let pipeline = Pipeline::new(activity("body", move |_| {
        o1.lock().push("body");
        Ok(())
    }))
    .before(move |_, _| {
        o2.lock().push("before");
        Ok(())
    })
    .after(move |_, _, result| {
        o3.lock().push("after");
        result
    });
    pipeline.run_fresh().unwrap();
    assert_eq!(*order.lock(), vec!["before", "body", "after"]);
}
