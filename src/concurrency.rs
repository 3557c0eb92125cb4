//! Fan-out/join primitive behind every concurrent combinator.

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use parking_lot::Mutex;
use tracing::dispatcher::{self, Dispatch};
use tracing::{debug, warn, Span};

use crate::error::{PhaseError, Result};

/// Run `f(index)` for every index in `0..n` on its own thread and wait for
/// all of them.
///
/// Every branch runs to completion; a failure never stops the others. When
/// branches fail, the error returned is the one recorded **last**: each
/// failing branch overwrites the stored error as it finishes, so with
/// several failures the branch that finished latest wins. A panicking
/// branch is recorded as [`PhaseError::BranchPanicked`].
///
/// `n == 0` returns immediately and `n == 1` runs on the calling thread.
/// Branch threads log through the caller's subscriber, inside the caller's
/// current span.
///
/// ```
/// use phasegraph::concurrency::spawn_async;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = AtomicUsize::new(0);
/// spawn_async(4, |_| {
///     calls.fetch_add(1, Ordering::SeqCst);
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(calls.load(Ordering::SeqCst), 4);
/// ```
pub fn spawn_async<F>(n: usize, f: F) -> Result<()>
where
    F: Fn(usize) -> Result<()> + Sync,
{
    match n {
        0 => return Ok(()),
        1 => return run_branch(&f, 0),
        _ => {}
    }

    let last_error: Mutex<Option<PhaseError>> = Mutex::new(None);
    let failures = Mutex::new(0_usize);
    let dispatch = dispatcher::get_default(Dispatch::clone);
    let parent = Span::current();

    thread::scope(|scope| {
        for index in 0..n {
            let f = &f;
            let last_error = &last_error;
            let failures = &failures;
            let dispatch = &dispatch;
            let parent = &parent;
            scope.spawn(move || {
                let result = dispatcher::with_default(dispatch, || {
                    let _entered = parent.enter();
                    run_branch(f, index)
                });
                if let Err(err) = result {
                    *failures.lock() += 1;
                    if let Some(previous) = last_error.lock().replace(err) {
                        debug!("Discarding earlier branch error: {}", previous);
                    }
                }
            });
        }
    });

    let failures = failures.into_inner();
    if failures > 1 {
        warn!(
            "{} of {} concurrent branches failed; surfacing the last one",
            failures, n
        );
    }

    match last_error.into_inner() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn run_branch<F>(f: &F, index: usize) -> Result<()>
where
    F: Fn(usize) -> Result<()>,
{
    panic::catch_unwind(AssertUnwindSafe(|| f(index)))
        .unwrap_or_else(|_| Err(PhaseError::BranchPanicked { index }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    #[test]
    fn zero_branches_is_ok() {
        let calls = AtomicUsize::new(0);
        spawn_async(0, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn single_branch_runs_inline() {
        let caller = thread::current().id();
        spawn_async(1, |index| {
            assert_eq!(index, 0);
            assert_eq!(thread::current().id(), caller);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn single_branch_error_is_returned() {
        let err = spawn_async(1, |_| Err(PhaseError::step("only", "nope"))).unwrap_err();
        assert!(err.to_string().contains("only"));
    }

    #[test]
    fn every_index_runs_once() {
        let seen: Vec<AtomicUsize> = (0..8).map(|_| AtomicUsize::new(0)).collect();
        spawn_async(8, |index| {
            seen[index].fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert!(seen.iter().all(|count| count.load(Ordering::SeqCst) == 1));
    }

    #[test]
    fn branches_run_concurrently() {
        // Would deadlock if branches ran one after another.
        let barrier = Barrier::new(4);
        spawn_async(4, |_| {
            barrier.wait();
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn all_branches_run_when_all_fail() {
        let calls = AtomicUsize::new(0);
        let result = spawn_async(10, |index| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(PhaseError::step(format!("branch {index}"), "failed"))
        });
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn last_finishing_error_wins() {
        for _ in 0..5 {
            let err = spawn_async(3, |index| match index {
                0 => Err(PhaseError::step("early", "failed first")),
                1 => Ok(()),
                _ => {
                    thread::sleep(Duration::from_millis(150));
                    Err(PhaseError::step("late", "failed last"))
                }
            })
            .unwrap_err();
            assert!(err.to_string().contains("late"));
        }
    }

    #[test]
    fn single_failure_is_always_surfaced() {
        for _ in 0..10 {
            let err = spawn_async(6, |index| {
                if index == 4 {
                    Err(PhaseError::step("four", "boom"))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();
            assert!(err.to_string().contains("four"));
        }
    }

    #[test]
    fn panicking_branch_becomes_error() {
        let calls = AtomicUsize::new(0);
        let err = spawn_async(3, |index| {
            calls.fetch_add(1, Ordering::SeqCst);
            if index == 1 {
                panic!("branch blew up");
            }
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, PhaseError::BranchPanicked { index: 1 }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn branches_inherit_callers_span() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = tracing::info_span!("fan-out");
            let _entered = span.enter();

            let seen = Mutex::new(Vec::new());
            spawn_async(3, |_| {
                seen.lock().push(Span::current().id());
                Ok(())
            })
            .unwrap();

            let seen = seen.into_inner();
            assert_eq!(seen.len(), 3);
            assert!(span.id().is_some());
            assert!(seen.iter().all(|id| *id == span.id()));
        });
    }
}
