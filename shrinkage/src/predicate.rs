//! Predicate outcomes and adapters for assertion-style predicates.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::PredicateError;

/// What one predicate evaluation means to the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateOutcome {
    /// The candidate does not reproduce the failure
    Passed,
    /// The candidate reproduces the failure
    Regressed,
    /// The predicate broke or was cancelled; the search must stop
    Aborted(PredicateError),
}

impl PredicateOutcome {
    /// Classify a predicate result
    pub fn classify(result: Result<(), PredicateError>) -> Self {
        match result {
            Ok(()) => PredicateOutcome::Passed,
            Err(PredicateError::Regression { .. }) => PredicateOutcome::Regressed,
            Err(other) => PredicateOutcome::Aborted(other),
        }
    }
}

/// Turn a panicking assertion into a predicate
///
/// A panic inside `assertion` (from `assert!`, `assert_eq!` and friends) is
/// reported as [`PredicateError::Regression`] with the panic message.
///
/// Every panic is treated this way, not only failed assertions. An index out
/// of bounds or an `unwrap` on `None` inside the test body is minimized like
/// any other failure instead of aborting the search. Return
/// [`PredicateError::internal`] from a hand-written predicate when such
/// errors must stop the search.
///
/// Panics still go through the installed panic hook, so with the default
/// hook every failing candidate prints its panic message to standard error
/// while the search runs, separately from the trace. Install a quiet hook
/// with [`std::panic::set_hook`] around the search to avoid that.
pub fn catch_regressions<A, F>(mut assertion: F) -> impl FnMut(&A) -> Result<(), PredicateError>
where
    F: FnMut(&A),
{
    move |value: &A| {
        catch_unwind(AssertUnwindSafe(|| assertion(value))).map_err(PredicateError::from_panic)
    }
}
