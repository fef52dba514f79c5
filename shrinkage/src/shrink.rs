//! Shrink search: re-runs a predicate against shrink candidates until a
//! locally minimal failing value is found.
//!
//! A search runs in rounds. Each round scans the current [`Step`] left to
//! right and stops at the first candidate that still fails. That candidate
//! becomes the basis of the next round, as long as the [`ShrinkingMode`]
//! permits it. When a round finds nothing, the value that entered the round is
//! the result.

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{ShrinkConfig, ShrinkingMode, get_global_config};
use crate::error::PredicateError;
use crate::predicate::PredicateOutcome;
use crate::shrinker::Shrinker;
use crate::step::Step;
use crate::trace::{ShrinkTrace, StderrSink, TraceSink};

/// Result of a completed shrink search
#[derive(Debug, Clone)]
pub struct ShrinkResult<A> {
    /// Value the search started from
    pub original: A,
    /// Smallest value confirmed to fail
    pub minimal: A,
    /// Candidates attempted, counting every evaluated batch in full
    pub attempts: usize,
    /// Number of regressions accepted
    pub shrink_steps: usize,
    /// Termination policy the search ran under
    pub mode: ShrinkingMode,
    /// Time spent shrinking
    pub shrink_duration: Duration,
    /// False when the termination policy cut the search short
    pub completed: bool,
    /// Diagnostic trace, finished with its result line
    pub trace: ShrinkTrace,
}

/// Mutable state of one search, owned by a single invocation
struct Search<A> {
    mode: ShrinkingMode,
    current: A,
    attempts: usize,
    shrink_steps: usize,
    completed: bool,
    trace: ShrinkTrace,
}

impl<A: Clone + Debug> Search<A> {
    fn new(initial: &A, mode: ShrinkingMode) -> Self {
        Self {
            mode,
            current: initial.clone(),
            attempts: 0,
            shrink_steps: 0,
            completed: true,
            trace: ShrinkTrace::new(),
        }
    }

    fn first_step<'s, S>(&mut self, source: &'s S) -> Step<'s, A, S>
    where
        S: Shrinker<A> + ?Sized,
    {
        if self.mode.permits(0) {
            Step::new(source, &self.current)
        } else {
            self.completed = false;
            Step::empty()
        }
    }

    /// Record one evaluation; `Ok(true)` when the candidate regressed
    fn record(
        &mut self,
        offset: usize,
        candidate: &A,
        outcome: PredicateOutcome,
    ) -> Result<bool, PredicateError> {
        let index = self.attempts + offset;
        match outcome {
            PredicateOutcome::Passed => {
                self.trace.record_attempt(index, candidate, true);
                Ok(false)
            }
            PredicateOutcome::Regressed => {
                self.trace.record_attempt(index, candidate, false);
                Ok(true)
            }
            PredicateOutcome::Aborted(error) => Err(error),
        }
    }

    /// Close a round of `batch_size` candidates; true when another round should run
    fn complete_round(&mut self, batch_size: usize, regressed: Option<A>) -> bool {
        self.attempts += batch_size;
        match regressed {
            None => false,
            Some(value) if self.mode.permits(self.attempts) => {
                self.current = value;
                self.shrink_steps += 1;
                true
            }
            // the policy stopped us mid-search; the value that entered this round stands
            Some(_) => {
                self.completed = false;
                false
            }
        }
    }

    fn finish(mut self, original: A, started: Instant) -> ShrinkResult<A> {
        self.trace.record_result(self.attempts, &self.current);
        ShrinkResult {
            original,
            minimal: self.current,
            attempts: self.attempts,
            shrink_steps: self.shrink_steps,
            mode: self.mode,
            shrink_duration: started.elapsed(),
            completed: self.completed,
            trace: self.trace,
        }
    }
}

/// Shrinking engine for synchronous predicates
pub struct ShrinkEngine {
    config: ShrinkConfig,
    sink: Arc<dyn TraceSink>,
}

impl ShrinkEngine {
    /// Create a new shrinking engine with default configuration
    pub fn new() -> Self {
        Self::with_config(ShrinkConfig::default())
    }

    /// Create a new shrinking engine with custom configuration
    pub fn with_config(config: ShrinkConfig) -> Self {
        Self {
            config,
            sink: Arc::new(StderrSink),
        }
    }

    /// Send finished traces to `sink` instead of standard error
    pub fn with_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &ShrinkConfig {
        &self.config
    }

    /// Shrink `initial`, which must already fail `predicate`
    ///
    /// Returns the smallest failing value found. Any predicate error other
    /// than a regression aborts the search and is returned unchanged, without
    /// emitting a trace.
    pub fn shrink<A, S, F>(
        &self,
        initial: A,
        source: &S,
        mut predicate: F,
    ) -> Result<ShrinkResult<A>, PredicateError>
    where
        A: Clone + Debug,
        S: Shrinker<A> + ?Sized,
        F: FnMut(&A) -> Result<(), PredicateError>,
    {
        let started = Instant::now();
        let mut search = Search::new(&initial, self.config.mode);
        let mut step = search.first_step(source);

        while !step.is_empty() {
            let mut regressed = None;
            for (offset, candidate) in step.candidates().iter().enumerate() {
                let outcome = PredicateOutcome::classify(predicate(candidate));
                if search.record(offset, candidate, outcome)? {
                    regressed = Some(candidate.clone());
                    break;
                }
            }

            if !search.complete_round(step.len(), regressed) {
                break;
            }
            step = step.next(&search.current);
        }

        let result = search.finish(initial, started);
        if self.config.print_steps {
            self.sink.emit(&result.trace);
        }
        Ok(result)
    }
}

impl Default for ShrinkEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shrinking engine for asynchronous predicates
///
/// The predicate future is the only suspension point. Dropping the search
/// future abandons the search: no trace is emitted and no value is returned.
pub struct AsyncShrinkEngine {
    config: ShrinkConfig,
    sink: Arc<dyn TraceSink>,
}

impl AsyncShrinkEngine {
    /// Create a new async shrinking engine with default configuration
    pub fn new() -> Self {
        Self::with_config(ShrinkConfig::default())
    }

    /// Create a new async shrinking engine with custom configuration
    pub fn with_config(config: ShrinkConfig) -> Self {
        Self {
            config,
            sink: Arc::new(StderrSink),
        }
    }

    /// Send finished traces to `sink` instead of standard error
    pub fn with_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &ShrinkConfig {
        &self.config
    }

    /// Shrink `initial` against an async predicate
    pub async fn shrink<A, S, F, Fut>(
        &self,
        initial: A,
        source: &S,
        mut predicate: F,
    ) -> Result<ShrinkResult<A>, PredicateError>
    where
        A: Clone + Debug,
        S: Shrinker<A> + ?Sized,
        F: FnMut(A) -> Fut,
        Fut: Future<Output = Result<(), PredicateError>>,
    {
        let started = Instant::now();
        let mut search = Search::new(&initial, self.config.mode);
        let mut step = search.first_step(source);

        while !step.is_empty() {
            let mut regressed = None;
            for (offset, candidate) in step.candidates().iter().enumerate() {
                let outcome = PredicateOutcome::classify(predicate(candidate.clone()).await);
                if search.record(offset, candidate, outcome)? {
                    regressed = Some(candidate.clone());
                    break;
                }
            }

            if !search.complete_round(step.len(), regressed) {
                break;
            }
            step = step.next(&search.current);
        }

        let result = search.finish(initial, started);
        if self.config.print_steps {
            self.sink.emit(&result.trace);
        }
        Ok(result)
    }
}

impl Default for AsyncShrinkEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shrink `initial` under `mode`, returning the minimal failing value
///
/// Whether the trace is printed is read from the global configuration at
/// call time.
pub fn shrink<A, S, F>(
    initial: A,
    source: &S,
    mode: ShrinkingMode,
    predicate: F,
) -> Result<A, PredicateError>
where
    A: Clone + Debug,
    S: Shrinker<A> + ?Sized,
    F: FnMut(&A) -> Result<(), PredicateError>,
{
    let config = ShrinkConfig::new(mode, get_global_config().print_shrink_steps);
    ShrinkEngine::with_config(config)
        .shrink(initial, source, predicate)
        .map(|result| result.minimal)
}

/// Async counterpart of [`shrink`]
pub async fn shrink_async<A, S, F, Fut>(
    initial: A,
    source: &S,
    mode: ShrinkingMode,
    predicate: F,
) -> Result<A, PredicateError>
where
    A: Clone + Debug,
    S: Shrinker<A> + ?Sized,
    F: FnMut(A) -> Fut,
    Fut: Future<Output = Result<(), PredicateError>>,
{
    let config = ShrinkConfig::new(mode, get_global_config().print_shrink_steps);
    AsyncShrinkEngine::with_config(config)
        .shrink(initial, source, predicate)
        .await
        .map(|result| result.minimal)
}
