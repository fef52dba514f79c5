//! Shrink trace assembly and the sinks it is flushed to.

use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex};

/// Line-by-line record of one shrink search
///
/// Lines look like `Shrink #3: "abc" fail`, followed by a single result line,
/// either `Shrink result => <value>` or
/// `Shrink result (after <n> shrinks) => <value>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct ShrinkTrace {
    lines: Vec<String>,
    finished: bool,
}

impl ShrinkTrace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that candidate number `index` was tried
    pub fn record_attempt<A: Debug>(&mut self, index: usize, candidate: &A, passed: bool) {
        let verdict = if passed { "pass" } else { "fail" };
        self.lines
            .push(format!("Shrink #{}: {:?} {}", index, candidate, verdict));
    }

    /// Append the final result line
    pub fn record_result<A: Debug>(&mut self, attempts: usize, value: &A) {
        let line = match attempts {
            0 => format!("Shrink result => {:?}", value),
            n => format!("Shrink result (after {} shrinks) => {:?}", n, value),
        };
        self.lines.push(line);
        self.finished = true;
    }

    /// All lines recorded so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of candidate lines (the result line is not counted)
    pub fn attempts_recorded(&self) -> usize {
        self.lines.len() - usize::from(self.finished)
    }

    /// Whether the result line has been written
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The result line, once the search has finished
    pub fn result_line(&self) -> Option<&str> {
        if self.finished {
            self.lines.last().map(String::as_str)
        } else {
            None
        }
    }
}

impl fmt::Display for ShrinkTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Destination for finished shrink traces
pub trait TraceSink: Send + Sync {
    /// Write a completed trace
    fn emit(&self, trace: &ShrinkTrace);
}

/// Writes traces to standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl TraceSink for StderrSink {
    fn emit(&self, trace: &ShrinkTrace) {
        eprint!("{}", trace);
    }
}

/// Keeps emitted traces in memory, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    traces: Arc<Mutex<Vec<ShrinkTrace>>>,
}

impl MemorySink {
    /// Create an empty in-memory sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Every trace emitted so far
    pub fn traces(&self) -> Vec<ShrinkTrace> {
        self.traces
            .lock()
            .map(|traces| traces.clone())
            .unwrap_or_default()
    }

    /// Lines of every emitted trace, concatenated
    pub fn lines(&self) -> Vec<String> {
        self.traces()
            .iter()
            .flat_map(|trace| trace.lines().iter().cloned())
            .collect()
    }

    /// Number of traces emitted
    pub fn emitted(&self) -> usize {
        self.traces.lock().map(|traces| traces.len()).unwrap_or(0)
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, trace: &ShrinkTrace) {
        if let Ok(mut traces) = self.traces.lock() {
            traces.push(trace.clone());
        }
    }
}
