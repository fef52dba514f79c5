//! Serializable shrink reports and on-disk storage for them
//!
//! Reports keep the `Debug` rendering of the original and minimal values, the
//! counters of the search and the full trace, so a failure can be inspected
//! after the test process has exited.
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::ShrinkingMode;
use crate::shrink::ShrinkResult;

/// Snapshot of one finished shrink search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShrinkReport {
    /// `Debug` rendering of the initial failing value
    pub original: String,

    /// `Debug` rendering of the minimal failing value
    pub minimal: String,

    /// Mode the search ran under
    pub mode: ShrinkingMode,

    /// Candidates attempted
    pub attempts: usize,

    /// Regressions accepted
    pub shrink_steps: usize,

    /// Whether the search ran to a fixed point
    pub completed: bool,

    /// Time spent shrinking, in milliseconds
    pub duration_ms: u64,

    /// Trace lines, including the result line
    pub trace: Vec<String>,

    /// When the report was created
    pub timestamp: SystemTime,
}

impl ShrinkReport {
    /// Build a report from a finished search
    pub fn from_result<A: Debug>(result: &ShrinkResult<A>) -> Self {
        Self {
            original: format!("{:?}", result.original),
            minimal: format!("{:?}", result.minimal),
            mode: result.mode,
            attempts: result.attempts,
            shrink_steps: result.shrink_steps,
            completed: result.completed,
            duration_ms: u64::try_from(result.shrink_duration.as_millis()).unwrap_or(u64::MAX),
            trace: result.trace.lines().to_vec(),
            timestamp: SystemTime::now(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a report from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Directory of shrink reports, one subdirectory per test
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    /// Open (and create if needed) a report store at the given directory
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let root_dir = path.as_ref().to_path_buf();
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Save a report for a specific test, returning the written path
    ///
    /// Existing files are never overwritten, including ones that no longer parse.
    pub fn save(&self, test_name: &str, report: &ShrinkReport) -> io::Result<PathBuf> {
        let test_dir = self.root_dir.join(test_name);
        fs::create_dir_all(&test_dir)?;

        let index = Self::next_index(&test_dir)?;
        let path = test_dir.join(format!("shrink_{:04}.json", index));

        let json = report
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(json.as_bytes())?;

        Ok(path)
    }

    /// One past the highest `shrink_NNNN.json` index on disk
    fn next_index(test_dir: &Path) -> io::Result<usize> {
        let mut next = 0;
        for entry in fs::read_dir(test_dir)? {
            let name = entry?.file_name();
            let index = name
                .to_str()
                .and_then(|name| name.strip_prefix("shrink_"))
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|digits| digits.parse::<usize>().ok());
            if let Some(index) = index {
                next = next.max(index + 1);
            }
        }
        Ok(next)
    }

    /// Load every report saved for a test, ordered by file name
    pub fn load(&self, test_name: &str) -> io::Result<Vec<ShrinkReport>> {
        let test_dir = self.root_dir.join(test_name);

        if !test_dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&test_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut reports = Vec::new();
        for path in paths {
            let mut contents = String::new();
            File::open(&path)?.read_to_string(&mut contents)?;

            // unreadable files are skipped, not fatal
            if let Ok(report) = ShrinkReport::from_json(&contents) {
                reports.push(report);
            }
        }

        Ok(reports)
    }

    /// Remove all reports for a test
    pub fn clear(&self, test_name: &str) -> io::Result<()> {
        let test_dir = self.root_dir.join(test_name);
        if test_dir.exists() {
            fs::remove_dir_all(&test_dir)?;
        }
        Ok(())
    }
}

impl<A: Debug> ShrinkResult<A> {
    /// Serializable report of this result
    pub fn report(&self) -> ShrinkReport {
        ShrinkReport::from_result(self)
    }
}
