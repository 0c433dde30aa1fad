//! Dependency listers: the edge function of the closure graph.
//!
//! Provides two backends:
//! - OtoolLister: Runs the system inspection tool as a subprocess
//! - MemoryLister: Serves edges from an in-memory map

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{ClosureError, ClosureResult};
use crate::otool;

/// Source of direct dependencies for a single path.
pub trait DependencyLister {
    /// Lists every library `path` references.
    ///
    /// An empty list means "no further dependencies", including when the
    /// backend ran but had nothing to report. `Err` is reserved for failures
    /// that make any further lookup pointless.
    fn list(&self, path: &str) -> ClosureResult<Vec<String>>;
}

impl<L: DependencyLister + ?Sized> DependencyLister for &L {
    fn list(&self, path: &str) -> ClosureResult<Vec<String>> {
        (**self).list(path)
    }
}

impl<L: DependencyLister + ?Sized> DependencyLister for Box<L> {
    fn list(&self, path: &str) -> ClosureResult<Vec<String>> {
        (**self).list(path)
    }
}

/// Invocation settings for the inspection tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtoolConfig {
    /// Executable to run
    pub program: PathBuf,
    /// Flag asking for the linked-library listing
    pub list_flag: String,
}

impl OtoolConfig {
    pub const DEFAULT_PROGRAM: &'static str = "/usr/bin/otool";
    pub const DEFAULT_LIST_FLAG: &'static str = "-L";

    /// Create a config with the given program and flag.
    pub fn new(program: impl Into<PathBuf>, list_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            list_flag: list_flag.into(),
        }
    }

    /// Renders the command run for `path`, for diagnostics.
    pub fn command_line(&self, path: &str) -> String {
        format!("{} {} {}", self.program.display(), self.list_flag, path)
    }
}

impl Default for OtoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM, Self::DEFAULT_LIST_FLAG)
    }
}

/// Lists dependencies by running `otool -L <path>`.
#[derive(Debug, Clone, Default)]
pub struct OtoolLister {
    config: OtoolConfig,
}

impl OtoolLister {
    pub fn new(config: OtoolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OtoolConfig {
        &self.config
    }
}

impl DependencyLister for OtoolLister {
    fn list(&self, path: &str) -> ClosureResult<Vec<String>> {
        debug!(command = %self.config.command_line(path), "running inspection tool");

        let output = Command::new(&self.config.program)
            .arg(&self.config.list_flag)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ClosureError::ToolLaunch {
                program: self.config.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                path,
                status = %output.status,
                stderr = stderr.trim(),
                "inspection tool failed, treating as no dependencies"
            );
            return Ok(Vec::new());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(otool::parse_listing(&stdout))
    }
}

/// In-memory dependency graph.
///
/// Unknown paths have no dependencies. Every query is recorded so callers can
/// check how often each path was expanded.
#[derive(Debug, Default)]
pub struct MemoryLister {
    edges: HashMap<String, Vec<String>>,
    unlaunchable: HashSet<String>,
    queries: RefCell<Vec<String>>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_edges<I, S>(mut self, path: &str, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(path, deps);
        self
    }

    /// Sets the direct dependencies of `path`, replacing any previous entry.
    pub fn insert<I, S>(&mut self, path: &str, deps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edges
            .insert(path.to_string(), deps.into_iter().map(Into::into).collect());
    }

    /// Makes lookups of `path` fail as if the tool could not be launched.
    pub fn fail_launch(mut self, path: &str) -> Self {
        self.unlaunchable.insert(path.to_string());
        self
    }

    /// Paths queried so far, in query order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl DependencyLister for MemoryLister {
    fn list(&self, path: &str) -> ClosureResult<Vec<String>> {
        self.queries.borrow_mut().push(path.to_string());

        if self.unlaunchable.contains(path) {
            return Err(ClosureError::ToolLaunch {
                program: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::NotFound, "simulated launch failure"),
            });
        }

        Ok(self.edges.get(path).cloned().unwrap_or_default())
    }
}
