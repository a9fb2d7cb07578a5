//! Executor contract between the commands and the task engine.
//!
//! Each command resolves its options and positional arguments into one of
//! the request structs below and hands it to the matching [`Engine`]
//! method. The engine's integer result becomes the process exit code
//! unchanged: 0 success, 1 a task failed, 2 an error while executing.

mod standalone;

use crate::error::Result;
use crate::manifest::Task;
use std::io::Write;
use std::path::PathBuf;

pub use standalone::StandaloneEngine;

/// Arguments of `doit run`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest<'a> {
    pub dep_file: PathBuf,
    pub tasks: &'a [Task],
    /// Directory the tasks execute in.
    pub base_dir: PathBuf,
    /// `None` writes to stdout.
    pub outfile: Option<PathBuf>,
    /// `None` selects every task.
    pub selected: Option<Vec<String>>,
    pub verbosity: Option<i64>,
    pub always_execute: bool,
    pub continue_on_failure: bool,
    pub reporter: String,
    pub num_process: i64,
}

/// Arguments of `doit list`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest<'a> {
    pub dep_file: PathBuf,
    pub tasks: &'a [Task],
    pub base_dir: PathBuf,
    pub selected: Vec<String>,
    pub include_subtasks: bool,
    pub print_doc: bool,
    pub print_status: bool,
    pub print_private: bool,
    pub print_dependencies: bool,
}

/// Arguments of `doit clean`.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRequest<'a> {
    pub tasks: &'a [Task],
    pub base_dir: PathBuf,
    pub dry_run: bool,
    pub clean_dep: bool,
    pub clean_all: bool,
    pub default_tasks: Option<Vec<String>>,
    pub selected: Vec<String>,
}

/// Arguments of `doit forget`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForgetRequest<'a> {
    pub dep_file: PathBuf,
    pub tasks: &'a [Task],
    pub base_dir: PathBuf,
    pub selected: Option<Vec<String>>,
}

/// Arguments of `doit ignore`.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnoreRequest<'a> {
    pub dep_file: PathBuf,
    pub tasks: &'a [Task],
    pub base_dir: PathBuf,
    pub selected: Vec<String>,
}

/// Arguments of `doit auto`.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoRequest<'a> {
    pub dep_file: PathBuf,
    pub tasks: &'a [Task],
    pub base_dir: PathBuf,
    pub selected: Option<Vec<String>>,
    pub verbosity: Option<i64>,
}

/// Task engine: one operation per command variant.
///
/// Implementations own scheduling, the dependency database and the file
/// watcher. They may return [`DoitError::InvalidTask`](crate::error::DoitError::InvalidTask)
/// when a selected name does not resolve; task failures are return codes.
pub trait Engine {
    fn run(&self, request: RunRequest<'_>, out: &mut dyn Write) -> Result<i32>;

    fn list(&self, request: ListRequest<'_>, out: &mut dyn Write) -> Result<i32>;

    fn clean(&self, request: CleanRequest<'_>, out: &mut dyn Write) -> Result<i32>;

    fn forget(&self, request: ForgetRequest<'_>, out: &mut dyn Write) -> Result<i32>;

    fn ignore(&self, request: IgnoreRequest<'_>, out: &mut dyn Write) -> Result<i32>;

    fn auto(&self, request: AutoRequest<'_>, out: &mut dyn Write) -> Result<i32>;
}
