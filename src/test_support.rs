//! Test doubles for the manifest loader and the task engine, plus a
//! harness running the dispatcher with captured output.

use crate::commands::CommandRegistry;
use crate::dispatch::Dispatcher;
use crate::engine::{
    AutoRequest, CleanRequest, Engine, ForgetRequest, IgnoreRequest, ListRequest, RunRequest,
};
use crate::error::{DoitError, Result};
use crate::manifest::{LoadRequest, Manifest, ManifestConfig, ManifestLoader, Task};
use crate::options::Value;
use crate::variables::Variables;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

pub(crate) fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    args(items)
}

/// YAML form of an option value, as it appears in a manifest `config` block.
pub(crate) fn yaml_value(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Int(n) => serde_yaml::Value::Number((*n).into()),
        Value::Str(s) => serde_yaml::Value::String(s.clone()),
        Value::List(items) => serde_yaml::Value::Sequence(
            items.iter().cloned().map(serde_yaml::Value::String).collect(),
        ),
    }
}

/// Manifest with the given task names, default tasks and option defaults.
pub(crate) fn manifest(
    tasks: &[&str],
    default_tasks: Option<&[&str]>,
    options: &[(&str, Value)],
) -> Manifest {
    Manifest {
        tasks: tasks.iter().map(|name| Task::new(*name)).collect(),
        config: ManifestConfig {
            default_tasks: default_tasks.map(strings),
            options: options
                .iter()
                .map(|(k, v)| (k.to_string(), yaml_value(v)))
                .collect(),
        },
        base_dir: PathBuf::from("."),
    }
}

/// Owned copy of a [`LoadRequest`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedLoad {
    pub dodo_file: PathBuf,
    pub cwd: Option<PathBuf>,
    pub seek_file: bool,
    pub command_names: Vec<String>,
    pub variables: Variables,
}

pub(crate) struct FakeLoader {
    manifest: Manifest,
    error: Option<String>,
    pub loads: RefCell<Vec<RecordedLoad>>,
}

impl FakeLoader {
    pub(crate) fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            error: None,
            loads: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            manifest: Manifest::default(),
            error: Some(message.to_string()),
            loads: RefCell::new(Vec::new()),
        }
    }
}

impl ManifestLoader for FakeLoader {
    fn load(&self, request: &LoadRequest<'_>) -> Result<Manifest> {
        self.loads.borrow_mut().push(RecordedLoad {
            dodo_file: request.dodo_file.clone(),
            cwd: request.cwd.clone(),
            seek_file: request.seek_file,
            command_names: request.command_names.iter().map(|s| s.to_string()).collect(),
            variables: request.variables.clone(),
        });
        if let Some(message) = &self.error {
            return Err(DoitError::InvalidManifest(message.clone()));
        }
        let mut manifest = self.manifest.clone();
        if let Some(cwd) = &request.cwd {
            manifest.base_dir = cwd.clone();
        }
        Ok(manifest)
    }
}

/// Owned summary of one engine call.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EngineCall {
    pub command: &'static str,
    pub dep_file: Option<PathBuf>,
    pub base_dir: PathBuf,
    pub task_names: Vec<String>,
    pub selected: Option<Vec<String>>,
    pub default_tasks: Option<Vec<String>>,
    pub outfile: Option<PathBuf>,
    pub verbosity: Option<i64>,
    pub reporter: Option<String>,
    pub num_process: Option<i64>,
    pub flags: BTreeMap<&'static str, bool>,
}

fn names(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|t| t.name.clone()).collect()
}

/// What the recording engine does after recording a call.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Behavior {
    Return(i32),
    InvalidTask,
    Panic,
}

pub(crate) struct RecordingEngine {
    behavior: Behavior,
    pub calls: RefCell<Vec<EngineCall>>,
}

impl RecordingEngine {
    pub(crate) fn returning(code: i32) -> Self {
        Self::with(Behavior::Return(code))
    }

    pub(crate) fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn last_call(&self) -> EngineCall {
        self.calls
            .borrow()
            .last()
            .cloned()
            .expect("engine was not called")
    }

    fn record(&self, call: EngineCall, out: &mut dyn Write) -> Result<i32> {
        writeln!(out, "engine:{}", call.command).map_err(|e| DoitError::Internal(e.into()))?;
        self.calls.borrow_mut().push(call);
        match self.behavior {
            Behavior::Return(code) => Ok(code),
            Behavior::InvalidTask => Err(DoitError::InvalidTask(
                "\"nope\" must be a sub-command or a task".to_string(),
            )),
            Behavior::Panic => panic!("engine exploded"),
        }
    }
}

impl Engine for RecordingEngine {
    fn run(&self, request: RunRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        let mut flags = BTreeMap::new();
        flags.insert("always", request.always_execute);
        flags.insert("continue", request.continue_on_failure);
        self.record(
            EngineCall {
                command: "run",
                dep_file: Some(request.dep_file),
                base_dir: request.base_dir,
                task_names: names(request.tasks),
                selected: request.selected,
                outfile: request.outfile,
                verbosity: request.verbosity,
                reporter: Some(request.reporter),
                num_process: Some(request.num_process),
                flags,
                ..EngineCall::default()
            },
            out,
        )
    }

    fn list(&self, request: ListRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        let mut flags = BTreeMap::new();
        flags.insert("all", request.include_subtasks);
        flags.insert("print_doc", request.print_doc);
        flags.insert("status", request.print_status);
        flags.insert("private", request.print_private);
        flags.insert("list_deps", request.print_dependencies);
        self.record(
            EngineCall {
                command: "list",
                dep_file: Some(request.dep_file),
                base_dir: request.base_dir,
                task_names: names(request.tasks),
                selected: Some(request.selected),
                flags,
                ..EngineCall::default()
            },
            out,
        )
    }

    fn clean(&self, request: CleanRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        let mut flags = BTreeMap::new();
        flags.insert("dryrun", request.dry_run);
        flags.insert("cleandep", request.clean_dep);
        flags.insert("cleanall", request.clean_all);
        self.record(
            EngineCall {
                command: "clean",
                base_dir: request.base_dir,
                task_names: names(request.tasks),
                selected: Some(request.selected),
                default_tasks: request.default_tasks,
                flags,
                ..EngineCall::default()
            },
            out,
        )
    }

    fn forget(&self, request: ForgetRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.record(
            EngineCall {
                command: "forget",
                dep_file: Some(request.dep_file),
                base_dir: request.base_dir,
                task_names: names(request.tasks),
                selected: request.selected,
                ..EngineCall::default()
            },
            out,
        )
    }

    fn ignore(&self, request: IgnoreRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.record(
            EngineCall {
                command: "ignore",
                dep_file: Some(request.dep_file),
                base_dir: request.base_dir,
                task_names: names(request.tasks),
                selected: Some(request.selected),
                ..EngineCall::default()
            },
            out,
        )
    }

    fn auto(&self, request: AutoRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.record(
            EngineCall {
                command: "auto",
                dep_file: Some(request.dep_file),
                base_dir: request.base_dir,
                task_names: names(request.tasks),
                selected: request.selected,
                verbosity: request.verbosity,
                ..EngineCall::default()
            },
            out,
        )
    }
}

/// Captured result of one dispatch.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub(crate) fn dispatch(
    registry: &CommandRegistry,
    loader: &FakeLoader,
    engine: &RecordingEngine,
    argv: &[&str],
) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = Dispatcher::new(registry, loader, engine).run(&args(argv), &mut stdout, &mut stderr);
    Outcome {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}
