//! Task manifest model and loader contract.
//!
//! The manifest ("dodo file") enumerates tasks and may declare default
//! option values in its `config` block. How tasks are defined and executed
//! belongs to the loader and engine; this crate only needs task names,
//! a few descriptive fields, and the configuration.

mod yaml;


use crate::error::Result;
use crate::variables::Variables;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub use yaml::YamlLoader;

/// A unit of work declared in the manifest.
///
/// Unknown fields are preserved in `extra` for the engine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Task {
    pub name: String,
    pub doc: Option<String>,
    pub file_dep: Vec<String>,
    pub task_dep: Vec<String>,
    pub targets: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Private tasks start with `_` and are hidden from listings.
    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Sub-tasks are named `<basename>:<name>`.
    pub fn is_subtask(&self) -> bool {
        self.name.contains(':')
    }
}

/// Manifest-level configuration.
///
/// Keys other than `default_tasks` are option ids providing defaults that
/// sit between the hardcoded defaults and explicit command line values.
/// Values stay raw YAML until a command recognises the key, so settings
/// meant for other tools do not break loading.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    #[serde(alias = "defaultTasks")]
    pub default_tasks: Option<Vec<String>>,

    #[serde(flatten)]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

/// Loaded manifest: tasks in declaration order plus configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub tasks: Vec<Task>,
    pub config: ManifestConfig,
    /// Directory task paths are relative to.
    pub base_dir: PathBuf,
}

/// Everything the loader needs to locate and validate a manifest.
#[derive(Debug, Clone)]
pub struct LoadRequest<'a> {
    pub dodo_file: PathBuf,
    pub cwd: Option<PathBuf>,
    pub seek_file: bool,
    /// Registered command names; tasks may not reuse them.
    pub command_names: BTreeSet<&'a str>,
    pub variables: &'a Variables,
}

/// Source of task manifests.
pub trait ManifestLoader {
    /// Load the manifest described by `request`.
    ///
    /// Failures to find, read or validate it are
    /// [`DoitError::InvalidManifest`](crate::error::DoitError::InvalidManifest).
    fn load(&self, request: &LoadRequest<'_>) -> Result<Manifest>;
}
