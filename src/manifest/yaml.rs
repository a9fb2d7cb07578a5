//! YAML manifest loader.
//!
//! Reads a manifest of the form:
//!
//! ```yaml
//! config:
//!   default_tasks: [build]
//!   verbosity: 2
//! tasks:
//!   - name: build
//!     doc: compile everything
//!     file_dep: [src/main.c]
//!     targets: [main.o]
//! ```
//!
//! `${NAME}` references inside string values are replaced by command line
//! variables once the document is parsed. Substituted text is taken
//! literally: it is neither parsed as YAML nor expanded again.

use super::{LoadRequest, Manifest, ManifestConfig, ManifestLoader, Task};
use crate::error::{DoitError, Result};
use crate::variables::Variables;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManifestFile {
    config: ManifestConfig,
    tasks: Vec<Task>,
}

/// Loads manifests from YAML files, resolving relative paths against
/// `base_dir` (normally the process working directory).
#[derive(Debug, Clone)]
pub struct YamlLoader {
    base_dir: PathBuf,
}

impl YamlLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the manifest path, optionally searching parent directories.
    fn locate(&self, dodo_file: &Path, seek_file: bool) -> Result<PathBuf> {
        if seek_file {
            let found = self
                .base_dir
                .ancestors()
                .map(|dir| dir.join(dodo_file))
                .find(|candidate| candidate.is_file());
            return found.ok_or_else(|| {
                DoitError::InvalidManifest(format!(
                    "file '{}' not found on path '{}' or any parent folder",
                    dodo_file.display(),
                    self.base_dir.display()
                ))
            });
        }

        let path = self.base_dir.join(dodo_file);
        if !path.is_file() {
            return Err(DoitError::InvalidManifest(format!(
                "file '{}' does not exist",
                path.display()
            )));
        }
        Ok(path)
    }

    fn base_dir_for(&self, manifest_path: &Path, cwd: Option<&Path>) -> Result<PathBuf> {
        match cwd {
            Some(cwd) => {
                let dir = self.base_dir.join(cwd);
                if !dir.is_dir() {
                    return Err(DoitError::InvalidManifest(format!(
                        "working directory '{}' does not exist",
                        dir.display()
                    )));
                }
                Ok(dir)
            }
            None => Ok(manifest_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.base_dir.clone())),
        }
    }
}

impl ManifestLoader for YamlLoader {
    fn load(&self, request: &LoadRequest<'_>) -> Result<Manifest> {
        let path = self.locate(&request.dodo_file, request.seek_file)?;
        debug!(path = %path.display(), "loading manifest");

        let content = std::fs::read_to_string(&path).map_err(|e| {
            DoitError::InvalidManifest(format!("failed to read '{}': {}", path.display(), e))
        })?;

        let parse_error = |e: serde_yaml::Error| {
            DoitError::InvalidManifest(format!("failed to parse '{}': {}", path.display(), e))
        };
        let mut document: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(parse_error)?;
        substitute_variables(&mut document, request.variables);
        let file = if document.is_null() {
            ManifestFile::default()
        } else {
            serde_yaml::from_value::<ManifestFile>(document).map_err(parse_error)?
        };

        validate_tasks(&path, &file.tasks, &request.command_names)?;

        let base_dir = self.base_dir_for(&path, request.cwd.as_deref())?;
        debug!(tasks = file.tasks.len(), base_dir = %base_dir.display(), "manifest loaded");

        Ok(Manifest {
            tasks: file.tasks,
            config: file.config,
            base_dir,
        })
    }
}

fn validate_tasks(path: &Path, tasks: &[Task], command_names: &BTreeSet<&str>) -> Result<()> {
    if tasks.is_empty() {
        return Err(DoitError::InvalidManifest(format!(
            "no tasks declared in '{}'",
            path.display()
        )));
    }

    let mut seen = BTreeSet::new();
    for task in tasks {
        if task.name.is_empty() {
            return Err(DoitError::InvalidManifest(format!(
                "task without a name in '{}'",
                path.display()
            )));
        }
        if command_names.contains(task.name.as_str()) {
            return Err(DoitError::InvalidManifest(format!(
                "Task can not be called '{}' because it is a doit command",
                task.name
            )));
        }
        if !seen.insert(task.name.as_str()) {
            return Err(DoitError::InvalidManifest(format!(
                "Task names must be unique. '{}' is declared twice",
                task.name
            )));
        }
    }
    Ok(())
}

/// Replace `${NAME}` in every string value of `document`.
fn substitute_variables(document: &mut serde_yaml::Value, variables: &Variables) {
    if variables.is_empty() {
        return;
    }
    match document {
        serde_yaml::Value::String(text) => *text = expand(text, variables),
        serde_yaml::Value::Sequence(items) => {
            for item in items {
                substitute_variables(item, variables);
            }
        }
        serde_yaml::Value::Mapping(map) => {
            for value in map.values_mut() {
                substitute_variables(value, variables);
            }
        }
        serde_yaml::Value::Tagged(tagged) => substitute_variables(&mut tagged.value, variables),
        _ => {}
    }
}

/// Single left-to-right pass; unknown references are left untouched.
fn expand(text: &str, variables: &Variables) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            rest = &rest[start..];
            break;
        };
        let name = &after[..end];
        match variables.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 3]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
