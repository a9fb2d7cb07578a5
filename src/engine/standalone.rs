//! Engine used by the `doit` binary when no task engine is linked.
//!
//! Listing only needs the manifest, so `list` is fully served here. The
//! executing commands report that execution is unavailable and return
//! [`exit_codes::TASK_ERROR`].

use super::{
    AutoRequest, CleanRequest, Engine, ForgetRequest, IgnoreRequest, ListRequest, RunRequest,
};
use crate::error::{DoitError, Result};
use crate::exit_codes;
use crate::manifest::Task;
use anyhow::Context;
use std::io::Write;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandaloneEngine;

impl StandaloneEngine {
    fn unavailable(&self, command: &str, out: &mut dyn Write) -> Result<i32> {
        error!(command, "no task engine available");
        writeln!(
            out,
            "doit {}: no task engine is linked into this build, nothing was executed",
            command
        )
        .context("failed to write output")?;
        Ok(exit_codes::TASK_ERROR)
    }
}

fn select_for_listing<'a>(request: &ListRequest<'a>) -> Result<Vec<&'a Task>> {
    if !request.selected.is_empty() {
        return request
            .selected
            .iter()
            .map(|name| {
                request
                    .tasks
                    .iter()
                    .find(|task| &task.name == name)
                    .ok_or_else(|| DoitError::InvalidTask(format!("\"{}\" is not a task", name)))
            })
            .collect();
    }

    Ok(request
        .tasks
        .iter()
        .filter(|task| request.include_subtasks || !task.is_subtask())
        .filter(|task| request.print_private || !task.is_private())
        .collect())
}

impl Engine for StandaloneEngine {
    fn run(&self, _request: RunRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.unavailable("run", out)
    }

    fn list(&self, request: ListRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        if request.print_status {
            warn!("task status needs the dependency database; printing names only");
        }

        let mut tasks = select_for_listing(&request)?;
        tasks.sort_by(|a, b| a.name.cmp(&b.name));
        let width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(0) + 3;

        for task in tasks {
            let doc = task
                .doc
                .as_deref()
                .and_then(|doc| doc.lines().next())
                .filter(|_| request.print_doc)
                .unwrap_or("");
            let line = format!("{:<width$}{}", task.name, doc, width = width);
            writeln!(out, "{}", line.trim_end()).context("failed to write task list")?;

            if request.print_dependencies {
                let mut deps: Vec<_> = task.file_dep.iter().collect();
                deps.sort();
                for dep in deps {
                    writeln!(out, " -  {}", dep).context("failed to write task list")?;
                }
            }
        }
        Ok(exit_codes::SUCCESS)
    }

    fn clean(&self, _request: CleanRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.unavailable("clean", out)
    }

    fn forget(&self, _request: ForgetRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.unavailable("forget", out)
    }

    fn ignore(&self, _request: IgnoreRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.unavailable("ignore", out)
    }

    fn auto(&self, _request: AutoRequest<'_>, out: &mut dyn Write) -> Result<i32> {
        self.unavailable("auto", out)
    }
}
