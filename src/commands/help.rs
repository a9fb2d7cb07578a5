//! Implementation of the `doit help` command and the general usage text.

use super::{CommandDoc, CommandRegistry, DoitCommand, Invocation};
use crate::error::Result;
use crate::exit_codes;
use crate::options::ParamSet;
use anyhow::Context;
use std::fmt::Write as _;

/// Reference for the fields of a manifest task entry, shown by `doit help task`.
pub const HELP_TASK: &str = r#"
Task manifest fields
--------------------

Tasks are listed under the ``tasks`` key of the manifest. Each entry is a
mapping describing the task with the following fields:

name [required]:
  - type: string. task identifier, must not be a doit command name.
    sub-tasks are named ``<basename>:<name>``.

actions:
  - type: list of strings (each item is a different command). executed by shell.
  - absent: group task, only used to bundle dependencies.

doc:
  - type: string -> the description text

file_dep:
  - type: list. items:
    * file (string) path relative to the manifest

task_dep:
  - type: list. items:
    * task name (string)

targets:
  - type: list of strings
  - each item is file-path relative to the manifest (accepts both files and folders)

setup:
  - type: list. items:
    * task name (string)

teardown:
  - type: list of actions (see above)

clean:
  - type: (true) remove target files
  - type: list of actions (see above)

params:
  - type: list of mappings containing:
    - name [required] (string) parameter identifier
    - default [required] default value for parameter
    - short [optional] (string - 1 letter) short option string
    - long [optional] (string) long option string
    - type [optional] the option will be converted to this type

verbosity:
  - type: int
    -  0: capture (do not print) stdout/stderr from task.
    -  1: (default) capture stdout only.
    -  2: do not capture anything (print everything immediately).

Manifest configuration
----------------------

The optional ``config`` mapping sets defaults for command options, keyed by
option id (e.g. ``verbosity: 2``, ``continue: true``, ``dep_file: .cache.db``),
and ``default_tasks``: the list of tasks used when none is given.
Values given on the command line always take precedence.

${NAME} in the manifest is replaced by the value of a command line
variable given as NAME=value.
"#;

/// Show help for doit, a command, or the manifest format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Help;

impl DoitCommand for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn doc(&self) -> CommandDoc {
        CommandDoc {
            purpose: "show help",
            usage: "[COMMAND | task]",
            description: None,
        }
    }

    fn reads_manifest(&self) -> bool {
        false
    }

    fn execute(&self, _params: ParamSet, args: &[String], ctx: &mut Invocation<'_>) -> Result<i32> {
        let text = match args {
            [topic] => match ctx.registry.get(topic) {
                Some(command) => command.help(),
                None if topic == "task" => HELP_TASK.to_string(),
                None => usage(ctx.registry),
            },
            _ => usage(ctx.registry),
        };
        write!(ctx.out, "{}", text).context("failed to write help")?;
        Ok(exit_codes::SUCCESS)
    }
}

/// General usage text, listing every registered command.
pub fn usage(registry: &CommandRegistry) -> String {
    let mut text = String::from("\ndoit -- automation tool\n\nCommands:\n");
    for command in registry.iter().filter(|c| c.name() != "help") {
        let name = if command.name() == super::DEFAULT_COMMAND {
            format!("[{}]", command.name())
        } else {
            command.name().to_string()
        };
        let _ = writeln!(text, " doit {:<18}{}", name, command.doc().purpose);
    }
    text.push('\n');
    for (invocation, purpose) in [
        ("help", "show help / reference"),
        ("help task", "show help on task manifest fields"),
        ("help <command>", "show command usage"),
    ] {
        let _ = writeln!(text, " doit {:<18}{}", invocation, purpose);
    }
    text
}

/// Version text: version number and location of the executable.
pub fn version() -> String {
    let location = std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());
    format!("{}\nbin @ {}\n", env!("CARGO_PKG_VERSION"), location)
}
