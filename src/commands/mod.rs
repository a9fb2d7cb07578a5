//! Command implementations for doit.
//!
//! Every sub-command implements [`DoitCommand`]. Commands are registered
//! once in a [`CommandRegistry`], which compiles each command's options
//! into a parser and is then passed explicitly to the dispatcher and to any
//! command that needs to enumerate its peers (`help`).

mod auto;
mod clean;
mod forget;
mod help;
mod ignore;
mod list;
mod run;


use crate::engine::Engine;
use crate::error::{DoitError, Result};
use crate::manifest::{LoadRequest, ManifestConfig, ManifestLoader, Task};
use crate::options::{OptionParser, OptionSpec, ParamSet, catalog};
use crate::variables::Variables;
use anyhow::anyhow;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub use auto::Auto;
pub use clean::Clean;
pub use forget::Forget;
pub use help::{Help, usage, version};
pub use ignore::Ignore;
pub use list::List;
pub use run::Run;

/// Name of the command used when argv does not start with one.
pub const DEFAULT_COMMAND: &str = "run";

/// Documentation strings of a command.
#[derive(Debug, Clone, Copy)]
pub struct CommandDoc {
    pub purpose: &'static str,
    pub usage: &'static str,
    pub description: Option<&'static str>,
}

/// Collaborators and per-call state handed to a command.
pub struct Invocation<'a> {
    pub registry: &'a CommandRegistry,
    pub variables: &'a Variables,
    pub loader: &'a dyn ManifestLoader,
    pub engine: &'a dyn Engine,
    pub out: &'a mut dyn Write,
}

/// A doit sub-command.
pub trait DoitCommand {
    /// Lowercase name used on the command line.
    fn name(&self) -> &'static str;

    fn doc(&self) -> CommandDoc;

    /// Options specific to this command.
    fn cmd_options(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    /// Whether the command loads the manifest and accepts [`base_options`].
    fn reads_manifest(&self) -> bool {
        true
    }

    /// Run the command with resolved options and positional arguments.
    fn execute(&self, params: ParamSet, args: &[String], ctx: &mut Invocation<'_>) -> Result<i32>;
}

/// Options shared by every command that reads the manifest.
pub fn base_options() -> Vec<OptionSpec> {
    vec![
        catalog::dodo_file(),
        catalog::cwd_path(),
        catalog::seek_file(),
        catalog::dep_file(),
    ]
}

/// Manifest state of one invocation, as seen by a command.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub tasks: Vec<Task>,
    pub config: ManifestConfig,
    /// Working directory resolved by the loader (`-d` or the manifest's).
    pub base_dir: PathBuf,
    /// Positional arguments if any were given, else the manifest's
    /// default tasks. `None` means "every task".
    pub selected: Option<Vec<String>>,
}

/// Load the manifest and merge its declared option defaults into `params`.
///
/// Only options not given on the command line take the manifest value.
pub fn read_dodo(
    params: &mut ParamSet,
    args: &[String],
    ctx: &Invocation<'_>,
) -> Result<LoadedManifest> {
    let request = LoadRequest {
        dodo_file: params
            .path("dodoFile")?
            .unwrap_or_else(|| PathBuf::from(catalog::DEFAULT_DODO_FILE)),
        cwd: params.path("cwdPath")?,
        seek_file: params.flag("seek_file")?,
        command_names: ctx.registry.names().collect(),
        variables: ctx.variables,
    };

    let manifest = ctx.loader.load(&request)?;
    params.update_defaults(&manifest.config.options)?;

    let selected = if args.is_empty() {
        manifest.config.default_tasks.clone()
    } else {
        Some(args.to_vec())
    };
    debug!(tasks = manifest.tasks.len(), ?selected, "manifest read");

    Ok(LoadedManifest {
        tasks: manifest.tasks,
        config: manifest.config,
        base_dir: manifest.base_dir,
        selected,
    })
}

/// Resolve the dependency database path.
pub(crate) fn dep_file(params: &ParamSet) -> Result<PathBuf> {
    Ok(params
        .path("dep_file")?
        .unwrap_or_else(|| PathBuf::from(catalog::DEFAULT_DEP_FILE)))
}

/// A registered command with its compiled option parser.
pub struct RegisteredCommand {
    command: Box<dyn DoitCommand>,
    parser: OptionParser,
}

impl RegisteredCommand {
    pub fn name(&self) -> &'static str {
        self.command.name()
    }

    pub fn doc(&self) -> CommandDoc {
        self.command.doc()
    }

    /// Formatted help for this command.
    pub fn help(&self) -> String {
        let doc = self.command.doc();
        let usage = format!("doit {} [options] {}", self.name(), doc.usage);
        self.parser
            .render_help(usage.trim_end().to_string(), doc.purpose, doc.description)
    }

    /// Parse `args` against this command's options and execute it.
    pub fn parse_execute(&self, args: &[String], ctx: &mut Invocation<'_>) -> Result<i32> {
        let parsed = self.parser.parse(args)?;
        debug!(command = self.name(), args = ?parsed.positional, "executing command");
        self.command.execute(parsed.params, &parsed.positional, ctx)
    }

    #[cfg(test)]
    pub(crate) fn parser(&self) -> &OptionParser {
        &self.parser
    }
}

/// Name to command mapping, in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(Help))?;
        registry.register(Box::new(Run))?;
        registry.register(Box::new(List))?;
        registry.register(Box::new(Clean))?;
        registry.register(Box::new(Forget))?;
        registry.register(Box::new(Ignore))?;
        registry.register(Box::new(Auto))?;
        Ok(registry)
    }

    /// Add a command, compiling its base and own options into a parser.
    pub fn register(&mut self, command: Box<dyn DoitCommand>) -> Result<()> {
        let name = command.name();
        if self.contains(name) {
            return Err(DoitError::Internal(anyhow!(
                "command '{}' is registered twice",
                name
            )));
        }

        let mut specs = if command.reads_manifest() {
            base_options()
        } else {
            Vec::new()
        };
        specs.extend(command.cmd_options());
        let parser = OptionParser::new(name, specs)?;

        self.commands.push(RegisteredCommand { command, parser });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.iter().find(|c| c.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.iter()
    }
}
