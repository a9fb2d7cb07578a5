//! Command line parsing against a list of option descriptors.
//!
//! The clap command is built once per doit command at registration time,
//! so flag lookup is table driven. Parsing follows getopt conventions: once
//! the first positional token is seen, every following token is positional.

use super::params::ParamSet;
use super::spec::{OptionKind, OptionSpec, Value};
use crate::error::{DoitError, Result};
use anyhow::anyhow;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, value_parser};
use std::collections::BTreeSet;

/// Id of the catch-all positional argument.
const POSITIONAL: &str = "positional";

/// Result of parsing one command's argv.
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    pub params: ParamSet,
    pub positional: Vec<String>,
}

/// Parser for one command's combined option set.
#[derive(Debug, Clone)]
pub struct OptionParser {
    specs: Vec<OptionSpec>,
    command: clap::Command,
}

fn inverse_id(id: &str) -> String {
    format!("{}.inverse", id)
}

impl OptionParser {
    /// Build a parser, rejecting duplicate ids or flags.
    pub fn new(name: &'static str, specs: Vec<OptionSpec>) -> Result<Self> {
        check_unique(name, &specs)?;

        let mut command = clap::Command::new(name)
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true);

        for spec in &specs {
            let mut arg = Arg::new(spec.id()).long(spec.long()).help(spec.help());
            if let Some(short) = spec.short() {
                arg = arg.short(short);
            }
            arg = match spec.kind() {
                OptionKind::Bool => arg.action(ArgAction::SetTrue),
                OptionKind::String => arg
                    .action(ArgAction::Set)
                    .value_name("VALUE")
                    .value_parser(value_parser!(String)),
                OptionKind::Int => arg
                    .action(ArgAction::Set)
                    .value_name("NUM")
                    .value_parser(value_parser!(i64)),
                OptionKind::List => arg
                    .action(ArgAction::Append)
                    .value_name("VALUE")
                    .value_parser(value_parser!(String)),
            };
            if let Some(inverse) = spec.inverse() {
                let id = inverse_id(spec.id());
                arg = arg.overrides_with(id.clone());
                command = command.arg(
                    Arg::new(id)
                        .long(inverse)
                        .action(ArgAction::SetTrue)
                        .overrides_with(spec.id())
                        .help(format!("opposite of --{}", spec.long())),
                );
            }
            command = command.arg(arg);
        }

        command = command.arg(
            Arg::new(POSITIONAL)
                .value_name("ARGS")
                .action(ArgAction::Append)
                .num_args(1..)
                .trailing_var_arg(true)
                .value_parser(value_parser!(String))
                .hide(true),
        );

        Ok(Self { specs, command })
    }

    #[cfg(test)]
    pub(crate) fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    /// Fresh parameter set holding only hardcoded defaults.
    pub fn defaults(&self) -> ParamSet {
        ParamSet::from_defaults(&self.specs)
    }

    /// Parse `args` into explicit option values and positional arguments.
    pub fn parse(&self, args: &[String]) -> Result<ParsedArgs> {
        let matches = self
            .command
            .clone()
            .try_get_matches_from(args)
            .map_err(|err| DoitError::OptionParse(clap_message(&err)))?;

        let mut params = self.defaults();
        for spec in &self.specs {
            if let Some(value) = explicit_value(spec, &matches) {
                params.set_explicit(spec.id(), value);
            }
        }

        let positional = matches
            .get_many::<String>(POSITIONAL)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        Ok(ParsedArgs { params, positional })
    }

    /// Render clap's help for this option set.
    pub fn render_help(&self, usage: String, about: &str, description: Option<&str>) -> String {
        let mut command = self
            .command
            .clone()
            .override_usage(usage)
            .about(about.to_string());
        if let Some(description) = description {
            command = command.after_help(description.to_string());
        }
        command.render_help().to_string()
    }

    #[cfg(test)]
    pub(crate) fn clap_command(&self) -> &clap::Command {
        &self.command
    }
}

fn from_command_line(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Value supplied on the command line for `spec`, if any.
///
/// For a flag with an inverse, clap keeps only the later of the two
/// occurrences, so at most one of them is reported as present.
fn explicit_value(spec: &OptionSpec, matches: &ArgMatches) -> Option<Value> {
    let id = spec.id();
    match spec.kind() {
        OptionKind::Bool => {
            if from_command_line(matches, id) {
                Some(Value::Bool(true))
            } else if spec.inverse().is_some() && from_command_line(matches, &inverse_id(id)) {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        _ if !from_command_line(matches, id) => None,
        OptionKind::String => matches.get_one::<String>(id).cloned().map(Value::Str),
        OptionKind::Int => matches.get_one::<i64>(id).copied().map(Value::Int),
        OptionKind::List => matches
            .get_many::<String>(id)
            .map(|values| Value::List(values.cloned().collect())),
    }
}

/// First line of clap's error without its `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_string()
}

fn check_unique(command: &str, specs: &[OptionSpec]) -> Result<()> {
    let mut ids = BTreeSet::new();
    let mut longs = BTreeSet::new();
    let mut shorts = BTreeSet::new();

    for spec in specs {
        if !ids.insert(spec.id()) {
            return Err(DoitError::Internal(anyhow!(
                "command '{}' declares option id '{}' twice",
                command,
                spec.id()
            )));
        }
        for long in std::iter::once(spec.long()).chain(spec.inverse()) {
            if !longs.insert(long) {
                return Err(DoitError::Internal(anyhow!(
                    "command '{}' declares flag '--{}' twice",
                    command,
                    long
                )));
            }
        }
        if let Some(short) = spec.short() {
            if !shorts.insert(short) {
                return Err(DoitError::Internal(anyhow!(
                    "command '{}' declares flag '-{}' twice",
                    command,
                    short
                )));
            }
        }
    }
    Ok(())
}
