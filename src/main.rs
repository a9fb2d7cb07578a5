//! doit: command line driver of the doit task automation tool.
//!
//! This is the main entry point for the `doit` CLI. It wires the built-in
//! commands to a manifest loader and a task engine, dispatches argv, and
//! turns the outcome into the process exit code.

mod commands;
mod dispatch;
pub mod engine;
pub mod error;
pub mod exit_codes;
mod logging;
pub mod manifest;
pub mod options;
pub mod variables;

#[cfg(test)]
mod test_support;

use commands::CommandRegistry;
use dispatch::Dispatcher;
use engine::StandaloneEngine;
use manifest::YamlLoader;
use std::io;
use std::process::ExitCode;

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn main() -> ExitCode {
    logging::init();

    let argv: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let setup = CommandRegistry::builtin().and_then(|registry| {
        let cwd = std::env::current_dir()
            .map_err(|e| anyhow::anyhow!(e).context("failed to get current working directory"))?;
        Ok((registry, cwd))
    });
    let (registry, cwd) = match setup {
        Ok(setup) => setup,
        Err(err) => {
            eprint!("{}", err.render());
            return exit_code(err.exit_code());
        }
    };

    let loader = YamlLoader::new(cwd);
    let engine = StandaloneEngine;
    let code = Dispatcher::new(&registry, &loader, &engine).run(
        &argv,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    exit_code(code)
}
