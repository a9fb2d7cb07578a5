//! Entry point state machine: argv in, exit code out.
//!
//! 1. `--version` / `--help` as the first token are answered immediately.
//! 2. `NAME=value` tokens are pulled out as variables.
//! 3. The first remaining token selects the command if it names one,
//!    otherwise `run` is used and nothing is consumed.
//! 4. The command parses the rest and executes.
//! 5. Errors become exit code 3: user errors as one `ERROR:` line, internal
//!    errors and panics with a full trace. A panic's backtrace is taken at
//!    the panic site by a hook, before unwinding. Engine results pass through.

use crate::commands::{self, CommandRegistry, DEFAULT_COMMAND, Invocation};
use crate::engine::Engine;
use crate::error::DoitError;
use crate::exit_codes;
use crate::manifest::ManifestLoader;
use crate::variables::Variables;
use anyhow::anyhow;
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing::debug;

/// Where a command panicked, recorded by the panic hook before unwinding.
struct PanicSite {
    location: String,
    backtrace: Backtrace,
}

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static LAST_PANIC: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

/// Install a process-wide hook that records panics raised while a command
/// runs on this thread. Other panics go to the previously installed hook.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.get() {
                previous(info);
                return;
            }
            let location = info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown location".to_string());
            LAST_PANIC.set(Some(PanicSite {
                location,
                backtrace: Backtrace::force_capture(),
            }));
        }));
    });
}

/// Pick the command named by the first token, or fall back to `run`.
///
/// Returns the command name and the tokens left for it to parse.
pub fn select_command<'a>(registry: &CommandRegistry, args: &'a [String]) -> (&'a str, &'a [String]) {
    match args.split_first() {
        Some((first, rest)) if registry.contains(first) => (first.as_str(), rest),
        _ => (DEFAULT_COMMAND, args),
    }
}

/// Routes one invocation to its command.
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    loader: &'a dyn ManifestLoader,
    engine: &'a dyn Engine,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        loader: &'a dyn ManifestLoader,
        engine: &'a dyn Engine,
    ) -> Self {
        Self {
            registry,
            loader,
            engine,
        }
    }

    /// Run `argv` (without the program name) and return the exit code.
    pub fn run(&self, argv: &[String], out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        match argv.first().map(String::as_str) {
            Some("--version") => return emit(out, err, &commands::version()),
            Some("--help") => return emit(out, err, &commands::usage(self.registry)),
            _ => {}
        }

        let (variables, args) = Variables::extract(argv);
        if !variables.is_empty() {
            debug!(count = variables.len(), "command line variables");
        }

        let (name, rest) = select_command(self.registry, &args);
        debug!(command = name, "dispatching");

        let Some(command) = self.registry.get(name) else {
            return report_error(
                &DoitError::InvalidCommand(format!("command '{}' is not registered", name)),
                err,
            );
        };

        let mut ctx = Invocation {
            registry: self.registry,
            variables: &variables,
            loader: self.loader,
            engine: self.engine,
            out,
        };

        install_panic_hook();
        let was_capturing = CAPTURING.replace(true);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| command.parse_execute(rest, &mut ctx)));
        CAPTURING.set(was_capturing);

        match outcome {
            Ok(Ok(code)) => code,
            Ok(Err(error)) => report_error(&error, err),
            Err(payload) => report_panic(payload.as_ref(), LAST_PANIC.take(), err),
        }
    }
}

fn emit(out: &mut dyn Write, err: &mut dyn Write, text: &str) -> i32 {
    match out.write_all(text.as_bytes()) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => report_error(&DoitError::Internal(anyhow!(e).context("failed to write output")), err),
    }
}

/// Single reporting point for errors raised before task execution.
fn report_error(error: &DoitError, err: &mut dyn Write) -> i32 {
    debug!(kind = ?error.kind(), "command failed before execution");
    // Nothing sensible is left to do if stderr is gone.
    let _ = err.write_all(error.render().as_bytes());
    error.exit_code()
}

fn report_panic(
    payload: &(dyn Any + Send),
    site: Option<PanicSite>,
    err: &mut dyn Write,
) -> i32 {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    // The hook did not see the panic if another hook replaced it.
    let site = site.unwrap_or_else(|| PanicSite {
        location: "unknown location".to_string(),
        backtrace: Backtrace::force_capture(),
    });
    let error = DoitError::Internal(anyhow!(
        "internal error: {}\n  at {}\n\nStack backtrace:\n{}",
        message,
        site.location,
        site.backtrace
    ));
    report_error(&error, err)
}
