//! Built-in option descriptors shared by the doit commands.
//!
//! Option ids double as manifest configuration keys, so a manifest can set
//! e.g. `verbosity: 2` or `continue: true` as project-wide defaults.

use super::spec::OptionSpec;

/// Default manifest file name.
pub const DEFAULT_DODO_FILE: &str = "dodo.yaml";

/// Default dependency database path.
pub const DEFAULT_DEP_FILE: &str = ".doit.db";

// Manifest related

pub fn dodo_file() -> OptionSpec {
    OptionSpec::string(
        "dodoFile",
        Some('f'),
        "file",
        Some(DEFAULT_DODO_FILE),
        "load task from dodo FILE [default: {default}]",
    )
}

pub fn cwd_path() -> OptionSpec {
    OptionSpec::string(
        "cwdPath",
        Some('d'),
        "dir",
        None,
        "set path to be used as cwd directory (file paths on dodo file are relative to dodo file location)",
    )
}

pub fn seek_file() -> OptionSpec {
    OptionSpec::flag(
        "seek_file",
        None,
        "seek-file",
        false,
        "seek dodo file on parent folders [default: {default}]",
    )
}

pub fn dep_file() -> OptionSpec {
    OptionSpec::string(
        "dep_file",
        None,
        "db-file",
        Some(DEFAULT_DEP_FILE),
        "file used to save successful runs",
    )
}

// Run

pub fn outfile() -> OptionSpec {
    OptionSpec::string(
        "outfile",
        Some('o'),
        "output-file",
        None,
        "write output into file [default: stdout]",
    )
}

pub fn always() -> OptionSpec {
    OptionSpec::flag(
        "always",
        Some('a'),
        "always-execute",
        false,
        "always execute tasks even if up-to-date [default: {default}]",
    )
}

pub fn continue_on_failure() -> OptionSpec {
    OptionSpec::toggle(
        "continue",
        Some('c'),
        "continue",
        "no-continue",
        false,
        "continue executing tasks even after a failure [default: {default}]",
    )
}

pub fn num_process() -> OptionSpec {
    OptionSpec::int(
        "num_process",
        Some('n'),
        "process",
        Some(0),
        "number of subprocesses [default: {default}]",
    )
}

pub fn verbosity() -> OptionSpec {
    OptionSpec::int(
        "verbosity",
        Some('v'),
        "verbosity",
        None,
        "0 capture (do not print) stdout/stderr from task. \
         1 capture stdout only. \
         2 do not capture anything (print everything immediately). [default: 1]",
    )
}

pub fn reporter() -> OptionSpec {
    OptionSpec::string(
        "reporter",
        Some('r'),
        "reporter",
        Some("default"),
        "choose output reporter. Available: \
         'default' report output on console, \
         'executed-only' no output for skipped (up-to-date) and group tasks, \
         'json' output result in json format",
    )
}

// List

pub fn list_all() -> OptionSpec {
    OptionSpec::flag(
        "all",
        None,
        "all",
        false,
        "list include all sub-tasks from dodo file",
    )
}

pub fn list_quiet() -> OptionSpec {
    OptionSpec::flag(
        "quiet",
        Some('q'),
        "quiet",
        false,
        "print just task name (less verbose than default)",
    )
}

pub fn list_status() -> OptionSpec {
    OptionSpec::flag(
        "status",
        Some('s'),
        "status",
        false,
        "print task status (R)un, (U)p-to-date, (I)gnored",
    )
}

pub fn list_private() -> OptionSpec {
    OptionSpec::flag(
        "private",
        Some('p'),
        "private",
        false,
        "print private tasks (start with '_')",
    )
}

pub fn list_deps() -> OptionSpec {
    OptionSpec::flag(
        "list_deps",
        None,
        "deps",
        false,
        "print list of dependencies (file dependencies only)",
    )
}

// Clean

pub fn clean_dryrun() -> OptionSpec {
    OptionSpec::flag(
        "dryrun",
        Some('n'),
        "dry-run",
        false,
        "print actions without really executing them",
    )
}

pub fn clean_dep() -> OptionSpec {
    OptionSpec::flag(
        "cleandep",
        Some('c'),
        "clean-dep",
        false,
        "clean task dependencies too",
    )
}

pub fn clean_all() -> OptionSpec {
    OptionSpec::flag("cleanall", Some('a'), "clean-all", false, "clean all task")
}
