//! Exit code constants for the doit CLI.
//!
//! - 0: All selected tasks succeeded
//! - 1: One or more tasks failed
//! - 2: Error while executing a task
//! - 3: Error before task execution starts
//!
//! Code 3 is produced before any reporter is engaged, so output formatting
//! requested through `--reporter` (e.g. JSON) does not apply to it.

/// Tasks executed successfully.
pub const SUCCESS: i32 = 0;

/// One or more tasks failed.
pub const TASK_FAILED: i32 = 1;

/// Error while executing a task.
pub const TASK_ERROR: i32 = 2;

/// Error before task execution starts: bad options, bad manifest,
/// unknown command or task, or an unexpected internal failure.
pub const SETUP_ERROR: i32 = 3;
