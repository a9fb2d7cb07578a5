//! Option descriptors, resolved parameter sets and argv parsing.
//!
//! Every command owns a list of [`OptionSpec`]s. At registration time the
//! list is compiled into an [`OptionParser`]; at invocation time the parser
//! turns argv into a [`ParamSet`] plus the positional arguments.

pub mod catalog;
mod params;
mod parser;
mod spec;

#[cfg(test)]
mod tests;

pub use params::ParamSet;
pub use parser::{OptionParser, ParsedArgs};
pub use spec::{OptionKind, OptionSpec, Value};
