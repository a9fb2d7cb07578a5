//! Command line variables (`NAME=value` tokens).
//!
//! Variables are collected by the dispatcher before sub-command parsing
//! and handed to the manifest loader. The table lives for one dispatch call.

use std::collections::BTreeMap;

/// Variables assigned on the command line for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assignment. A later assignment to the same name wins.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Split `args` into variable assignments and the remaining tokens.
    ///
    /// A token is an assignment when it does not start with `-` and contains
    /// `=`; it is split on the first `=` only. Other tokens keep their order.
    pub fn extract(args: &[String]) -> (Self, Vec<String>) {
        let mut vars = Self::new();
        let mut rest = Vec::with_capacity(args.len());

        for arg in args {
            match arg.split_once('=') {
                Some((name, value)) if !arg.starts_with('-') => vars.set(name, value),
                _ => rest.push(arg.clone()),
            }
        }

        (vars, rest)
    }
}
