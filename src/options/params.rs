//! Resolved option values for one invocation.

use super::spec::{OptionKind, OptionSpec, Value};
use crate::error::{DoitError, Result};
use anyhow::anyhow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::debug;

/// Mapping from option id to its resolved value.
///
/// Values are resolved in two ordered passes: explicit command line values
/// first, then manifest-declared defaults for every option the user did not
/// set. Presence is tracked per id, so an explicit value equal to the
/// built-in default still wins over the manifest.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    kinds: BTreeMap<&'static str, OptionKind>,
    values: BTreeMap<&'static str, Value>,
    explicit: BTreeSet<&'static str>,
}

impl ParamSet {
    /// Start from the hardcoded defaults of `specs`.
    pub fn from_defaults(specs: &[OptionSpec]) -> Self {
        let mut params = Self::default();
        for spec in specs {
            params.kinds.insert(spec.id(), spec.kind());
            params.values.insert(spec.id(), spec.default_value().clone());
        }
        params
    }

    /// Record a value supplied on the command line.
    pub fn set_explicit(&mut self, id: &'static str, value: Value) {
        self.values.insert(id, value);
        self.explicit.insert(id);
    }

    pub fn is_explicit(&self, id: &str) -> bool {
        self.explicit.contains(id)
    }

    /// Apply manifest-declared defaults to options not set on the command line.
    ///
    /// Keys that are not options of this parameter set are ignored whatever
    /// their value; known keys must convert to the option's type.
    pub fn update_defaults(&mut self, defaults: &BTreeMap<String, serde_yaml::Value>) -> Result<()> {
        for (key, raw) in defaults {
            let Some((&id, &kind)) = self.kinds.get_key_value(key.as_str()) else {
                continue;
            };
            if self.explicit.contains(id) {
                debug!(option = id, "keeping command line value over manifest default");
                continue;
            }
            let coerced = serde_yaml::from_value::<Value>(raw.clone())
                .ok()
                .and_then(|value| value.coerce(kind))
                .ok_or_else(|| {
                    DoitError::InvalidManifest(format!(
                        "configuration value for '{}' must be of type {}, got {:?}",
                        key,
                        kind.as_str(),
                        raw
                    ))
                })?;
            debug!(option = id, value = ?coerced, "applying manifest default");
            self.values.insert(id, coerced);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    fn lookup(&self, id: &str) -> Result<&Value> {
        self.values
            .get(id)
            .ok_or_else(|| DoitError::Internal(anyhow!("option '{}' is not declared", id)))
    }

    fn mismatch(id: &str, expected: &str, found: &Value) -> DoitError {
        DoitError::Internal(anyhow!(
            "option '{}' holds {:?}, expected {}",
            id,
            found,
            expected
        ))
    }

    pub fn flag(&self, id: &str) -> Result<bool> {
        match self.lookup(id)? {
            Value::Bool(b) => Ok(*b),
            Value::Null => Ok(false),
            other => Err(Self::mismatch(id, "bool", other)),
        }
    }

    pub fn string(&self, id: &str) -> Result<Option<String>> {
        match self.lookup(id)? {
            Value::Str(s) => Ok(Some(s.clone())),
            Value::Null => Ok(None),
            other => Err(Self::mismatch(id, "string", other)),
        }
    }

    pub fn int(&self, id: &str) -> Result<Option<i64>> {
        match self.lookup(id)? {
            Value::Int(n) => Ok(Some(*n)),
            Value::Null => Ok(None),
            other => Err(Self::mismatch(id, "int", other)),
        }
    }

    pub fn list(&self, id: &str) -> Result<Vec<String>> {
        match self.lookup(id)? {
            Value::List(items) => Ok(items.clone()),
            Value::Null => Ok(Vec::new()),
            other => Err(Self::mismatch(id, "list", other)),
        }
    }

    pub fn path(&self, id: &str) -> Result<Option<PathBuf>> {
        Ok(self.string(id)?.map(PathBuf::from))
    }
}
