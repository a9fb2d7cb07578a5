//! Option descriptors and typed option values.

use serde::Deserialize;

/// Declared type of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Bool,
    Int,
    List,
}

impl OptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::String => "string",
            OptionKind::Bool => "bool",
            OptionKind::Int => "int",
            OptionKind::List => "list",
        }
    }
}

/// A resolved option value.
///
/// `Null` stands for "no value" (e.g. the output file defaults to stdout).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl Value {
    /// Convert a value declared in a manifest to the option's type.
    ///
    /// Returns `None` when the value cannot represent `kind`.
    pub fn coerce(&self, kind: OptionKind) -> Option<Value> {
        match (kind, self) {
            (_, Value::Null) => Some(Value::Null),
            (OptionKind::Bool, Value::Bool(b)) => Some(Value::Bool(*b)),
            (OptionKind::Int, Value::Int(n)) => Some(Value::Int(*n)),
            (OptionKind::Int, Value::Str(s)) => s.trim().parse().ok().map(Value::Int),
            (OptionKind::String, Value::Str(s)) => Some(Value::Str(s.clone())),
            (OptionKind::String, Value::Int(n)) => Some(Value::Str(n.to_string())),
            (OptionKind::List, Value::List(items)) => Some(Value::List(items.clone())),
            (OptionKind::List, Value::Str(s)) => Some(Value::List(vec![s.clone()])),
            _ => None,
        }
    }

    /// Short human form used in help output.
    pub fn display(&self) -> String {
        match self {
            Value::Null => "None".to_string(),
            Value::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
            Value::Int(n) => n.to_string(),
            Value::Str(s) => s.clone(),
            Value::List(items) => items.join(","),
        }
    }
}

/// Declarative descriptor of one configurable option.
///
/// Instances are immutable and only built through the per-type
/// constructors, so an inverse flag can only exist on a bool option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    id: &'static str,
    short: Option<char>,
    long: &'static str,
    kind: OptionKind,
    default: Value,
    inverse: Option<&'static str>,
    help: &'static str,
}

impl OptionSpec {
    fn new(
        id: &'static str,
        short: Option<char>,
        long: &'static str,
        kind: OptionKind,
        default: Value,
        help: &'static str,
    ) -> Self {
        Self {
            id,
            short,
            long,
            kind,
            default,
            inverse: None,
            help,
        }
    }

    /// String option; `default` of `None` resolves to [`Value::Null`].
    pub fn string(
        id: &'static str,
        short: Option<char>,
        long: &'static str,
        default: Option<&str>,
        help: &'static str,
    ) -> Self {
        let default = default.map_or(Value::Null, |s| Value::Str(s.to_string()));
        Self::new(id, short, long, OptionKind::String, default, help)
    }

    /// Integer option; `default` of `None` resolves to [`Value::Null`].
    pub fn int(
        id: &'static str,
        short: Option<char>,
        long: &'static str,
        default: Option<i64>,
        help: &'static str,
    ) -> Self {
        let default = default.map_or(Value::Null, Value::Int);
        Self::new(id, short, long, OptionKind::Int, default, help)
    }

    /// Boolean flag: presence means true.
    pub fn flag(
        id: &'static str,
        short: Option<char>,
        long: &'static str,
        default: bool,
        help: &'static str,
    ) -> Self {
        Self::new(id, short, long, OptionKind::Bool, Value::Bool(default), help)
    }

    /// Boolean flag paired with an inverse long flag forcing it to false.
    pub fn toggle(
        id: &'static str,
        short: Option<char>,
        long: &'static str,
        inverse: &'static str,
        default: bool,
        help: &'static str,
    ) -> Self {
        let mut spec = Self::flag(id, short, long, default, help);
        spec.inverse = Some(inverse);
        spec
    }

    /// Repeatable option collecting every occurrence.
    pub fn list(
        id: &'static str,
        short: Option<char>,
        long: &'static str,
        help: &'static str,
    ) -> Self {
        Self::new(id, short, long, OptionKind::List, Value::List(Vec::new()), help)
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> &'static str {
        self.long
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn inverse(&self) -> Option<&'static str> {
        self.inverse
    }

    /// Help text with `{default}` substituted.
    pub fn help(&self) -> String {
        self.help.replace("{default}", &self.default.display())
    }
}
