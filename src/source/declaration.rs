//! source::declaration
//!
//! A raw, unparsed declaration: a fully qualified name plus positional
//! arguments.
//!
//! Arguments are kept as JSON values so a declaration can carry strings,
//! booleans, numbers or nested data exactly as written. Typed access goes
//! through the `*_arg` helpers, which return `None` for a missing or
//! mistyped position and leave the error policy to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One declaration attached to a class or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    /// Fully qualified name, e.g. `testmeta::Group`
    pub name: String,

    /// Positional arguments
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Declaration without arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn str_arg(&self, index: usize) -> Option<&str> {
        self.arg(index).and_then(Value::as_str)
    }

    pub fn bool_arg(&self, index: usize) -> Option<bool> {
        self.arg(index).and_then(Value::as_bool)
    }
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(Value::to_string).collect();
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}
