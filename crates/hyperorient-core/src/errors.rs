//! Structured error types shared across hyperorient crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`OrientError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertices, edges, weights, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for hypergraph construction and orientation.
///
/// There is no runtime counterpart of a "type error": vertices that cannot be
/// ordered, hashed or compared are rejected by the trait bounds on the vertex
/// type parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum OrientError {
    /// A supplied value violates a structural invariant (empty edge, foreign
    /// vertex, head outside its edge, direction or arity mismatch, bad weight).
    #[error("value error: {0}")]
    Value(ErrorInfo),
    /// A vertex or edge that was asked for is not present.
    #[error("lookup error: {0}")]
    Lookup(ErrorInfo),
    /// Solver configuration is out of range.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl OrientError {
    /// Builds a [`OrientError::Value`] with the provided code and message.
    pub fn value(code: impl Into<String>, message: impl Into<String>) -> Self {
        OrientError::Value(ErrorInfo::new(code, message))
    }

    /// Builds a [`OrientError::Lookup`] with the provided code and message.
    pub fn lookup(code: impl Into<String>, message: impl Into<String>) -> Self {
        OrientError::Lookup(ErrorInfo::new(code, message))
    }

    /// Builds a [`OrientError::Config`] with the provided code and message.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        OrientError::Config(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            OrientError::Value(info) | OrientError::Lookup(info) | OrientError::Config(info) => {
                info
            }
        }
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value.to_string()))
    }

    /// Attaches a remediation hint, keeping the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    /// Returns whether this is a lookup failure.
    pub fn is_lookup(&self) -> bool {
        matches!(self, OrientError::Lookup(_))
    }

    /// Returns whether this is a value failure.
    pub fn is_value(&self) -> bool {
        matches!(self, OrientError::Value(_))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            OrientError::Value(info) => OrientError::Value(f(info)),
            OrientError::Lookup(info) => OrientError::Lookup(f(info)),
            OrientError::Config(info) => OrientError::Config(f(info)),
        }
    }
}
