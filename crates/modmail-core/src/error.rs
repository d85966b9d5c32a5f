// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Modmail report bot.
//!
//! Only conditions that stop a request are errors. A denied admission or an
//! unrouted interaction is an ordinary outcome and is modelled as a value by
//! the code that produces it.

use thiserror::Error;

/// The primary error type shared by every Modmail crate.
#[derive(Debug, Error)]
pub enum ModmailError {
    /// Configuration errors (missing token, invalid key, bad port).
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed identifier or duration supplied by the platform or a user.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A call to the chat platform failed (listing, creation, posting).
    #[error("{operation} failed: {message}")]
    Dependency {
        operation: &'static str,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The inbound transport (gateway or HTTP endpoint) failed.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ModmailError {
    /// Wraps a platform failure for the named operation.
    pub fn dependency<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Dependency {
            operation,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Returns `true` for failures of an external platform call.
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Dependency { .. })
    }
}

/// Malformed input that can be rejected before any side effect happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The identifier does not start with a known route prefix.
    #[error("unknown identifier route `{0}`")]
    UnknownRoute(String),

    /// The identifier carries more fields than any schema version defines.
    #[error("identifier has {found} fields, at most {max} are supported")]
    TooManyFields { found: usize, max: usize },

    /// A field segment could not be coerced to its type.
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidField { field: &'static str, value: String },

    /// A duration string is not a sequence of `<number><unit>` pairs.
    #[error("invalid duration `{0}`")]
    InvalidDuration(String),

    /// A duration string uses a unit outside h/m/s/ms/us/ns.
    #[error("unknown unit `{unit}` in duration `{input}`")]
    UnknownDurationUnit { unit: String, input: String },

    /// A duration does not fit into the supported range.
    #[error("duration `{0}` is out of range")]
    DurationOverflow(String),
}
