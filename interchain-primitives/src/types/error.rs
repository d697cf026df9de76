//! Foundational error types shared across the workspace.

use alloc::string::String;

use displaydoc::Display;

/// Causes of decoding failures
#[derive(Debug, Display)]
pub enum DecodingError {
    /// invalid identifier: `{0}`
    InvalidIdentifier(String),
    /// invalid field: `{0}`
    InvalidField(String),
    /// invalid JSON data: `{description}`
    InvalidJson { description: String },
    /// invalid UTF-8 data: `{description}`
    InvalidUtf8 { description: String },
    /// invalid store key: `{description}`
    InvalidKey { description: String },
    /// missing field: `{0}`
    MissingField(String),
}

#[cfg(feature = "std")]
impl std::error::Error for DecodingError {}
