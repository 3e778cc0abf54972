//! # Errors
//!
//! A single [`Error`] type covers every fallible operation in the crate.
//! Hierarchy walks and mask edits only ever produce [`Error::InvalidNode`]
//! and [`Error::OutOfRange`]; the I/O variants come from the JSON-backed
//! settings store.

use std::fmt;

/// Errors raised by scene walks, layer edits, and settings persistence.
#[derive(Debug)]
pub enum Error {
    /// An ancestor walk was started on a node with no parent.
    InvalidNode {
        /// `Debug` rendering of the offending node.
        node: String,
    },
    /// A layer or matrix-row index fell outside `0..=max`.
    OutOfRange { value: i64, max: u32 },
    /// Reading or writing a settings file failed.
    Io(std::io::Error),
    /// A settings file could not be parsed or serialized.
    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_node(node: impl fmt::Debug) -> Self {
        Error::InvalidNode {
            node: format!("{node:?}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNode { node } => {
                write!(f, "node {node} has no parent; ancestor walks need a parented node")
            }
            Error::OutOfRange { value, max } => {
                write!(f, "index {value} is out of range, expected 0..={max}")
            }
            Error::Io(e) => write!(f, "settings io failed: {e}"),
            Error::Json(e) => write!(f, "settings json failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_value_and_bound() {
        let e = Error::OutOfRange { value: 40, max: 31 };
        assert_eq!(e.to_string(), "index 40 is out of range, expected 0..=31");
    }

    #[test]
    fn invalid_node_uses_debug_form() {
        let e = Error::invalid_node(7u32);
        assert!(matches!(&e, Error::InvalidNode { node } if node == "7"));
    }
}
