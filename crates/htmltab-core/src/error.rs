//! Error types for htmltab
//!
//! Every failure a [`TableReader`](crate::TableReader) can raise is one of the
//! four [`TableError`] variants, so callers can branch on the kind instead of
//! matching message text. TableError implements Serialize as its display
//! string for adapters that ship errors across a serialization boundary.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for table reader operations
#[derive(Error, Debug)]
pub enum TableError {
    /// The source location could not be understood as a URL or path.
    /// Raised at construction, before any I/O.
    #[error("Malformed source '{location}': {reason}")]
    MalformedSource { location: String, reason: String },

    /// Fetching or decoding the raw document failed
    #[error("Failed to load table from {location}: {cause}")]
    TableLoad {
        location: String,
        #[source]
        cause: LoadFailure,
    },

    /// The selector did not resolve to a table at the requested index
    #[error("Selector '{selector}' at index {index} did not select a table: {reason}")]
    SelectorNotFound {
        selector: String,
        index: usize,
        reason: SelectorMiss,
    },

    /// Headings or rows were requested before a successful refresh
    #[error("Table not loaded - call refresh() first")]
    NotLoaded,
}

/// Underlying cause of a [`TableError::TableLoad`]
#[derive(Error, Debug)]
pub enum LoadFailure {
    /// Transport failure or HTTP client construction failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Body bytes are malformed in the encoding the document declares
    #[error("document is not valid {encoding}")]
    Decode { encoding: &'static str },
}

/// Why a selector failed to produce a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorMiss {
    /// The selector text is not a valid CSS selector
    Syntax(String),
    /// Fewer elements matched than the index requires (including none)
    OutOfRange { matched: usize },
    /// The element at the index is not a `<table>`
    NotATable { tag: String },
}

impl std::fmt::Display for SelectorMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorMiss::Syntax(msg) => write!(f, "invalid selector ({})", msg),
            SelectorMiss::OutOfRange { matched } => {
                write!(f, "{} element(s) matched", matched)
            }
            SelectorMiss::NotATable { tag } => write!(f, "matched <{}>, not <table>", tag),
        }
    }
}

impl TableError {
    pub(crate) fn load(location: impl Into<String>, cause: impl Into<LoadFailure>) -> Self {
        TableError::TableLoad {
            location: location.into(),
            cause: cause.into(),
        }
    }
}

/// Serialize TableError as a string
impl Serialize for TableError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for table reader operations
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_error_display_malformed_source() {
        let error = TableError::MalformedSource {
            location: "badhttp://example.com".to_string(),
            reason: "unknown protocol: badhttp".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed source 'badhttp://example.com': unknown protocol: badhttp"
        );
    }

    #[test]
    fn test_table_error_display_not_loaded() {
        let error = TableError::NotLoaded;
        assert_eq!(error.to_string(), "Table not loaded - call refresh() first");
    }

    #[test]
    fn test_table_error_display_selector_out_of_range() {
        let error = TableError::SelectorNotFound {
            selector: "table".to_string(),
            index: 1,
            reason: SelectorMiss::OutOfRange { matched: 1 },
        };
        assert_eq!(
            error.to_string(),
            "Selector 'table' at index 1 did not select a table: 1 element(s) matched"
        );
    }

    #[test]
    fn test_table_error_display_selector_not_a_table() {
        let error = TableError::SelectorNotFound {
            selector: "#main".to_string(),
            index: 0,
            reason: SelectorMiss::NotATable {
                tag: "div".to_string(),
            },
        };
        assert!(error.to_string().contains("matched <div>, not <table>"));
    }

    #[test]
    fn test_table_load_keeps_cause() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = TableError::load("/tmp/missing.html", io);
        assert!(error.to_string().contains("/tmp/missing.html"));

        let cause = error.source().expect("cause should be attached");
        assert!(cause.to_string().contains("no such file"));
        match error {
            TableError::TableLoad {
                cause: LoadFailure::Io(e),
                ..
            } => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected TableLoad(Io), got {:?}", other),
        }
    }

    #[test]
    fn test_load_failure_display_status() {
        assert_eq!(LoadFailure::Status(404).to_string(), "HTTP status 404");
    }

    #[test]
    fn test_load_failure_display_decode() {
        let failure = LoadFailure::Decode { encoding: "UTF-8" };
        assert_eq!(failure.to_string(), "document is not valid UTF-8");
    }

    #[test]
    fn test_table_error_serialize() {
        let json = serde_json::to_string(&TableError::NotLoaded).unwrap();
        assert_eq!(json, "\"Table not loaded - call refresh() first\"");
    }

    #[test]
    fn test_table_error_serialize_selector() {
        let error = TableError::SelectorNotFound {
            selector: "table.data".to_string(),
            index: 0,
            reason: SelectorMiss::OutOfRange { matched: 0 },
        };
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(
            json,
            "\"Selector 'table.data' at index 0 did not select a table: 0 element(s) matched\""
        );
    }
}
