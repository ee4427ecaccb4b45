//! htmltab Core Library
//!
//! This crate reads a single HTML `<table>` out of a remote page or a local
//! file and exposes its header and body rows.
//!
//! # Features
//! - Sources given as `http`/`https`/`file` URLs or plain paths, validated
//!   before any I/O
//! - Target table chosen by CSS selector plus match index
//! - Header detection that tolerates missing `<thead>`/`<tbody>`
//! - Restartable row traversals bound to an immutable table snapshot
//! - Typed errors for bad sources, load failures, selector misses and
//!   unloaded readers

mod decode;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod reader;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use error::{LoadFailure, Result, SelectorMiss, TableError};
pub use fetch::{FetchConfig, Fetcher};
pub use reader::TableReader;
pub use source::Source;
pub use types::{ParsedTable, Row, Rows, TableSpec};
