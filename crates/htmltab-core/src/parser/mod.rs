//! HTML table parsing
//!
//! This module locates the target `<table>` in a document and extracts its
//! header and body rows:
//! - `table`: selector resolution, header detection, row extraction

pub mod table;

// Re-export main parsing functions
pub use table::{cell_text, parse_table};
