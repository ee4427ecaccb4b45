//! Data types for htmltab
//!
//! This module contains the value types shared by the parser and the reader.

use std::iter::FusedIterator;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Selector used when none is given: the first `<table>` in the document
pub const DEFAULT_SELECTOR: &str = "table";

/// Which element of the document is the target table
///
/// Fields are private so every spec, including a deserialized one, goes
/// through the empty-selector fallback in [`TableSpec::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SpecFields")]
pub struct TableSpec {
    selector: String,
    index: usize,
}

/// Wire form of [`TableSpec`] before normalization
#[derive(Deserialize)]
struct SpecFields {
    #[serde(default)]
    selector: String,
    #[serde(default)]
    index: usize,
}

impl From<SpecFields> for TableSpec {
    fn from(fields: SpecFields) -> Self {
        TableSpec::new(fields.selector, fields.index)
    }
}

impl TableSpec {
    /// Create a spec. An empty or whitespace-only selector means `"table"`.
    ///
    /// # Example
    /// ```
    /// use htmltab_core::TableSpec;
    ///
    /// let spec = TableSpec::new("#content table.wikitable", 1);
    /// assert_eq!(spec.index(), 1);
    /// assert_eq!(TableSpec::new("", 0).selector(), "table");
    /// ```
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        let selector = selector.into();
        let selector = if selector.trim().is_empty() {
            DEFAULT_SELECTOR.to_string()
        } else {
            selector
        };
        Self { selector, index }
    }

    /// CSS selector evaluated against the whole document
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Zero-based index among the elements the selector matches
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Default for TableSpec {
    fn default() -> Self {
        TableSpec::new(DEFAULT_SELECTOR, 0)
    }
}

/// One `<tr>` of the table: the text of each cell in document order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell text at `index`, if the row is that wide
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.cells.iter()
    }

    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

impl std::ops::Index<usize> for Row {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.cells[index]
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// A located table: its header and body rows, fixed at parse time
///
/// Never mutated after construction. A refresh builds a new one, so an
/// `Arc<ParsedTable>` held by a [`Rows`] traversal stays valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    headings: Vec<String>,
    rows: Vec<Row>,
    html: String,
}

impl ParsedTable {
    pub(crate) fn new(headings: Vec<String>, rows: Vec<Row>, html: String) -> Self {
        Self {
            headings,
            rows,
            html,
        }
    }

    /// Header cell texts; empty when the table has no header row
    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    /// Body rows, header excluded
    pub fn row_list(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Outer HTML of the matched `<table>` element
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Start a traversal over the body rows of this snapshot
    pub fn rows(self: &Arc<Self>) -> Rows {
        Rows {
            table: Arc::clone(self),
            next: 0,
        }
    }
}

/// Lazy traversal over the body rows of one [`ParsedTable`] snapshot
///
/// Yields an owned [`Row`] per `<tr>` on demand. Cloning a `Rows` or asking
/// the reader for a new one restarts from the first row.
#[derive(Debug, Clone)]
pub struct Rows {
    table: Arc<ParsedTable>,
    next: usize,
}

impl Rows {
    /// The snapshot this traversal is bound to
    pub fn table(&self) -> &Arc<ParsedTable> {
        &self.table
    }
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let row = self.table.rows.get(self.next)?.clone();
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.rows.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows {}

impl FusedIterator for Rows {}
