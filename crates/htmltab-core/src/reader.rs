//! Main table reader API
//!
//! This module ties a [`Source`] and a [`TableSpec`] together. Building a
//! reader does no I/O; [`TableReader::refresh`] fetches and parses the
//! document, after which headings and rows can be read any number of times.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Result, TableError};
use crate::fetch::{FetchConfig, Fetcher};
use crate::parser::parse_table;
use crate::source::Source;
use crate::types::{ParsedTable, Rows, TableSpec};

/// Reads one `<table>` out of a remote page or local HTML file
///
/// `refresh()` must be called after construction, for every kind of source,
/// before headings or rows are available.
///
/// # Example
/// ```no_run
/// use htmltab_core::{Source, TableReader, TableSpec};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let source = Source::url("https://en.wikipedia.org/wiki/List_of_states_and_territories_of_the_United_States")?;
///     let mut reader = TableReader::with_spec(source, TableSpec::new("table.wikitable", 0));
///     reader.refresh().await?;
///
///     println!("{:?}", reader.headings()?);
///     for row in reader.rows()? {
///         println!("{:?}", row.cells());
///     }
///     Ok(())
/// }
/// ```
pub struct TableReader {
    source: Source,
    spec: TableSpec,
    fetcher: Fetcher,
    table: Option<Arc<ParsedTable>>,
}

impl TableReader {
    /// Create a reader for the first `<table>` of `source`.
    pub fn new(source: Source) -> Self {
        Self::with_spec(source, TableSpec::default())
    }

    /// Create a reader for the table selected by `spec`.
    pub fn with_spec(source: Source, spec: TableSpec) -> Self {
        Self::with_config(source, spec, FetchConfig::default())
    }

    /// Create a reader with custom fetch configuration.
    pub fn with_config(source: Source, spec: TableSpec, config: FetchConfig) -> Self {
        Self {
            source,
            spec,
            fetcher: Fetcher::with_config(config),
            table: None,
        }
    }

    /// Create a reader from a location string plus optional selector and
    /// index.
    ///
    /// # Errors
    /// `TableError::MalformedSource` if `location` has an unknown protocol
    /// or is not a well-formed URL.
    ///
    /// # Example
    /// ```
    /// use htmltab_core::{TableError, TableReader};
    ///
    /// let reader = TableReader::open("data/stats.html", Some("#main table"), Some(1)).unwrap();
    /// assert_eq!(reader.spec().index(), 1);
    ///
    /// let bad = TableReader::open("badhttp://example.com/", None, None);
    /// assert!(matches!(bad, Err(TableError::MalformedSource { .. })));
    /// ```
    pub fn open(location: &str, selector: Option<&str>, index: Option<usize>) -> Result<Self> {
        let source = Source::parse(location)?;
        let spec = TableSpec::new(selector.unwrap_or_default(), index.unwrap_or_default());
        Ok(Self::with_spec(source, spec))
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// Whether a table is currently loaded
    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Fetch the source, parse it and locate the table.
    ///
    /// On success the new table replaces the previous one in a single step;
    /// traversals created earlier keep reading the snapshot they started
    /// with. On failure the reader is left unloaded.
    ///
    /// # Errors
    /// - `TableError::TableLoad` - network, status, file or decoding failure
    /// - `TableError::SelectorNotFound` - selector invalid, index out of
    ///   range, or matched element is not a `<table>`
    pub async fn refresh(&mut self) -> Result<()> {
        debug!(source = %self.source, selector = %self.spec.selector(), index = self.spec.index(), "refreshing table");

        self.table = None;
        let loaded = self.load().await;
        match loaded {
            Ok(table) => {
                debug!(
                    source = %self.source,
                    columns = table.headings().len(),
                    rows = table.row_count(),
                    "table loaded"
                );
                self.table = Some(Arc::new(table));
                Ok(())
            }
            Err(e) => {
                warn!(source = %self.source, error = %e, "table refresh failed");
                Err(e)
            }
        }
    }

    async fn load(&self) -> Result<ParsedTable> {
        let html = self.fetcher.fetch(&self.source).await?;
        parse_table(&html, &self.spec)
    }

    /// Header cell texts of the loaded table. Empty if it has no header.
    ///
    /// # Errors
    /// `TableError::NotLoaded` before a successful refresh.
    pub fn headings(&self) -> Result<&[String]> {
        Ok(self.loaded()?.headings())
    }

    /// A fresh traversal over the body rows of the loaded table.
    ///
    /// The traversal is bound to the current snapshot; a later refresh does
    /// not affect it.
    ///
    /// # Errors
    /// `TableError::NotLoaded` before a successful refresh.
    pub fn rows(&self) -> Result<Rows> {
        Ok(self.loaded()?.rows())
    }

    /// The current table snapshot.
    ///
    /// # Errors
    /// `TableError::NotLoaded` before a successful refresh.
    pub fn table(&self) -> Result<Arc<ParsedTable>> {
        self.loaded().map(Arc::clone)
    }

    fn loaded(&self) -> Result<&Arc<ParsedTable>> {
        self.table.as_ref().ok_or(TableError::NotLoaded)
    }
}
