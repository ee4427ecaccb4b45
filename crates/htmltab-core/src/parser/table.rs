//! Table parser
//!
//! Resolves a [`TableSpec`] against a document and extracts the header and
//! body rows of the selected `<table>`. Works on malformed markup: rows are
//! found by scanning `<tr>` descendants whether or not they sit inside
//! `<thead>`/`<tbody>`.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::error::{Result, SelectorMiss, TableError};
use crate::types::{ParsedTable, Row, TableSpec};

/// Parse `html` and extract the table selected by `spec`.
///
/// Header detection, in order:
/// 1. the first `<thead>` row, if the table has one (all `<thead>` rows are
///    left out of the data);
/// 2. the first row, if every cell in it is a `<th>`;
/// 3. otherwise no header, and the first row is data.
///
/// # Errors
/// `TableError::SelectorNotFound` if the selector is invalid, matches fewer
/// than `spec.index() + 1` elements, or the element at the index is not a
/// `<table>`.
///
/// # Example
/// ```
/// use htmltab_core::parser::parse_table;
/// use htmltab_core::TableSpec;
///
/// let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
/// let table = parse_table(html, &TableSpec::default()).unwrap();
/// assert_eq!(table.headings(), ["A", "B"]);
/// assert_eq!(table.row_count(), 1);
/// ```
pub fn parse_table(html: &str, spec: &TableSpec) -> Result<ParsedTable> {
    let selector = Selector::parse(spec.selector())
        .map_err(|e| not_found(spec, SelectorMiss::Syntax(e.to_string())))?;

    let document = Html::parse_document(html);
    let element = match document.select(&selector).nth(spec.index()) {
        Some(element) => element,
        None => {
            let matched = document.select(&selector).count();
            return Err(not_found(spec, SelectorMiss::OutOfRange { matched }));
        }
    };

    let tag = element.value().name();
    if tag != "table" {
        return Err(not_found(
            spec,
            SelectorMiss::NotATable {
                tag: tag.to_string(),
            },
        ));
    }

    let rows = table_rows(element);
    let (headings, body) = split_header(rows);

    Ok(ParsedTable::new(headings, body, element.html()))
}

/// Text of a cell: descendant text concatenated with `<br>` read as a
/// space, whitespace runs collapsed to a single space, ends trimmed.
pub fn cell_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) if el.name() == "br" => raw.push(' '),
            _ => {}
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A `<tr>` owned by the target table
struct TableRow<'a> {
    in_head: bool,
    cells: Vec<ElementRef<'a>>,
}

impl TableRow<'_> {
    fn all_th(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| c.value().name() == "th")
    }

    fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| cell_text(*c)).collect()
    }
}

/// All rows of `table` in document order, skipping rows of nested tables.
fn table_rows(table: ElementRef<'_>) -> Vec<TableRow<'_>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .filter(|tr| owning_table(*tr).map(|t| t.id()) == Some(table.id()))
        .map(|tr| TableRow {
            in_head: parent_name(tr) == Some("thead"),
            cells: tr
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|c| matches!(c.value().name(), "td" | "th"))
                .collect(),
        })
        .collect()
}

fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

fn parent_name<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    el.parent()
        .and_then(ElementRef::wrap)
        .map(|p| p.value().name())
}

fn split_header(rows: Vec<TableRow<'_>>) -> (Vec<String>, Vec<Row>) {
    if rows.iter().any(|r| r.in_head) {
        debug!("header taken from <thead>");
        let headings = rows
            .iter()
            .find(|r| r.in_head && !r.cells.is_empty())
            .map(TableRow::texts)
            .unwrap_or_default();
        let body = rows
            .iter()
            .filter(|r| !r.in_head)
            .map(|r| Row::new(r.texts()))
            .collect();
        return (headings, body);
    }

    match rows.split_first() {
        Some((first, rest)) if first.all_th() => {
            debug!("header taken from first all-<th> row");
            let body = rest.iter().map(|r| Row::new(r.texts())).collect();
            (first.texts(), body)
        }
        _ => {
            debug!("no header row detected");
            let body = rows.iter().map(|r| Row::new(r.texts())).collect();
            (Vec::new(), body)
        }
    }
}

fn not_found(spec: &TableSpec, reason: SelectorMiss) -> TableError {
    TableError::SelectorNotFound {
        selector: spec.selector().to_string(),
        index: spec.index(),
        reason,
    }
}
