//! Tests for remote sources served by a local mock server

use htmltab_core::{LoadFailure, Row, Source, TableError, TableReader, TableSpec};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html><body>
<div id="content">
  <table class="nav"><tr><td>menu</td></tr></table>
  <table class="data">
    <tr><th>State</th><th>Capital</th></tr>
    <tr><td>Alabama</td><td>Montgomery</td></tr>
    <tr><td>Alaska</td><td>Juneau</td></tr>
  </table>
</div>
</body></html>"#;

async fn serve(route: &str, template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn reader_for(server: &MockServer, route: &str, spec: TableSpec) -> TableReader {
    let source = Source::url(&format!("{}{}", server.uri(), route)).unwrap();
    TableReader::with_spec(source, spec)
}

#[tokio::test]
async fn test_refresh_from_url() {
    let server = serve("/states", ResponseTemplate::new(200).set_body_string(PAGE)).await;
    let mut reader = reader_for(&server, "/states", TableSpec::new("#content > table.data", 0));

    reader.refresh().await.unwrap();

    assert_eq!(reader.headings().unwrap(), ["State", "Capital"]);
    let rows: Vec<Row> = reader.rows().unwrap().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get(0), Some("Alaska"));
}

#[tokio::test]
async fn test_match_index_picks_later_table() {
    let server = serve("/states", ResponseTemplate::new(200).set_body_string(PAGE)).await;
    let mut reader = reader_for(&server, "/states", TableSpec::new("table", 1));

    reader.refresh().await.unwrap();
    assert_eq!(reader.rows().unwrap().len(), 2);
}

#[tokio::test]
async fn test_refresh_follows_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/states"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/states"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let mut reader = reader_for(&server, "/old", TableSpec::new("table.data", 0));
    reader.refresh().await.unwrap();
    assert_eq!(reader.headings().unwrap()[1], "Capital");
}

#[tokio::test]
async fn test_latin1_page_from_content_type() {
    let body = b"<table><tr><th>Ville</th></tr><tr><td>Caf\xE9 de Gen\xE8ve</td></tr></table>".to_vec();
    let server = serve(
        "/latin1",
        ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"),
    )
    .await;
    let mut reader = reader_for(&server, "/latin1", TableSpec::default());

    reader.refresh().await.unwrap();

    assert_eq!(reader.headings().unwrap(), ["Ville"]);
    let rows: Vec<Row> = reader.rows().unwrap().collect();
    assert_eq!(rows[0].get(0), Some("Caf\u{e9} de Gen\u{e8}ve"));
}

#[tokio::test]
async fn test_reader_refreshes_twice_over_http() {
    let server = serve("/states", ResponseTemplate::new(200).set_body_string(PAGE)).await;
    let mut reader = reader_for(&server, "/states", TableSpec::new("table.data", 0));

    reader.refresh().await.unwrap();
    reader.refresh().await.unwrap();
    assert_eq!(reader.rows().unwrap().len(), 2);
}

#[tokio::test]
async fn test_not_found_status() {
    let server = serve("/gone", ResponseTemplate::new(404)).await;
    let mut reader = reader_for(&server, "/gone", TableSpec::default());

    match reader.refresh().await {
        Err(TableError::TableLoad {
            cause: LoadFailure::Status(status),
            location,
        }) => {
            assert_eq!(status, 404);
            assert!(location.ends_with("/gone"));
        }
        other => panic!("Expected TableLoad(Status) error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_status() {
    let server = serve("/broken", ResponseTemplate::new(503)).await;
    let mut reader = reader_for(&server, "/broken", TableSpec::default());

    assert!(matches!(
        reader.refresh().await,
        Err(TableError::TableLoad {
            cause: LoadFailure::Status(503),
            ..
        })
    ));
}

#[tokio::test]
async fn test_connection_refused() {
    let source = Source::url("http://127.0.0.1:1/tables.html").unwrap();
    let mut reader = TableReader::new(source);

    assert!(matches!(
        reader.refresh().await,
        Err(TableError::TableLoad {
            cause: LoadFailure::Http(_),
            ..
        })
    ));
}

#[tokio::test]
async fn test_selector_not_found_on_remote_page() {
    let server = serve("/states", ResponseTemplate::new(200).set_body_string(PAGE)).await;
    let mut reader = reader_for(&server, "/states", TableSpec::new("table", 2));

    match reader.refresh().await {
        Err(TableError::SelectorNotFound { index, .. }) => assert_eq!(index, 2),
        other => panic!("Expected SelectorNotFound error, got {:?}", other),
    }
}
