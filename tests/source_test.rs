//! CSV parsing and the HTTP data client.
//!
//! Run with: cargo test --test source_test

mod common;

use axum::{extract::RawQuery, extract::State, http::StatusCode, routing::get, Router};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use climate_chart::chart::{Lookback, QueryWindow};
use climate_chart::error::ChartError;
use climate_chart::source::models::parse_rows;
use climate_chart::source::{DataClient, DataQuery, RowSource, SeriesId};
use common::at;

const BACKEND_CSV: &str = "Datetime,ID,Value\n\
2020-01-01 00:00:00,Temperature,21.5\n\
2020-01-01 00:00:00,Humidity,48\n\
2020-01-01 00:10:00,Temperature,21.75\n";

#[test]
fn parses_rows_by_header_name() {
    let rows = parse_rows(BACKEND_CSV).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].datetime, at("2020-01-01 00:00:00"));
    assert_eq!(rows[0].series(), Some(SeriesId::Temperature));
    assert_eq!(rows[1].value, 48.0);
    assert_eq!(rows[2].value, 21.75);

    let reordered = parse_rows("Value,Datetime,ID\n 55.5 ,2020-01-01 00:00:00,Humidity\n").unwrap();
    assert_eq!(reordered[0].value, 55.5);
    assert_eq!(reordered[0].series(), Some(SeriesId::Humidity));
}

#[test]
fn keeps_unrecognised_ids_as_rows() {
    let rows = parse_rows("Datetime,Value,ID\n2020-01-01 00:00:00,1013,Pressure\n").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "Pressure");
    assert_eq!(rows[0].series(), None);
}

#[test]
fn header_only_body_has_no_rows() {
    assert!(parse_rows("Datetime,ID,Value\n").unwrap().is_empty());
}

#[test]
fn rejects_malformed_records() {
    let bad_time = parse_rows("Datetime,Value,ID\n2020/01/01 00:00,1,Temperature\n");
    assert!(matches!(bad_time, Err(ChartError::Parse(_))));

    let bad_value = parse_rows("Datetime,Value,ID\n2020-01-01 00:00:00,warm,Temperature\n");
    assert!(matches!(bad_value, Err(ChartError::Parse(_))));

    let nan = parse_rows("Datetime,Value,ID\n2020-01-01 00:00:00,NaN,Temperature\n");
    assert!(matches!(nan, Err(ChartError::Parse(_))));

    let missing_column = parse_rows("Datetime,Value\n2020-01-01 00:00:00,1\n");
    assert!(matches!(missing_column, Err(ChartError::Parse(_))));
}

#[test]
fn query_paths_match_the_backend_routes() {
    assert_eq!(DataQuery::Full { debug: false }.path(), "/data");
    assert_eq!(DataQuery::Full { debug: true }.path(), "/test_data");

    let window = QueryWindow::ending_at(at("2020-01-02 00:00:00"), Lookback::OneDay).unwrap();
    let query = DataQuery::Window(window);
    assert_eq!(
        query.path(),
        "/data?start_datetime=2020-01-01+00:00:00&end_datetime=2020-01-02+00:00:00"
    );
}

type QueryLog = Arc<Mutex<Vec<String>>>;

async fn data(State(log): State<QueryLog>, RawQuery(query): RawQuery) -> &'static str {
    log.lock().unwrap().push(query.unwrap_or_default());
    BACKEND_CSV
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database is locked")
}

async fn spawn_backend() -> (String, QueryLog) {
    let log = QueryLog::default();
    let app = Router::new()
        .route("/data", get(data))
        .route("/test_data", get(broken))
        .with_state(log.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/"), log)
}

#[tokio::test]
async fn client_fetches_and_parses_rows() {
    let (base_url, log) = spawn_backend().await;
    let client = DataClient::with_base_url(&base_url, Duration::from_secs(5)).unwrap();

    let rows = client.fetch(&DataQuery::Full { debug: false }).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(log.lock().unwrap().as_slice(), [String::new()]);
}

#[tokio::test]
async fn client_sends_window_bounds_unencoded() {
    let (base_url, log) = spawn_backend().await;
    let client = DataClient::with_base_url(&base_url, Duration::from_secs(5)).unwrap();

    let window = QueryWindow::ending_at(at("2020-01-02 00:00:00"), Lookback::OneDay).unwrap();
    let query = DataQuery::Window(window);
    assert!(client.url_for(&query).starts_with(&format!("{}data?", base_url)));

    client.fetch(&query).await.unwrap();
    assert_eq!(
        log.lock().unwrap().as_slice(),
        ["start_datetime=2020-01-01+00:00:00&end_datetime=2020-01-02+00:00:00".to_string()]
    );
}

#[tokio::test]
async fn client_reports_error_status_as_fetch_failure() {
    let (base_url, _log) = spawn_backend().await;
    let client = DataClient::with_base_url(&base_url, Duration::from_secs(5)).unwrap();

    match client.fetch(&DataQuery::Full { debug: true }).await {
        Err(ChartError::Fetch(msg)) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("database is locked"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_reports_unreachable_backend() {
    // Bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = DataClient::with_base_url(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    let result = client.fetch(&DataQuery::Full { debug: false }).await;
    assert!(matches!(result, Err(ChartError::Fetch(_))));
}
