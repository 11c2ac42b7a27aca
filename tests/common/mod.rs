//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use climate_chart::error::{ChartError, ChartResult};
use climate_chart::source::{DataQuery, Row, RowSource};

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn row(datetime: &str, value: f64, id: &str) -> Row {
    Row {
        datetime: at(datetime),
        value,
        id: id.to_string(),
    }
}

/// Two days of readings around 2020-01-01, plus one row with a foreign ID.
pub fn sample_rows() -> Vec<Row> {
    vec![
        row("2019-12-31 18:00:00", 19.0, "Temperature"),
        row("2019-12-31 18:00:00", 60.0, "Humidity"),
        row("2020-01-01 06:00:00", 21.5, "Temperature"),
        row("2020-01-01 06:00:00", 55.0, "Humidity"),
        row("2020-01-01 12:00:00", 23.0, "Temperature"),
        row("2020-01-01 12:00:00", 48.0, "Humidity"),
        row("2020-01-01 15:00:00", 99.0, "Pressure"),
        row("2020-01-01 18:00:00", 22.0, "Temperature"),
        row("2020-01-01 18:00:00", 52.0, "Humidity"),
        row("2020-01-02 00:00:00", 20.0, "Temperature"),
        row("2020-01-02 00:00:00", 58.0, "Humidity"),
    ]
}

/// In-memory data endpoint. Window queries return the rows inside the window, bounds inclusive.
pub struct MemorySource {
    rows: Vec<Row>,
    queries: Mutex<Vec<DataQuery>>,
    failing: AtomicBool,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            queries: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn queries(&self) -> Vec<DataQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn answer(&self, query: &DataQuery) -> ChartResult<Vec<Row>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(*query);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ChartError::Fetch("HTTP 503 Service Unavailable: ".to_string()));
        }

        Ok(match query {
            DataQuery::Full { .. } => self.rows.clone(),
            DataQuery::Window(window) => self
                .rows
                .iter()
                .filter(|r| r.datetime >= window.start && r.datetime <= window.end)
                .cloned()
                .collect(),
        })
    }
}

impl RowSource for MemorySource {
    fn fetch(&self, query: &DataQuery) -> impl Future<Output = ChartResult<Vec<Row>>> + Send {
        let result = self.answer(query);
        async move { result }
    }
}
