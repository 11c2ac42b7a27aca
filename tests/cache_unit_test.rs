//! Unit tests for cache module.
//!
//! Run with: cargo test --test cache_unit_test

mod common;

use chrono::{Local, TimeDelta};
use std::time::Duration;

use climate_chart::chart::{Lookback, QueryWindow};
use climate_chart::services::cache::{self, build_cache, CachedSource};
use climate_chart::source::{DataQuery, RowSource};
use common::{at, sample_rows, MemorySource};

#[test]
fn cache_key_builds_correctly() {
    // Basic key building
    assert_eq!(cache::cache_key("rows", &[]), "rows");
    assert_eq!(
        cache::cache_key("rows", &["/data?start_datetime=a", "json"]),
        "rows:/data?start_datetime=a:json"
    );

    // Empty components preserved (ensures query uniqueness)
    assert_ne!(
        cache::cache_key("rows", &["window", "", "csv"]),
        cache::cache_key("rows", &["window", "csv"])
    );
}

fn cached_source() -> CachedSource<MemorySource> {
    CachedSource::new(
        MemorySource::new(sample_rows()),
        build_cache(Duration::from_secs(60), 16),
    )
}

#[tokio::test]
async fn repeated_window_is_served_from_cache() {
    let source = cached_source();
    let window = QueryWindow::ending_at(at("2020-01-02 00:00:00"), Lookback::OneDay).unwrap();
    let query = DataQuery::Window(window);

    let first = source.fetch(&query).await.unwrap();
    let second = source.fetch(&query).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(source.inner().fetch_count(), 1);

    let other = QueryWindow::ending_at(at("2020-01-02 00:00:00"), Lookback::OneHour).unwrap();
    source.fetch(&DataQuery::Window(other)).await.unwrap();
    assert_eq!(source.inner().fetch_count(), 2);
}

#[tokio::test]
async fn full_dataset_is_always_fetched() {
    let source = cached_source();
    let query = DataQuery::Full { debug: false };

    source.fetch(&query).await.unwrap();
    source.fetch(&query).await.unwrap();
    assert_eq!(source.inner().fetch_count(), 2);
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let source = cached_source();
    let window = QueryWindow::ending_at(at("2020-01-02 00:00:00"), Lookback::OneDay).unwrap();
    let query = DataQuery::Window(window);

    source.inner().set_failing(true);
    assert!(source.fetch(&query).await.is_err());

    source.inner().set_failing(false);
    assert!(source.fetch(&query).await.is_ok());
    assert_eq!(source.inner().fetch_count(), 2);
}

#[test]
fn only_windows_ending_before_now_are_settled() {
    let now = at("2020-01-02 00:00:00");
    let past = QueryWindow::ending_at(at("2020-01-01 23:59:59"), Lookback::OneDay).unwrap();
    let live = QueryWindow::ending_at(now, Lookback::OneDay).unwrap();
    let future = QueryWindow::ending_at(at("2020-01-03 00:00:00"), Lookback::OneHour).unwrap();

    assert!(cache::is_settled(&DataQuery::Window(past), now));
    assert!(!cache::is_settled(&DataQuery::Window(live), now));
    assert!(!cache::is_settled(&DataQuery::Window(future), now));
    assert!(!cache::is_settled(&DataQuery::Full { debug: false }, now));
}

#[tokio::test]
async fn window_reaching_the_present_is_always_fetched() {
    let source = cached_source();
    let end = Local::now().naive_local() + TimeDelta::days(1);
    let query = DataQuery::Window(QueryWindow::ending_at(end, Lookback::OneDay).unwrap());

    source.fetch(&query).await.unwrap();
    source.fetch(&query).await.unwrap();
    assert_eq!(source.inner().fetch_count(), 2);
}
