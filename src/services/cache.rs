//! Caching of windowed data fetches.
//!
//! Only windows that ended in the past are cached: no new readings can be
//! logged inside them. A window reaching now or later, and the full dataset,
//! grow as readings arrive and are always fetched fresh. Entries expire after
//! the configured TTL.
//!
//! | Query | Cached |
//! |-------|--------|
//! | `DataQuery::Window` ending before now | Yes, keyed by request path, until TTL |
//! | `DataQuery::Window` ending now or later | No |
//! | `DataQuery::Full` | No |

use chrono::{Local, NaiveDateTime};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ChartResult;
use crate::source::client::RowSource;
use crate::source::models::Row;
use crate::source::query::DataQuery;

/// Parsed rows keyed by request. Weighted by entry count.
pub type RowCache = Cache<String, Arc<Vec<Row>>>;

#[must_use]
pub fn build_cache(ttl: Duration, max_entries: u64) -> RowCache {
    Cache::builder()
        .max_capacity(max_entries)
        .time_to_live(ttl)
        .build()
}

/// Build a cache key from a prefix and components.
///
/// Components are joined with `:` separator. Empty components are included
/// to ensure different queries produce different keys.
#[must_use]
pub fn cache_key(prefix: &str, components: &[&str]) -> String {
    let mut key = prefix.to_string();
    for c in components {
        key.push(':');
        key.push_str(c);
    }
    key
}

/// Whether the answer to `query` can no longer change as of `now`.
#[must_use]
pub fn is_settled(query: &DataQuery, now: NaiveDateTime) -> bool {
    match query {
        DataQuery::Window(window) => window.end < now,
        DataQuery::Full { .. } => false,
    }
}

/// A [`RowSource`] that serves repeated windowed queries from the cache.
pub struct CachedSource<S> {
    inner: S,
    cache: RowCache,
}

impl<S: RowSource> CachedSource<S> {
    #[must_use]
    pub fn new(inner: S, cache: RowCache) -> Self {
        Self { inner, cache }
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn fetch_cached(&self, query: &DataQuery) -> ChartResult<Vec<Row>> {
        if !is_settled(query, Local::now().naive_local()) {
            return self.inner.fetch(query).await;
        }

        let key = cache_key("rows", &[&query.path()]);
        if let Some(rows) = self.cache.get(&key).await {
            tracing::debug!(cache_key = %key, "cache_hit");
            return Ok(rows.as_ref().clone());
        }

        let rows = self.inner.fetch(query).await?;
        self.cache.insert(key.clone(), Arc::new(rows.clone())).await;
        tracing::debug!(cache_key = %key, rows = rows.len(), "cache_stored");
        Ok(rows)
    }
}

impl<S: RowSource> RowSource for CachedSource<S> {
    fn fetch(
        &self,
        query: &DataQuery,
    ) -> impl std::future::Future<Output = ChartResult<Vec<Row>>> + Send {
        self.fetch_cached(query)
    }
}
