pub mod cache;

pub use cache::{build_cache, CachedSource, RowCache};
