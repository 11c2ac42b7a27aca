pub mod client;
pub mod models;
pub mod query;

pub use client::{DataClient, RowSource};
pub use models::{Row, SeriesId};
pub use query::DataQuery;
