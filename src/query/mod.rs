//! Query state of a paged list and its URL representation.
//!
//! A [`QueryState`] is seeded from the URL once, replaced wholesale on every
//! change and written back to the URL afterwards.

use thiserror::Error;

pub mod state;
pub mod url;

pub use state::{FetchQuery, FilterValue, Filters, QueryState, same_filters};

/// Reserved query-string keys that never end up in the filter map.
pub const OFFSET_KEY: &str = "offset";
pub const LIMIT_KEY: &str = "limit";
pub const SEARCH_KEY: &str = "q";

#[derive(Debug, Error)]
/// Errors raised while decoding or encoding a query string.
pub enum QueryError {
    #[error("malformed query string: {0}")]
    Decode(String),

    #[error("cannot encode query string: {0}")]
    Encode(String),
}

pub type QueryResult<T> = Result<T, QueryError>;
