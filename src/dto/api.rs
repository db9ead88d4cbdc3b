//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::list_view::ListResponse;
use crate::query::QueryState;

/// Body of every `/api/v1/*` list response.
#[derive(Debug, Serialize)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    pub count: u64,
    pub offset: u64,
    pub limit: u64,
    /// One-based page the offset falls on.
    pub page: u64,
}

impl<T> ApiListResponse<T> {
    pub fn new(state: &QueryState, response: ListResponse<T>) -> Self {
        Self {
            data: response.data,
            count: response.count,
            offset: state.offset,
            limit: state.limit.get(),
            page: state.current_page(),
        }
    }
}
