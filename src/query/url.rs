//! Conversion between [`QueryState`] and the URL query string.

use crate::domain::types::PageSize;
use crate::query::{
    FilterValue, Filters, LIMIT_KEY, OFFSET_KEY, QueryError, QueryResult, QueryState, SEARCH_KEY,
};

/// Strips `[]` and numeric `[N]` suffixes so `status[]=a&status[1]=b` and
/// `status=a&status=b` decode to the same filter. Named brackets such as
/// `created_at[gt]` are kept.
fn normalize_key(key: &str) -> &str {
    match key.rfind('[') {
        Some(start) if key.ends_with(']') => {
            let inner = &key[start + 1..key.len() - 1];
            if inner.chars().all(|c| c.is_ascii_digit()) {
                &key[..start]
            } else {
                key
            }
        }
        _ => key,
    }
}

/// Decodes raw `key=value` pairs, tolerating a leading `?`.
pub fn parse_pairs(query_string: &str) -> QueryResult<Vec<(String, String)>> {
    let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
    serde_html_form::from_str::<Vec<(String, String)>>(query_string)
        .map_err(|e| QueryError::Decode(e.to_string()))
}

/// Encodes pairs into an `application/x-www-form-urlencoded` string.
pub fn encode_pairs(pairs: &[(String, String)]) -> QueryResult<String> {
    serde_html_form::to_string(pairs).map_err(|e| QueryError::Encode(e.to_string()))
}

impl QueryState {
    /// Builds the state from already decoded pairs.
    ///
    /// `offset` falls back to `0` and `limit` to `default_limit` when missing
    /// or not a valid number; every other key becomes a filter.
    pub fn from_pairs<I>(pairs: I, default_limit: PageSize) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut state = QueryState::new(default_limit);
        let mut filters = Filters::new();

        for (key, value) in pairs {
            match normalize_key(&key) {
                OFFSET_KEY => state.offset = value.trim().parse().unwrap_or(0),
                LIMIT_KEY => state.limit = value.parse().unwrap_or(default_limit),
                SEARCH_KEY => state.q = value,
                _ if value.is_empty() => {}
                name => {
                    let is_array = name.len() != key.len();
                    match filters.get_mut(name) {
                        Some(existing) => existing.push(value),
                        None if is_array => {
                            filters.insert(name.to_string(), FilterValue::Many(vec![value]));
                        }
                        None => {
                            filters.insert(name.to_string(), FilterValue::Single(value));
                        }
                    }
                }
            }
        }

        state.filters = filters;
        state
    }

    /// Seeds the state from a URL query string.
    pub fn from_query_string(query_string: &str, default_limit: PageSize) -> QueryResult<Self> {
        let pairs = parse_pairs(query_string)?;
        Ok(Self::from_pairs(pairs, default_limit))
    }

    /// Serializes the state into its URL query string.
    pub fn to_query_string(&self) -> QueryResult<String> {
        encode_pairs(&self.representation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(value: u64) -> PageSize {
        PageSize::new(value).unwrap()
    }

    #[test]
    fn normalize_key_only_strips_positional_brackets() {
        assert_eq!(normalize_key("status[]"), "status");
        assert_eq!(normalize_key("status[3]"), "status");
        assert_eq!(normalize_key("created_at[gt]"), "created_at[gt]");
        assert_eq!(normalize_key("region_id"), "region_id");
    }

    #[test]
    fn invalid_paging_falls_back_to_defaults() {
        let state = QueryState::from_query_string("?offset=abc&limit=0&q=shoes", limit(15)).unwrap();

        assert_eq!(state.offset, 0);
        assert_eq!(state.limit.get(), 15);
        assert_eq!(state.q, "shoes");
    }

    #[test]
    fn maximal_offset_parses_without_overflow() {
        let state =
            QueryState::from_query_string("offset=18446744073709551615&limit=1", limit(15)).unwrap();

        assert_eq!(state.offset, u64::MAX);
        assert_eq!(state.current_page(), u64::MAX);
    }

    #[test]
    fn repeated_and_bracketed_keys_collapse_into_lists() {
        let state = QueryState::from_query_string(
            "status=pending&status=completed&payment_status%5B%5D=captured&region_id=reg_1&empty=",
            limit(15),
        )
        .unwrap();

        assert_eq!(
            state.filters["status"],
            FilterValue::from(["pending", "completed"])
        );
        assert_eq!(
            state.filters["payment_status"],
            FilterValue::from(["captured"])
        );
        assert_eq!(state.filters["region_id"], FilterValue::from("reg_1"));
        assert!(!state.filters.contains_key("empty"));
    }

    #[test]
    fn query_string_survives_a_parse_cycle() {
        let mut state = QueryState::new(limit(12));
        state.offset = 24;
        state.q = "red shirt & co".to_string();
        state
            .filters
            .insert("status".to_string(), FilterValue::from(["a", "b"]));

        let encoded = state.to_query_string().unwrap();
        let decoded = QueryState::from_query_string(&encoded, limit(99)).unwrap();

        assert_eq!(decoded, state);
    }
}
