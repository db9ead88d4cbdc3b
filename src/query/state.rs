use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::types::{PageNumber, PageSize};
use crate::query::{LIMIT_KEY, OFFSET_KEY, SEARCH_KEY};

/// Value of a single filter: either one value or a list of accepted values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// Appends a value, promoting a single value into a list.
    pub fn push(&mut self, value: String) {
        match self {
            FilterValue::Single(existing) => {
                *self = FilterValue::Many(vec![std::mem::take(existing), value]);
            }
            FilterValue::Many(values) => values.push(value),
        }
    }

    /// All values carried by the filter in insertion order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FilterValue::Single(value) => vec![value.as_str()],
            FilterValue::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Single(value) => value.is_empty(),
            FilterValue::Many(values) => values.iter().all(String::is_empty),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(values: [&str; N]) -> Self {
        FilterValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Active filters keyed by backend parameter name. Ordered so that the
/// serialized form is stable.
pub type Filters = BTreeMap<String, FilterValue>;

/// Compares two filter sets by their values, ignoring value order and the
/// single/list distinction (`status=a` equals `status[]=a`).
pub fn same_filters(a: &Filters, b: &Filters) -> bool {
    a.len() == b.len()
        && a.iter().all(|(key, value)| {
            b.get(key).is_some_and(|other| {
                let mut left = value.values();
                let mut right = other.values();
                left.sort_unstable();
                right.sort_unstable();
                left == right
            })
        })
}

/// Search text, filters and paging parameters that fully determine which
/// page of remote data is requested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub offset: u64,
    pub limit: PageSize,
    pub q: String,
    pub filters: Filters,
}

impl QueryState {
    /// Default paging for a list with the given page size.
    pub fn new(limit: PageSize) -> Self {
        Self {
            offset: 0,
            limit,
            q: String::new(),
            filters: Filters::new(),
        }
    }

    /// One-based page the current offset falls on.
    pub fn current_page(&self) -> u64 {
        (self.offset / self.limit.get()).saturating_add(1)
    }

    /// Offset of the first row of `page`.
    pub fn offset_for(&self, page: PageNumber) -> u64 {
        (page.get() - 1).saturating_mul(self.limit.get())
    }

    /// Ordered key/value pairs of the URL representation. `offset` and
    /// `limit` are always present, `q` only when non-empty.
    pub fn representation(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (OFFSET_KEY.to_string(), self.offset.to_string()),
            (LIMIT_KEY.to_string(), self.limit.to_string()),
        ];

        if !self.q.is_empty() {
            pairs.push((SEARCH_KEY.to_string(), self.q.clone()));
        }

        for (key, value) in &self.filters {
            for item in value.values() {
                pairs.push((key.clone(), item.to_string()));
            }
        }

        pairs
    }

    /// Plain object form of [`Self::representation`], used by the JSON API.
    pub fn representation_object(&self) -> BTreeMap<String, FilterValue> {
        let mut object = BTreeMap::new();
        for (key, value) in self.representation() {
            match object.get_mut(&key) {
                Some(existing) => FilterValue::push(existing, value),
                None => {
                    object.insert(key, FilterValue::Single(value));
                }
            }
        }
        object
    }
}

/// Query handed to the remote data source: the URL representation plus
/// parameters that are requested but never written to the URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchQuery {
    pub state: QueryState,
    pub additional: Vec<(String, String)>,
}

impl FetchQuery {
    /// Pairs to send to the backend. Multi-valued filters use the `key[]`
    /// array syntax the backend expects.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (OFFSET_KEY.to_string(), self.state.offset.to_string()),
            (LIMIT_KEY.to_string(), self.state.limit.to_string()),
        ];

        if !self.state.q.is_empty() {
            params.push((SEARCH_KEY.to_string(), self.state.q.clone()));
        }

        for (key, value) in &self.state.filters {
            match value {
                FilterValue::Single(item) => params.push((key.clone(), item.clone())),
                FilterValue::Many(items) => {
                    for item in items {
                        params.push((format!("{key}[]"), item.clone()));
                    }
                }
            }
        }

        params.extend(self.additional.iter().cloned());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(value: u64) -> PageSize {
        PageSize::new(value).unwrap()
    }

    #[test]
    fn current_page_is_derived_from_offset() {
        let mut state = QueryState::new(limit(15));
        assert_eq!(state.current_page(), 1);

        state.offset = 30;
        assert_eq!(state.current_page(), 3);

        // Offsets that are not page aligned still land on the page that
        // contains them.
        state.offset = 44;
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn representation_omits_empty_search() {
        let mut state = QueryState::new(limit(15));
        state
            .filters
            .insert("status".to_string(), FilterValue::from(["pending", "completed"]));

        let pairs = state.representation();

        assert_eq!(
            pairs,
            vec![
                ("offset".to_string(), "0".to_string()),
                ("limit".to_string(), "15".to_string()),
                ("status".to_string(), "pending".to_string()),
                ("status".to_string(), "completed".to_string()),
            ]
        );
    }

    #[test]
    fn representation_object_groups_repeated_keys() {
        let mut state = QueryState::new(limit(10));
        state.q = "jane".to_string();
        state
            .filters
            .insert("status".to_string(), FilterValue::from(["a", "b"]));

        let object = state.representation_object();

        assert_eq!(object["q"], FilterValue::from("jane"));
        assert_eq!(object["limit"], FilterValue::from("10"));
        assert_eq!(object["status"], FilterValue::from(["a", "b"]));
    }

    #[test]
    fn same_filters_ignores_order_and_shape() {
        let mut a = Filters::new();
        a.insert("status".to_string(), FilterValue::from(["b", "a"]));
        a.insert("region_id".to_string(), FilterValue::from(["reg_1"]));

        let mut b = Filters::new();
        b.insert("status".to_string(), FilterValue::from(["a", "b"]));
        b.insert("region_id".to_string(), FilterValue::from("reg_1"));

        assert!(same_filters(&a, &b));

        b.remove("region_id");
        assert!(!same_filters(&a, &b));
    }

    #[test]
    fn fetch_params_use_array_syntax_and_append_additional() {
        let mut state = QueryState::new(limit(15));
        state
            .filters
            .insert("payment_status".to_string(), FilterValue::from(["captured"]));
        let query = FetchQuery {
            state,
            additional: vec![("expand".to_string(), "customer".to_string())],
        };

        let params = query.to_params();

        assert!(params.contains(&("payment_status[]".to_string(), "captured".to_string())));
        assert_eq!(params.last().unwrap().0, "expand");
    }
}
