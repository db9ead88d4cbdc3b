//! Named filter presets layered on top of the base filter state.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::{FilterValue, Filters};

/// A named set of filters the user can switch to with one click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTab {
    pub name: String,
    pub filters: Filters,
    /// Built-in tabs cannot be removed.
    pub removable: bool,
}

impl FilterTab {
    pub fn builtin(name: &str, filters: Filters) -> Self {
        Self {
            name: name.to_string(),
            filters,
            removable: false,
        }
    }

    pub fn saved(name: &str, filters: Filters) -> Self {
        Self {
            name: name.to_string(),
            filters,
            removable: true,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    #[error("tab name cannot be empty")]
    EmptyName,

    #[error("a tab named `{0}` already exists")]
    Duplicate(String),

    #[error("there are no active filters to save")]
    NoFilters,

    #[error("tabs are not available for this list")]
    Unsupported,
}

#[derive(Debug, Error)]
#[error("tab storage error: {0}")]
pub struct TabStoreError(pub String);

/// Persistence for user-saved tabs.
pub trait TabStore {
    fn load(&self) -> Result<Vec<FilterTab>, TabStoreError>;
    fn save(&self, tabs: &[FilterTab]) -> Result<(), TabStoreError>;
}

/// Keeps saved tabs in memory, for tests and embedded use.
#[derive(Debug, Default)]
pub struct InMemoryTabStore {
    tabs: RefCell<Vec<FilterTab>>,
}

impl InMemoryTabStore {
    pub fn with_tabs(tabs: Vec<FilterTab>) -> Self {
        Self {
            tabs: RefCell::new(tabs),
        }
    }

    pub fn tabs(&self) -> Vec<FilterTab> {
        self.tabs.borrow().clone()
    }
}

impl TabStore for InMemoryTabStore {
    fn load(&self) -> Result<Vec<FilterTab>, TabStoreError> {
        Ok(self.tabs.borrow().clone())
    }

    fn save(&self, tabs: &[FilterTab]) -> Result<(), TabStoreError> {
        self.tabs.replace(tabs.to_vec());
        Ok(())
    }
}

/// Built-in tabs of the order list.
pub fn order_tabs() -> Vec<FilterTab> {
    let incomplete = Filters::from([
        (
            "fulfillment_status".to_string(),
            FilterValue::from(["not_fulfilled", "fulfilled"]),
        ),
        (
            "payment_status".to_string(),
            FilterValue::from(["awaiting"]),
        ),
    ]);
    let complete = Filters::from([
        (
            "fulfillment_status".to_string(),
            FilterValue::from(["shipped"]),
        ),
        (
            "payment_status".to_string(),
            FilterValue::from(["captured"]),
        ),
    ]);

    vec![
        FilterTab::builtin("incomplete", incomplete),
        FilterTab::builtin("complete", complete),
    ]
}
