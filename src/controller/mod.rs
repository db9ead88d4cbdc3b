//! Owner of a list's query state.
//!
//! Views never write the URL or the [`QueryState`] directly: they call the
//! operations below, and every successful change is mirrored to the URL
//! through a [`HistorySink`] by replacing the current history entry.

use crate::domain::types::{PageNumber, PageSize, TabName};
use crate::query::{FetchQuery, Filters, QueryState, same_filters};

pub mod tabs;

use tabs::{FilterTab, TabError, TabStore};

/// Adapter boundary to the URL. Only replacement is offered: paging never
/// creates new history entries.
pub trait HistorySink {
    fn replace(&mut self, location: &str);
}

impl<F> HistorySink for F
where
    F: FnMut(&str),
{
    fn replace(&mut self, location: &str) {
        (self)(location)
    }
}

struct TabSet {
    builtin: Vec<FilterTab>,
    saved: Vec<FilterTab>,
    store: Box<dyn TabStore>,
}

pub struct QueryController {
    path: String,
    default_limit: PageSize,
    state: QueryState,
    additional: Vec<(String, String)>,
    count: Option<u64>,
    sink: Option<Box<dyn HistorySink>>,
    tabs: Option<TabSet>,
}

impl QueryController {
    /// Creates a controller for the list mounted at `path` with default
    /// paging.
    pub fn new(path: impl Into<String>, default_limit: PageSize) -> Self {
        Self::with_state(path, default_limit, QueryState::new(default_limit))
    }

    /// Creates a controller seeded with an already parsed state.
    pub fn with_state(path: impl Into<String>, default_limit: PageSize, state: QueryState) -> Self {
        Self {
            path: path.into(),
            default_limit,
            state,
            additional: Vec::new(),
            count: None,
            sink: None,
            tabs: None,
        }
    }

    /// Parameters sent with every fetch but kept out of the URL.
    pub fn with_additional(mut self, additional: Vec<(String, String)>) -> Self {
        self.additional = additional;
        self
    }

    pub fn with_sink(mut self, sink: impl HistorySink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Enables tab presets. Saved tabs are loaded from `store` immediately;
    /// a failing store only loses the saved tabs.
    pub fn with_tabs(mut self, builtin: Vec<FilterTab>, store: impl TabStore + 'static) -> Self {
        let saved = store.load().unwrap_or_else(|err| {
            log::error!("Failed to load saved tabs: {err}");
            Vec::new()
        });
        self.tabs = Some(TabSet {
            builtin,
            saved,
            store: Box::new(store),
        });
        self
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn default_limit(&self) -> PageSize {
        self.default_limit
    }

    /// Query handed to the data source for the current state.
    pub fn fetch_query(&self) -> FetchQuery {
        FetchQuery {
            state: self.state.clone(),
            additional: self.additional.clone(),
        }
    }

    /// Records the latest total reported by the data source.
    pub fn observe_count(&mut self, count: u64) {
        self.count = Some(count);
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Page count derived from the last observed total, if one was seen.
    pub fn page_count(&self) -> Option<u64> {
        self.count
            .map(|count| crate::pagination::page_count(count, self.state.limit.get()))
    }

    pub fn representation(&self) -> Vec<(String, String)> {
        self.state.representation()
    }

    /// `path?query` of the current state.
    pub fn location(&self) -> String {
        match self.state.to_query_string() {
            Ok(query) => format!("{}?{query}", self.path),
            Err(err) => {
                log::error!("Failed to serialize query state: {err}");
                self.path.clone()
            }
        }
    }

    fn commit(&mut self) {
        let location = self.location();
        if let Some(sink) = self.sink.as_mut() {
            sink.replace(&location);
        }
    }

    /// Sets the free-text search term. The page index is left alone: the
    /// owning view decides whether to go back to page one.
    pub fn set_query(&mut self, text: &str) {
        self.state.q = text.to_string();
        self.commit();
    }

    /// Sets the search term and returns to the first page in one history
    /// entry.
    pub fn search(&mut self, text: &str) {
        self.state.q = text.to_string();
        self.state.offset = 0;
        self.commit();
    }

    fn accepts(&self, page: u64) -> bool {
        page >= 1 && self.page_count().is_none_or(|count| page <= count)
    }

    /// Moves `delta` pages from the current one, which is clamped to the last
    /// known page first. Returns `false`, leaving the state untouched, when the
    /// target falls outside the known pages.
    pub fn step_page(&mut self, delta: i64) -> bool {
        let current = self.state.current_page();
        let current = self.page_count().map_or(current, |count| current.min(count));
        let target = current.checked_add_signed(delta).unwrap_or(0);
        self.goto_page(target)
    }

    /// Jumps to the one-based `page`. Returns `false`, leaving the state
    /// untouched, when the page is out of range.
    pub fn goto_page(&mut self, page: u64) -> bool {
        if !self.accepts(page) {
            log::debug!("Ignoring jump to page {page} on {}", self.path);
            return false;
        }
        let Ok(page) = PageNumber::new(page) else {
            return false;
        };

        self.state.offset = self.state.offset_for(page);
        self.commit();
        true
    }

    /// Replaces the active filters and returns to the first page.
    pub fn set_filters(&mut self, filters: Filters) {
        self.state.filters = filters
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();
        self.state.offset = 0;
        self.commit();
    }

    /// Changes the page size and returns to the first page.
    pub fn set_limit(&mut self, limit: PageSize) {
        self.state.limit = limit;
        self.state.offset = 0;
        self.commit();
    }

    /// Clears search and filters and restores default paging.
    pub fn reset(&mut self) {
        self.state = QueryState::new(self.default_limit);
        self.commit();
    }

    /// Built-in tabs followed by the user's saved tabs.
    pub fn available_tabs(&self) -> Vec<FilterTab> {
        self.tabs
            .as_ref()
            .map(|tabs| tabs.builtin.iter().chain(&tabs.saved).cloned().collect())
            .unwrap_or_default()
    }

    /// Name of the tab whose filters equal the active filters.
    pub fn active_tab(&self) -> Option<String> {
        if self.state.filters.is_empty() {
            return None;
        }
        self.available_tabs()
            .into_iter()
            .find(|tab| same_filters(&tab.filters, &self.state.filters))
            .map(|tab| tab.name)
    }

    /// Applies the filters of tab `name`. Unknown names are ignored.
    pub fn set_tab(&mut self, name: &str) -> bool {
        let Some(tab) = self
            .available_tabs()
            .into_iter()
            .find(|tab| tab.name == name)
        else {
            return false;
        };

        self.state.q.clear();
        self.set_filters(tab.filters);
        true
    }

    /// Saves the active filters as a new removable tab.
    pub fn save_tab(&mut self, name: &str) -> Result<(), TabError> {
        let name = TabName::new(name).map_err(|_| TabError::EmptyName)?;
        if self.state.filters.is_empty() {
            return Err(TabError::NoFilters);
        }
        let exists = self
            .available_tabs()
            .iter()
            .any(|tab| tab.name == name.as_str());
        let tabs = self.tabs.as_mut().ok_or(TabError::Unsupported)?;
        if exists {
            return Err(TabError::Duplicate(name.into_inner()));
        }

        tabs.saved
            .push(FilterTab::saved(name.as_str(), self.state.filters.clone()));
        if let Err(err) = tabs.store.save(&tabs.saved) {
            log::error!("Failed to persist saved tabs: {err}");
        }
        Ok(())
    }

    /// Removes a saved tab. Built-in and unknown tabs are left alone.
    pub fn remove_tab(&mut self, name: &str) -> bool {
        let Some(tabs) = self.tabs.as_mut() else {
            return false;
        };
        let before = tabs.saved.len();
        tabs.saved.retain(|tab| tab.name != name);
        if tabs.saved.len() == before {
            return false;
        }

        if let Err(err) = tabs.store.save(&tabs.saved) {
            log::error!("Failed to persist saved tabs: {err}");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::controller::tabs::{InMemoryTabStore, order_tabs};
    use crate::query::FilterValue;

    fn limit(value: u64) -> PageSize {
        PageSize::new(value).unwrap()
    }

    fn recording(controller: QueryController) -> (QueryController, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink_log = Rc::clone(&log);
        let controller =
            controller.with_sink(move |location: &str| sink_log.borrow_mut().push(location.into()));
        (controller, log)
    }

    #[test]
    fn goto_page_updates_offset_and_replaces_location() {
        let (mut controller, log) = recording(QueryController::new("/orders", limit(15)));
        controller.observe_count(100);

        assert!(controller.goto_page(3));

        assert_eq!(controller.state().offset, 30);
        assert_eq!(log.borrow().as_slice(), ["/orders?offset=30&limit=15"]);
    }

    #[test]
    fn out_of_range_pages_leave_state_untouched() {
        let (mut controller, log) = recording(QueryController::new("/orders", limit(15)));
        controller.observe_count(100);

        assert!(!controller.goto_page(0));
        assert!(!controller.goto_page(8));
        assert!(!controller.step_page(-1));

        assert_eq!(controller.state().offset, 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unknown_count_only_checks_lower_bound() {
        let mut controller = QueryController::new("/orders", limit(10));

        assert!(controller.goto_page(50));
        assert_eq!(controller.state().offset, 490);
    }

    #[test]
    fn step_page_moves_relative_to_current_page() {
        let mut controller = QueryController::new("/customers", limit(15));
        controller.observe_count(45);

        assert!(controller.step_page(1));
        assert!(controller.step_page(1));
        assert!(!controller.step_page(1));
        assert_eq!(controller.state().current_page(), 3);

        assert!(controller.step_page(-2));
        assert_eq!(controller.state().offset, 0);
    }

    #[test]
    fn step_page_from_past_the_end_starts_at_the_last_page() {
        let mut state = QueryState::new(limit(10));
        state.offset = 900;
        let mut controller = QueryController::with_state("/orders", limit(10), state);
        controller.observe_count(20);

        assert!(!controller.step_page(1));
        assert_eq!(controller.state().offset, 900);

        assert!(controller.step_page(-1));
        assert_eq!(controller.state().offset, 0);
    }

    #[test]
    fn search_commits_query_and_first_page_together() {
        let mut state = QueryState::new(limit(15));
        state.offset = 45;
        let (mut controller, log) =
            recording(QueryController::with_state("/orders", limit(15), state));

        controller.search("boots");

        assert_eq!(controller.state().offset, 0);
        assert_eq!(log.borrow().as_slice(), ["/orders?offset=0&limit=15&q=boots"]);
    }

    #[test]
    fn set_filters_returns_to_first_page_and_drops_empty_values() {
        let mut controller = QueryController::new("/orders", limit(15));
        controller.observe_count(100);
        controller.goto_page(4);

        controller.set_filters(Filters::from([
            ("status".to_string(), FilterValue::from(["pending"])),
            ("region_id".to_string(), FilterValue::from("")),
        ]));

        assert_eq!(controller.state().offset, 0);
        assert_eq!(controller.state().filters.len(), 1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut controller = QueryController::new("/orders", limit(15));
        controller.set_query("abc");
        controller.set_limit(limit(50));
        controller.set_filters(Filters::from([(
            "status".to_string(),
            FilterValue::from("pending"),
        )]));

        controller.reset();

        assert_eq!(controller.state(), &QueryState::new(limit(15)));
    }

    #[test]
    fn additional_parameters_stay_out_of_the_location() {
        let controller = QueryController::new("/orders", limit(15))
            .with_additional(vec![("expand".to_string(), "customer".to_string())]);

        assert_eq!(controller.location(), "/orders?offset=0&limit=15");
        assert!(
            controller
                .fetch_query()
                .to_params()
                .contains(&("expand".to_string(), "customer".to_string()))
        );
    }

    #[test]
    fn set_tab_applies_builtin_filters() {
        let mut controller = QueryController::new("/orders", limit(15))
            .with_tabs(order_tabs(), InMemoryTabStore::default());
        controller.set_query("jane");

        assert!(controller.set_tab("complete"));

        assert_eq!(controller.active_tab().as_deref(), Some("complete"));
        assert!(controller.state().q.is_empty());
        assert!(!controller.set_tab("missing"));
    }

    #[test]
    fn save_and_remove_user_tabs() {
        let store = Rc::new(InMemoryTabStore::default());
        let mut controller = QueryController::new("/orders", limit(15))
            .with_tabs(order_tabs(), SharedStore(Rc::clone(&store)));

        assert_eq!(controller.save_tab("mine"), Err(TabError::NoFilters));

        controller.set_filters(Filters::from([(
            "status".to_string(),
            FilterValue::from(["archived"]),
        )]));
        assert_eq!(controller.save_tab("  "), Err(TabError::EmptyName));
        assert_eq!(
            controller.save_tab("complete"),
            Err(TabError::Duplicate("complete".to_string()))
        );
        assert_eq!(controller.save_tab("archived"), Ok(()));
        assert_eq!(controller.active_tab().as_deref(), Some("archived"));
        assert_eq!(store.tabs().len(), 1);

        assert!(!controller.remove_tab("complete"));
        assert!(controller.remove_tab("archived"));
        assert!(store.tabs().is_empty());
        assert_eq!(controller.available_tabs().len(), 2);
    }

    #[test]
    fn tabs_are_unsupported_without_a_store() {
        let mut controller = QueryController::new("/customers", limit(15));
        controller.set_filters(Filters::from([(
            "has_account".to_string(),
            FilterValue::from("true"),
        )]));

        assert_eq!(controller.save_tab("accounts"), Err(TabError::Unsupported));
        assert!(controller.available_tabs().is_empty());
    }

    struct SharedStore(Rc<InMemoryTabStore>);

    impl TabStore for SharedStore {
        fn load(&self) -> Result<Vec<FilterTab>, tabs::TabStoreError> {
            self.0.load()
        }

        fn save(&self, tabs: &[FilterTab]) -> Result<(), tabs::TabStoreError> {
            self.0.save(tabs)
        }
    }
}
