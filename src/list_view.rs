//! Server-side paginated list bound to a remote data source.
//!
//! The view only ever holds the rows of the current page. Paging requests
//! are validated here and forwarded to the [`QueryController`], which owns
//! the query state.

use serde::{Deserialize, Serialize};

use crate::controller::QueryController;
use crate::pagination::PageDescriptor;
use crate::query::FetchQuery;

/// One page of remote rows and the total matching the query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: u64,
}

/// A fetch started by [`PagedListView::begin_fetch`]. Responses must be
/// handed back with the same `generation`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: FetchQuery,
}

/// Effect of committing search text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEffect {
    /// Non-empty text was applied and the list went back to page one.
    Searched,
    /// Empty text reset search, filters and paging.
    Reset,
}

#[derive(Debug)]
pub struct PagedListView<T> {
    rows: Vec<T>,
    count: u64,
    is_loading: bool,
    generation: u64,
}

impl<T> Default for PagedListView<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            count: 0,
            is_loading: false,
            generation: 0,
        }
    }
}

impl<T> PagedListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Starts a fetch for the controller's current query. Any fetch still in
    /// flight is superseded: its response will be discarded.
    pub fn begin_fetch(&mut self, controller: &QueryController) -> FetchRequest {
        self.generation += 1;
        self.is_loading = true;
        FetchRequest {
            generation: self.generation,
            query: controller.fetch_query(),
        }
    }

    /// Installs a response. Returns `false` and changes nothing when the
    /// response belongs to a superseded fetch.
    pub fn apply(
        &mut self,
        controller: &mut QueryController,
        generation: u64,
        response: ListResponse<T>,
    ) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale response for {} (generation {generation}, latest {})",
                controller.path(),
                self.generation
            );
            return false;
        }

        self.rows = response.data;
        self.count = response.count;
        self.is_loading = false;
        controller.observe_count(response.count);
        true
    }

    /// Marks the latest fetch as failed, keeping the previously shown rows.
    pub fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.is_loading = false;
        true
    }

    pub fn descriptor(&self, controller: &QueryController) -> PageDescriptor {
        let state = controller.state();
        PageDescriptor::new(self.count, state.offset, state.limit.get(), self.rows.len())
    }

    pub fn has_next(&self, controller: &QueryController) -> bool {
        self.descriptor(controller).has_next
    }

    pub fn has_prev(&self, controller: &QueryController) -> bool {
        self.descriptor(controller).has_prev
    }

    /// Advances one page; a no-op on the last page.
    pub fn next_page(&self, controller: &mut QueryController) -> bool {
        self.has_next(controller) && controller.step_page(1)
    }

    /// Goes back one page; a no-op on the first page.
    pub fn prev_page(&self, controller: &mut QueryController) -> bool {
        self.has_prev(controller) && controller.step_page(-1)
    }

    /// Jumps to `page` when it lies within `1..=page_count`; anything else is
    /// silently ignored.
    pub fn goto_page(&self, controller: &mut QueryController, page: u64) -> bool {
        if !self.descriptor(controller).contains(page) {
            log::debug!("Rejected jump to page {page} on {}", controller.path());
            return false;
        }
        controller.goto_page(page)
    }

    /// Commits search text. New text goes back to page one but keeps the
    /// filters; clearing the text resets the whole list.
    pub fn search(&self, controller: &mut QueryController, text: &str) -> SearchEffect {
        let text = text.trim();
        if text.is_empty() {
            controller.reset();
            SearchEffect::Reset
        } else {
            controller.search(text);
            SearchEffect::Searched
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::domain::types::PageSize;
    use crate::query::{FilterValue, Filters, QueryState};

    fn controller(limit: u64) -> QueryController {
        QueryController::new("/orders", PageSize::new(limit).unwrap())
    }

    fn controller_at(offset: u64, limit: u64) -> QueryController {
        let limit = PageSize::new(limit).unwrap();
        let mut state = QueryState::new(limit);
        state.offset = offset;
        QueryController::with_state("/orders", limit, state)
    }

    fn load(view: &mut PagedListView<u64>, controller: &mut QueryController, count: u64) {
        let request = view.begin_fetch(controller);
        let offset = request.query.state.offset;
        let limit = request.query.state.limit.get();
        let data = (offset..(offset + limit).min(count)).collect();
        assert!(view.apply(controller, request.generation, ListResponse { data, count }));
    }

    #[test]
    fn offset_past_the_end_steps_back_from_the_last_page() {
        let mut controller = controller_at(900, 10);
        let mut view = PagedListView::new();
        load(&mut view, &mut controller, 20);

        let descriptor = view.descriptor(&controller);
        assert_eq!(descriptor.current_page, 2);
        assert!(!view.next_page(&mut controller));

        assert!(view.prev_page(&mut controller));
        assert_eq!(controller.state().offset, 0);
    }

    #[test]
    fn search_replaces_history_once() {
        let history = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&history);
        let mut controller = controller_at(30, 15)
            .with_sink(move |location: &str| sink.borrow_mut().push(location.to_string()));
        let view = PagedListView::<u64>::new();

        assert_eq!(view.search(&mut controller, " shoes "), SearchEffect::Searched);

        assert_eq!(
            history.borrow().as_slice(),
            ["/orders?offset=0&limit=15&q=shoes"]
        );
    }

    #[test]
    fn stepping_through_all_pages() {
        let mut controller = controller(15);
        let mut view = PagedListView::new();
        load(&mut view, &mut controller, 100);

        let descriptor = view.descriptor(&controller);
        assert_eq!(descriptor.page_count, 7);
        assert_eq!(descriptor.current_page, 1);

        for _ in 0..6 {
            assert!(view.next_page(&mut controller));
            load(&mut view, &mut controller, 100);
        }

        let descriptor = view.descriptor(&controller);
        assert_eq!(descriptor.current_page, 7);
        assert!(!descriptor.has_next);
        assert_eq!(view.rows().len(), 10);

        assert!(!view.next_page(&mut controller));
        assert_eq!(controller.state().offset, 90);
    }

    #[test]
    fn prev_page_is_a_noop_on_first_page() {
        let mut controller = controller(15);
        let mut view = PagedListView::new();
        load(&mut view, &mut controller, 100);

        assert!(!view.prev_page(&mut controller));
        assert_eq!(controller.state().offset, 0);
    }

    #[test]
    fn goto_page_ignores_out_of_range_targets() {
        let mut controller = controller(15);
        let mut view = PagedListView::new();
        load(&mut view, &mut controller, 100);
        let before = controller.state().clone();

        assert!(!view.goto_page(&mut controller, 0));
        assert!(!view.goto_page(&mut controller, 8));
        assert_eq!(controller.state(), &before);

        assert!(view.goto_page(&mut controller, 7));
        assert_eq!(controller.state().offset, 90);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut controller = controller(10);
        let mut view = PagedListView::new();

        let slow = view.begin_fetch(&controller);
        let fast = view.begin_fetch(&controller);

        assert!(view.apply(
            &mut controller,
            fast.generation,
            ListResponse {
                data: vec![1, 2],
                count: 2
            }
        ));
        assert!(!view.apply(
            &mut controller,
            slow.generation,
            ListResponse {
                data: vec![9; 10],
                count: 500
            }
        ));

        assert_eq!(view.rows(), &[1, 2]);
        assert_eq!(controller.count(), Some(2));
    }

    #[test]
    fn failed_fetch_keeps_previous_rows() {
        let mut controller = controller(10);
        let mut view = PagedListView::new();
        load(&mut view, &mut controller, 3);

        let request = view.begin_fetch(&controller);
        assert!(view.is_loading());
        assert!(view.fail(request.generation));

        assert!(!view.is_loading());
        assert_eq!(view.rows(), &[0, 1, 2]);
    }

    #[test]
    fn search_text_resets_page_but_keeps_filters() {
        let mut controller = controller(15);
        let mut view = PagedListView::new();
        controller.set_filters(Filters::from([(
            "status".to_string(),
            FilterValue::from("pending"),
        )]));
        load(&mut view, &mut controller, 100);
        view.goto_page(&mut controller, 4);

        assert_eq!(view.search(&mut controller, "abc"), SearchEffect::Searched);

        assert_eq!(controller.state().q, "abc");
        assert_eq!(controller.state().offset, 0);
        assert_eq!(controller.state().filters.len(), 1);
    }

    #[test]
    fn clearing_search_resets_everything() {
        let mut controller = controller(15);
        let mut view = PagedListView::new();
        controller.set_filters(Filters::from([(
            "status".to_string(),
            FilterValue::from("pending"),
        )]));
        load(&mut view, &mut controller, 100);
        view.search(&mut controller, "abc");
        view.goto_page(&mut controller, 3);

        assert_eq!(view.search(&mut controller, ""), SearchEffect::Reset);

        assert!(controller.state().q.is_empty());
        assert!(controller.state().filters.is_empty());
        assert_eq!(controller.state().current_page(), 1);
    }
}
