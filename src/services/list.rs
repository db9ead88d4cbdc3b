//! Request flow shared by every paged list.
//!
//! A list request carries the committed query state plus at most one action
//! in a reserved key. Actions are applied through the list's
//! [`QueryController`] and answered with a redirect to the new location;
//! plain requests fetch the current page.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::controller::{HistorySink, QueryController};
use crate::domain::types::PageSize;
use crate::dto::list::ListPageData;
use crate::list_view::{ListResponse, PagedListView};
use crate::query::url::parse_pairs;
use crate::query::{FetchQuery, QueryState};
use crate::repository::errors::RepositoryResult;
use crate::services::ServiceResult;

/// Raw page number typed into the page input.
pub const GOTO_KEY: &str = "goto";
/// Search text committed by the search input.
pub const SEARCH_ACTION_KEY: &str = "search";
pub const RESET_KEY: &str = "reset";
pub const TAB_KEY: &str = "tab";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListAction {
    Goto(String),
    Search(String),
    Reset,
    Tab(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    pub state: QueryState,
    pub action: Option<ListAction>,
}

impl ListRequest {
    /// Splits a request query string into the committed state and the action.
    /// When several action keys are present the last one wins.
    pub fn parse(query_string: &str, default_limit: PageSize) -> ServiceResult<Self> {
        let mut action = None;
        let mut pairs = Vec::new();

        for (key, value) in parse_pairs(query_string)? {
            match key.as_str() {
                GOTO_KEY => action = Some(ListAction::Goto(value)),
                SEARCH_ACTION_KEY => action = Some(ListAction::Search(value)),
                RESET_KEY if value == "1" || value == "true" => action = Some(ListAction::Reset),
                RESET_KEY => {}
                TAB_KEY => action = Some(ListAction::Tab(value)),
                _ => pairs.push((key, value)),
            }
        }

        Ok(Self {
            state: QueryState::from_pairs(pairs, default_limit),
            action,
        })
    }
}

/// Records the last location the controller replaced; on the server the
/// history entry is replaced by redirecting there.
#[derive(Clone, Debug, Default)]
pub struct RedirectSink(Rc<RefCell<Option<String>>>);

impl RedirectSink {
    pub fn take(&self) -> Option<String> {
        self.0.borrow_mut().take()
    }
}

impl HistorySink for RedirectSink {
    fn replace(&mut self, location: &str) {
        self.0.replace(Some(location.to_string()));
    }
}

#[derive(Debug)]
pub enum ListOutcome<T> {
    /// Answer with `303 See Other` to this location.
    Redirect(String),
    Page(ListPageData<T>),
}

impl<T> ListOutcome<T> {
    pub fn map_rows<U>(self, f: impl FnMut(T) -> U) -> ListOutcome<U> {
        match self {
            ListOutcome::Redirect(location) => ListOutcome::Redirect(location),
            ListOutcome::Page(page) => ListOutcome::Page(page.map_rows(f)),
        }
    }
}

/// Applies `action` to the list or, without one, fetches and renders the
/// current page. `title` names the rows in labels and log lines.
pub async fn run_list<T, F, Fut>(
    controller: QueryController,
    action: Option<ListAction>,
    title: &str,
    fetch: F,
) -> ListOutcome<T>
where
    F: FnOnce(FetchQuery) -> Fut,
    Fut: Future<Output = RepositoryResult<ListResponse<T>>>,
{
    let sink = RedirectSink::default();
    let mut controller = controller.with_sink(sink.clone());
    let mut view = PagedListView::new();

    let goto = match action {
        None => None,
        Some(ListAction::Goto(raw)) => Some(raw),
        Some(ListAction::Search(text)) => {
            view.search(&mut controller, &text);
            return redirect(&controller, &sink);
        }
        Some(ListAction::Reset) => {
            controller.reset();
            return redirect(&controller, &sink);
        }
        Some(ListAction::Tab(name)) => {
            if !controller.set_tab(&name) {
                log::debug!("Unknown tab `{name}` on {}", controller.path());
            }
            return redirect(&controller, &sink);
        }
    };

    let request = view.begin_fetch(&controller);
    let alert = match fetch(request.query).await {
        Ok(response) => {
            view.apply(&mut controller, request.generation, response);
            None
        }
        Err(err) => {
            log::error!("Failed to load {title}: {err}");
            view.fail(request.generation);
            Some(format!("Failed to load {title}."))
        }
    };

    if let Some(raw) = goto {
        // A jump is only valid against the freshly fetched count; anything
        // else lands back on the committed page.
        if alert.is_none() {
            match raw.trim().parse::<u64>() {
                Ok(page) => {
                    view.goto_page(&mut controller, page);
                }
                Err(_) => log::debug!("Ignoring page input `{raw}` on {}", controller.path()),
            }
        }
        return redirect(&controller, &sink);
    }

    ListOutcome::Page(ListPageData::new(&controller, view, title, alert))
}

fn redirect<T>(controller: &QueryController, sink: &RedirectSink) -> ListOutcome<T> {
    ListOutcome::Redirect(sink.take().unwrap_or_else(|| controller.location()))
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use super::*;
    use crate::query::FilterValue;
    use crate::repository::errors::RepositoryError;

    fn limit(value: u64) -> PageSize {
        PageSize::new(value).unwrap()
    }

    fn rows(query: &FetchQuery, count: u64) -> ListResponse<u64> {
        let start = query.state.offset.min(count);
        let end = (start + query.state.limit.get()).min(count);
        ListResponse {
            data: (start..end).collect(),
            count,
        }
    }

    fn controller(request: &ListRequest) -> QueryController {
        QueryController::with_state("/orders", limit(15), request.state.clone())
    }

    #[test]
    fn parse_separates_action_from_state() {
        let request =
            ListRequest::parse("offset=30&limit=15&status=pending&goto=5", limit(15)).unwrap();

        assert_eq!(request.action, Some(ListAction::Goto("5".to_string())));
        assert_eq!(request.state.offset, 30);
        assert_eq!(
            request.state.filters.get("status"),
            Some(&FilterValue::from("pending"))
        );
        assert!(!request.state.filters.contains_key(GOTO_KEY));
    }

    #[test]
    fn parse_ignores_reset_without_a_flag() {
        let request = ListRequest::parse("reset=0", limit(15)).unwrap();

        assert_eq!(request.action, None);
        assert!(request.state.filters.is_empty());
    }

    #[actix_web::test]
    async fn renders_the_requested_page() {
        let request = ListRequest::parse("offset=15&limit=15", limit(15)).unwrap();

        let outcome = run_list(controller(&request), None, "orders", |query| {
            ready(Ok(rows(&query, 100)))
        })
        .await;

        let ListOutcome::Page(page) = outcome else {
            panic!("expected a page");
        };
        assert_eq!(page.descriptor.current_page, 2);
        assert_eq!(page.range_label, "16-30 of 100 orders");
        assert_eq!(page.rows.items.first(), Some(&15));
    }

    #[actix_web::test]
    async fn valid_goto_redirects_to_the_page() {
        let request = ListRequest::parse("offset=0&limit=15&goto=7", limit(15)).unwrap();

        let outcome = run_list(controller(&request), request.action, "orders", |query| {
            ready(Ok(rows(&query, 100)))
        })
        .await;

        assert!(matches!(
            outcome,
            ListOutcome::Redirect(location) if location == "/orders?offset=90&limit=15"
        ));
    }

    #[actix_web::test]
    async fn out_of_range_goto_redirects_to_committed_page() {
        for raw in ["8", "0", "abc", ""] {
            let query = format!("offset=30&limit=15&goto={raw}");
            let request = ListRequest::parse(&query, limit(15)).unwrap();

            let outcome = run_list(controller(&request), request.action, "orders", |query| {
                ready(Ok(rows(&query, 100)))
            })
            .await;

            assert!(
                matches!(
                    &outcome,
                    ListOutcome::Redirect(location) if location == "/orders?offset=30&limit=15"
                ),
                "goto={raw}"
            );
        }
    }

    #[actix_web::test]
    async fn search_and_clear_follow_list_semantics() {
        let request =
            ListRequest::parse("offset=45&limit=15&status=pending&search=abc", limit(15)).unwrap();
        let outcome = run_list(
            controller(&request),
            request.action,
            "orders",
            |_query| async { Ok::<_, RepositoryError>(ListResponse::<u64> { data: vec![], count: 0 }) },
        )
        .await;
        assert!(matches!(
            outcome,
            ListOutcome::Redirect(location)
                if location == "/orders?offset=0&limit=15&q=abc&status=pending"
        ));

        let request =
            ListRequest::parse("offset=45&limit=15&q=abc&status=pending&search=", limit(15))
                .unwrap();
        let outcome = run_list(controller(&request), request.action, "orders", |_query| {
            ready(Ok(ListResponse::<u64> {
                data: vec![],
                count: 0,
            }))
        })
        .await;
        assert!(matches!(
            outcome,
            ListOutcome::Redirect(location) if location == "/orders?offset=0&limit=15"
        ));
    }

    #[actix_web::test]
    async fn failed_fetch_renders_empty_page_with_alert() {
        let request = ListRequest::parse("", limit(15)).unwrap();

        let outcome = run_list(controller(&request), None, "orders", |_query| {
            ready(Err::<ListResponse<u64>, _>(RepositoryError::ConnectionError(
                "refused".to_string(),
            )))
        })
        .await;

        let ListOutcome::Page(page) = outcome else {
            panic!("expected a page");
        };
        assert!(page.rows.items.is_empty());
        assert_eq!(page.alert.as_deref(), Some("Failed to load orders."));
    }
}
