//! Template payload shared by every paged list page.

use serde::Serialize;

use crate::controller::QueryController;
use crate::controller::tabs::FilterTab;
use crate::list_view::PagedListView;
use crate::pagination::{PageDescriptor, Paginated};
use crate::query::Filters;
use crate::widgets::{page_label, range_label};

/// A tab as shown in the tab bar.
#[derive(Debug, Serialize)]
pub struct TabView {
    pub name: String,
    pub removable: bool,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    /// Path the list is mounted at, e.g. `/orders`.
    pub path: String,
    /// Query string of the committed state, without the leading `?`.
    pub query: String,
    /// Committed state as pairs, carried by the GET forms of the page.
    pub hidden: Vec<(String, String)>,
    pub rows: Paginated<T>,
    pub descriptor: PageDescriptor,
    pub range_label: String,
    pub page_label: String,
    pub search: String,
    pub filters: Filters,
    pub tabs: Vec<TabView>,
    pub active_tab: Option<String>,
    /// Set when the backend fetch failed.
    pub alert: Option<String>,
}

impl<T> ListPageData<T> {
    pub fn new(
        controller: &QueryController,
        view: PagedListView<T>,
        title: &str,
        alert: Option<String>,
    ) -> Self {
        let descriptor = view.descriptor(controller);
        let active_tab = controller.active_tab();
        let tabs = controller
            .available_tabs()
            .into_iter()
            .map(|FilterTab { name, removable, .. }| TabView {
                active: active_tab.as_deref() == Some(name.as_str()),
                name,
                removable,
            })
            .collect();
        let location = controller.location();
        let query = location
            .split_once('?')
            .map(|(_, query)| query.to_string())
            .unwrap_or_default();

        Self {
            path: controller.path().to_string(),
            query,
            hidden: controller.representation(),
            range_label: range_label(&descriptor, title),
            page_label: page_label(&descriptor),
            rows: Paginated::from_descriptor(view.into_rows(), &descriptor),
            descriptor,
            search: controller.state().q.clone(),
            filters: controller.state().filters.clone(),
            tabs,
            active_tab,
            alert,
        }
    }

    /// Applies `f` to every row, keeping the paging data.
    pub fn map_rows<U>(self, f: impl FnMut(T) -> U) -> ListPageData<U> {
        ListPageData {
            path: self.path,
            query: self.query,
            hidden: self.hidden,
            rows: Paginated {
                items: self.rows.items.into_iter().map(f).collect(),
                pages: self.rows.pages,
                page: self.rows.page,
            },
            descriptor: self.descriptor,
            range_label: self.range_label,
            page_label: self.page_label,
            search: self.search,
            filters: self.filters,
            tabs: self.tabs,
            active_tab: self.active_tab,
            alert: self.alert,
        }
    }
}
