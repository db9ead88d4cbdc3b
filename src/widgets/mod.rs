//! Input widgets mounted under every paged table, and the labels they show.

use crate::pagination::PageDescriptor;

pub mod page_input;
pub mod search_input;

pub use page_input::{PageInput, PageInputEvent, PageInputState};
pub use search_input::SearchInput;

/// `"16-30 of 100 orders"`.
pub fn range_label(descriptor: &PageDescriptor, title: &str) -> String {
    format!(
        "{}-{} of {} {title}",
        descriptor.first_item, descriptor.last_item, descriptor.count
    )
}

/// `"2 of 7"`.
pub fn page_label(descriptor: &PageDescriptor) -> String {
    format!("{} of {}", descriptor.current_page, descriptor.page_count)
}
