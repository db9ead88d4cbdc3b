//! Page math shared by every paged list.

use serde::Serialize;

/// Number of pages needed to show `count` rows at `limit` rows per page.
///
/// Never returns less than one page, and a zero `limit` is treated as one
/// row per page.
pub fn page_count(count: u64, limit: u64) -> u64 {
    count.div_ceil(limit.max(1)).max(1)
}

/// Derived view of where the current page sits in the remote result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// Total remote rows matching the current filters.
    pub count: u64,
    pub offset: u64,
    pub page_size: u64,
    /// Always within `1..=page_count`.
    pub current_page: u64,
    pub page_count: u64,
    /// One-based index of the first row shown, `0` when nothing matched.
    pub first_item: u64,
    /// One-based index of the last row shown.
    pub last_item: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageDescriptor {
    pub fn new(count: u64, offset: u64, limit: u64, rows_on_page: usize) -> Self {
        let limit = limit.max(1);
        let page_count = page_count(count, limit);
        let current_page = (offset / limit).saturating_add(1).clamp(1, page_count);

        Self {
            count,
            offset,
            page_size: limit,
            current_page,
            page_count,
            first_item: if count > 0 { offset.saturating_add(1) } else { 0 },
            last_item: offset.saturating_add(rows_on_page as u64),
            has_next: current_page < page_count,
            has_prev: current_page > 1,
        }
    }

    /// Whether `page` is a valid jump target.
    pub fn contains(&self, page: u64) -> bool {
        (1..=self.page_count).contains(&page)
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Rows of one page plus the windowed page list rendered under a table.
/// `None` entries in `pages` mark a gap.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
        }
    }

    /// Builds the window from a [`PageDescriptor`].
    pub fn from_descriptor(items: Vec<T>, descriptor: &PageDescriptor) -> Self {
        Self::new(
            items,
            descriptor.current_page as usize,
            descriptor.page_count as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_has_a_floor_of_one() {
        assert_eq!(page_count(0, 15), 1);
        assert_eq!(page_count(1, 15), 1);
        assert_eq!(page_count(15, 15), 1);
        assert_eq!(page_count(16, 15), 2);
        assert_eq!(page_count(100, 15), 7);
    }

    #[test]
    fn zero_limit_does_not_divide_by_zero() {
        assert_eq!(page_count(5, 0), 5);
        let descriptor = PageDescriptor::new(5, 0, 0, 1);
        assert_eq!(descriptor.page_size, 1);
        assert_eq!(descriptor.page_count, 5);
    }

    #[test]
    fn descriptor_reports_visible_range() {
        let descriptor = PageDescriptor::new(100, 15, 15, 15);

        assert_eq!(descriptor.current_page, 2);
        assert_eq!(descriptor.first_item, 16);
        assert_eq!(descriptor.last_item, 30);
        assert!(descriptor.has_prev);
        assert!(descriptor.has_next);
    }

    #[test]
    fn empty_result_has_single_page_without_neighbours() {
        let descriptor = PageDescriptor::new(0, 0, 15, 0);

        assert_eq!(descriptor.page_count, 1);
        assert_eq!(descriptor.current_page, 1);
        assert_eq!(descriptor.first_item, 0);
        assert!(!descriptor.has_next);
        assert!(!descriptor.has_prev);
    }

    #[test]
    fn maximal_offset_does_not_overflow() {
        let descriptor = PageDescriptor::new(10, u64::MAX, 15, 0);

        assert_eq!(descriptor.page_count, 1);
        assert_eq!(descriptor.current_page, 1);
        assert!(!descriptor.has_next);
        assert!(!descriptor.has_prev);
    }

    #[test]
    fn offset_past_the_end_is_clamped_to_last_page() {
        let descriptor = PageDescriptor::new(20, 900, 10, 0);

        assert_eq!(descriptor.current_page, 2);
        assert!(!descriptor.has_next);
    }

    #[test]
    fn pages_window_inserts_gaps() {
        let paginated = Paginated::new(Vec::<()>::new(), 10, 20);

        assert_eq!(
            paginated.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn pages_window_without_gaps_for_short_lists() {
        let paginated = Paginated::new(vec![1, 2, 3], 1, 3);

        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(paginated.page, 1);
    }
}
