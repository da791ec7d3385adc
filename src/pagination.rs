//! Client-side pagination over an already filtered product sequence.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;
/// Page sizes offered by the pagination control.
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 20];

/// Returns the slice shown on a 1-based `page` of `per_page` items.
///
/// Pages past the end yield an empty slice. Page `0` is treated as page `1`.
pub fn window<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items; zero for an empty list.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Page numbers to render: both edges plus the neighbourhood of the current
/// page, with `None` marking elided ranges.
fn page_strip(
    last_page: usize,
    current_page: usize,
    edge: usize,
    left_current: usize,
    right_current: usize,
) -> Vec<Option<usize>> {
    if last_page == 0 {
        return vec![];
    }
    // Pages past the end still link back to every real page.
    let current_page = current_page.min(last_page);

    let mut pages = Vec::new();

    let left_end = (1 + edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One rendered page of items together with navigation data.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub per_page: usize,
    /// Number of items across all pages.
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, per_page: usize, total: usize) -> Self {
        let current_page = current_page.max(1);
        let pages = page_strip(total_pages(total, per_page), current_page, 2, 2, 2);

        Self {
            items,
            pages,
            page: current_page,
            per_page,
            total,
        }
    }
}
