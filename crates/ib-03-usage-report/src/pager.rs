//! Fixed-size pagination.
//!
//! `current_page` is taken as requested and never clamped: a page past the
//! end selects no rows. The link window is computed against the clamped page
//! so the pager still renders sensibly for an out-of-range request.

use serde::Serialize;

/// Number of numbered links shown around the current page.
const LINK_WINDOW: usize = 9;

/// Slices a result set into pages of `page_size` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    total: usize,
    page_size: usize,
    current_page: usize,
}

impl Pager {
    /// Create a pager. A `page_size` of zero is treated as one.
    pub fn new(total: usize, page_size: usize, current_page: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            current_page,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based page index as requested.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages; zero for an empty result set.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// True when the requested page holds at least one row.
    pub fn is_in_range(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0 && self.total_pages() > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages()
    }

    /// The rows of the current page, or an empty slice when out of range.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Some(start) = self.current_page.checked_mul(self.page_size) else {
            return &[];
        };
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Navigation links; empty when everything fits on one page.
    pub fn links(&self) -> PagerLinks {
        let total_pages = self.total_pages();
        if total_pages <= 1 {
            return PagerLinks::default();
        }

        let current = self.current_page.min(total_pages - 1);
        let (first_in_window, last_in_window) = link_window(current, total_pages);

        let pages = (first_in_window..=last_in_window)
            .map(|page| PageLink {
                page,
                is_current: page == current,
            })
            .collect();

        PagerLinks {
            first: (current > 0).then_some(0),
            previous: current.checked_sub(1),
            pages,
            next: (current + 1 < total_pages).then_some(current + 1),
            last: (current + 1 < total_pages).then_some(total_pages - 1),
            ellipsis_before: first_in_window > 0,
            ellipsis_after: last_in_window + 1 < total_pages,
        }
    }
}

/// Inclusive zero-based window of at most `LINK_WINDOW` pages centred on `current`.
fn link_window(current: usize, total_pages: usize) -> (usize, usize) {
    let middle = LINK_WINDOW.div_ceil(2);
    let mut first = (current + 1) as i64 - middle as i64 + 1;
    let mut last = (current + 1) as i64 + LINK_WINDOW as i64 - middle as i64;
    let total = total_pages as i64;

    if last > total {
        first += total - last;
        last = total;
    }
    if first <= 0 {
        last += 1 - first;
        first = 1;
    }
    let last = last.min(total);

    ((first - 1) as usize, (last - 1) as usize)
}

/// One numbered pager link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: usize,
    pub is_current: bool,
}

/// Everything needed to render a pager control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PagerLinks {
    pub first: Option<usize>,
    pub previous: Option<usize>,
    pub pages: Vec<PageLink>,
    pub next: Option<usize>,
    pub last: Option<usize>,
    pub ellipsis_before: bool,
    pub ellipsis_after: bool,
}

impl PagerLinks {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
