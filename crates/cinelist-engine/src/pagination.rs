//! Pagination Calculator
//!
//! Derives page boundaries and sibling page links from a total count, a page
//! size and a requested page. There is always at least one page, so an empty
//! list still renders as "page 1, no results".

use serde::Serialize;

/// Page boundaries for one page of an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number, clamped to `1..=num_pages`.
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    /// Index of the first item on the page.
    pub start: usize,
    /// One past the index of the last item on the page.
    pub end: usize,
    pub num_pages: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

/// A slot in the rendered page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageLink {
    /// Link to a page. `current` marks the page being shown.
    Page { number: usize, current: bool },
    /// Elided run of pages ("…").
    Gap,
}

/// Compute the page window for `current_page`.
///
/// A zero `page_size` is treated as 1 and out-of-range pages are clamped.
pub fn paginate(total_count: usize, page_size: usize, current_page: usize) -> Pagination {
    let page_size = page_size.max(1);
    let num_pages = total_count.div_ceil(page_size).max(1);
    let current_page = current_page.clamp(1, num_pages);

    let start = page_size * (current_page - 1);
    let end = (start + page_size).min(total_count);

    Pagination {
        current_page,
        page_size,
        total_count,
        start,
        end,
        num_pages,
        is_first: current_page == 1,
        is_last: current_page == num_pages,
        prev_page: (current_page > 1).then(|| current_page - 1),
        next_page: (current_page < num_pages).then(|| current_page + 1),
    }
}

impl Pagination {
    /// Whether pagination controls should render at all.
    pub fn shows_controls(&self) -> bool {
        self.num_pages > 1
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Page list with `siblings` pages on each side of the current page.
    ///
    /// The first and last pages are always listed. A gap that would hide a
    /// single page lists that page instead. Empty when controls are hidden.
    pub fn page_links(&self, siblings: usize) -> Vec<PageLink> {
        if !self.shows_controls() {
            return Vec::new();
        }

        let low = self.current_page.saturating_sub(siblings).max(1);
        let high = (self.current_page + siblings).min(self.num_pages);

        let mut numbers = Vec::new();
        numbers.push(1);
        if low > 3 {
            numbers.push(0);
        } else {
            numbers.extend(2..low);
        }
        numbers.extend(low.max(2)..=high);
        if high + 2 < self.num_pages {
            numbers.push(0);
        } else {
            numbers.extend((high + 1).max(2)..self.num_pages);
        }
        if high < self.num_pages {
            numbers.push(self.num_pages);
        }

        numbers
            .into_iter()
            .map(|number| match number {
                0 => PageLink::Gap,
                number => PageLink::Page {
                    number,
                    current: number == self.current_page,
                },
            })
            .collect()
    }
}

/// Static-site path of a page: `{base}/` for page 1, `{base}/page/{n}/` otherwise.
pub fn page_path(base: &str, page: usize) -> String {
    let base = base.trim_end_matches('/');
    if page <= 1 {
        format!("{}/", base)
    } else {
        format!("{}/page/{}/", base, page)
    }
}
