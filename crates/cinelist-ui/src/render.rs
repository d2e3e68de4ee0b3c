//! Plain-text rendering of a list page.

use std::fmt::Write;

use cinelist_core::Record;
use cinelist_engine::{page_path, ListSnapshot, PageLink};

use crate::model::PageKind;

/// Render the current page: a header, one row per record and the page list.
pub fn render_page(
    kind: PageKind,
    snapshot: &ListSnapshot,
    page: &[Record],
    link_siblings: usize,
) -> String {
    let pagination = &snapshot.pagination;
    let mut out = String::new();

    let _ = write!(
        out,
        "{}: {} of {}",
        kind, snapshot.visible_count, snapshot.total_count
    );
    if let Some(sort) = &snapshot.sort {
        let _ = write!(out, " (sort: {})", sort);
    }

    if page.is_empty() {
        out.push_str("\n  No results.");
    }
    for (offset, record) in page.iter().enumerate() {
        let _ = write!(out, "\n{:>3}. {}", pagination.start + offset + 1, record.title);
        if let Some(grade) = record.grade {
            let _ = write!(out, "  {}", grade);
        }
        if let Some(date) = &record.date {
            let _ = write!(out, "  {}", date);
        }
    }

    if pagination.shows_controls() {
        let links: Vec<String> = pagination
            .page_links(link_siblings)
            .into_iter()
            .map(|link| match link {
                PageLink::Page { number, current: true } => format!("[{}]", number),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Gap => "...".to_string(),
            })
            .collect();
        let _ = write!(
            out,
            "\nPage {} of {}: {}",
            pagination.current_page,
            pagination.num_pages,
            links.join(" ")
        );
    }
    if let Some(prev) = pagination.prev_page {
        let _ = write!(out, "\nPrev: {}", page_path(kind.base_path(), prev));
    }
    if let Some(next) = pagination.next_page {
        let _ = write!(out, "\nNext: {}", page_path(kind.base_path(), next));
    }

    out
}
