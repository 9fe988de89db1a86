use std::ops::Range;

use super::{TicketPage, TicketQuery, PAGE_SIZE};
use crate::ticket::Ticket;

/// Filter, count and paginate a ticket collection.
///
/// Steps run in a fixed order: priority filter, then text search, then
/// counting, then slicing the requested page. A page past the end yields an
/// empty slice.
pub fn run_query(tickets: &[Ticket], query: &TicketQuery) -> TicketPage {
    let needle = query.search.to_lowercase();

    let matching: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| query.priority.matches(t))
        .filter(|t| needle.is_empty() || t.search_haystack().contains(&needle))
        .collect();

    let overall_results = matching.len();
    let pages_number = overall_results.div_ceil(PAGE_SIZE);

    let range = page_range(query.page, overall_results);
    let tickets = matching[range].iter().map(|t| (*t).clone()).collect();

    TicketPage {
        tickets,
        pages_number,
        overall_results,
    }
}

/// Index range of `page` within a collection of `len` items.
///
/// Bounds are `(page-1)*PAGE_SIZE .. page*PAGE_SIZE`. Negative bounds count
/// back from the end of the collection and every bound is clamped to
/// `0..=len`, so a zero or negative page never panics: page 0 is always
/// empty, while page -1 selects the window `PAGE_SIZE` items before the
/// last page-sized window.
fn page_range(page: i64, len: usize) -> Range<usize> {
    let size = PAGE_SIZE as i64;
    let start = resolve_index(page.saturating_sub(1).saturating_mul(size), len);
    let end = resolve_index(page.saturating_mul(size), len);
    if start >= end {
        0..0
    } else {
        start..end
    }
}

fn resolve_index(index: i64, len: usize) -> usize {
    let len = len as i64;
    let resolved = if index < 0 {
        len.saturating_add(index).max(0)
    } else {
        index.min(len)
    };
    resolved as usize
}
