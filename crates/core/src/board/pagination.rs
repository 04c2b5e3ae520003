//! Page-number list for the pagination control

use ticketboard_domain::constants::PAGE_WINDOW_SIZE;
use ticketboard_domain::PageLink;

/// Page links for `current` out of `total_pages`.
///
/// Up to five pages are all shown. Beyond that, a five-page window is
/// centred on the current page (shifted to stay in range) and the first and
/// last pages are always present, with an ellipsis wherever pages are
/// skipped. `current` is clamped into `1..=total_pages`.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages <= PAGE_WINDOW_SIZE {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let half = PAGE_WINDOW_SIZE / 2;
    let end = (current.saturating_sub(half).max(1) + PAGE_WINDOW_SIZE - 1).min(total_pages);
    let start = end + 1 - PAGE_WINDOW_SIZE;

    let mut links = Vec::with_capacity(PAGE_WINDOW_SIZE + 4);
    if start > 1 {
        links.push(PageLink::Page(1));
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links.extend((start..=end).map(PageLink::Page));
    if end < total_pages {
        if end + 1 < total_pages {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page(total_pages));
    }
    links
}
