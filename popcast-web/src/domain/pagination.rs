use popcast_client::Pagination;

/// One slot of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageItem {
    Page(u32),
    Gap,
}

/// Page numbers to show for `current` out of `total`, with gaps for elided runs.
///
/// Up to seven pages are listed in full. Beyond that the first and last pages
/// are always shown together with a window of five pages at the start, five at
/// the end, or three around `current`.
pub(crate) fn page_window(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    if total <= 7 {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = Vec::with_capacity(7);
    if current <= 4 {
        items.extend((1..=5).map(PageItem::Page));
        items.push(PageItem::Gap);
        items.push(PageItem::Page(total));
    } else if current >= total - 3 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Gap);
        items.extend((total - 4..=total).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Gap);
        items.extend((current - 1..=current + 1).map(PageItem::Page));
        items.push(PageItem::Gap);
        items.push(PageItem::Page(total));
    }
    items
}

/// 1-based `(first, last)` item positions shown on the current page.
pub(crate) fn item_range(pagination: &Pagination) -> (u64, u64) {
    if pagination.total_items == 0 {
        return (0, 0);
    }
    let limit = u64::from(pagination.limit.max(1));
    let current = u64::from(pagination.current_page.max(1));
    let first = (current - 1) * limit + 1;
    let last = (current * limit).min(pagination.total_items);
    (first.min(last), last)
}
