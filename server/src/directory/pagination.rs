use serde::Serialize;

pub const DEFAULT_PER_PAGE: usize = 6;
pub const MAX_PER_PAGE: usize = 50;

/// One page of a filtered result set. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_prev: self.has_prev,
            has_next: self.has_next,
        }
    }
}

pub fn clamp_per_page(per_page: Option<usize>, default: usize) -> usize {
    per_page.unwrap_or(default).clamp(1, MAX_PER_PAGE)
}

/// Slices `items` into the requested page. Out-of-range pages are clamped to
/// the nearest valid one, and an empty input still yields page 1 of 1.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}
