//! Client-side pagination shared by every table.
//!
//! `total_pages = max(1, ceil(n / page_size))`. The current page is always
//! clamped into `[1, total_pages]`; prev/next saturate at the ends.

/// Page size of the affiliates table.
pub const AFFILIATES_PAGE_SIZE: usize = 5;

/// Page size of the family-group table.
pub const FAMILY_PAGE_SIZE: usize = 5;

/// Page size of the providers table on wide screens.
pub const PROVIDERS_DESKTOP_PAGE_SIZE: usize = 10;

/// Page size of the providers cards on narrow screens.
pub const PROVIDERS_MOBILE_PAGE_SIZE: usize = 5;

/// Page cursor over a list whose length may change between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Paginator {
    /// A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Force the page into range for a list of `len` items.
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.clamp(1, self.total_pages(len));
    }

    /// Change the page size and re-clamp.
    pub fn set_page_size(&mut self, page_size: usize, len: usize) {
        self.page_size = page_size.max(1);
        self.clamp(len);
    }

    /// Jump to a page, clamped.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page;
        self.clamp(len);
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page < self.total_pages(len)
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    pub fn next(&mut self, len: usize) {
        if self.has_next(len) {
            self.page += 1;
        }
    }

    /// Back to the first page (filters changed).
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Items on the current page. Clamps first.
    pub fn slice<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        self.clamp(items.len());
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        Page {
            items: items.get(start..end).unwrap_or(&[]),
            page: self.page,
            total_pages: self.total_pages(items.len()),
            total_items: items.len(),
            start,
        }
    }

    /// `"start–end / total"`, 1-based and inclusive, `"0–0 / 0"` when empty.
    pub fn range_label(&self, len: usize) -> String {
        if len == 0 {
            return "0–0 / 0".to_string();
        }
        let page = self.page.clamp(1, self.total_pages(len));
        let start = (page - 1) * self.page_size + 1;
        let end = (page * self.page_size).min(len);
        format!("{}–{} / {}", start, end, len)
    }
}

/// `max(1, ceil(len / page_size))`.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    start: usize,
}

impl<T> Page<'_, T> {
    /// True when the empty-state row should render.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the first item in the full list.
    pub fn offset(&self) -> usize {
        self.start
    }
}
