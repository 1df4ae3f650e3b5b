//! Client-side pagination over already-fetched lists.
//!
//! The backend never paginates; views slice the full array they received.

/// Page size for global document and topic listings.
pub const GLOBAL_PAGE_SIZE: usize = 30;

/// Page size for documents listed under a single topic.
pub const TOPIC_PAGE_SIZE: usize = 10;

/// Items on a 1-based page. Pages past the end are empty, never an error.
pub fn slice_page<T>(items: &[T], page: usize, size: usize) -> &[T] {
    if page == 0 || size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items.
pub fn page_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    len.div_ceil(size)
}

/// Current page of a view, with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    size: usize,
}

impl Pager {
    pub fn new(size: usize) -> Self {
        Self { page: 1, size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Jump to a page. Page numbers start at 1; 0 is treated as 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        slice_page(items, self.page, self.size)
    }

    pub fn page_count(&self, len: usize) -> usize {
        page_count(len, self.size)
    }

    /// 1-based inclusive range of item positions shown on the current page,
    /// or `None` when the page is empty.
    pub fn position(&self, len: usize) -> Option<(usize, usize)> {
        let shown = self.slice_len(len);
        if shown == 0 {
            return None;
        }
        let start = (self.page - 1) * self.size + 1;
        Some((start, start + shown - 1))
    }

    fn slice_len(&self, len: usize) -> usize {
        let start = (self.page - 1).saturating_mul(self.size);
        len.saturating_sub(start).min(self.size)
    }
}
