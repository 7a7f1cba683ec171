pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Number of pages needed for `total` items. Never less than one, so an empty
/// listing still reads as "page 1 of 1".
pub fn compute_pages(total: u64, page_size: u64) -> u64 {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// A 1-based page number and a page size clamped to `[1, MAX_PAGE_SIZE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn from_query(page: Option<u64>, page_size: Option<u64>, default_size: u64) -> Self {
        Self::new(page.unwrap_or(1), page_size.unwrap_or(default_size))
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Zero-based page index, as the store's paginator expects.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    /// Rows to skip before this page; `None` when the product overflows.
    pub fn offset(&self) -> Option<u64> {
        self.index().checked_mul(self.page_size)
    }

    /// Whether this page starts inside a listing of `total` rows. Pages past the
    /// end are answered without touching the store.
    pub fn starts_within(&self, total: u64) -> bool {
        self.offset().is_some_and(|offset| offset < total)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the metadata needed to render pagination controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            page_size: request.page_size(),
            pages: compute_pages(total, request.page_size()),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_one_page() {
        assert_eq!(compute_pages(0, 10), 1);
        assert_eq!(compute_pages(0, 1), 1);
    }

    #[test]
    fn pages_round_up() {
        assert_eq!(compute_pages(25, 10), 3);
        assert_eq!(compute_pages(20, 10), 2);
        assert_eq!(compute_pages(1, 100), 1);
        assert_eq!(compute_pages(101, 100), 2);
    }

    #[test]
    fn pages_match_ceiling_formula() {
        for total in 0..200u64 {
            for page_size in 1..=25u64 {
                let expected = ((total + page_size - 1) / page_size).max(1);
                assert_eq!(compute_pages(total, page_size), expected, "total={total} size={page_size}");
            }
        }
    }

    #[test]
    fn request_is_clamped() {
        let req = PageRequest::new(0, 500);
        assert_eq!(req.page(), 1);
        assert_eq!(req.page_size(), MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(3, 0).page_size(), 1);
        assert_eq!(PageRequest::new(3, 20).offset(), Some(40));
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let req = PageRequest::new(u64::MAX, 2);
        assert_eq!(req.offset(), None);
        assert!(!req.starts_within(u64::MAX));
        assert!(PageRequest::new(3, 10).starts_within(21));
        assert!(!PageRequest::new(3, 10).starts_within(20));
    }

    #[test]
    fn query_defaults() {
        let req = PageRequest::from_query(None, None, 20);
        assert_eq!((req.page(), req.page_size()), (1, 20));
    }

    #[test]
    fn envelope_carries_request_and_page_count() {
        let page = Page::new(vec![1, 2], 5, PageRequest::new(1, 2));
        assert_eq!((page.page, page.page_size, page.pages), (1, 2, 3));
        let last = Page::new(vec![5], 5, PageRequest::new(3, 2)).map(|n| n * 10);
        assert_eq!(last.items, vec![50]);
        assert_eq!(last.total, 5);
    }
}
