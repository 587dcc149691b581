//! Pagination

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page index, starting at 0.
    pub page: u32,

    /// Number of items per page.
    pub size: u32,
}

impl PageRequest {
    /// Request `page` with `size` items per page.
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

/// Position of a page within a paginated collection, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page index, starting at 0.
    pub page: u32,

    /// Number of items per page.
    pub size: u32,

    /// Number of items across all pages.
    pub total_elements: u64,

    /// Number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Whether this is the first page.
    pub const fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Whether a page precedes this one.
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Whether a page follows this one.
    pub const fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// Request for the preceding page, if any.
    pub const fn previous(&self) -> Option<PageRequest> {
        if self.has_previous() {
            Some(PageRequest::new(self.page - 1, self.size))
        } else {
            None
        }
    }

    /// Request for the following page, if any.
    pub const fn next(&self) -> Option<PageRequest> {
        if self.has_next() {
            Some(PageRequest::new(self.page + 1, self.size))
        } else {
            None
        }
    }

    /// Pagination after one element has been removed from the collection.
    #[must_use]
    pub fn after_removal(self) -> Self {
        let total_elements = self.total_elements.saturating_sub(1);

        Self {
            total_elements,
            total_pages: page_count(total_elements, self.size),
            ..self
        }
    }
}

/// Number of pages needed to hold `total_elements` at `size` per page.
pub fn page_count(total_elements: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }

    u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: u32, total_elements: u64) -> Pagination {
        Pagination {
            page,
            size: 5,
            total_elements,
            total_pages: page_count(total_elements, 5),
        }
    }

    #[test]
    fn first_page_has_no_previous() {
        let first = pagination(0, 12);

        assert!(first.is_first());
        assert!(!first.has_previous());
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(PageRequest::new(1, 5)));
    }

    #[test]
    fn last_page_has_no_next() {
        let last = pagination(2, 12);

        assert!(!last.has_next());
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(PageRequest::new(1, 5)));
    }

    #[test]
    fn removal_shrinks_page_count_at_boundary() {
        let paged = pagination(2, 11).after_removal();

        assert_eq!(paged.total_elements, 10);
        assert_eq!(paged.total_pages, 2);
        assert_eq!(paged.page, 2);
    }

    #[test]
    fn removal_from_empty_collection_saturates() {
        let paged = pagination(0, 0).after_removal();

        assert_eq!(paged.total_elements, 0);
        assert_eq!(paged.total_pages, 0);
    }

    #[test]
    fn page_count_of_zero_size_is_zero() {
        assert_eq!(page_count(10, 0), 0);
    }
}
