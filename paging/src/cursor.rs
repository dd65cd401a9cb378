use shared::{PageRequest, MAX_PAGE_SIZE};

/// Pagination progress of one list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_number: u32,
    page_size: u32,
    has_more: bool,
}

impl PageCursor {
    /// Fresh cursor pointing at page 1. The page size is clamped to
    /// `1..=MAX_PAGE_SIZE` and never changes afterwards.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_number: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            has_more: true,
        }
    }

    /// Next page to request
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// False once the endpoint reported the last page
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Request for the page this cursor points at
    pub fn request(&self) -> PageRequest {
        PageRequest {
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }

    /// Move past a successfully loaded page
    pub(crate) fn advance(&mut self, is_last: bool) {
        self.page_number += 1;
        self.has_more = !is_last;
    }

    pub(crate) fn reset(&mut self) {
        self.page_number = 1;
        self.has_more = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_starts_at_page_one() {
        let cursor = PageCursor::new(10);
        assert_eq!(cursor.page_number(), 1);
        assert_eq!(cursor.page_size(), 10);
        assert!(cursor.has_more());
        assert_eq!(cursor.request(), PageRequest::first(10));
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(PageCursor::new(0).page_size(), 1);
        assert_eq!(PageCursor::new(10_000).page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_advance_and_reset() {
        let mut cursor = PageCursor::new(5);
        cursor.advance(false);
        assert_eq!(cursor.page_number(), 2);
        assert!(cursor.has_more());

        cursor.advance(true);
        assert_eq!(cursor.page_number(), 3);
        assert!(!cursor.has_more());

        cursor.reset();
        assert_eq!(cursor, PageCursor::new(5));
    }
}
