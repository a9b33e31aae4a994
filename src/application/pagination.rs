//! Offset pagination state shared by every list view.

/// Page state for a single list view. Pages are 1-indexed.
///
/// Invariant: `1 <= current_page <= total_pages()` after every mutation,
/// where `total_pages` is `ceil(total_count / items_per_page)` floored at 1
/// so an empty collection still renders as one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
    total_count: usize,
}

pub const DEFAULT_ITEMS_PER_PAGE: usize = 15;

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_count: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.items_per_page).max(1)
    }

    /// Clamp-and-set; never yields an out-of-range page.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    /// Changing the page size invalidates the old page index.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    /// Re-derive the page count from a new total, keeping the current page
    /// in range when the collection shrinks underneath it.
    pub fn set_total_count(&mut self, total_count: usize) {
        self.total_count = total_count;
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }

    /// Back to page one, as every filter change demands.
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Number of items to skip for the current page in a skip/limit query.
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.items_per_page
    }

    /// Slice bounds into a collection of `len` items for the current page.
    pub fn slice_bounds(&self, len: usize) -> (usize, usize) {
        let start = self.offset().min(len);
        let end = (start + self.items_per_page).min(len);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let mut page = PageState::new(15);
        page.set_total_count(37);
        assert_eq!(page.total_pages(), 3);

        page.set_total_count(30);
        assert_eq!(page.total_pages(), 2);

        page.set_total_count(0);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn set_page_clamps_both_ends() {
        let mut page = PageState::new(15);
        page.set_total_count(37);

        page.set_page(0);
        assert_eq!(page.current_page(), 1);

        page.set_page(99);
        assert_eq!(page.current_page(), 3);
    }

    #[test]
    fn shrinking_total_pulls_page_back_in_range() {
        let mut page = PageState::new(10);
        page.set_total_count(100);
        page.set_page(10);

        page.set_total_count(12);
        assert_eq!(page.current_page(), 2);

        page.set_total_count(0);
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn slice_bounds_cover_collection_exactly_once() {
        let mut page = PageState::new(15);
        page.set_total_count(37);

        let mut covered = Vec::new();
        for p in 1..=page.total_pages() {
            page.set_page(p);
            let (start, end) = page.slice_bounds(37);
            covered.extend(start..end);
        }
        assert_eq!(covered, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let mut page = PageState::new(15);
        page.set_total_count(37);
        page.set_page(3);
        let (start, end) = page.slice_bounds(37);
        assert_eq!((start, end), (30, 37));
    }

    #[test]
    fn zero_items_per_page_is_floored_to_one() {
        let page = PageState::new(0);
        assert_eq!(page.items_per_page(), 1);
    }
}
