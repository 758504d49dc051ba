//! Client-side pagination over an already filtered collection.

use serde::Serialize;

/// Page position over a collection of `total_items`.
///
/// Pages are 1-based. An empty collection has zero pages and stays on page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    page_size: usize,
    current_page: usize,
    total_items: usize,
}

impl Pager {
    /// A zero page size is bumped to 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_items: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Adopt a new collection size and return to page 1
    pub fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 1;
    }

    /// Back to page 1 without touching the total
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Index range of the current page within the collection
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    /// Items visible on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Advance one page; no-op on the last page
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; no-op on page 1
    pub fn previous(&mut self) -> bool {
        if self.has_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped to `[1, total_pages]`. Returns whether the
    /// current page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages().max(1));
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    /// Page numbers to render in the navigation control
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_forty_five_items_in_pages_of_twenty() {
        let data = items(45);
        let mut pager = Pager::new(20);
        pager.set_total(data.len());

        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.slice(&data).len(), 20);

        assert!(pager.go_to(3));
        assert_eq!(pager.slice(&data), &data[40..45]);

        assert!(!pager.go_to(4));
        assert_eq!(pager.current_page(), 3);
        assert!(!pager.has_next());
    }

    #[test]
    fn test_empty_collection() {
        let mut pager = Pager::new(12);
        pager.set_total(0);

        assert_eq!(pager.total_pages(), 0);
        assert_eq!(pager.current_page(), 1);
        assert!(pager.slice::<u8>(&[]).is_empty());
        assert!(!pager.next());
        assert!(!pager.previous());
        assert!(!pager.go_to(5));
        assert!(pager.page_numbers().next().is_none());
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut pager = Pager::new(10);
        pager.set_total(25);

        assert!(!pager.previous());
        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 3);
        assert!(pager.has_previous());
    }

    #[test]
    fn test_go_to_zero_clamps_to_first_page() {
        let mut pager = Pager::new(10);
        pager.set_total(25);
        pager.go_to(2);
        assert!(pager.go_to(0));
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn test_set_total_resets_page() {
        let mut pager = Pager::new(20);
        pager.set_total(60);
        pager.go_to(3);
        pager.set_total(61);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_numbers().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_slice_tolerates_shorter_collection() {
        let mut pager = Pager::new(5);
        pager.set_total(12);
        pager.go_to(3);
        let data = items(7);
        assert!(pager.slice(&data).is_empty());
    }

    #[test]
    fn test_zero_page_size_is_bumped() {
        assert_eq!(Pager::new(0).page_size(), 1);
    }
}
