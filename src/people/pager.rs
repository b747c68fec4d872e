use crate::swapi::PAGE_SIZE;

/// Page arithmetic for the pagination controls.
///
/// Pages are counted in server pages, so every index the controls can
/// reach is one the server will answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page_index: u32,
    pub total_count: u64,
}

impl Pager {
    pub const fn new(page_index: u32, total_count: u64) -> Self {
        Self {
            page_index,
            total_count,
        }
    }

    pub const fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(PAGE_SIZE as u64)
    }

    pub const fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// False on the last page, when there are no pages, and when the index
    /// was left past the end by a search change.
    pub const fn has_next(&self) -> bool {
        (self.page_index as u64) + 1 < self.total_pages()
    }

    pub fn label(&self) -> String {
        format!(
            "Showing page {} of {}",
            u64::from(self.page_index) + 1,
            self.total_pages()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Pager::new(0, 82).total_pages(), 9);
        assert_eq!(Pager::new(0, 80).total_pages(), 8);
        assert_eq!(Pager::new(0, 1).total_pages(), 1);
        assert_eq!(Pager::new(0, 0).total_pages(), 0);
    }

    #[test]
    fn test_previous_is_inert_on_first_page() {
        assert!(!Pager::new(0, 82).has_previous());
        assert!(Pager::new(1, 82).has_previous());
    }

    #[test]
    fn test_next_is_inert_on_last_page() {
        assert!(Pager::new(7, 82).has_next());
        assert!(!Pager::new(8, 82).has_next());
    }

    #[test]
    fn test_next_is_inert_without_results() {
        assert!(!Pager::new(0, 0).has_next());
    }

    #[test]
    fn test_next_is_inert_past_the_end() {
        // Page 4 of an old search, new search only has one page.
        assert!(!Pager::new(3, 5).has_next());
        assert!(Pager::new(3, 5).has_previous());
    }

    #[test]
    fn test_label() {
        assert_eq!(Pager::new(0, 82).label(), "Showing page 1 of 9");
        assert_eq!(Pager::new(0, 0).label(), "Showing page 1 of 0");
    }
}
