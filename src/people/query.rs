/// The pair that decides what is fetched next.
///
/// Every mutator returns whether the state changed. A change means one new
/// request; an unchanged state means none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    page_index: u32,
}

impl QueryState {
    pub fn new(search_text: impl Into<String>, page_index: u32) -> Self {
        Self {
            search_text: search_text.into(),
            page_index,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub const fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Replace the search text. The page index is kept as is, even if the
    /// new search has fewer pages.
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.search_text {
            return false;
        }
        self.search_text = text;
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.set_search(String::new())
    }

    /// Move the page index by `delta`, stopping at zero.
    pub fn change_page(&mut self, delta: i32) -> bool {
        let next = self.page_index.saturating_add_signed(delta);
        if next == self.page_index {
            return false;
        }
        self.page_index = next;
        true
    }
}
