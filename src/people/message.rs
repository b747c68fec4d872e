use crate::swapi::PeoplePage;

/// Everything that changes the people view flows through this type,
/// including the results of background fetches.
#[derive(Debug, Clone)]
pub enum PeopleMsg {
    /// Fetch the current query without changing it (startup).
    Fetch,
    /// The search text was edited.
    SearchChanged(String),
    /// Reset the search text to empty.
    ClearSearch,
    /// Move the page index by the given amount.
    ChangePage(i32),
    /// Copy a person's name to the clipboard.
    CopyName(String),
    /// A fetch completed.
    PageLoaded { request_id: u64, page: PeoplePage },
    /// A fetch failed; `error` is the failure's description.
    PageFailed { request_id: u64, error: String },
}
