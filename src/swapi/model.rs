use serde::Deserialize;

/// Gender value SWAPI uses for droids.
pub const DROID_GENDER: &str = "n/a";

/// Records per server page. `/people/` does not let clients change it.
pub const PAGE_SIZE: u32 = 10;

/// A character record as returned by `/people/`.
///
/// Every field is kept as the opaque string the API sends. Missing fields
/// become empty strings so a sparse record still renders as a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    pub birth_year: String,
    pub eye_color: String,
    pub gender: String,
    pub hair_color: String,
    pub skin_color: String,
    pub height: String,
    pub mass: String,
    pub created: String,
    pub edited: String,
}

impl Person {
    pub fn is_droid(&self) -> bool {
        self.gender == DROID_GENDER
    }
}

/// One server page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PeoplePage {
    /// Matches across all pages on the server.
    pub count: u64,
    pub results: Vec<Person>,
}
