//! Star Wars API access.
//!
//! The people view only depends on [`PeopleSource`], so the HTTP client can
//! be swapped for a stub in tests.

mod client;
mod model;

pub use client::{DEFAULT_BASE_URL, PeopleSource, SwapiClient, SwapiError};
pub use model::{DROID_GENDER, PAGE_SIZE, PeoplePage, Person};
