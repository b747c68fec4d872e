use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::swapi::{PeoplePage, PeopleSource, Person, SwapiError};

/// Canned `PeopleSource` that records every search it receives.
pub struct StubSource {
    page: Option<PeoplePage>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl StubSource {
    pub fn with_page(page: PeoplePage) -> Self {
        Self {
            page: Some(page),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            page: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PeopleSource for StubSource {
    async fn search_people(&self, query: &str, page_index: u32) -> Result<PeoplePage, SwapiError> {
        self.calls.lock().unwrap().push((query.to_string(), page_index));
        self.page.clone().ok_or(SwapiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
        })
    }
}

pub fn person(name: &str, gender: &str) -> Person {
    Person {
        name: name.to_string(),
        birth_year: "19BBY".to_string(),
        eye_color: "blue".to_string(),
        gender: gender.to_string(),
        hair_color: "blond".to_string(),
        skin_color: "fair".to_string(),
        height: "172".to_string(),
        mass: "77".to_string(),
        created: "2014-12-09T13:50:51.644000Z".to_string(),
        edited: "2014-12-20T21:17:56.891000Z".to_string(),
    }
}
