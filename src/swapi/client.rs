use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::swapi::PeoplePage;

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

#[derive(Error, Debug)]
pub enum SwapiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Request failed with status code {status}")]
    Status { status: StatusCode },
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can answer a people search.
#[async_trait]
pub trait PeopleSource: Send + Sync {
    /// Fetch the page at `page_index` (zero based) of people matching `query`.
    async fn search_people(&self, query: &str, page_index: u32) -> Result<PeoplePage, SwapiError>;
}

#[derive(Clone, Debug)]
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    /// Create a client for `base_url`.
    ///
    /// Without a timeout a request that never answers keeps the caller waiting.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SwapiError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API pages are one based, the UI keeps a zero based index.
    fn people_request(&self, query: &str, page_index: u32) -> Result<Request, SwapiError> {
        let page = (page_index + 1).to_string();
        let request = self
            .client
            .get(format!("{}/people/", self.base_url))
            .query(&[("search", query), ("page", page.as_str())])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl PeopleSource for SwapiClient {
    async fn search_people(&self, query: &str, page_index: u32) -> Result<PeoplePage, SwapiError> {
        let request = self.people_request(query, page_index)?;
        info!("SWAPI: GET {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("SWAPI returned {}", status);
            return Err(SwapiError::Status { status });
        }

        let body = response.text().await?;
        let page: PeoplePage = serde_json::from_str(&body)?;
        info!(
            "SWAPI returned {} of {} result(s)",
            page.results.len(),
            page.count
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_people_request_uses_one_based_page() {
        let client = SwapiClient::new(DEFAULT_BASE_URL, None).unwrap();
        let request = client.people_request("luke", 0).unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://swapi.dev/api/people/?search=luke&page=1"
        );

        let request = client.people_request("", 2).unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://swapi.dev/api/people/?search=&page=3"
        );
    }

    #[test]
    fn test_people_request_encodes_query() {
        let client = SwapiClient::new("http://localhost:8080/api/", None).unwrap();
        let request = client.people_request("darth vader&co", 0).unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/people/?search=darth+vader%26co&page=1"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SwapiClient::new("https://swapi.dev/api///", None).unwrap();
        assert_eq!(client.base_url(), "https://swapi.dev/api");
    }

    #[test]
    fn test_status_error_message() {
        let error = SwapiError::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            error.to_string(),
            "Request failed with status code 404 Not Found"
        );
    }
}
