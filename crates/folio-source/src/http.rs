use std::time::Duration;

use folio_core::decode_projects;
use folio_core::FetchError;
use folio_core::ProjectRecord;
use folio_core::ProjectSource;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::header::USER_AGENT;
use tracing::debug;

/// Fetches the project feed with a single blocking `GET`. No retries and
/// no request timeout.
#[derive(Debug, Clone)]
pub struct HttpProjectSource {
    client: Client,
    url: String,
}

impl HttpProjectSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ProjectSource for HttpProjectSource {
    fn fetch(&self) -> Result<Vec<ProjectRecord>, FetchError> {
        debug!(url = %self.url, "GET project feed");
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, format!("folio/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        decode_response(status, &body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Anything outside 200-299 is a failure regardless of body; a success
/// body must be a JSON array of projects.
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<ProjectRecord>, FetchError> {
    if !(200..=299).contains(&status) {
        return Err(FetchError::Status(status));
    }
    decode_projects(body)
}
