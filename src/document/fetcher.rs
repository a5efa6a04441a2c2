//! Subscription document fetcher.

use reqwest::StatusCode;

use crate::document::{parse_document_bytes, Document};
use crate::error::{UpdateError, UpdateResult};

/// Downloads and parses the remote subscription.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and parse the body as a document.
    ///
    /// Anything other than `200 OK` is an error. No retries.
    pub async fn fetch(&self, url: &str) -> UpdateResult<Document> {
        let network_err = |source: reqwest::Error| UpdateError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network_err)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpdateError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(network_err)?;
        let document = parse_document_bytes(&body, "subscription")?;

        tracing::debug!(
            url = %url,
            bytes = body.len(),
            fields = document.len(),
            "Subscription fetched"
        );
        Ok(document)
    }
}
