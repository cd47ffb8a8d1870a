use larder_core::{CharitiesFile, Charity};
use reqwest::Client;
use serde::Deserialize;

use super::CharityCatalog;
use crate::error::CatalogError;

/// Accepted response shapes: `{"charities": [...]}` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Wrapped { charities: Vec<Charity> },
    Bare(Vec<Charity>),
}

/// Catalog fetched from a remote JSON endpoint.
///
/// One GET per call, no retries. Non-2xx responses and malformed bodies are
/// errors rather than empty results.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = crate::http::build_client(timeout_secs, user_agent)?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl CharityCatalog for HttpCatalog {
    async fn list_charities(&self) -> Result<Vec<Charity>, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let payload: CatalogPayload =
            serde_json::from_slice(&body).map_err(|e| CatalogError::Deserialize {
                context: format!("charity catalog from {}", self.url),
                source: e,
            })?;

        let file = match payload {
            CatalogPayload::Wrapped { charities } | CatalogPayload::Bare(charities) => {
                CharitiesFile { charities }
            }
        };
        file.validate()?;

        tracing::debug!(
            url = %self.url,
            count = file.charities.len(),
            "fetched remote charity catalog"
        );
        Ok(file.charities)
    }
}
