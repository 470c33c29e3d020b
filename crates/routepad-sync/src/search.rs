//! Area search client for the legacy SOAP service.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use routepad_core::{SearchRegion, SearchResult};
use tracing::info;

use crate::soap::{self, build_request, fault_reason, parse_response};
use crate::{BackendError, ClientConfig, ClientError};

/// Bounded-area route search.
#[async_trait]
pub trait AreaSearchService: Send + Sync {
    async fn search(&self, region: &SearchRegion) -> Result<Vec<SearchResult>, ClientError>;
}

/// [`AreaSearchService`] that posts a SOAP 1.2 envelope over HTTP.
pub struct SoapSearchClient {
    client: reqwest::Client,
    endpoint: String,
    namespace: String,
}

impl SoapSearchClient {
    pub fn new(endpoint: String, namespace: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            namespace,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.search_url.clone(), config.search_namespace.clone())
    }

    fn content_type(&self) -> String {
        format!("{}; action=\"{}SearchArea\"", soap::CONTENT_TYPE, self.namespace)
    }
}

#[async_trait]
impl AreaSearchService for SoapSearchClient {
    async fn search(&self, region: &SearchRegion) -> Result<Vec<SearchResult>, ClientError> {
        let body = build_request(region, &self.namespace);

        info!(url = %self.endpoint, ne = ?region.ne(), sw = ?region.sw(), "searching area");
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, self.content_type())
            .body(body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(match fault_reason(&text) {
                Some(reason) => BackendError::Fault(reason),
                None => BackendError::from_status(status.as_u16(), text),
            }
            .into());
        }

        let results = parse_response(&text)?;
        info!(count = results.len(), "area search complete");
        Ok(results)
    }
}
