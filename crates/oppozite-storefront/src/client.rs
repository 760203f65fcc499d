//! HTTP client for the Shopify Storefront GraphQL API.
//!
//! Only the two lookups needed for social previews are exposed. Every call is
//! a single attempt bounded by the configured timeout; callers decide how to
//! degrade on failure.

use std::time::Duration;

use oppozite_core::{AppConfig, EntityMeta, LookupTarget};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::StorefrontError;
use crate::queries::{COLLECTION_META_QUERY, PRODUCT_META_QUERY};
use crate::types::{CollectionByHandleData, GraphQlError, GraphQlResponse, ProductByHandleData};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Upper bound for the TCP/TLS connect phase.
const MAX_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Client for the Storefront API.
///
/// Use [`StorefrontClient::from_config`] in the service or
/// [`StorefrontClient::with_endpoint`] to point at a mock server in tests.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    access_token: String,
}

impl StorefrontClient {
    /// Creates a client for the store and API version in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StorefrontError::InvalidEndpoint`] if the
    /// configured store domain does not form a valid URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        if config.shopify_storefront_token.is_empty() {
            tracing::warn!(
                "no storefront access token configured; lookups will fall back to default metadata"
            );
        }
        Self::with_endpoint(
            &config.storefront_url(),
            &config.shopify_storefront_token,
            config.fetch_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client that posts GraphQL documents to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StorefrontError::InvalidEndpoint`] if
    /// `endpoint` is not an absolute URL.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        let endpoint = Url::parse(endpoint).map_err(|e| StorefrontError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(
                timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
            ))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Looks up the title, description and first image for `target`.
    ///
    /// Returns `Ok(None)` when the API reports no entity with that handle.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::product_meta`].
    pub async fn lookup(
        &self,
        target: &LookupTarget,
    ) -> Result<Option<EntityMeta>, StorefrontError> {
        match target {
            LookupTarget::Product(handle) => self.product_meta(handle).await,
            LookupTarget::Collection(handle) => self.collection_meta(handle).await,
        }
    }

    /// Runs the `productByHandle` query.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Http`] on network failure or timeout.
    /// - [`StorefrontError::UnexpectedStatus`] on any non-2xx status.
    /// - [`StorefrontError::Deserialize`] if the body is not the expected envelope.
    /// - [`StorefrontError::GraphQl`] if the API returned errors and no data.
    pub async fn product_meta(&self, handle: &str) -> Result<Option<EntityMeta>, StorefrontError> {
        let data: ProductByHandleData = self
            .execute(PRODUCT_META_QUERY, handle, "productByHandle")
            .await?;
        Ok(data.product_by_handle.map(EntityMeta::from))
    }

    /// Runs the `collectionByHandle` query.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::product_meta`].
    pub async fn collection_meta(
        &self,
        handle: &str,
    ) -> Result<Option<EntityMeta>, StorefrontError> {
        let data: CollectionByHandleData = self
            .execute(COLLECTION_META_QUERY, handle, "collectionByHandle")
            .await?;
        Ok(data.collection_by_handle.map(EntityMeta::from))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        handle: &str,
        operation: &str,
    ) -> Result<T, StorefrontError> {
        let body = json!({
            "query": query,
            "variables": { "handle": handle },
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&text).map_err(|e| StorefrontError::Deserialize {
                context: format!("{operation}(handle={handle})"),
                source: e,
            })?;

        match envelope.data {
            Some(data) => {
                if !envelope.errors.is_empty() {
                    tracing::debug!(
                        operation,
                        errors = envelope.errors.len(),
                        "storefront returned partial data with errors"
                    );
                }
                Ok(data)
            }
            None => Err(StorefrontError::GraphQl(join_messages(&envelope.errors))),
        }
    }
}

fn join_messages(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return "response contained no data".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
