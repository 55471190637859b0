pub mod cache;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// A saved gang member, as returned by the remote store.
///
/// Rows are read-only snapshots; the store owns identifiers and uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GangMember {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub member_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid store URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("store returned {0}")]
    Status(StatusCode),
}

/// HTTP client for the GarageHub remote store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl StoreClient {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("garagehub/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn from_url(base_url: &str, token: Option<String>) -> Result<Self, StoreError> {
        Self::new(Url::parse(base_url)?, token)
    }

    /// Fetch all saved members for a user, ordered by name ascending.
    ///
    /// The ordering and the collation behind it belong to the store; the
    /// response is kept in the order it arrives.
    pub async fn list_saved_members(&self, user_id: &str) -> Result<Vec<GangMember>, StoreError> {
        let mut url = self.base_url.join("api/v1/saved-members")?;
        url.query_pairs_mut()
            .append_pair("user_id", user_id)
            .append_pair("order", "name.asc");

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}
