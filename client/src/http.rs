//! Document store access over its REST API.

use crate::config::{CollectionIds, Config};
use crate::error::{FetchError, Result};
use crate::fetch::ResourceFetcher;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use serde::Deserialize;
use shopbook_engine::ResourceKind;

/// Attribute every per-user document is keyed by.
const USER_ID_ATTRIBUTE: &str = "userId";

const PROJECT_HEADER: &str = "x-appwrite-project";
const API_KEY_HEADER: &str = "x-appwrite-key";

/// Response body of a document list request.
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<StoredDocument>,
}

/// One stored document. The payload is kept as text in `data`.
#[derive(Debug, Deserialize)]
struct StoredDocument {
    #[serde(rename = "$id", default)]
    id: String,
    data: Option<String>,
}

/// [`ResourceFetcher`] backed by a remote document database.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: reqwest::Client,
    endpoint: String,
    database_id: String,
    collections: CollectionIds,
}

impl HttpDocumentStore {
    /// Build a store client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(PROJECT_HEADER, header_value(&config.project_id)?);
        if let Some(key) = &config.api_key {
            let mut value = header_value(key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            database_id: config.database_id.clone(),
            collections: config.collections.clone(),
        })
    }

    /// URL listing the documents of the collection for `kind`.
    pub fn documents_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint,
            self.database_id,
            self.collections.get(kind)
        )
    }
}

impl ResourceFetcher for HttpDocumentStore {
    async fn fetch(&self, kind: ResourceKind, user_id: &str) -> Result<Option<String>> {
        let collection = self.collections.get(kind);
        let query = user_query(user_id);

        tracing::debug!(kind = %kind, collection = %collection, "Listing documents");

        let response = self
            .client
            .get(self.documents_url(kind))
            .query(&[("queries[]", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                collection: collection.to_string(),
            });
        }

        let list: DocumentList = response.json().await?;
        let Some(document) = list.documents.into_iter().next() else {
            return Ok(None);
        };

        tracing::debug!(kind = %kind, document_id = %document.id, "Found stored document");
        document.data.map(Some).ok_or(FetchError::MissingData(kind))
    }

    async fn check_available(&self) -> Result<()> {
        Url::parse(&self.endpoint)
            .map_err(|e| FetchError::Unavailable(format!("invalid endpoint: {e}")))?;
        if self.database_id.is_empty() {
            return Err(FetchError::Unavailable("no database configured".into()));
        }
        Ok(())
    }
}

/// Equality filter on the owning user, in the store's JSON query syntax.
fn user_query(user_id: &str) -> String {
    serde_json::json!({
        "method": "equal",
        "attribute": USER_ID_ATTRIBUTE,
        "values": [user_id],
    })
    .to_string()
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::Unavailable(format!("invalid header value: {e}")))
}
