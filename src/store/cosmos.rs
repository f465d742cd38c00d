//! Cosmos DB (NoSQL API) access over the REST interface
//!
//! Queries are POSTed to `/dbs/{db}/colls/{coll}/docs` with master-key
//! authorization and followed across continuation pages.

use crate::error::{AppError, Result};
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const STORE: &str = "cosmos";
const API_VERSION: &str = "2018-12-31";

type HmacSha256 = Hmac<Sha256>;

/// Parameterized SQL query
#[derive(Debug, Serialize)]
pub struct QuerySpec<'a> {
    pub query: &'a str,
    pub parameters: Vec<QueryParameter<'a>>,
}

#[derive(Debug, Serialize)]
pub struct QueryParameter<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> QuerySpec<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            parameters: Vec::new(),
        }
    }

    pub fn param(mut self, name: &'a str, value: &'a str) -> Self {
        self.parameters.push(QueryParameter { name, value });
        self
    }
}

#[derive(Debug, Deserialize)]
struct QueryPage<T> {
    #[serde(rename = "Documents")]
    documents: Vec<T>,
}

/// Authenticated REST client for one Cosmos DB account
pub struct CosmosClient {
    http: reqwest::Client,
    endpoint: String,
    key: Vec<u8>,
}

impl CosmosClient {
    pub fn new(endpoint: &str, master_key: &str) -> Result<Self> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(master_key.trim())
            .map_err(|e| AppError::store(STORE, format!("invalid master key: {}", e)))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::store(STORE, e))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key,
        })
    }

    /// `Authorization` header value for a request on `resource_link`
    pub fn authorization(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> Result<String> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac =
            HmacSha256::new_from_slice(&self.key).map_err(|e| AppError::store(STORE, e))?;
        mac.update(payload.as_bytes());
        let signature =
            base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type=master&ver=1.0&sig={}", signature);
        Ok(url::form_urlencoded::byte_serialize(token.as_bytes()).collect())
    }

    /// Run a query, collecting at most `limit` documents across pages
    pub async fn query<T: DeserializeOwned>(
        &self,
        database: &str,
        container: &str,
        spec: &QuerySpec<'_>,
        limit: usize,
    ) -> Result<Vec<T>> {
        let resource_link = format!("dbs/{}/colls/{}", database, container);
        let url = format!("{}/{}/docs", self.endpoint, resource_link);

        let mut items: Vec<T> = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
            let auth = self.authorization("POST", "docs", &resource_link, &date)?;
            let page_size = limit.saturating_sub(items.len()).max(1);

            let mut request = self
                .http
                .post(&url)
                .header("authorization", auth)
                .header("x-ms-date", &date)
                .header("x-ms-version", API_VERSION)
                .header("content-type", "application/query+json")
                .header("x-ms-documentdb-isquery", "True")
                .header("x-ms-documentdb-query-enablecrosspartition", "True")
                .header("x-ms-max-item-count", page_size.to_string())
                .json(spec);

            if let Some(token) = &continuation {
                request = request.header("x-ms-continuation", token);
            }

            let response = request.send().await.map_err(|e| AppError::store(STORE, e))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::store(
                    STORE,
                    format!("query on {} failed with {}: {}", container, status, body),
                ));
            }

            continuation = response
                .headers()
                .get("x-ms-continuation")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let page: QueryPage<T> = response
                .json()
                .await
                .map_err(|e| AppError::store(STORE, e))?;

            debug!(
                "Cosmos page from {}: {} documents (more={})",
                container,
                page.documents.len(),
                continuation.is_some()
            );

            items.extend(page.documents);

            if items.len() >= limit || continuation.is_none() {
                break;
            }
        }

        items.truncate(limit);
        Ok(items)
    }
}

/// Lazily connected handle on one Cosmos DB database
pub struct CosmosDocumentStore {
    endpoint: Option<String>,
    key: Option<String>,
    database: String,
    client: OnceCell<CosmosClient>,
}

impl CosmosDocumentStore {
    pub fn new(endpoint: Option<String>, key: Option<String>, database: String) -> Self {
        Self {
            endpoint,
            key,
            database,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&CosmosClient> {
        self.client
            .get_or_try_init(|| async {
                let endpoint = self.endpoint.as_deref().ok_or_else(|| {
                    AppError::store(STORE, "SPEECH_COSMOSDB_ENDPOINT is not set")
                })?;
                let key = self
                    .key
                    .as_deref()
                    .ok_or_else(|| AppError::store(STORE, "SPEECH_COSMOSDB_KEY is not set"))?;

                info!("Initializing Cosmos DB client for {}", endpoint);
                CosmosClient::new(endpoint, key)
            })
            .await
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        container: &str,
        spec: &QuerySpec<'_>,
        limit: usize,
    ) -> Result<Vec<T>> {
        self.client()
            .await?
            .query(&self.database, container, spec, limit)
            .await
    }
}
