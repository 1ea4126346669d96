//! HTTP transport
//!
//! A bearer-authenticated client for the list backend. [`ResourceFetcher`]
//! adapts one collection endpoint to [`PageFetcher`] so a list controller can
//! drive it directly.

use crate::auth::LoginResponse;
use crate::config::ApiConfig;
use crate::error::{FetchError, ListkitError, DEFAULT_LOAD_ERROR};
use crate::list::{Page, PageFetcher, PageParams};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Admin configuration payload from `GET /api/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigResponse {
    #[serde(default)]
    pub config_items: Vec<Value>,
    #[serde(default)]
    pub versions: Vec<Value>,
    #[serde(default)]
    pub enumerators: Vec<Value>,
    #[serde(default)]
    pub token: Option<Value>,
}

#[derive(Debug, Serialize)]
struct DevLoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<&'a [String]>,
}

/// Client for the list backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: HttpClient,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` (must be http or https).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ListkitError> {
        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ListkitError::ConfigError(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let http = HttpClient::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            base_url,
            http,
            token: None,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ListkitError> {
        Self::new(config.base_url.clone())?.with_timeout(config.timeout())
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ListkitError> {
        self.http = HttpClient::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// A page fetcher for `GET /api/<resource>`.
    pub fn resource<T>(&self, resource: &str) -> ResourceFetcher<T> {
        ResourceFetcher {
            client: self.clone(),
            path: format!("api/{}", resource.trim_matches('/')),
            _item: PhantomData,
        }
    }

    fn page_request(&self, path: &str, params: &PageParams) -> RequestBuilder {
        self.with_auth(self.http.get(self.url(path)).query(params))
    }

    /// `GET /api/config`
    pub async fn load_config(&self) -> Result<ConfigResponse, FetchError> {
        let response = self
            .with_auth(self.http.get(self.url("api/config")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            return Err(FetchError::new(format!(
                "Failed to load config: {}",
                reason
            )));
        }
        Ok(response.json().await?)
    }

    /// `POST /dev-login`, the development login endpoint.
    pub async fn dev_login(
        &self,
        subject: Option<&str>,
        roles: Option<&[String]>,
    ) -> Result<LoginResponse, ListkitError> {
        let body = DevLoginRequest { subject, roles };
        let response = self
            .http
            .post(self.url("dev-login"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            let message = if message.is_empty() {
                "Login failed".to_string()
            } else {
                message
            };
            warn!(error = %message, "Login rejected");
            return Err(ListkitError::Auth(message));
        }
        Ok(response.json().await?)
    }
}

/// Pull `error` (or `message`) out of a JSON error body.
async fn error_message(response: Response) -> String {
    let body: Value = match response.json().await {
        Ok(body) => body,
        Err(_) => return String::new(),
    };
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// [`PageFetcher`] over one collection endpoint.
#[derive(Debug, Clone)]
pub struct ResourceFetcher<T> {
    client: ApiClient,
    path: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> ResourceFetcher<T> {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T> PageFetcher<T> for ResourceFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, params: PageParams) -> Result<Page<T>, FetchError> {
        debug!(path = %self.path, after_id = ?params.after_id, "Requesting page");
        let response = self.client.page_request(&self.path, &params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(FetchError::with_fallback(
                if message.is_empty() {
                    format!("{}: {}", DEFAULT_LOAD_ERROR, status)
                } else {
                    message
                },
                DEFAULT_LOAD_ERROR,
            ));
        }
        Ok(response.json().await?)
    }
}
