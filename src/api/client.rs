use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::config::{build_auth_headers, ApiConfig, AuthScope, Config, SessionTokens};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the HR backend.
///
/// Cheap to clone: the connection pool and the session tokens are shared,
/// so a token refreshed through one clone is used by all of them.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    client_id: String,
    tokens: Arc<RwLock<SessionTokens>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, tokens: SessionTokens) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.base_url)?,
            client_id: config.client_id.clone(),
            tokens: Arc::new(RwLock::new(tokens)),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api, config.auth.session_tokens())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> SessionTokens {
        self.tokens.read().clone()
    }

    pub fn set_tokens(&self, tokens: SessionTokens) {
        *self.tokens.write() = tokens;
    }

    pub fn clear_tokens(&self) {
        self.set_tokens(SessionTokens::default());
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().is_authenticated()
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[], query)?;
        self.request::<(), T>(Method::GET, path, url, None, AuthScope::Api)
            .await
    }

    pub(crate) async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        scope: AuthScope,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[], &[])?;
        self.request(method, path, url, body, scope).await
    }

    /// Like [`ApiClient::send`] for `{collection}/{id}`. The id is
    /// percent-encoded as one path segment.
    pub(crate) async fn send_to_item<B, T>(
        &self,
        method: Method,
        collection: &str,
        id: &str,
        body: Option<&B>,
        scope: AuthScope,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(collection, &[id], &[])?;
        let path = format!("{collection}/{id}");
        self.request(method, &path, url, body, scope).await
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        url: Url,
        body: Option<&B>,
        scope: AuthScope,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, &request_id);

        let tokens = self.tokens();
        for (name, value) in build_auth_headers(&tokens, &self.client_id, scope) {
            builder = builder.header(name, value);
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, path, request_id = %request_id, "HTTP request");

        let response = builder.send().await.map_err(|e| ApiError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source: e,
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source: e,
        })?;

        tracing::debug!(
            %method,
            path,
            request_id = %request_id,
            status = status.as_u16(),
            bytes = bytes.len(),
            "HTTP response"
        );

        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                body: bytes.to_vec(),
            });
        }

        // Acknowledgement endpoints may answer with an empty body.
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };

        serde_json::from_slice(payload).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            source: e,
        })
    }

    fn url(
        &self,
        path: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl {
                    url: self.base_url.to_string(),
                    reason: "base URL cannot carry a path".to_string(),
                })?
                .pop_if_empty()
                .extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

/// Parse the base URL and make sure it ends with `/`, so joining a relative
/// path keeps any prefix such as `/api`.
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
