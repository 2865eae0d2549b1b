//! HTTP client for the hosted backend's REST and auth endpoints

use crate::query::TableQuery;
use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::Session;

/// Low-level HTTP client
///
/// Every request carries the project's `apikey`. The bearer token is the
/// caller's session token, or the anon key for public reads.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

/// Error body of PostgREST (`message`) or the auth service (`msg`,
/// `error_description`)
#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl BackendErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error_description)
            .or(self.msg)
            .or(self.error)
    }
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request with the `apikey` and bearer headers
    fn request(&self, method: Method, url: &str, session: Option<&Session>) -> RequestBuilder {
        let bearer = match session {
            Some(session) => session.bearer(),
            None => format!("Bearer {}", self.anon_key),
        };
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(reqwest::header::AUTHORIZATION, bearer)
    }

    /// Request against a table, with the query string of `query`
    pub fn rest(&self, method: Method, query: &TableQuery, session: Option<&Session>) -> RequestBuilder {
        self.request(method, &self.rest_url(query.table()), session)
            .query(&query.to_query_pairs())
    }

    /// Request against an auth endpoint
    pub fn auth(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        self.request(method, &self.auth_url(path), session)
    }

    /// Send and decode a JSON body
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "Backend returned an unexpected body");
            ClientError::InvalidResponse(e.to_string())
        })
    }

    /// Send and discard the body
    pub async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map non-success statuses to client errors, keeping the backend's message
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<BackendErrorBody>(&text)
            .ok()
            .and_then(BackendErrorBody::into_message)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    text
                }
            });

        tracing::debug!(status = status.as_u16(), %message, "Backend request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            other => ClientError::Api {
                status: other.as_u16(),
                message,
            },
        })
    }
}
