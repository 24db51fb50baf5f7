//! HTTP Client
//!
//! Thin wrapper over `reqwest` that attaches the bearer token and turns
//! non-success responses into [`ClientError`]s.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::error::{ClientError, ClientResult};

/// HTTP client for the booking platform API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    token: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. "http://localhost:8080"
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl ApiClient {
    /// Create a new client without credentials
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("servicebay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let config = ClientConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self {
            client,
            config,
            token: None,
        })
    }

    /// Attach a bearer token to every subsequent request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, %method, path, "API request");

        let builder = self
            .client
            .request(method, self.url(path))
            .header("X-Request-Id", request_id);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and fail on any non-success status
    async fn execute(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "API error response");
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.execute(builder).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.json(self.request(Method::GET, path)).await
    }

    /// GET a plain-text resource
    pub async fn get_text(&self, path: &str) -> ClientResult<String> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Ok(response.text().await?)
    }

    /// POST a JSON body and decode a JSON reply
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.json(self.request(Method::POST, path).json(body)).await
    }

    /// PUT a JSON body and decode a JSON reply
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.json(self.request(Method::PUT, path).json(body)).await
    }

    /// PUT without a body; any reply body is ignored
    pub async fn put_empty(&self, path: &str) -> ClientResult<()> {
        self.execute(self.request(Method::PUT, path)).await?;
        Ok(())
    }

    /// DELETE a resource; any reply body is ignored
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_url_join() {
        let client = ApiClient::new(ClientConfig {
            base_url: "http://api.local/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(client.url("/api/vehicles"), "http://api.local/api/vehicles");
        assert_eq!(client.url("api/leaves"), "http://api.local/api/leaves");
    }

    #[test]
    fn test_token_handling() {
        let mut client = ApiClient::new(ClientConfig::default()).unwrap().with_token("abc");
        assert_eq!(client.token(), Some("abc"));
        client.set_token(None);
        assert_eq!(client.token(), None);
    }
}
