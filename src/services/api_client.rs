//! HTTP client for the COCONUT backend
//!
//! Every backend call goes through [`ApiClient`]. Admin endpoints get the
//! stored bearer token attached; everything else, including the login
//! endpoint itself, is sent anonymously.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{multipart, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::ApiConfig;
use crate::state::storage::SessionStore;
use crate::utils::errors::{CoconutError, Result};

/// Endpoints under this prefix need the bearer token
pub const ADMIN_PREFIX: &str = "/admin";

/// The one admin endpoint that is called without a token
pub const LOGIN_PATH: &str = "/admin/login";

/// Whether a call to `endpoint` carries the `Authorization` header
pub fn requires_auth(endpoint: &str) -> bool {
    endpoint.starts_with(ADMIN_PREFIX) && endpoint != LOGIN_PATH
}

/// Join base URL and endpoint with exactly one `/` and append the query.
pub fn build_url(base_url: &str, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(url)
}

/// Thin JSON client over `reqwest`
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token to attach for `endpoint`, read fresh from the store on every call
    fn bearer_token(&self, endpoint: &str) -> Result<Option<String>> {
        if !requires_auth(endpoint) {
            return Ok(None);
        }
        Ok(self.store.load()?.map(|session| session.token))
    }

    /// Send one request and decode the JSON answer into `T`.
    ///
    /// Single attempt. Non-2xx answers become [`CoconutError::Http`] with the
    /// server's `message` when the body carries one.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = build_url(&self.base_url, endpoint, params)?;
        let token = self.bearer_token(endpoint)?;

        debug!(method = %method, url = %url, auth = token.is_some(), "Sending API request");

        let mut request = self.client.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(method = %method, endpoint = endpoint, error = %e, "API request failed");
            CoconutError::Transport(e)
        })?;

        read_response(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        self.request::<T, ()>(Method::GET, endpoint, params, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, &[], Some(body)).await
    }

    /// DELETE with a JSON body, as the backend expects the id in the body
    pub async fn delete<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::DELETE, endpoint, &[], Some(body)).await
    }

    /// POST a multipart form (file uploads)
    pub async fn post_multipart<T: DeserializeOwned>(&self, endpoint: &str, form: multipart::Form) -> Result<T> {
        let url = build_url(&self.base_url, endpoint, &[])?;
        let token = self.bearer_token(endpoint)?;

        debug!(url = %url, auth = token.is_some(), "Sending multipart request");

        let mut request = self.client.post(url).multipart(form);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = endpoint, error = %e, "Multipart request failed");
            CoconutError::Transport(e)
        })?;

        read_response(response).await
    }
}

/// Pull `message` out of a JSON error body
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = server_message(&body);
        debug!(status = status.as_u16(), message = ?message, "API returned an error status");
        return Err(CoconutError::http(status, message));
    }

    if body.trim().is_empty() {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_str(&body)?)
}
