//! Async HTTP client for the Practice JSON API.

use std::time::Duration;

use practice_core::Entity;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::{
  error::{ClientError, Result},
  service::EntityService,
};

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8080".to_string(),
      username: "user".to_string(),
      password: "user".to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

#[derive(Deserialize)]
struct JwtToken {
  id_token: String,
}

/// Async HTTP client for the REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
  token:  Option<String>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Transport)?;
    Ok(Self { client, config, token: None })
  }

  /// Build a client and authenticate it in one step.
  pub async fn login(config: ApiConfig) -> Result<Self> {
    let mut client = Self::new(config)?;
    client.authenticate().await?;
    Ok(client)
  }

  pub fn config(&self) -> &ApiConfig { &self.config }

  pub fn is_authenticated(&self) -> bool { self.token.is_some() }

  /// Absolute URL for an API path such as `/employees/3`.
  pub fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `POST /api/authenticate` and keep the returned bearer token.
  pub async fn authenticate(&mut self) -> Result<()> {
    let resp = self
      .client
      .post(self.url("/authenticate"))
      .json(&json!({
        "username":   self.config.username,
        "password":   self.config.password,
        "rememberMe": false,
      }))
      .send()
      .await
      .map_err(ClientError::Transport)?;

    if !resp.status().is_success() {
      return Err(ClientError::Authentication(resp.status()));
    }
    let token: JwtToken = resp.json().await.map_err(ClientError::Decode)?;
    self.token = Some(token.id_token);
    info!(user = %self.config.username, "authenticated");
    Ok(())
  }

  /// URL of one record: `{base}/api/{resource}/{id}`, with `id` escaped as
  /// a single path segment so `/`, `?` or `#` in it stay part of the id.
  pub fn record_url(&self, resource: &str, id: &str) -> Result<Url> {
    let base = self.url(&format!("/{resource}"));
    let invalid = |reason: String| ClientError::InvalidUrl { url: base.clone(), reason };
    let mut url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    url
      .path_segments_mut()
      .map_err(|()| invalid("cannot be a base".to_string()))?
      .push(id);
    Ok(url)
  }

  /// A request builder for `path` with credentials attached.
  pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
    self.authorize(self.client.request(method, self.url(path)))
  }

  /// A request builder for an already-built URL, credentials attached.
  pub fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
    self.authorize(self.client.request(method, url))
  }

  fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Send `req` and turn any non-2xx status into [`ClientError::Status`].
  pub(crate) async fn send(&self, method: Method, req: RequestBuilder) -> Result<Response> {
    let resp = req.send().await.map_err(ClientError::Transport)?;
    let status = resp.status();
    let url = resp.url().to_string();
    debug!(%method, %url, %status, "api call");

    if status.is_success() {
      return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { method, url, status, message })
  }

  /// Service for entity type `E`.
  pub fn service<E: Entity>(&self) -> EntityService<E> {
    EntityService::new(self.clone())
  }
}
