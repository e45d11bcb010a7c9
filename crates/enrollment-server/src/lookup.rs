//! HTTP clients for the user and course services.
//!
//! Both services answer `GET /{resource}/{id}` with the platform envelope
//! `{"status": .., "data": {..}}` and use `404` for unknown ids.

use std::time::Duration;

use enrollment_core::lookup::{Course, CourseLookup, User, UserLookup};
use reqwest::{Client, StatusCode, Url, header};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
  #[error("invalid base url {0:?}")]
  InvalidBaseUrl(String),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{url} responded {status}")]
  Status { url: String, status: StatusCode },

  #[error("malformed response from {url}: {source}")]
  Decode {
    url:    String,
    #[source]
    source: reqwest::Error,
  },
}

#[derive(Deserialize)]
struct Envelope<T> {
  data: T,
}

/// Shared plumbing for the two lookups.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
struct LookupClient {
  client: Client,
  base:   Url,
  token:  Option<String>,
}

impl LookupClient {
  fn new(base_url: &str, token: Option<String>) -> Result<Self, LookupError> {
    let base = Url::parse(base_url)
      .ok()
      .filter(|u| !u.cannot_be_a_base())
      .ok_or_else(|| LookupError::InvalidBaseUrl(base_url.to_owned()))?;
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, base, token })
  }

  fn url(&self, resource: &str, id: &str) -> Url {
    let mut url = self.base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.pop_if_empty().push(resource).push(id);
    }
    url
  }

  /// `GET {base}/{resource}/{id}`; `Ok(None)` on 404.
  async fn fetch<T: DeserializeOwned>(
    &self,
    resource: &str,
    id: &str,
  ) -> Result<Option<T>, LookupError> {
    let url = self.url(resource, id);
    let mut req = self.client.get(url.clone());
    if let Some(token) = &self.token {
      req = req.header(header::AUTHORIZATION, token);
    }

    let resp = req.send().await?;
    match resp.status() {
      StatusCode::NOT_FOUND => return Ok(None),
      s if !s.is_success() => {
        return Err(LookupError::Status { url: url.to_string(), status: s });
      }
      _ => {}
    }

    let envelope: Envelope<T> = resp
      .json()
      .await
      .map_err(|source| LookupError::Decode { url: url.to_string(), source })?;
    Ok(Some(envelope.data))
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// [`UserLookup`] backed by the user service.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
  inner: LookupClient,
}

impl HttpUserDirectory {
  pub fn new(base_url: &str) -> Result<Self, LookupError> {
    Ok(Self { inner: LookupClient::new(base_url, None)? })
  }
}

impl UserLookup for HttpUserDirectory {
  type Error = LookupError;

  async fn get(&self, id: &str) -> Result<Option<User>, LookupError> {
    self.inner.fetch("users", id).await
  }
}

// ─── Courses ─────────────────────────────────────────────────────────────────

/// [`CourseLookup`] backed by the course service. The optional token is sent
/// verbatim in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct HttpCourseCatalog {
  inner: LookupClient,
}

impl HttpCourseCatalog {
  pub fn new(base_url: &str, token: Option<String>) -> Result<Self, LookupError> {
    Ok(Self { inner: LookupClient::new(base_url, token)? })
  }
}

impl CourseLookup for HttpCourseCatalog {
  type Error = LookupError;

  async fn get(&self, id: &str) -> Result<Option<Course>, LookupError> {
    self.inner.fetch("courses", id).await
  }
}
