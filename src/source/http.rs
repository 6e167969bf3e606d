//! HTTP binding of the list RPC
//!
//! - `POST {endpoint}/rpc/list_{entity}` with a [`ListRequest`] body
//! - `GET/PATCH/DELETE {endpoint}/{entity}/{id}` for single records
//!
//! The API key goes out as both `apikey` and `Authorization: Bearer`. It is
//! kept in a `SecretBox` so it never shows up in `Debug` output.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::entity::Record;
use crate::error::{BackofficeError, Result};
use crate::list::query::{ListRequest, ListResult};

use super::ListSource;

/// Error body shape returned by the store on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error", alias = "msg")]
    message: String,
}

pub struct HttpSource<T> {
    client: Client,
    base: Url,
    api_key: Option<SecretBox<String>>,
    timeout: Option<Duration>,
    _record: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for HttpSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("base", &self.base.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl<T: Record> HttpSource<T> {
    /// Build a source for `endpoint`; `timeout` bounds each whole request
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut base = Url::parse(endpoint)?;
        if base.cannot_be_a_base() {
            return Err(BackofficeError::Config(format!(
                "endpoint '{endpoint}' cannot be used as a base URL"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }

        Ok(Self {
            client: builder.build()?,
            base,
            api_key: api_key.map(|key| SecretBox::new(Box::new(key))),
            timeout,
            _record: PhantomData,
        })
    }

    /// Build a source from the configured endpoint, key and timeout
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint().ok_or_else(|| {
            BackofficeError::Config(
                "remote endpoint not configured. Set BACKOFFICE_ENDPOINT or run: backoffice config set remote.endpoint <url>"
                    .to_string(),
            )
        })?;
        Self::new(&endpoint, config.api_key(), config.request_timeout())
    }

    pub fn list_url(&self) -> Result<Url> {
        Ok(self.base.join(&format!("rpc/list_{}", T::KIND))?)
    }

    pub fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base.join(&format!("{}/", T::KIND))?;
        url.path_segments_mut()
            .map_err(|_| BackofficeError::Config("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request
                .header("apikey", key.expose_secret().as_str())
                .bearer_auth(key.expose_secret()),
            None => request,
        }
    }

    async fn send(&self, what: &str, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(what, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body.trim().to_string()
                }
            });
        tracing::warn!(status = status.as_u16(), what, "request rejected: {message}");
        Err(BackofficeError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn transport_error(&self, what: &str, error: reqwest::Error) -> BackofficeError {
        match self.timeout {
            Some(limit) if error.is_timeout() => BackofficeError::Timeout(what.to_string(), limit.as_secs()),
            _ => BackofficeError::Http(error),
        }
    }

    fn not_found(id: &str) -> BackofficeError {
        BackofficeError::NotFound {
            kind: T::KIND.singular().to_string(),
            id: id.to_string(),
        }
    }
}

impl<T: Record> ListSource<T> for HttpSource<T> {
    async fn list(&self, request: &ListRequest) -> Result<ListResult<T>> {
        let url = self.list_url()?;
        tracing::debug!(%url, limit = request.limit, offset = request.offset, "list request");
        let response = self
            .send("list request", self.client.post(url).json(request))
            .await?;
        response
            .json::<ListResult<T>>()
            .await
            .map_err(|e| self.transport_error("list request", e))
    }

    async fn fetch(&self, id: &str) -> Result<T> {
        let url = self.record_url(id)?;
        match self.send("detail request", self.client.get(url)).await {
            Ok(response) => response
                .json::<T>()
                .await
                .map_err(|e| self.transport_error("detail request", e)),
            Err(BackofficeError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(Self::not_found(id))
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, record: &T) -> Result<()> {
        let url = self.record_url(record.id())?;
        self.send("save request", self.client.patch(url).json(record))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.record_url(id)?;
        match self.send("delete request", self.client.delete(url)).await {
            Ok(_) => Ok(()),
            Err(BackofficeError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(Self::not_found(id))
            }
            Err(e) => Err(e),
        }
    }
}
