use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::{Movie, MovieFields, SortKey};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("backend rejected the call: {msg}")]
    Rejected { msg: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

/// One page worth of records plus the authoritative page count.
#[derive(Clone, Debug, PartialEq)]
pub struct PageData {
    pub records: Vec<Movie>,
    pub total_pages: u32,
}

/// The remote collaborator contract. Listing is idempotent and
/// side-effect-free; create is not idempotent and must never be retried
/// automatically; deleting a nonexistent id is a failure.
#[allow(async_fn_in_trait)]
pub trait MovieBackend {
    async fn list_page(&self, page: u32, sort: SortKey) -> Result<PageData, RemoteError>;
    async fn create(&self, fields: &MovieFields) -> Result<(), RemoteError>;
    async fn update(&self, id: &str, fields: &MovieFields) -> Result<(), RemoteError>;
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

/// Transport settings, constructed once at startup and handed to
/// [`HttpBackend::new`]. Credentialed sessions ride on the client's cookie
/// jar rather than any process-global flag.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TransportConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub send_credentials: bool,
}

fn default_timeout() -> u64 {
    30
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: default_timeout(),
            send_credentials: false,
        }
    }
}

#[derive(Serialize)]
struct PaginateRequest<'a> {
    page: u32,
    sort: &'a str,
}

/// List-call response envelope. `totalPages` defaults to 1 when the backend
/// omits it.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Movie>,
    #[serde(rename = "totalPages", default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default)]
    pub msg: Option<String>,
}

fn default_total_pages() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    msg: Option<String>,
}

fn default_success() -> bool {
    true
}

/// HTTP implementation of [`MovieBackend`] over the movie service.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &TransportConfig) -> Result<Self, RemoteError> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout));
        if config.send_credentials {
            builder = builder.cookie_store(true);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn expect_ack(resp: reqwest::Response) -> Result<(), RemoteError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Rejected {
                msg: format!("HTTP {status}"),
            });
        }
        // Mutation endpoints answer with a small JSON envelope; an empty or
        // non-JSON 2xx body still counts as an ack.
        let ack = resp.json::<AckEnvelope>().await.unwrap_or(AckEnvelope {
            success: true,
            msg: None,
        });
        if ack.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected {
                msg: ack.msg.unwrap_or_else(|| "unspecified failure".to_string()),
            })
        }
    }
}

impl MovieBackend for HttpBackend {
    async fn list_page(&self, page: u32, sort: SortKey) -> Result<PageData, RemoteError> {
        debug!(page, sort = sort.as_param(), "listing page");
        let resp = self
            .client
            .post(self.endpoint("paginate"))
            .json(&PaginateRequest {
                page,
                sort: sort.as_param(),
            })
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Rejected {
                msg: format!("HTTP {status}"),
            });
        }
        let envelope = resp.json::<PageEnvelope>().await?;
        if !envelope.success {
            return Err(RemoteError::Rejected {
                msg: envelope
                    .msg
                    .unwrap_or_else(|| "unspecified failure".to_string()),
            });
        }
        Ok(PageData {
            records: envelope.data,
            total_pages: envelope.total_pages,
        })
    }

    async fn create(&self, fields: &MovieFields) -> Result<(), RemoteError> {
        debug!(title = %fields.title, "creating movie");
        let resp = self
            .client
            .post(self.endpoint("createMovie"))
            .json(fields)
            .send()
            .await?;
        Self::expect_ack(resp).await
    }

    async fn update(&self, id: &str, fields: &MovieFields) -> Result<(), RemoteError> {
        debug!(id, "updating movie");
        let resp = self
            .client
            .put(self.endpoint(&format!("updateMovie/{id}")))
            .json(fields)
            .send()
            .await?;
        Self::expect_ack(resp).await
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        debug!(id, "deleting movie");
        let resp = self
            .client
            .delete(self.endpoint(&format!("deleteMovie/{id}")))
            .send()
            .await?;
        Self::expect_ack(resp).await
    }
}
