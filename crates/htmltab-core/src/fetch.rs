//! Raw document loading
//!
//! Turns a [`Source`] into HTML text: HTTP GET for URLs, a file read for
//! paths. Every failure comes back as `TableError::TableLoad` with the
//! underlying cause attached. There is no retry; callers that want one wrap
//! the refresh themselves.

use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::trace;

use crate::decode::decode_document;
use crate::error::{LoadFailure, Result, TableError};
use crate::source::Source;

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for fetching remote documents
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Redirects followed before giving up (default: 10)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
        }
    }
}

/// Raw body plus the charset named by the `Content-Type` header, if any
struct Body {
    bytes: Vec<u8>,
    charset: Option<String>,
}

/// Loads documents from URLs and files
///
/// The HTTP client is built on the first URL fetch and reused after that,
/// so creating a fetcher never fails and never touches the network.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    config: FetchConfig,
    client: OnceCell<reqwest::Client>,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FetchConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch the document behind `source` as text.
    ///
    /// # Errors
    /// `TableError::TableLoad` with one of:
    /// - `LoadFailure::Http` - transport error (DNS, refused, timeout)
    /// - `LoadFailure::Status` - non-2xx status after redirects
    /// - `LoadFailure::Io` - file missing or unreadable
    /// - `LoadFailure::Decode` - bytes are malformed in the encoding the
    ///   document declares
    ///
    /// The encoding comes from a byte-order mark, then the `Content-Type`
    /// charset, then a `<meta charset>` near the top of the document.
    /// Undeclared documents are read as UTF-8, or windows-1252 when they
    /// are not valid UTF-8.
    pub async fn fetch(&self, source: &Source) -> Result<String> {
        let location = source.to_string();
        let body = match source {
            Source::Url(url) => self.get(url.as_str()).await,
            Source::File(path) => tokio::fs::read(path)
                .await
                .map(|bytes| Body {
                    bytes,
                    charset: None,
                })
                .map_err(LoadFailure::from),
        }
        .map_err(|cause| TableError::load(&location, cause))?;

        trace!(
            location = %location,
            bytes = body.bytes.len(),
            charset = body.charset.as_deref().unwrap_or("-"),
            "fetched document"
        );

        decode_document(&body.bytes, body.charset.as_deref())
            .map_err(|cause| TableError::load(location, cause))
    }

    async fn client(&self) -> std::result::Result<&reqwest::Client, LoadFailure> {
        let client = self
            .client
            .get_or_try_init(|| async {
                reqwest::Client::builder()
                    .user_agent(self.config.user_agent.as_str())
                    .redirect(reqwest::redirect::Policy::limited(self.config.max_redirects))
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .build()
            })
            .await?;
        Ok(client)
    }

    async fn get(&self, url: &str) -> std::result::Result<Body, LoadFailure> {
        let response = self.client().await?.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadFailure::Status(status.as_u16()));
        }

        let charset = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(crate::decode::charset_param)
            .map(str::to_string);

        Ok(Body {
            bytes: response.bytes().await?.to_vec(),
            charset,
        })
    }
}
