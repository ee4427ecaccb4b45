//! Source descriptors
//!
//! A [`Source`] names where the HTML comes from: a remote `http`/`https` URL
//! or a local file. Protocols are checked when the descriptor is built, so a
//! bad location fails before any fetch is attempted.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Result, TableError};

/// Protocols a source may use
const KNOWN_PROTOCOLS: [&str; 3] = ["file", "http", "https"];

/// Where to load the HTML document from. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Remote document fetched with HTTP GET
    Url(Url),
    /// Local file read from disk
    File(PathBuf),
}

impl Source {
    /// Build a source from a URL string.
    ///
    /// `file://` URLs become [`Source::File`].
    ///
    /// # Errors
    /// `TableError::MalformedSource` if the string is not a URL or uses a
    /// protocol other than `file`, `http` or `https`.
    ///
    /// # Example
    /// ```
    /// use htmltab_core::Source;
    ///
    /// assert!(Source::url("https://example.com/stats.html").is_ok());
    /// assert!(Source::url("badhttp://example.com/stats.html").is_err());
    /// ```
    pub fn url(location: &str) -> Result<Self> {
        let parsed = Url::parse(location).map_err(|e| malformed(location, e.to_string()))?;
        Self::from_url(location, parsed)
    }

    /// Build a source for a local file path. Never fails; a missing file is
    /// reported when the reader is refreshed.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }

    /// Build a source from either a URL or a plain path.
    ///
    /// Anything with a URL scheme is validated as a URL; anything without
    /// one (including Windows drive paths like `C:\data\t.html`) is a file.
    pub fn parse(location: &str) -> Result<Self> {
        match Url::parse(location) {
            Ok(parsed) if parsed.scheme().len() > 1 => Self::from_url(location, parsed),
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
                if location.trim().is_empty() {
                    return Err(malformed(location, "empty location".to_string()));
                }
                Ok(Source::file(location))
            }
            Err(e) => Err(malformed(location, e.to_string())),
        }
    }

    fn from_url(location: &str, parsed: Url) -> Result<Self> {
        let scheme = parsed.scheme();
        if !KNOWN_PROTOCOLS.contains(&scheme) {
            return Err(malformed(location, format!("unknown protocol: {}", scheme)));
        }

        if scheme == "file" {
            let path = parsed
                .to_file_path()
                .map_err(|_| malformed(location, "file URL has no local path".to_string()))?;
            return Ok(Source::File(path));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(malformed(location, "missing host".to_string()));
        }

        Ok(Source::Url(parsed))
    }

    /// Protocol of this source: `file`, `http` or `https`
    pub fn protocol(&self) -> &str {
        match self {
            Source::Url(url) => url.scheme(),
            Source::File(_) => "file",
        }
    }

    /// Local path, if this is a file source
    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::File(path) => Some(path),
            Source::Url(_) => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn malformed(location: &str, reason: String) -> TableError {
    TableError::MalformedSource {
        location: location.to_string(),
        reason,
    }
}
