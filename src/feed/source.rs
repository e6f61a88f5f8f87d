use log::{debug, warn};
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where a JSON document comes from. Implementations only fetch the raw
/// body; decoding is left to the caller.
pub trait FeedSource: Send {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<String, FeedError>;
}

// ─── HTTP ────────────────────────────────────────────────────────────────────

pub struct HttpSource {
    client: Client,
    url: String,
    bearer: Option<String>,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            bearer: None,
        })
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

impl FeedSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String, FeedError> {
        debug!("GET {}", self.url);
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned {}", self.url, status);
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

// ─── Local file ──────────────────────────────────────────────────────────────

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FeedSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, FeedError> {
        debug!("reading {:?}", self.path);
        std::fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Join a feed location onto the server base URL. Absolute URLs pass through.
pub fn resolve_url(base_url: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        location.trim_start_matches('/')
    )
}

/// Pick a source for a configured location: `file://` paths are read from
/// disk, everything else is fetched from the server.
pub fn open_source(
    base_url: &str,
    timeout: Duration,
    location: &str,
) -> Result<Box<dyn FeedSource>, FeedError> {
    if let Some(path) = location.strip_prefix("file://") {
        return Ok(Box::new(FileSource::new(path)));
    }
    Ok(Box::new(HttpSource::new(resolve_url(base_url, location), timeout)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolve_joins_single_slash() {
        assert_eq!(
            resolve_url("http://localhost:8000/", "/science.json"),
            "http://localhost:8000/science.json"
        );
        assert_eq!(
            resolve_url("http://nas.local", "api/task/tasks"),
            "http://nas.local/api/task/tasks"
        );
    }

    #[test]
    fn resolve_keeps_absolute_urls() {
        assert_eq!(
            resolve_url("http://localhost:8000", "https://cdn.example.org/w.json"),
            "https://cdn.example.org/w.json"
        );
    }

    #[test]
    fn file_source_reads_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let source = FileSource::new(file.path());
        assert_eq!(source.fetch().unwrap(), "[]");
    }

    #[test]
    fn file_scheme_opens_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1]").unwrap();
        let location = format!("file://{}", file.path().display());
        let source = open_source("http://unused", Duration::from_secs(1), &location).unwrap();
        assert_eq!(source.fetch().unwrap(), "[1]");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.json"));
        assert!(matches!(source.fetch(), Err(FeedError::Io { .. })));
    }
}
