//! Where finished images go.
//!
//! A sink takes an encoded image and a key and answers with the
//! location the image can be found at afterward.  The renderer knows
//! nothing about sinks; the binary picks one and hands it the bytes.

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use error::SinkError;

/// The bucket the bot has always published to.
pub const DEFAULT_BUCKET_URL: &str = "https://s3.amazonaws.com/lambot-fractals";

/// Accepts an encoded object under a key.
pub trait Sink {
    /// Store `bytes` under `key`, returning where it ended up.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, SinkError>;
}

/// Writes objects as files in a directory.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// A sink rooted at `root`.  The directory is created on first use.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        DirectorySink { root: root.into() }
    }
}

impl Sink for DirectorySink {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, SinkError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(key);
        fs::write(&path, bytes)?;
        info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path.display().to_string())
    }
}

/// PUTs objects to `<base_url>/<key>` on an HTTP object store.
#[derive(Debug)]
pub struct HttpSink {
    client: Client,
    base_url: String,
}

impl HttpSink {
    /// A sink publishing under `base_url`.
    pub fn new(base_url: &str) -> Result<Self, SinkError> {
        let client = Client::builder().build()?;
        Ok(HttpSink {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The public URL of `key`.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

impl Sink for HttpSink {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, SinkError> {
        let url = self.url_for(key);
        info!("uploading {} bytes to {}", bytes.len(), url);
        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "image/png")
            .body(bytes.to_vec())
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected {
                key: key.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_sink_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("nested"));
        let location = sink.put("4x4_10.png", b"not really a png").unwrap();
        let written = fs::read(dir.path().join("nested").join("4x4_10.png")).unwrap();
        assert_eq!(written, b"not really a png");
        assert!(location.ends_with("4x4_10.png"));
    }

    #[test]
    fn http_sink_builds_object_urls() {
        let sink = HttpSink::new(DEFAULT_BUCKET_URL).unwrap();
        assert_eq!(
            sink.url_for("600x400_500.png"),
            "https://s3.amazonaws.com/lambot-fractals/600x400_500.png"
        );
        let sink = HttpSink::new("http://localhost:9000/bucket/").unwrap();
        assert_eq!(sink.url_for("a.png"), "http://localhost:9000/bucket/a.png");
    }

    #[test]
    fn http_sink_reports_transport_failures() {
        // Nothing listens on port 9 of the loopback interface.
        let sink = HttpSink::new("http://127.0.0.1:9").unwrap();
        match sink.put("a.png", b"x") {
            Err(SinkError::Http(_)) => {}
            other => panic!("expected a transport error, got {:?}", other),
        }
    }
}
