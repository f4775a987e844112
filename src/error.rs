//! Error types for rendering, storage and the webhook plugin.

use std::io;

use failure::Fail;

/// Things that can go wrong before or after the pixel loop.  The loop
/// itself cannot fail: every orbit is bounded by the iteration limit.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// A canvas needs at least one column.
    #[fail(display = "image width must be at least one pixel")]
    ZeroWidth,

    /// A canvas needs at least one row.
    #[fail(display = "image height must be at least one pixel")]
    ZeroHeight,

    /// The palette and the escape test both need at least one pass.
    #[fail(display = "iteration count must be at least one")]
    ZeroIterations,

    /// The finished canvas could not be turned into a PNG.
    #[fail(display = "could not encode image: {}", _0)]
    Encode(#[cause] io::Error),
}

/// Failures while handing an encoded image to a sink.
#[derive(Debug, Fail)]
pub enum SinkError {
    /// Local filesystem trouble.
    #[fail(display = "could not write object: {}", _0)]
    Io(#[cause] io::Error),

    /// The transfer itself failed.
    #[fail(display = "could not reach object store: {}", _0)]
    Http(#[cause] reqwest::Error),

    /// The store answered, but refused the object.
    #[fail(display = "object store rejected {} with status {}", key, status)]
    Rejected {
        /// The key we tried to store.
        key: String,
        /// HTTP status returned by the store.
        status: u16,
    },
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        SinkError::Io(err)
    }
}

impl From<reqwest::Error> for SinkError {
    fn from(err: reqwest::Error) -> Self {
        SinkError::Http(err)
    }
}

/// Failures of the calendar webhook.  Each case is distinct so the
/// caller can log it with the right context.
#[derive(Debug, Fail)]
pub enum WebhookError {
    /// The callback could not be delivered.
    #[fail(display = "could not reach {}: {}", url, error)]
    Network {
        /// Where we tried to post.
        url: String,
        /// What the transport reported.
        #[cause]
        error: reqwest::Error,
    },

    /// The incoming payload was not the JSON object we expect.
    #[fail(display = "malformed payload: {}", _0)]
    MalformedPayload(#[cause] serde_json::Error),

    /// The callback answered with a failure status.
    #[fail(display = "{} answered with status {}", url, status)]
    Downstream {
        /// Where we posted.
        url: String,
        /// HTTP status returned by the callback.
        status: u16,
    },
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::MalformedPayload(err)
    }
}
