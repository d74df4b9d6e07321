use std::path::PathBuf;

/// Error type returned by this crate.
///
/// Client operations never return this directly; it is rendered into the
/// error side of an [`Outcome`](crate::Outcome). Constructors return it for
/// misconfiguration.
#[derive(Debug, thiserror::Error)]
pub enum HeyGenError {
    /// Network or request execution error from `reqwest`.
    #[error("HTTP request failed: {}", describe_transport(.0))]
    Transport(reqwest::Error),
    /// Non-retryable HTTP status with a truncated response body.
    #[error("HTTP {status} — {excerpt}")]
    Http { status: u16, excerpt: String },
    /// Every allowed attempt ended in a retryable failure.
    #[error("request failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made, including the first one.
        attempts: usize,
        /// Description of the final retryable failure.
        last_error: String,
    },
    /// A 2xx body that was not valid JSON.
    #[error("decode error: {0}")]
    Decode(String),
    /// Upload source does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Local I/O failure while reading an upload source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid or missing client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl HeyGenError {
    /// Returns `true` when the error is a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}

fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out ({err})")
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::HeyGenError;

    #[test]
    fn http_error_shows_status_and_excerpt() {
        let err = HeyGenError::Http {
            status: 404,
            excerpt: "not found".to_owned(),
        };
        assert_eq!(err.to_string(), "HTTP 404 — not found");
    }

    #[test]
    fn exhausted_error_mentions_attempts() {
        let err = HeyGenError::RetriesExhausted {
            attempts: 3,
            last_error: "HTTP 503 — busy".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "request failed after 3 attempts: HTTP 503 — busy"
        );
    }

    #[test]
    fn file_not_found_names_path() {
        let err = HeyGenError::FileNotFound(PathBuf::from("/tmp/missing.png"));
        assert_eq!(err.to_string(), "File not found: /tmp/missing.png");
    }
}
