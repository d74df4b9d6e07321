use std::fmt;
use std::path::Path;

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
    multipart::{Form, Part},
    StatusCode, Url,
};
use serde_json::Value as JsonValue;

use crate::{
    retry::{run_with_retry, Classification},
    ClientOptions, HeyGenError, Result,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.heygen.com";
pub(crate) const DEFAULT_UPLOAD_URL: &str = "https://upload.heygen.com/v1/asset";

const API_KEY_HEADER: &str = "X-Api-Key";
const EXCERPT_CHARS: usize = 200;

/// HTTP verb of a [`RequestDescriptor`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

/// One upstream call: verb, path below the base URL, query, optional body.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path segments, joined with `/` and percent-encoded individually.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
}

impl RequestDescriptor {
    /// Builds a `GET` descriptor.
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Builds a `POST` descriptor. A missing body is sent as `{}`.
    pub fn post<I, S>(segments: I, body: Option<JsonValue>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body,
        }
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Path relative to the base URL, unencoded.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

/// Statuses worth another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Retry classifier shared by JSON and upload calls.
///
/// Retryable statuses and timeouts are transient; everything else,
/// including connection failures, is fatal.
pub fn classify(err: &HeyGenError) -> Classification {
    match err {
        HeyGenError::Http { status, .. } if is_retryable_status(*status) => {
            Classification::Retryable
        }
        HeyGenError::Transport(inner) if inner.is_timeout() => Classification::Retryable,
        _ => Classification::Fatal,
    }
}

/// Authenticated HTTP plumbing shared by all client operations.
#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    upload_url: String,
    user_agent: String,
    pub(crate) options: ClientOptions,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("upload_url", &self.upload_url)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("options", &self.options)
            .finish()
    }
}

impl Transport {
    pub(crate) fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            upload_url: DEFAULT_UPLOAD_URL.to_owned(),
            user_agent: format!("heygen-http/{}", env!("CARGO_PKG_VERSION")),
            options: ClientOptions::default(),
        }
    }

    pub(crate) fn set_base_url(&mut self, base_url: String) {
        self.base_url = base_url;
    }

    pub(crate) fn set_upload_url(&mut self, upload_url: String) {
        self.upload_url = upload_url;
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes one logical JSON call with automatic retry.
    ///
    /// Returns the decoded 2xx body without interpreting it.
    pub(crate) async fn execute(&self, descriptor: &RequestDescriptor) -> Result<JsonValue> {
        let url = self.endpoint_url(descriptor)?;
        let policy = self.options.backoff();
        run_with_retry(&policy, classify, || self.send_json(descriptor, &url)).await
    }

    /// Uploads a local file as `multipart/form-data` with automatic retry.
    ///
    /// The file is read once; a missing file fails before any request.
    pub(crate) async fn execute_upload(&self, path: &Path) -> Result<JsonValue> {
        let bytes = read_upload_source(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());
        let mime = mime_for_path(path);
        let url = Url::parse(&self.upload_url).map_err(|err| {
            HeyGenError::Config(format!("invalid upload URL '{}': {err}", self.upload_url))
        })?;
        let policy = self.options.backoff();

        run_with_retry(&policy, classify, || {
            self.send_upload(&url, &file_name, mime, &bytes)
        })
        .await
    }

    async fn send_json(&self, descriptor: &RequestDescriptor, url: &Url) -> Result<JsonValue> {
        let mut request = self
            .http
            .request(descriptor.method.as_reqwest(), url.clone())
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.options.timeout());

        if descriptor.method == Method::Post {
            let empty = JsonValue::Object(Default::default());
            let body = descriptor.body.as_ref().unwrap_or(&empty);
            request = request
                .header(CONTENT_TYPE, "application/json")
                .json(body);
        }

        tracing::debug!(
            method = ?descriptor.method,
            path = %descriptor.path(),
            "sending HeyGen request"
        );
        let response = request.send().await.map_err(HeyGenError::Transport)?;
        read_json_body(response).await
    }

    async fn send_upload(
        &self,
        url: &Url,
        file_name: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Result<JsonValue> {
        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_owned())
            .mime_str(mime)
            .map_err(HeyGenError::Transport)?;
        let form = Form::new().part("file", part);

        tracing::debug!(file_name, mime, size = bytes.len(), "uploading HeyGen asset");
        let response = self
            .http
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(USER_AGENT, &self.user_agent)
            .timeout(self.options.timeout())
            .multipart(form)
            .send()
            .await
            .map_err(HeyGenError::Transport)?;
        read_json_body(response).await
    }

    fn endpoint_url(&self, descriptor: &RequestDescriptor) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            HeyGenError::Config(format!("invalid base URL '{}': {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| HeyGenError::Config(format!("base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(&descriptor.segments);
        if !descriptor.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&descriptor.query);
        }
        Ok(url)
    }
}

async fn read_json_body(response: reqwest::Response) -> Result<JsonValue> {
    let status = response.status();
    let body = response.text().await.map_err(HeyGenError::Transport)?;

    if !status.is_success() {
        return Err(http_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|err| {
        HeyGenError::Decode(format!(
            "invalid response JSON: {err}; body: {}",
            excerpt(&body)
        ))
    })
}

fn http_error(status: StatusCode, body: &str) -> HeyGenError {
    HeyGenError::Http {
        status: status.as_u16(),
        excerpt: excerpt(body),
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHARS).collect()
}

async fn read_upload_source(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(HeyGenError::FileNotFound(path.to_path_buf()))
        }
        Err(err) => Err(HeyGenError::Io(err)),
    }
}

/// MIME type for an upload, derived from the file extension.
pub(crate) fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}
