//! Undecoded response passthrough.
//!
//! Enabled with the `raw-mode` feature. See [`HeyGenClient::raw`](crate::HeyGenClient::raw).

/// Successful 2xx body exactly as the API returned it, envelope included.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse(pub serde_json::Value);

impl RawResponse {
    /// The `data` member of the envelope, if present and not null.
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.0.get("data").filter(|data| !data.is_null())
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}
