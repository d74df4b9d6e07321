use serde::Serialize;
use serde_json::{json, Value as JsonValue};

const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Result of every client operation: either data or a human-readable error.
///
/// Serializes as `{"data": ...}` or `{"error": "..."}`.
///
/// Build the error side with [`Outcome::error`], which keeps the message
/// non-empty. Constructing `Outcome::Error` directly bypasses that check.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Data(T),
    Error(String),
}

impl<T> Outcome<T> {
    /// Builds an error outcome. An empty message is replaced by a generic one.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Error(UNKNOWN_ERROR.to_owned())
        } else {
            Self::Error(message)
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            Self::Data(_) => None,
            Self::Error(message) => Some(message),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// Converts into a standard `Result` with the error message as `Err`.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(message) => Err(message),
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Data(data) => Outcome::Data(f(data)),
            Self::Error(message) => Outcome::Error(message),
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Renders the outcome as JSON for a tool host.
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_else(|err| {
            json!({ "error": format!("failed to serialize result: {err}") })
        })
    }
}

impl<T> From<crate::HeyGenError> for Outcome<T> {
    fn from(err: crate::HeyGenError) -> Self {
        Self::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Outcome;
    use crate::HeyGenError;

    #[test]
    fn empty_error_message_is_replaced() {
        let outcome = Outcome::<()>::error("   ");
        let message = outcome.as_error().expect("error side");
        assert!(!message.trim().is_empty());
    }

    #[test]
    fn exactly_one_side_is_populated() {
        let data = Outcome::Data(5);
        assert!(data.is_data() && !data.is_error());
        assert_eq!(data.as_error(), None);

        let error = Outcome::<i32>::error("boom");
        assert!(error.is_error() && !error.is_data());
        assert_eq!(error.as_data(), None);
    }

    #[test]
    fn renders_tagged_json() {
        assert_eq!(
            Outcome::Data(json!({"video_id": "v1"})).to_json(),
            json!({"data": {"video_id": "v1"}})
        );
        assert_eq!(
            Outcome::<()>::error("No voices found.").to_json(),
            json!({"error": "No voices found."})
        );
    }

    #[test]
    fn map_and_into_result() {
        let doubled = Outcome::Data(21).map(|n| n * 2);
        assert_eq!(doubled.into_result(), Ok(42));

        let failed: Outcome<i32> = Outcome::error("nope");
        assert_eq!(failed.map(|n| n * 2).into_result(), Err("nope".to_owned()));
    }

    #[test]
    fn from_error_uses_display_text() {
        let outcome: Outcome<()> = HeyGenError::Http {
            status: 404,
            excerpt: "missing".to_owned(),
        }
        .into();
        assert_eq!(outcome.as_error(), Some("HTTP 404 — missing"));
    }
}
