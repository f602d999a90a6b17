//! Request lifecycle shared by every slice
//!
//! `*Request` sets `loading`, and exactly one of `*Success` / `*Fail` clears it.

use serde::{Deserialize, Deserializer, Serialize};

/// Loading flag and last error of a slice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub loading: bool,
    pub error: Option<String>,
}

impl Lifecycle {
    /// A request went out
    pub fn request(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// The request resolved successfully
    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// The request failed; an empty message falls back to `default`.
    /// Whitespace is a message like any other.
    pub fn fail(&mut self, message: String, default: &str) {
        self.loading = false;
        self.error = Some(if message.is_empty() {
            default.to_string()
        } else {
            message
        });
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Failure payload: a message string, with `null` read as no message
pub fn message_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload of a successful delete: the removed identity and the backend's message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_fail() {
        let mut lc = Lifecycle::default();
        lc.request();
        assert!(lc.loading);

        lc.fail("boom".to_string(), "default");
        assert_eq!(lc, Lifecycle { loading: false, error: Some("boom".to_string()) });
    }

    #[test]
    fn test_empty_failure_uses_default() {
        let mut lc = Lifecycle::default();
        lc.request();
        lc.fail(String::new(), "Something went wrong");
        assert_eq!(lc.error.as_deref(), Some("Something went wrong"));
    }

    #[test]
    fn test_whitespace_failure_is_kept() {
        let mut lc = Lifecycle::default();
        lc.request();
        lc.fail("  ".to_string(), "Something went wrong");
        assert_eq!(lc.error.as_deref(), Some("  "));
    }

    #[test]
    fn test_request_clears_previous_error() {
        let mut lc = Lifecycle::default();
        lc.fail("old".to_string(), "default");
        lc.request();
        assert_eq!(lc.error, None);
        lc.succeed();
        assert!(!lc.loading);
    }
}
