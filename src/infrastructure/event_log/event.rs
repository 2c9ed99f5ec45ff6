//! Remote log event model.

use serde::{Deserialize, Serialize};

/// Package names used when reporting registry activity.
pub mod packages {
    pub const VALIDATION: &str = "validation";
    pub const SHORTENER: &str = "url-shortener";
    pub const REDIRECT: &str = "url-redirect";
    pub const STORAGE: &str = "storage";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// One event as accepted by the log collector.
///
/// The collector only accepts lowercase `stack`, `level` and `package`
/// values; the package is lowercased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub stack: Stack,
    pub level: Level,
    pub package: String,
    pub message: String,
}

impl LogEvent {
    pub fn new(level: Level, package: &str, message: impl Into<String>) -> Self {
        Self {
            stack: Stack::Backend,
            level,
            package: package.to_lowercase(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_lowercase() {
        let event = LogEvent::new(Level::Warn, "URL-Redirect", "Expired link accessed");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "stack": "backend",
                "level": "warn",
                "package": "url-redirect",
                "message": "Expired link accessed"
            })
        );
    }
}
