//! User-facing status notices (the toast/alert messages of the map page).

use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An action completed
    Success,
    /// An action failed
    Error,
    /// Neutral information
    Info,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text shown to the user
    pub message: String,
}

impl Notice {
    /// Create a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error notice. The text is prefixed with `Error: `.
    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: format!("Error: {}", message),
        }
    }

    /// Create an error notice whose text already reads as a complete message.
    pub fn rejected(message: impl fmt::Display) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_string(),
        }
    }

    /// Create an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Notice for a fulfilled proximity query.
    pub fn query_results(count: usize) -> Self {
        if count == 0 {
            Self::info("Query successful! No features found.")
        } else {
            Self::success(format!("Query successful! {} features returned.", count))
        }
    }

    /// Notice for a filter run.
    pub fn filter_applied(count: usize) -> Self {
        Self::success(format!("Filter applied: {} features", count))
    }

    /// Notice for an accepted upload.
    pub fn upload_succeeded() -> Self {
        Self::success("GeoJSON file uploaded successfully!")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}
