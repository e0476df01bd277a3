//! Connection check result.

use std::fmt;

/// Result of a connection check.
///
/// The check never raises; any failure is captured as a structured result
/// with a human-readable reason for the hosting framework to display.
#[derive(Debug, Clone)]
pub struct CheckResult {
    success: bool,
    message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result.
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result with a reason.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Whether the check succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The failure reason, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "connection check passed")
        } else {
            write!(f, "connection check failed")?;
            if let Some(ref msg) = self.message {
                write!(f, ": {}", msg)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_carries_reason() {
        let result = CheckResult::failure("client id must be provided");
        assert!(!result.is_success());
        assert_eq!(result.message(), Some("client id must be provided"));
        assert_eq!(
            result.to_string(),
            "connection check failed: client id must be provided"
        );
    }

    #[test]
    fn success_has_no_message() {
        let result = CheckResult::success();
        assert!(result.is_success());
        assert!(result.message().is_none());
    }
}
