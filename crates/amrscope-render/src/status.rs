//! Backend status channel.
//!
//! Backends report diagnostics asynchronously with a severity. Only
//! [`Severity::FatalError`] stops the caller; everything else is logged.

use crate::error::{RenderError, RenderResult};

/// Severity of a backend status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Unrecoverable; the caller must abort.
    FatalError,
    /// An operation failed but the device remains usable.
    Error,
    /// Suspicious input or state.
    Warning,
    /// Valid usage that is likely to be slow.
    PerformanceWarning,
    /// Informational.
    Info,
    /// Debug chatter.
    Debug,
}

impl Severity {
    /// Returns true for [`Severity::FatalError`].
    pub fn is_fatal(self) -> bool {
        self == Self::FatalError
    }
}

/// One message from the backend's status channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message severity.
    pub severity: Severity,
    /// Backend object the message is about, if any.
    pub origin: Option<String>,
    /// Message text.
    pub message: String,
}

impl StatusMessage {
    /// Creates a message without an origin.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            origin: None,
            message: message.into(),
        }
    }

    /// Attaches the originating backend object.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Logs a status message and turns a fatal one into an error.
pub fn handle_status(status: &StatusMessage) -> RenderResult<()> {
    let origin = status.origin.as_deref().unwrap_or("-");
    match status.severity {
        Severity::FatalError => {
            log::error!("[FATAL][{origin}] {}", status.message);
            return Err(RenderError::Fatal {
                origin: status.origin.clone(),
                message: status.message.clone(),
            });
        }
        Severity::Error => log::error!("[{origin}] {}", status.message),
        Severity::Warning => log::warn!("[{origin}] {}", status.message),
        Severity::PerformanceWarning => log::warn!("[PERF][{origin}] {}", status.message),
        Severity::Info => log::debug!("[{origin}] {}", status.message),
        Severity::Debug => log::trace!("[{origin}] {}", status.message),
    }
    Ok(())
}

/// Logs every message and returns the first fatal one as an error.
///
/// Messages after a fatal one are still logged.
pub fn handle_all(statuses: impl IntoIterator<Item = StatusMessage>) -> RenderResult<()> {
    let mut first_fatal = None;
    for status in statuses {
        if let Err(err) = handle_status(&status) {
            first_fatal.get_or_insert(err);
        }
    }
    first_fatal.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_fatal_severities_pass() {
        for severity in [
            Severity::Error,
            Severity::Warning,
            Severity::PerformanceWarning,
            Severity::Info,
            Severity::Debug,
        ] {
            assert!(handle_status(&StatusMessage::new(severity, "msg")).is_ok());
            assert!(!severity.is_fatal());
        }
    }

    #[test]
    fn test_fatal_becomes_error() {
        let status = StatusMessage::new(Severity::FatalError, "device lost").with_origin("frame");
        match handle_status(&status) {
            Err(RenderError::Fatal { origin, message }) => {
                assert_eq!(origin.as_deref(), Some("frame"));
                assert_eq!(message, "device lost");
            }
            other => panic!("expected fatal error, got {other:?}"),
        }
    }

    #[test]
    fn test_handle_all_keeps_first_fatal() {
        let result = handle_all(vec![
            StatusMessage::new(Severity::Warning, "slow path"),
            StatusMessage::new(Severity::FatalError, "first"),
            StatusMessage::new(Severity::FatalError, "second"),
        ]);
        assert!(matches!(result, Err(RenderError::Fatal { message, .. }) if message == "first"));
        assert!(handle_all(Vec::new()).is_ok());
    }
}
