//! Common error infrastructure for adventure-core.
//!
//! Domain-specific errors (e.g. [`crate::roster::RosterError`],
//! [`crate::env::OracleError`]) live next to the code that raises them and
//! implement [`GameError`] so the front-end can classify them uniformly.
//!
//! A condition that evaluates to `false` is never an error; only decode,
//! lookup and I/O failures travel through these types.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the current operation is abandoned, the session continues
/// - **Validation**: a caller asked for something that does not exist
/// - **Internal**: an engine invariant was broken, indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The failed operation is dropped and the previous stable mode resumes.
    ///
    /// Examples: a data file could not be opened, a location record is stale
    Recoverable,

    /// Invalid reference, should not retry without changes.
    ///
    /// Examples: NPC id not registered, catalog id outside the index
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Unrecoverable, the process must stop.
    ///
    /// Examples: allocation failure
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the session may continue after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug or a dead session.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all engine errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are SCREAMING_SNAKE identifiers, stable across releases
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// What the player sees when an operation fails: a title, a message and the
/// numeric code of the failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReport {
    pub title: String,
    pub message: String,
    pub code: i16,
}

impl ErrorReport {
    pub fn new(title: impl Into<String>, message: impl Into<String>, code: i16) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            code,
        }
    }
}

impl core::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {} [{}]", self.title, self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_display_includes_code() {
        let report = ErrorReport::new("Datafile Error!", "Unable to open MAP .idx file.", -30);
        assert_eq!(
            report.to_string(),
            "Datafile Error!: Unable to open MAP .idx file. [-30]"
        );
    }

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Fatal.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
