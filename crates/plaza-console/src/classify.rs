//! Error-message classification
//!
//! The provider exposes no error code taxonomy, only a message string, so
//! failures are classified by case-insensitive substring match. The class
//! selects advisory remediation text shown next to the raw message; it
//! never changes behavior (no retry, no correction, no blocking).

/// Advisory class of an `exec_sql` failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlErrorKind {
    RelationNotFound,
    FunctionNotFound,
    SyntaxError,
    PermissionDenied,
    AlreadyExists,
    Unknown,
}

impl SqlErrorKind {
    /// Classify a provider error message. Pure: the same input always
    /// yields the same class.
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("does not exist") && lowered.contains("relation") {
            Self::RelationNotFound
        } else if lowered.contains("does not exist") && lowered.contains("function") {
            Self::FunctionNotFound
        } else if lowered.contains("syntax error") {
            Self::SyntaxError
        } else if lowered.contains("permission denied") {
            Self::PermissionDenied
        } else if lowered.contains("already exists") {
            Self::AlreadyExists
        } else {
            Self::Unknown
        }
    }

    /// Kind-specific remediation suggestion
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::RelationNotFound => {
                "The table or view does not exist. Check the name against the table list."
            }
            Self::FunctionNotFound => {
                "The function does not exist. Check the name and argument types against the function list."
            }
            Self::SyntaxError => "The statement could not be parsed. Check the SQL syntax near the reported position.",
            Self::PermissionDenied => {
                "The database role used by the console lacks privileges for this statement."
            }
            Self::AlreadyExists => "An object with this name already exists. Drop or rename it first.",
            Self::Unknown => "The provider rejected the statement; see the raw error message.",
        }
    }
}

/// A provider failure plus its advisory classification
#[derive(Debug, Clone)]
pub struct ClassifiedError {
    pub kind: SqlErrorKind,
    /// Raw message text, surfaced verbatim
    pub message: String,
}

impl ClassifiedError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: SqlErrorKind::classify(&message),
            message,
        }
    }

    pub fn remediation(&self) -> &'static str {
        self.kind.remediation()
    }
}
