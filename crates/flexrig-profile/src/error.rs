//! Error types for profile loading, editing, and validation.

use thiserror::Error;

use crate::profile::MemberKind;

/// Error codes for profile validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Profile name is empty or too long to prefix bone names
    InvalidProfileName,
    /// E002: Member suffix contains a name separator
    InvalidSuffix,
    /// E003: Two landmarks of the same bone coincide
    DegenerateSegment,
    /// E004: Landmark coordinate is NaN or infinite
    NonFiniteLandmark,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidProfileName => "E001",
            ErrorCode::InvalidSuffix => "E002",
            ErrorCode::DegenerateSegment => "E003",
            ErrorCode::NonFiniteLandmark => "E004",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for profile validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Suffix reused by another member of the same region
    DuplicateSuffix,
    /// W002: Thumb landmark set while the hand is absent
    ThumbWithoutHand,
    /// W003: Required landmark left at the origin
    LandmarkAtOrigin,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::DuplicateSuffix => "W001",
            WarningCode::ThumbWithoutHand => "W002",
            WarningCode::LandmarkAtOrigin => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "arms\[0\].lower").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Errors raised while loading or editing profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A member index does not exist in the profile.
    #[error("{kind} #{index} does not exist (profile has {len})")]
    MemberOutOfRange {
        kind: MemberKind,
        index: usize,
        len: usize,
    },

    /// A member selector could not be parsed.
    #[error("invalid member selector '{0}' (expected heads:N, arms:N or legs:N)")]
    InvalidSelector(String),

    /// No profile with the requested name exists in the library.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    /// The library holds no profiles at all.
    #[error("profile library is empty")]
    EmptyLibrary,
}

/// Result of profile validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
