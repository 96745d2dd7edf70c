//! Machine-readable command output.

use serde::{Deserialize, Serialize};

use flexrig_profile::{ValidationError, ValidationResult, ValidationWarning};

/// One error or warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationError> for JsonDiagnostic {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            path: error.path.clone(),
        }
    }
}

impl From<&ValidationWarning> for JsonDiagnostic {
    fn from(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

/// Validation outcome of one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDiagnostics {
    pub profile: String,
    pub ok: bool,
    pub errors: Vec<JsonDiagnostic>,
    pub warnings: Vec<JsonDiagnostic>,
}

impl ProfileDiagnostics {
    pub fn new(profile: &str, result: &ValidationResult) -> Self {
        Self {
            profile: profile.to_string(),
            ok: result.is_ok(),
            errors: result.errors.iter().map(JsonDiagnostic::from).collect(),
            warnings: result.warnings.iter().map(JsonDiagnostic::from).collect(),
        }
    }
}

/// Output of `flexrig validate --json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateOutput {
    pub ok: bool,
    pub profiles: Vec<ProfileDiagnostics>,
}
