use serde::{Deserialize, Serialize};

/// Structured error information extracted from MongoDB errors.
///
/// Serialized to JSON for debug logging and condensed by [`ErrorInfo::summary`]
/// into the one-line form used in operation error messages.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

impl ErrorInfo {
    /// Convert error info to compact JSON string (single line).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// One-line human readable form, e.g. `IndexOptionsConflict (85): Index already exists`.
    pub fn summary(&self) -> String {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match (&self.name, self.code) {
            (Some(name), Some(code)) => format!("{name} ({code}): {message}"),
            (None, Some(code)) => format!("code {code}: {message}"),
            (Some(name), None) => format!("{name}: {message}"),
            (None, None) => message.to_string(),
        }
    }

    /// Whether the server rejected an index because of a conflicting definition.
    pub fn is_index_conflict(&self) -> bool {
        matches!(self.code, Some(85) | Some(86))
    }
}

/// Extract structured information from a MongoDB error using the driver API.
///
/// Typed error structures are used where the driver exposes them; everything
/// else falls back to the driver's `Display` output.
pub fn extract_error_info(error: &mongodb::error::Error) -> ErrorInfo {
    use mongodb::error::{ErrorKind, WriteFailure};

    let mut info = ErrorInfo::default();

    match error.kind.as_ref() {
        ErrorKind::Write(write_failure) => {
            info.error_type = Some("mongo.write_error".to_string());

            match write_failure {
                WriteFailure::WriteError(write_error) => {
                    info.code = Some(write_error.code);
                    info.message = Some(write_error.message.clone());
                    info.name = get_error_name(write_error.code);
                }
                WriteFailure::WriteConcernError(wc_error) => {
                    info.code = Some(wc_error.code);
                    info.message = Some(wc_error.message.clone());
                    info.name = Some(wc_error.code_name.clone());
                }
                _ => {}
            }
        }
        ErrorKind::Command(command_error) => {
            info.error_type = Some("mongo.command_error".to_string());
            info.code = Some(command_error.code);
            info.message = Some(command_error.message.clone());
            info.name = if command_error.code_name.is_empty() {
                get_error_name(command_error.code)
            } else {
                Some(command_error.code_name.clone())
            };
        }
        ErrorKind::Authentication { message, .. } => {
            info.error_type = Some("mongo.authentication_error".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::InvalidArgument { message, .. } => {
            info.error_type = Some("mongo.invalid_argument".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::ServerSelection { message, .. } => {
            info.error_type = Some("mongo.server_selection_error".to_string());
            info.message = Some(message.clone());
        }
        _ => {
            info.message = Some(error.to_string());
        }
    }

    info
}

/// Get a human-readable error name from a MongoDB error code.
fn get_error_name(code: i32) -> Option<String> {
    let name = match code {
        11000 | 11001 => "DuplicateKey",
        13 => "Unauthorized",
        18 => "AuthenticationFailed",
        26 => "NamespaceNotFound",
        50 => "MaxTimeMSExpired",
        85 => "IndexOptionsConflict",
        86 => "IndexKeySpecsConflict",
        121 => "DocumentValidationFailure",
        _ => return None,
    };

    Some(name.to_string())
}
