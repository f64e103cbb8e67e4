//! Errors reported by an [`crate::AppointmentStore`].

use petclinic_core::validation::FieldErrors;
use serde::Deserialize;

/// Failure of a store operation, decoded from the server's error `code`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A field was missing or invalid.
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// The referenced pet does not exist.
    #[error("Pet not found")]
    PetNotFound,

    /// No appointment has the requested id.
    #[error("Appointment not found")]
    AppointmentNotFound,

    /// The appointment was already cancelled; its status is unchanged.
    #[error("Appointment is already cancelled")]
    AlreadyCancelled,

    /// The server refused the request for another reason (auth, conflict).
    #[error("Request rejected ({status} {code}): {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    /// Network failure, timeout, or a server-side (5xx) failure.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Error body produced by the API: `{ success, message, code, fields? }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub fields: FieldErrors,
}

impl StoreError {
    /// Decode a non-2xx response.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        if status >= 500 || status == 408 {
            return StoreError::StoreUnavailable(format!("server returned HTTP {status}"));
        }

        let Ok(body) = serde_json::from_str::<ErrorBody>(body) else {
            return StoreError::Rejected {
                status,
                code: String::new(),
                message: body.to_string(),
            };
        };

        match body.code.as_str() {
            "VALIDATION_ERROR" => StoreError::ValidationFailed(body.fields),
            "PET_NOT_FOUND" => StoreError::PetNotFound,
            "NOT_FOUND" => StoreError::AppointmentNotFound,
            "ALREADY_CANCELLED" => StoreError::AlreadyCancelled,
            _ => StoreError::Rejected {
                status,
                code: body.code,
                message: body.message,
            },
        }
    }

    /// Whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::StoreUnavailable(_))
    }

    /// Message suitable for showing to the person using the form.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::ValidationFailed(_) => "Please correct the highlighted fields.".into(),
            StoreError::PetNotFound => "The selected pet could not be found.".into(),
            StoreError::AppointmentNotFound => "That appointment no longer exists.".into(),
            StoreError::AlreadyCancelled => "This appointment was already cancelled.".into(),
            StoreError::Rejected { .. } | StoreError::StoreUnavailable(_) => {
                "The appointment could not be saved. Please try again.".into()
            }
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::StoreUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decodes_api_error_codes() {
        let body = r#"{"success":false,"message":"Pet with id 999 not found","code":"PET_NOT_FOUND"}"#;
        assert_eq!(StoreError::from_response(404, body), StoreError::PetNotFound);

        let body = r#"{"success":false,"message":"Appointment 3 is already cancelled","code":"ALREADY_CANCELLED"}"#;
        assert_eq!(
            StoreError::from_response(409, body),
            StoreError::AlreadyCancelled
        );

        let body = r#"{"success":false,"message":"x","code":"NOT_FOUND"}"#;
        assert_eq!(
            StoreError::from_response(404, body),
            StoreError::AppointmentNotFound
        );
    }

    #[test]
    fn validation_errors_keep_their_fields() {
        let body = r#"{"success":false,"message":"service: is required","code":"VALIDATION_ERROR",
            "fields":[{"field":"service","message":"is required"}]}"#;
        let err = StoreError::from_response(400, body);
        assert_matches!(&err, StoreError::ValidationFailed(fields) if fields.get("service") == Some("is required"));
    }

    #[test]
    fn server_failures_are_unavailable_and_retryable() {
        let err = StoreError::from_response(503, "<html>bad gateway</html>");
        assert_matches!(err, StoreError::StoreUnavailable(_));
        assert!(err.is_retryable());
        assert!(StoreError::from_response(408, "").is_retryable());
    }

    #[test]
    fn unknown_codes_are_rejections() {
        let body = r#"{"success":false,"message":"Invalid or expired token","code":"UNAUTHORIZED"}"#;
        let err = StoreError::from_response(401, body);
        assert_matches!(err, StoreError::Rejected { status: 401, ref code, .. } if code == "UNAUTHORIZED");
        assert!(!err.is_retryable());

        assert_matches!(
            StoreError::from_response(400, "not json"),
            StoreError::Rejected { status: 400, .. }
        );
    }
}
