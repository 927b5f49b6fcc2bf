use serde_json::Value;
use thiserror::Error;

/// A server-rejected field with its message, as reported by a 4xx
/// validation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Where the host UI should send the user after a centrally handled
/// failure: login on expired credentials, home on insufficient privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token missing or expired")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(detail_message(body).unwrap_or(truncated)),
            404 => ApiError::NotFound(detail_message(body).unwrap_or(truncated)),
            400..=499 => match parse_field_errors(body) {
                Some(errors) => ApiError::Validation(errors),
                None => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
            },
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Central redirect policy: 401 sends the user back to login, 403
    /// sends them home. Other failures are shown in place.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            ApiError::Unauthorized => Some(Redirect::Login),
            ApiError::Forbidden(_) => Some(Redirect::Home),
            _ => None,
        }
    }

    /// User-facing message. Validation failures render their field
    /// errors as joined `field: message` lines; everything else falls
    /// back to the error's own display.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("\n"),
            other => other.to_string(),
        }
    }
}

/// Extract the `detail` string the server puts on permission and
/// not-found bodies.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

/// Parse a validation body of the shape `{"field": ["msg", ...]}` or
/// `{"field": "msg"}` into ordered field/message pairs.
fn parse_field_errors(body: &str) -> Option<Vec<FieldError>> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;

    let mut errors = Vec::new();
    for (field, messages) in map {
        match messages {
            Value::String(message) => errors.push(FieldError {
                field: field.clone(),
                message: message.clone(),
            }),
            Value::Array(items) => {
                let joined: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                if !joined.is_empty() {
                    errors.push(FieldError {
                        field: field.clone(),
                        message: joined.join(" "),
                    });
                }
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_status_codes_to_variants() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, r#"{"detail": "No puede"}"#),
            ApiError::Forbidden(msg) if msg == "No puede"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ApiError::ServerError(msg) if msg == "boom"
        ));
    }

    #[test]
    fn parses_field_errors_from_validation_body() {
        let body = r#"{"email": ["Introduzca un email valido."], "telefono": "Demasiado corto."}"#;
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, body);
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| e.field == "email" && e.message == "Introduzca un email valido."));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validation_without_structured_body_is_invalid_response() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "nope");
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn display_message_joins_field_errors() {
        let err = ApiError::Validation(vec![
            FieldError {
                field: "email".to_string(),
                message: "invalido".to_string(),
            },
            FieldError {
                field: "telefono".to_string(),
                message: "obligatorio".to_string(),
            },
        ]);
        assert_eq!(err.display_message(), "email: invalido\ntelefono: obligatorio");
    }

    #[test]
    fn redirect_policy_covers_auth_failures_only() {
        assert_eq!(ApiError::Unauthorized.redirect(), Some(Redirect::Login));
        assert_eq!(
            ApiError::Forbidden(String::new()).redirect(),
            Some(Redirect::Home)
        );
        assert_eq!(ApiError::ServerError(String::new()).redirect(), None);
        assert_eq!(
            ApiError::Validation(vec![]).redirect(),
            None
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(1000);
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ApiError::ServerError(msg) => assert!(msg.contains("truncated")),
            other => panic!("expected server error, got {other:?}"),
        }
    }
}
