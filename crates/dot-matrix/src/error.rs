use crate::config::ConfigError;
use crate::consultants::{UnknownAttribute, UseCaseError};
use crate::store::{RegistryError, RepositoryError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Registry(RegistryError),
    Repository(RepositoryError),
    UseCase(UseCaseError),
    UnknownAttribute(UnknownAttribute),
    MissingParameter { key: String },
    NotFound { kind: &'static str, id: String },
}

impl AppError {
    pub fn missing_parameter(key: impl Into<String>) -> Self {
        Self::MissingParameter { key: key.into() }
    }

    pub fn not_found(kind: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter { .. }
            | AppError::UnknownAttribute(_)
            | AppError::UseCase(UseCaseError::Validation(_))
            | AppError::UseCase(UseCaseError::UnknownAttribute(_)) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. }
            | AppError::UseCase(UseCaseError::NotFound { .. })
            | AppError::Repository(RepositoryError::NotFound { .. })
            | AppError::UseCase(UseCaseError::Repository(RepositoryError::NotFound { .. })) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Registry(_)
            | AppError::Repository(_)
            | AppError::UseCase(UseCaseError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Registry(err) => write!(f, "registry error: {}", err),
            AppError::Repository(err) => write!(f, "repository error: {}", err),
            AppError::UseCase(err) => write!(f, "{}", err),
            AppError::UnknownAttribute(err) => write!(f, "{}", err),
            AppError::MissingParameter { key } => write!(f, "missing parameter: {}", key),
            AppError::NotFound { kind, id } => write!(f, "{} {} not found", kind, id),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Registry(err) => Some(err),
            AppError::Repository(err) => Some(err),
            AppError::UseCase(err) => Some(err),
            AppError::UnknownAttribute(err) => Some(err),
            AppError::MissingParameter { .. } | AppError::NotFound { .. } => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = match &self {
            AppError::UseCase(UseCaseError::Validation(errors)) => {
                json!({ "error": self.to_string(), "fields": errors })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<UseCaseError> for AppError {
    fn from(value: UseCaseError) -> Self {
        Self::UseCase(value)
    }
}

impl From<UnknownAttribute> for AppError {
    fn from(value: UnknownAttribute) -> Self {
        Self::UnknownAttribute(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consultants::FormErrors;
    use crate::store::EntityId;
    use serde_json::Value;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[test]
    fn statuses_follow_error_kind() {
        let validation = AppError::from(UseCaseError::Validation(FormErrors::default()));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::missing_parameter("name").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(UnknownAttribute::new("rate")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("consultant", 3).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(UseCaseError::NotFound { id: EntityId(3) }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(RegistryError::UnregisteredKind { kind: "invoice" }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(RepositoryError::Unavailable("lock poisoned".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_parameter_names_the_key() {
        assert_eq!(
            AppError::missing_parameter("name").to_string(),
            "missing parameter: name"
        );
    }

    #[tokio::test]
    async fn validation_response_lists_fields() {
        let mut errors = FormErrors::default();
        errors.add("name", "can't be blank");

        let response = AppError::from(UseCaseError::Validation(errors)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = read_json_body(response).await;
        assert_eq!(payload["fields"]["name"][0], "can't be blank");
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("validation failed"));
    }
}
