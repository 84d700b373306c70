//! Tagged errors returned by the SDK boundary.
//!
//! Callers switch on [`ApiError::kind`] instead of probing error subtypes.

use serde::Deserialize;

/// A field-level message attached to business and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessage {
    #[serde(default)]
    pub name: Option<String>,
    pub user_message: String,
}

/// Plain discriminant of [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Network,
    Business,
    Validation,
    Forbidden,
    Unauthorized,
    NotFound,
    Unexpected,
}

/// The errors the remote API can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, decode).
    #[error("{message}")]
    Network { message: String },

    /// A business rule rejected the request (e.g. payment preview denied).
    #[error("{message}")]
    Business {
        message: String,
        detail: Option<String>,
        fields: Vec<FieldMessage>,
    },

    /// The request body failed validation.
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldMessage>,
    },

    /// The authenticated user may not perform this action.
    #[error("{message}")]
    Forbidden { message: String },

    /// Missing or rejected credentials.
    #[error("{message}")]
    Unauthorized { message: String },

    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// Any other non-success response.
    #[error("{message}")]
    Unexpected { status: u16, message: String },
}

/// Problem-details body returned by the API on failures.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Problem {
    #[serde(rename = "type")]
    problem_type: Option<String>,
    title: Option<String>,
    detail: Option<String>,
    user_message: Option<String>,
    objects: Vec<FieldMessage>,
}

const GENERIC_MESSAGE: &str = "Houve um erro";

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Network { .. } => ApiErrorKind::Network,
            Self::Business { .. } => ApiErrorKind::Business,
            Self::Validation { .. } => ApiErrorKind::Validation,
            Self::Forbidden { .. } => ApiErrorKind::Forbidden,
            Self::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            Self::NotFound { .. } => ApiErrorKind::NotFound,
            Self::Unexpected { .. } => ApiErrorKind::Unexpected,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Business { message, .. }
            | Self::Validation { message, .. }
            | Self::Forbidden { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Unexpected { message, .. } => message,
        }
    }

    /// Field-level messages, empty for kinds that carry none.
    pub fn field_messages(&self) -> &[FieldMessage] {
        match self {
            Self::Business { fields, .. } | Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self.kind(), ApiErrorKind::Forbidden)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ApiErrorKind::NotFound)
    }

    /// Classifies a non-success HTTP response.
    pub fn from_response(status: u16, body: &str) -> Self {
        let problem: Problem = serde_json::from_str(body).unwrap_or_default();
        let is_business_type = problem
            .problem_type
            .as_deref()
            .is_some_and(|t| t.contains("business"));
        let message = problem
            .user_message
            .clone()
            .or_else(|| problem.detail.clone())
            .or_else(|| problem.title.clone())
            .unwrap_or_else(|| GENERIC_MESSAGE.to_string());

        match status {
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            _ if status == 422 || is_business_type => Self::Business {
                message,
                detail: problem.detail,
                fields: problem.objects,
            },
            400 => Self::Validation {
                message,
                fields: problem.objects,
            },
            _ => Self::Unexpected { status, message },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}

/// SDK result alias.
pub type ApiResult<T> = Result<T, ApiError>;
