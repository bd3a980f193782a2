use actix_web::http::StatusCode;
use thiserror::Error;

/// Authorization failures raised while checking a bearer token.
///
/// Each variant carries the human readable description sent to the client;
/// the wire `code` and HTTP status are derived from the variant and, where the
/// same code is used for more than one situation, from the stored status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    MissingHeader(String),

    #[error("{description}")]
    InvalidHeader {
        description: String,
        status: StatusCode,
    },

    #[error("{description}")]
    InvalidClaims {
        description: String,
        status: StatusCode,
    },

    #[error("{0}")]
    TokenExpired(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl AuthError {
    pub fn missing_header() -> Self {
        AuthError::MissingHeader("Authorization header is expected.".to_string())
    }

    pub fn invalid_header(description: &str) -> Self {
        AuthError::InvalidHeader {
            description: description.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn unparsable_token() -> Self {
        AuthError::InvalidHeader {
            description: "Unable to parse authentication token.".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unknown_key() -> Self {
        AuthError::InvalidHeader {
            description: "Unable to find the appropriate key.".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn incorrect_claims() -> Self {
        AuthError::InvalidClaims {
            description: "Incorrect claims. Please, check the audience and issuer.".to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn permissions_missing() -> Self {
        AuthError::InvalidClaims {
            description: "Permissions not included in JWT.".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn token_expired() -> Self {
        AuthError::TokenExpired("Token expired.".to_string())
    }

    pub fn permission_not_found() -> Self {
        AuthError::Unauthorized("Permission not found.".to_string())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader(_) => "authorization_header_missing",
            AuthError::InvalidHeader { .. } => "invalid_header",
            AuthError::InvalidClaims { .. } => "invalid_claims",
            AuthError::TokenExpired(_) => "token_expired",
            AuthError::Unauthorized(_) => "unauthorized",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader(_) | AuthError::TokenExpired(_) => StatusCode::UNAUTHORIZED,
            AuthError::InvalidHeader { status, .. } | AuthError::InvalidClaims { status, .. } => {
                *status
            }
            AuthError::Unauthorized(_) => StatusCode::FORBIDDEN,
        }
    }
}
