use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    TooManyRequests(String),
    Internal(String),
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("Invalid username or password".to_string())
            }
            ServiceError::InactiveAccount => {
                HttpError::Unauthorized("Account is inactive".to_string())
            }
            ServiceError::SessionNotFound => {
                HttpError::Unauthorized("Session expired or not found".to_string())
            }
            ServiceError::Jwt(err) => HttpError::Unauthorized(format!("JWT error: {err}")),
            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),
            ServiceError::InvalidTokenType => HttpError::Unauthorized("Invalid token type".into()),

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::TooManyAttempts => HttpError::TooManyRequests(
                "Too many failed attempts. Try again later.".to_string(),
            ),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                _ => HttpError::Internal("Repository error".into()),
            },

            ServiceError::InvalidRole(err) => HttpError::Internal(err.to_string()),
            ServiceError::Bcrypt(_) => HttpError::Internal("Internal authentication error".into()),
            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let msg = match self {
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::NotFound(msg)
            | HttpError::TooManyRequests(msg)
            | HttpError::Internal(msg) => msg,
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_unauthorized() {
        for err in [
            ServiceError::InvalidCredentials,
            ServiceError::InactiveAccount,
            ServiceError::SessionNotFound,
            ServiceError::TokenExpired,
            ServiceError::InvalidTokenType,
        ] {
            assert_eq!(HttpError::from(err).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn maps_remaining_service_errors() {
        let forbidden = HttpError::from(ServiceError::Forbidden("admin only".into()));
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

        let throttled = HttpError::from(ServiceError::TooManyAttempts);
        assert_eq!(throttled.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let missing = HttpError::from(ServiceError::Repo(RepositoryError::NotFound));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let custom = HttpError::from(ServiceError::Repo(RepositoryError::Custom("x".into())));
        assert_eq!(custom.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
