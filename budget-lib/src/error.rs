use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use budget_repo::budget_repo::BudgetRepoError;
use budget_repo::contact_repo::ContactRepoError;
use budget_repo::user_repo::UserRepoError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    UserRepo(#[from] UserRepoError),
    #[error(transparent)]
    BudgetRepo(#[from] BudgetRepoError),
    #[error(transparent)]
    ContactRepo(#[from] ContactRepoError),
    #[error("Unable to hash password: {0}")]
    Password(#[from] argon2::Error),
    #[error("Unable to create session token: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::UserRepo(UserRepoError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            HandlerError::UserRepo(UserRepoError::UsernameTaken(_))
            | HandlerError::UserRepo(UserRepoError::EmailTaken(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        error!(error = %self, "Request failed");
        HttpResponse::build(self.status_code()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn status_codes() {
        let not_found: HandlerError = UserRepoError::UserNotFound("alice".to_owned()).into();
        assert_eq!(StatusCode::NOT_FOUND, not_found.status_code());

        let conflict: HandlerError = UserRepoError::EmailTaken("a@example.com".to_owned()).into();
        assert_eq!(StatusCode::CONFLICT, conflict.error_response().status());

        let other: HandlerError = BudgetRepoError::Other(anyhow!("connection reset")).into();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, other.status_code());
    }
}
