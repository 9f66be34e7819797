use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub type UserId = i32;

#[async_trait]
pub trait UserRepo: Sync + Send {
    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepoError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepoError>;

    /// Inserts a new user. Fails with [UserRepoError::UsernameTaken] or
    /// [UserRepoError::EmailTaken] if either value is already stored.
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError>;
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct User {
    pub id: UserId,
    pub full_name: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub security_question: Option<String>,
    #[serde(skip_serializing)]
    pub security_answer_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub full_name: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub security_question: Option<String>,
    pub security_answer_hash: Option<String>,
}

impl NewUser {
    pub fn to_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            full_name: self.full_name,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            security_question: self.security_question,
            security_answer_hash: self.security_answer_hash,
            created_at,
        }
    }
}

#[derive(Error, Debug)]
pub enum UserRepoError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Username {0} already exists")]
    UsernameTaken(String),
    #[error("Email {0} already exists")]
    EmailTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
