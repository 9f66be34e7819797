use crate::sqlx_repo::SQLxRepo;
use crate::user_repo::{NewUser, User, UserRepo, UserRepoError};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

#[derive(sqlx::FromRow)]
struct UserEntry {
    id: i32,
    full_name: Option<String>,
    username: String,
    email: String,
    password_hash: String,
    security_question: Option<String>,
    security_answer_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserEntry> for User {
    fn from(u: UserEntry) -> Self {
        User {
            id: u.id,
            full_name: u.full_name,
            username: u.username,
            email: u.email,
            password_hash: u.password_hash,
            security_question: u.security_question,
            security_answer_hash: u.security_answer_hash,
            created_at: u.created_at,
        }
    }
}

impl SQLxRepo {
    async fn find_user(&self, column: &str, value: &str) -> Result<Option<User>, UserRepoError> {
        let sql = format!("SELECT * FROM users WHERE {} = $1", column);
        let user: Option<UserEntry> = query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to get user by {} {}", column, value))?;
        Ok(user.map(User::from))
    }
}

#[async_trait]
impl UserRepo for SQLxRepo {
    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepoError> {
        self.find_user("username", username)
            .await?
            .ok_or_else(|| UserRepoError::UserNotFound(username.to_owned()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepoError> {
        self.find_user("email", email)
            .await?
            .ok_or_else(|| UserRepoError::UserNotFound(email.to_owned()))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let result = query_as::<_, UserEntry>(
            "INSERT INTO users(full_name, username, email, password_hash, security_question, security_answer_hash) \
             VALUES($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&new_user.full_name)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.security_question)
        .bind(&new_user.security_answer_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(entry) => Ok(entry.into()),
            Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("users_username_key") => {
                Err(UserRepoError::UsernameTaken(new_user.username))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("users_email_key") => {
                Err(UserRepoError::EmailTaken(new_user.email))
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Unable to create user {}", new_user.username))
                .into()),
        }
    }
}
