use crate::auth::password;
use crate::auth::session::{Session, SessionAuth};
use crate::error::HandlerError;
use crate::flash::{self, FlashMessage, IncomingFlashes};
use crate::form::non_blank;
use crate::pages;
use actix_web::{web, HttpResponse};
use budget_repo::user_repo::{NewUser, User, UserRepo, UserRepoError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub security_question: Option<String>,
    #[serde(default)]
    pub security_answer: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn username_exists() -> HttpResponse {
    flash::redirect("/register", FlashMessage::danger("Username already exists"))
}

fn email_exists() -> HttpResponse {
    flash::redirect("/register", FlashMessage::danger("Email already exists"))
}

fn invalid_credentials() -> HttpResponse {
    flash::redirect("/login", FlashMessage::danger("Invalid credentials"))
}

/// Maps a lookup result to whether a user was found.
fn found(lookup: Result<User, UserRepoError>) -> Result<bool, UserRepoError> {
    match lookup {
        Ok(_) => Ok(true),
        Err(UserRepoError::UserNotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

pub async fn register_page(session: Option<Session>, flashes: IncomingFlashes) -> HttpResponse {
    pages::render_page("register", session.as_ref(), flashes)
}

pub async fn register(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, HandlerError> {
    let form = form.into_inner();

    if form.password != form.confirm_password {
        return Ok(flash::redirect(
            "/register",
            FlashMessage::danger("Passwords do not match."),
        ));
    }
    if found(user_repo.get_user_by_username(&form.username).await)? {
        return Ok(username_exists());
    }
    if found(user_repo.get_user_by_email(&form.email).await)? {
        return Ok(email_exists());
    }

    let password_hash = password::encode_password(&form.password)?;
    let security_answer_hash = non_blank(form.security_answer)
        .map(|answer| password::encode_password(&answer))
        .transpose()?;

    let new_user = NewUser {
        full_name: non_blank(form.full_name),
        username: form.username,
        email: form.email,
        password_hash,
        security_question: non_blank(form.security_question),
        security_answer_hash,
    };

    match user_repo.create_user(new_user).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "Registered user");
            Ok(flash::redirect(
                "/login",
                FlashMessage::success("Registration successful! Please log in."),
            ))
        }
        Err(UserRepoError::UsernameTaken(_)) => Ok(username_exists()),
        Err(UserRepoError::EmailTaken(_)) => Ok(email_exists()),
        Err(e) => Err(e.into()),
    }
}

pub async fn login_page(session: Option<Session>, flashes: IncomingFlashes) -> HttpResponse {
    pages::render_page("login", session.as_ref(), flashes)
}

pub async fn login(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    session_auth: web::Data<SessionAuth>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, HandlerError> {
    let form = form.into_inner();

    let user = match user_repo.get_user_by_username(&form.username).await {
        Ok(user) => user,
        Err(UserRepoError::UserNotFound(_)) => {
            warn!(username = %form.username, "Login attempt for unknown user");
            return Ok(invalid_credentials());
        }
        Err(e) => return Err(e.into()),
    };
    if !password::verify_password(&form.password, &user.password_hash)? {
        warn!(user_id = user.id, "Login attempt with wrong password");
        return Ok(invalid_credentials());
    }

    let session = Session {
        user_id: user.id,
        username: user.username,
    };
    let cookie = session_auth.session_cookie(&session)?;
    info!(user_id = session.user_id, "Logged in");

    Ok(flash::redirect_builder(
        "/",
        FlashMessage::success(format!("Welcome {}!", session.username)),
    )
    .cookie(cookie)
    .finish())
}

pub async fn logout(
    session: Option<Session>,
    session_auth: web::Data<SessionAuth>,
) -> HttpResponse {
    if let Some(session) = session {
        info!(user_id = session.user_id, "Logged out");
    }
    flash::redirect_builder("/", FlashMessage::success("Logged out successfully."))
        .cookie(session_auth.removal_cookie())
        .finish()
}
