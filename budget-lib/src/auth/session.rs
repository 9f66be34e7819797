use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use budget_repo::user_repo::UserId;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use serde::Serialize;
use std::future::{ready, Ready};
use tracing_actix_web::RootSpan;

pub const SESSION_COOKIE: &str = "session";

/// Shortest secret accepted for signing session tokens, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// The authenticated user of a request. Extract as `Option<Session>` in handlers that also serve
/// anonymous visitors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
}

/// Issues and validates signed session tokens.
#[derive(Clone)]
pub struct SessionAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    secure_cookies: bool,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    exp: usize,
    uid: UserId,
    username: String,
}

impl SessionAuth {
    const EXPIRE_TIME: i64 = 7 * 24 * 60 * 60;

    pub fn from_secret(secret: &[u8]) -> SessionAuth {
        SessionAuth {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            secure_cookies: false,
        }
    }

    pub fn with_secure_cookies(mut self, secure_cookies: bool) -> SessionAuth {
        self.secure_cookies = secure_cookies;
        self
    }

    pub fn create_token(&self, session: &Session) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            exp: Self::generate_exp(),
            uid: session.user_id,
            username: session.username.clone(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate_token(&self, token: &str) -> Result<Session, jsonwebtoken::errors::Error> {
        let claims =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?
                .claims;
        Ok(Session {
            user_id: claims.uid,
            username: claims.username,
        })
    }

    pub fn session_cookie(
        &self,
        session: &Session,
    ) -> Result<Cookie<'static>, jsonwebtoken::errors::Error> {
        let token = self.create_token(session)?;
        Ok(Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .finish())
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .finish();
        cookie.make_removal();
        cookie
    }

    fn generate_exp() -> usize {
        (Utc::now().timestamp() + Self::EXPIRE_TIME) as usize
    }
}

/// Reads the session cookie. If the token is valid, records the user id into the [RootSpan].
fn extract_session(req: &HttpRequest) -> Result<Session, actix_web::Error> {
    let session_auth = req
        .app_data::<web::Data<SessionAuth>>()
        .ok_or_else(|| ErrorInternalServerError("Session auth is not configured"))?;
    let cookie = req
        .cookie(SESSION_COOKIE)
        .ok_or_else(|| ErrorUnauthorized("No session"))?;
    let session = session_auth
        .validate_token(cookie.value())
        .map_err(ErrorUnauthorized)?;

    if let Some(root_span) = req.extensions().get::<RootSpan>() {
        root_span.record("user_id", session.user_id);
    }
    Ok(session)
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_session(req))
    }
}
