//! Single-use status messages that survive a redirect.
//!
//! Messages are carried in the `flash` cookie as url-safe base64 encoded JSON. The
//! [IncomingFlashes] extractor reads them and [crate::pages::render] removes the cookie once they
//! have been shown.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> FlashMessage {
        FlashMessage {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> FlashMessage {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> FlashMessage {
        Self::new(FlashLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> FlashMessage {
        Self::new(FlashLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> FlashMessage {
        Self::new(FlashLevel::Danger, message)
    }
}

pub fn encode_flashes(flashes: &[FlashMessage]) -> String {
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Returns `None` for values that were not produced by [encode_flashes].
pub fn decode_flashes(value: &str) -> Option<Vec<FlashMessage>> {
    let json = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&json).ok()
}

fn flash_cookie(flashes: &[FlashMessage]) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, encode_flashes(flashes))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// `303 See Other` to `location` carrying `flash`. Callers may add more cookies before finishing
/// the response.
pub fn redirect_builder(location: &str, flash: FlashMessage) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder
        .insert_header((header::LOCATION, location))
        .cookie(flash_cookie(&[flash]));
    builder
}

pub fn redirect(location: &str, flash: FlashMessage) -> HttpResponse {
    redirect_builder(location, flash).finish()
}

/// Flash messages set by the previous response.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IncomingFlashes(pub Vec<FlashMessage>);

impl IncomingFlashes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, flash: FlashMessage) {
        self.0.push(flash)
    }
}

impl FromRequest for IncomingFlashes {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let flashes = req
            .cookie(FLASH_COOKIE)
            .and_then(|cookie| decode_flashes(cookie.value()))
            .unwrap_or_default();
        ready(Ok(IncomingFlashes(flashes)))
    }
}
