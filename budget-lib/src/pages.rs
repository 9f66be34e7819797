//! JSON page views. Each page returns its name, the logged in user, pending flash messages and
//! page specific data.

use crate::auth::Session;
use crate::flash::{self, FlashMessage, IncomingFlashes};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct PageView<T> {
    pub page: String,
    pub user: Option<String>,
    pub flashes: Vec<FlashMessage>,
    pub data: Option<T>,
}

/// Renders `page`, consuming the incoming flash messages.
pub fn render<T: Serialize>(
    page: &str,
    session: Option<&Session>,
    flashes: IncomingFlashes,
    data: Option<T>,
) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if !flashes.is_empty() {
        response.cookie(flash::removal_cookie());
    }
    response.json(PageView {
        page: page.to_owned(),
        user: session.map(|s| s.username.clone()),
        flashes: flashes.0,
        data,
    })
}

pub fn render_page(page: &str, session: Option<&Session>, flashes: IncomingFlashes) -> HttpResponse {
    render::<()>(page, session, flashes, None)
}

pub async fn home(session: Option<Session>, flashes: IncomingFlashes) -> HttpResponse {
    render_page("home", session.as_ref(), flashes)
}

fn placeholder(
    page: &str,
    req: &HttpRequest,
    session: Option<Session>,
    mut flashes: IncomingFlashes,
) -> HttpResponse {
    if req.method() == Method::POST {
        flashes.push(FlashMessage::info("Password reset is not available yet."));
    }
    render_page(page, session.as_ref(), flashes)
}

pub async fn forgot_password(
    req: HttpRequest,
    session: Option<Session>,
    flashes: IncomingFlashes,
) -> HttpResponse {
    placeholder("forgot_password", &req, session, flashes)
}

pub async fn reset_password(
    req: HttpRequest,
    session: Option<Session>,
    flashes: IncomingFlashes,
) -> HttpResponse {
    placeholder("reset_password", &req, session, flashes)
}
