use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use rstest::*;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

use budget_lib::flash::{decode_flashes, FlashMessage, FLASH_COOKIE};
use budget_repo::budget_repo::BudgetRepo;
use budget_repo::contact_repo::ContactRepo;
use budget_repo::user_repo::UserRepo;

#[allow(dead_code)]
pub mod mock;

pub type Repos = (Arc<dyn UserRepo>, Arc<dyn BudgetRepo>, Arc<dyn ContactRepo>);

macro_rules! build_app {
    ($user_repo:expr, $budget_repo:expr, $contact_repo:expr) => {{
        let secret: [u8; 32] = rand::random();
        let app = App::new()
            .wrap(budget_lib::tracing::create_middleware())
            .configure(budget_lib::app_config_func(
                budget_lib::auth::SessionAuth::from_secret(&secret),
                $user_repo,
                $budget_repo,
                $contact_repo,
            ));
        tracing::info!("Built app");
        app
    }};
}

macro_rules! get {
    (&$service:ident, $uri:expr) => {{
        let request = TestRequest::get().uri($uri).to_request();
        test::call_service(&$service, request).await
    }};
    (&$service:ident, $uri:expr, $cookie:expr) => {{
        let request = TestRequest::get()
            .uri($uri)
            .cookie($cookie.clone())
            .to_request();
        test::call_service(&$service, request).await
    }};
}

macro_rules! post_form {
    (&$service:ident, $uri:expr, $form:expr) => {{
        let request = TestRequest::post().uri($uri).set_form($form).to_request();
        test::call_service(&$service, request).await
    }};
    (&$service:ident, $uri:expr, $form:expr, $cookie:expr) => {{
        let request = TestRequest::post()
            .uri($uri)
            .set_form($form)
            .cookie($cookie.clone())
            .to_request();
        test::call_service(&$service, request).await
    }};
}

/// Registers `$username` with email `<username>@example.com`.
macro_rules! register {
    (&$service:ident, $username:expr, $password:expr) => {{
        let email = format!("{}@example.com", $username);
        let response = post_form!(
            &$service,
            "/register",
            &[
                ("username", $username),
                ("email", email.as_str()),
                ("password", $password),
                ("confirm_password", $password),
            ]
        );
        assert_eq!(
            Some("/login".to_owned()),
            $crate::utils::location(&response),
            "Registration of {} failed",
            $username
        );
    }};
}

/// Logs in and returns the session cookie.
macro_rules! login {
    (&$service:ident, $username:expr, $password:expr) => {{
        let response = post_form!(
            &$service,
            "/login",
            &[("username", $username), ("password", $password)]
        );
        assert_eq!(Some("/".to_owned()), $crate::utils::location(&response));
        $crate::utils::get_cookie(&response, budget_lib::auth::session::SESSION_COOKIE)
            .expect("login sets a session cookie")
    }};
}

pub fn new_username() -> String {
    "test-user-".to_owned() + &Uuid::new_v4().to_string()
}

#[allow(dead_code)]
pub fn get_cookie<B>(response: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

/// Flash messages set by `response`.
#[allow(dead_code)]
pub fn get_flashes<B>(response: &ServiceResponse<B>) -> Vec<FlashMessage> {
    get_cookie(response, FLASH_COOKIE)
        .and_then(|cookie| decode_flashes(cookie.value()))
        .unwrap_or_default()
}

#[allow(dead_code)]
pub fn location<B>(response: &ServiceResponse<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos() -> Repos {
    budget_repo::mem_repo::create_repos()
}
