use actix_web::error::InternalError;
use actix_web::web::Data;
use actix_web::{web, HttpResponse};
use budget_repo::budget_repo::BudgetRepo;
use budget_repo::contact_repo::ContactRepo;
use budget_repo::user_repo::UserRepo;
use std::sync::Arc;

use auth::SessionAuth;

pub mod auth;
pub mod budget;
pub mod config;
pub mod contact;
mod error;
pub mod flash;
pub mod form;
pub mod pages;
pub mod tax;
pub mod tracing;

/// Registers shared state and every route of the application.
pub fn app_config_func(
    session_auth: SessionAuth,
    user_repo: Arc<dyn UserRepo>,
    budget_repo: Arc<dyn BudgetRepo>,
    contact_repo: Arc<dyn ContactRepo>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(Data::new(session_auth))
            .app_data(Data::new(user_repo))
            .app_data(Data::new(budget_repo))
            .app_data(Data::new(contact_repo))
            .app_data(form_config())
            .service(web::resource("/").route(web::get().to(pages::home)))
            .service(
                web::resource("/register")
                    .route(web::get().to(auth::handlers::register_page))
                    .route(web::post().to(auth::handlers::register)),
            )
            .service(
                web::resource("/login")
                    .route(web::get().to(auth::handlers::login_page))
                    .route(web::post().to(auth::handlers::login)),
            )
            .service(web::resource("/logout").route(web::get().to(auth::handlers::logout)))
            .service(
                web::resource("/budget")
                    .route(web::get().to(budget::handlers::budget_page))
                    .route(web::post().to(budget::handlers::submit_budget)),
            )
            .service(
                web::resource(["/saved_budgets", "/saved-budget"])
                    .route(web::get().to(budget::handlers::saved_budgets)),
            )
            .service(
                web::resource("/tax")
                    .route(web::get().to(tax::handlers::tax_page))
                    .route(web::post().to(tax::handlers::estimate)),
            )
            .service(
                web::resource(["/contact", "/contacts"])
                    .route(web::get().to(contact::handlers::contact_page))
                    .route(web::post().to(contact::handlers::submit_contact)),
            )
            .service(
                web::resource(["/forgot_password", "/forgot-password"])
                    .route(web::get().to(pages::forgot_password))
                    .route(web::post().to(pages::forgot_password)),
            )
            .service(
                web::resource(["/reset_password", "/reset-password"])
                    .route(web::get().to(pages::reset_password))
                    .route(web::post().to(pages::reset_password)),
            );
    }
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, req| {
        ::tracing::error!(req_path = req.path(), %err);
        let error_body = serde_json::json!({
            "error": "Unable to parse form payload",
            "detail": format!("{}", err),
        });
        InternalError::from_response(err, HttpResponse::BadRequest().json(error_body)).into()
    })
}
