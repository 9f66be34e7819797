use crate::auth::Session;
use crate::contact::ContactForm;
use crate::error::HandlerError;
use crate::flash::{self, FlashMessage, IncomingFlashes};
use crate::pages;
use actix_web::{web, HttpResponse};
use budget_repo::contact_repo::{ContactRepo, NewContact};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn contact_page(session: Option<Session>, flashes: IncomingFlashes) -> HttpResponse {
    pages::render_page("contact", session.as_ref(), flashes)
}

pub async fn submit_contact(
    contact_repo: web::Data<Arc<dyn ContactRepo>>,
    form: web::Form<ContactForm>,
) -> Result<HttpResponse, HandlerError> {
    let Some(form) = form.into_inner().validate() else {
        warn!("Contact message with blank fields");
        return Ok(flash::redirect(
            "/contact",
            FlashMessage::danger("All fields are required."),
        ));
    };

    let contact = contact_repo
        .create_contact(NewContact::new(form.name, form.email, form.message))
        .await?;
    info!(contact_id = contact.id, "Stored contact message");

    Ok(flash::redirect(
        "/contact",
        FlashMessage::success("Message sent successfully!"),
    ))
}
