use crate::auth::Session;
use crate::flash::{self, FlashMessage, IncomingFlashes};
use crate::pages;
use crate::tax::{estimate_tax, TaxEstimate, TaxForm, TaxInput};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
struct TaxResult {
    input: TaxInput,
    estimate: TaxEstimate,
}

pub async fn tax_page(session: Option<Session>, flashes: IncomingFlashes) -> HttpResponse {
    pages::render_page("tax", session.as_ref(), flashes)
}

pub async fn estimate(
    session: Option<Session>,
    flashes: IncomingFlashes,
    form: web::Form<TaxForm>,
) -> HttpResponse {
    let estimated = form
        .into_inner()
        .parse()
        .and_then(|input| estimate_tax(&input).map(|estimate| TaxResult { input, estimate }));

    match estimated {
        Ok(result) => pages::render("tax", session.as_ref(), flashes, Some(result)),
        Err(error) => {
            warn!(%error, "Rejected tax submission");
            flash::redirect("/tax", FlashMessage::danger(format!("Error: {}", error)))
        }
    }
}
