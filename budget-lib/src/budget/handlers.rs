use crate::auth::Session;
use crate::budget::calculator::{self, BudgetSummary};
use crate::budget::form::{BudgetAction, BudgetForm, BudgetSubmission};
use crate::error::HandlerError;
use crate::flash::{self, FlashMessage, IncomingFlashes};
use crate::form::FormError;
use crate::pages;
use actix_web::{web, HttpResponse};
use budget_repo::budget_repo::BudgetRepo;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Serialize)]
struct BudgetCalculation {
    submission: BudgetSubmission,
    summary: BudgetSummary,
}

fn rejected(error: FormError) -> HttpResponse {
    warn!(%error, "Rejected budget submission");
    flash::redirect("/budget", FlashMessage::danger(format!("Error: {}", error)))
}

pub async fn budget_page(session: Option<Session>, flashes: IncomingFlashes) -> HttpResponse {
    pages::render_page("budget", session.as_ref(), flashes)
}

pub async fn submit_budget(
    budget_repo: web::Data<Arc<dyn BudgetRepo>>,
    session: Option<Session>,
    flashes: IncomingFlashes,
    form: web::Form<BudgetForm>,
) -> Result<HttpResponse, HandlerError> {
    let form = form.into_inner();

    let action = match form.action() {
        Ok(action) => action,
        Err(e) => return Ok(rejected(e)),
    };
    if action == BudgetAction::Save && session.is_none() {
        warn!("Budget save attempted without a session");
        return Ok(flash::redirect(
            "/login",
            FlashMessage::warning("Please log in to save budgets."),
        ));
    }

    let submission = match form.parse() {
        Ok(submission) => submission,
        Err(e) => return Ok(rejected(e)),
    };
    let summary = match calculator::calculate(&submission.input) {
        Ok(summary) => summary,
        Err(e) => return Ok(rejected(e)),
    };

    match (action, session) {
        (BudgetAction::Save, Some(session)) => {
            let budget = budget_repo
                .create_budget(session.user_id, submission.to_new_budget(&summary))
                .await?;
            info!(budget_id = budget.id, user_id = session.user_id, "Saved budget");
            Ok(flash::redirect(
                "/saved_budgets",
                FlashMessage::success("Budget saved successfully!"),
            ))
        }
        (_, session) => Ok(pages::render(
            "budget",
            session.as_ref(),
            flashes,
            Some(BudgetCalculation {
                submission,
                summary,
            }),
        )),
    }
}

pub async fn saved_budgets(
    budget_repo: web::Data<Arc<dyn BudgetRepo>>,
    session: Option<Session>,
    flashes: IncomingFlashes,
) -> Result<HttpResponse, HandlerError> {
    let Some(session) = session else {
        return Ok(flash::redirect(
            "/login",
            FlashMessage::warning("Please log in to view saved budgets."),
        ));
    };

    let budgets = budget_repo.get_budgets(session.user_id).await?;
    Ok(pages::render(
        "saved_budgets",
        Some(&session),
        flashes,
        Some(budgets),
    ))
}
