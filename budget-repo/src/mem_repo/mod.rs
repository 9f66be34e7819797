use crate::budget_repo::BudgetRepo;
use crate::contact_repo::ContactRepo;
use crate::user_repo::UserRepo;
use std::sync::Arc;

mod budget_repo;
mod contact_repo;
mod user_repo;

pub fn create_repos() -> (Arc<dyn UserRepo>, Arc<dyn BudgetRepo>, Arc<dyn ContactRepo>) {
    let user_repo = user_repo::MemUserRepo::new();
    let budget_repo = budget_repo::MemBudgetRepo::new();
    let contact_repo = contact_repo::MemContactRepo::new();

    (
        Arc::new(user_repo),
        Arc::new(budget_repo),
        Arc::new(contact_repo),
    )
}
