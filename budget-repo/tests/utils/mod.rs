use budget_repo::budget_repo::BudgetRepo;
use budget_repo::contact_repo::ContactRepo;
use budget_repo::user_repo::{NewUser, User, UserRepo};
use std::env;
use std::sync::Arc;
use uuid::Uuid;

pub type Repos = (Arc<dyn UserRepo>, Arc<dyn BudgetRepo>, Arc<dyn ContactRepo>);

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

/// Builds the repositories for `repo_type`. The sqlx repositories connect to
/// `TEST_DATABASE_URL`; when it is unset this returns `None` and the case is skipped.
pub async fn build_repos(repo_type: RepoType) -> Option<Repos> {
    match repo_type {
        RepoType::SQLx => {
            let Ok(database_url) = env::var("TEST_DATABASE_URL") else {
                eprintln!("TEST_DATABASE_URL is not set, skipping sqlx case");
                return None;
            };
            let repos = budget_repo::sqlx_repo::create_repos(database_url, 1)
                .await
                .unwrap();
            Some(repos)
        }
        RepoType::Mem => Some(budget_repo::mem_repo::create_repos()),
    }
}

#[allow(dead_code)]
pub fn new_test_user() -> NewUser {
    let username = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    NewUser {
        full_name: None,
        email: format!("{}@example.com", username),
        username,
        password_hash: "not a real hash".to_owned(),
        security_question: None,
        security_answer_hash: None,
    }
}

#[allow(dead_code)]
pub async fn create_test_user(user_repo: &Arc<dyn UserRepo>) -> User {
    user_repo.create_user(new_test_user()).await.unwrap()
}
