mod budget_repo;
mod contact_repo;
mod user_repo;

use crate::budget_repo::BudgetRepo;
use crate::contact_repo::ContactRepo;
use crate::user_repo::UserRepo;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::info;

pub struct SQLxRepo {
    pool: Pool<Postgres>,
}

impl SQLxRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxRepo {
        SQLxRepo { pool }
    }
}

/// Connects to the database, creates any missing tables and returns the repositories sharing a
/// single connection pool.
pub async fn create_repos(
    database_url: String,
    max_pool_size: u32,
) -> Result<(Arc<dyn UserRepo>, Arc<dyn BudgetRepo>, Arc<dyn ContactRepo>), anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(&database_url)
        .await
        .context("Unable to connect to database")?;

    info!("Running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Unable to run migrations")?;

    let repo = Arc::new(SQLxRepo::new(pool));
    Ok((repo.clone(), repo.clone(), repo))
}
