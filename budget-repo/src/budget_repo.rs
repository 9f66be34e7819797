use crate::user_repo::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[async_trait]
pub trait BudgetRepo: Sync + Send {
    async fn create_budget(
        &self,
        user_id: UserId,
        new_budget: NewBudget,
    ) -> Result<Budget, BudgetRepoError>;

    /// Returns every budget owned by `user_id`, newest first.
    async fn get_budgets(&self, user_id: UserId) -> Result<Vec<Budget>, BudgetRepoError>;
}

#[derive(Error, Debug)]
pub enum BudgetRepoError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Budget {
    pub id: i32,
    pub user_id: UserId,
    pub name: Option<String>,
    pub income: Decimal,
    pub rent: Decimal,
    pub groceries: Decimal,
    pub transport: Decimal,
    pub utilities: Decimal,
    pub other: Decimal,
    pub residual_income: Decimal,
    pub savings_percent: Option<Decimal>,
    pub savings_amount: Option<Decimal>,
    pub marital_status: Option<String>,
    pub children: Option<i32>,
    pub age_group: Option<String>,
    pub tax_credits: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Orders by creation time, then by id for budgets created in the same instant.
pub fn newest_first(a: &Budget, b: &Budget) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct NewBudget {
    pub name: Option<String>,
    pub income: Decimal,
    pub rent: Decimal,
    pub groceries: Decimal,
    pub transport: Decimal,
    pub utilities: Decimal,
    pub other: Decimal,
    pub residual_income: Decimal,
    pub savings_percent: Option<Decimal>,
    pub savings_amount: Option<Decimal>,
    pub marital_status: Option<String>,
    pub children: Option<i32>,
    pub age_group: Option<String>,
    pub tax_credits: Option<Decimal>,
}

impl NewBudget {
    pub fn to_budget(self, id: i32, user_id: UserId, created_at: DateTime<Utc>) -> Budget {
        Budget {
            id,
            user_id,
            name: self.name,
            income: self.income,
            rent: self.rent,
            groceries: self.groceries,
            transport: self.transport,
            utilities: self.utilities,
            other: self.other,
            residual_income: self.residual_income,
            savings_percent: self.savings_percent,
            savings_amount: self.savings_amount,
            marital_status: self.marital_status,
            children: self.children,
            age_group: self.age_group,
            tax_credits: self.tax_credits,
            created_at,
        }
    }
}
