use crate::budget_repo::{Budget, BudgetRepo, BudgetRepoError, NewBudget};
use crate::sqlx_repo::SQLxRepo;
use crate::user_repo::UserId;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::query_as;

#[derive(sqlx::FromRow)]
struct BudgetEntry {
    id: i32,
    user_id: i32,
    name: Option<String>,
    income: Decimal,
    rent: Decimal,
    groceries: Decimal,
    transport: Decimal,
    utilities: Decimal,
    other: Decimal,
    residual_income: Decimal,
    savings_percent: Option<Decimal>,
    savings_amount: Option<Decimal>,
    marital_status: Option<String>,
    children: Option<i32>,
    age_group: Option<String>,
    tax_credits: Option<Decimal>,
    created_at: DateTime<Utc>,
}

impl From<BudgetEntry> for Budget {
    fn from(b: BudgetEntry) -> Self {
        Budget {
            id: b.id,
            user_id: b.user_id,
            name: b.name,
            income: b.income,
            rent: b.rent,
            groceries: b.groceries,
            transport: b.transport,
            utilities: b.utilities,
            other: b.other,
            residual_income: b.residual_income,
            savings_percent: b.savings_percent,
            savings_amount: b.savings_amount,
            marital_status: b.marital_status,
            children: b.children,
            age_group: b.age_group,
            tax_credits: b.tax_credits,
            created_at: b.created_at,
        }
    }
}

#[async_trait]
impl BudgetRepo for SQLxRepo {
    async fn create_budget(
        &self,
        user_id: UserId,
        new_budget: NewBudget,
    ) -> Result<Budget, BudgetRepoError> {
        let entry: BudgetEntry = query_as(
            "INSERT INTO budgets(user_id, name, income, rent, groceries, transport, utilities, other, \
             residual_income, savings_percent, savings_amount, marital_status, children, age_group, tax_credits) \
             VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *",
        )
        .bind(user_id)
        .bind(&new_budget.name)
        .bind(new_budget.income)
        .bind(new_budget.rent)
        .bind(new_budget.groceries)
        .bind(new_budget.transport)
        .bind(new_budget.utilities)
        .bind(new_budget.other)
        .bind(new_budget.residual_income)
        .bind(new_budget.savings_percent)
        .bind(new_budget.savings_amount)
        .bind(&new_budget.marital_status)
        .bind(new_budget.children)
        .bind(&new_budget.age_group)
        .bind(new_budget.tax_credits)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Unable to insert budget for user {}", user_id))?;

        Ok(entry.into())
    }

    async fn get_budgets(&self, user_id: UserId) -> Result<Vec<Budget>, BudgetRepoError> {
        let entries: Vec<BudgetEntry> = query_as(
            "SELECT * FROM budgets WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get budgets for user {}", user_id))?;

        Ok(entries.into_iter().map(Budget::from).collect())
    }
}
