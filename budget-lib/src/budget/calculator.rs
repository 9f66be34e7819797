use crate::form::FormError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct Expenses {
    pub rent: Decimal,
    pub groceries: Decimal,
    pub transport: Decimal,
    pub utilities: Decimal,
    pub other: Decimal,
}

impl Expenses {
    pub fn total(&self) -> Option<Decimal> {
        [self.groceries, self.transport, self.utilities, self.other]
            .into_iter()
            .try_fold(self.rent, |sum, expense| sum.checked_add(expense))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct BudgetInput {
    pub income: Decimal,
    pub expenses: Expenses,
    /// Share of the residual income set aside as savings, in percent.
    pub savings_percent: Option<Decimal>,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct BudgetSummary {
    pub total_expenses: Decimal,
    pub residual_income: Decimal,
    pub savings_amount: Option<Decimal>,
}

pub fn savings_amount(residual_income: Decimal, savings_percent: Decimal) -> Option<Decimal> {
    residual_income
        .checked_mul(savings_percent)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Residual income is the income left after all fixed expenses. The savings percentage is not
/// range checked.
pub fn calculate(input: &BudgetInput) -> Result<BudgetSummary, FormError> {
    let total_expenses = input.expenses.total().ok_or(FormError::Overflow)?;
    let residual_income = input
        .income
        .checked_sub(total_expenses)
        .ok_or(FormError::Overflow)?;
    let savings_amount = input
        .savings_percent
        .map(|percent| savings_amount(residual_income, percent).ok_or(FormError::Overflow))
        .transpose()?;

    Ok(BudgetSummary {
        total_expenses,
        residual_income,
        savings_amount,
    })
}
