use crate::budget::calculator::{BudgetInput, BudgetSummary, Expenses};
use crate::form::{self, FormError};
use budget_repo::budget_repo::NewBudget;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw budget form as submitted by the browser.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct BudgetForm {
    pub action: Option<String>,
    pub name: Option<String>,
    pub income: Option<String>,
    pub rent: Option<String>,
    pub groceries: Option<String>,
    pub transport: Option<String>,
    pub utilities: Option<String>,
    pub other: Option<String>,
    pub savings_percent: Option<String>,
    pub marital_status: Option<String>,
    pub children: Option<String>,
    pub age_group: Option<String>,
    pub tax_credits: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum BudgetAction {
    Calculate,
    Save,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct BudgetSubmission {
    pub name: Option<String>,
    pub input: BudgetInput,
    pub marital_status: Option<String>,
    pub children: Option<i32>,
    pub age_group: Option<String>,
    pub tax_credits: Option<Decimal>,
}

impl BudgetForm {
    /// Missing action means calculate.
    pub fn action(&self) -> Result<BudgetAction, FormError> {
        match self.action.as_deref().map(str::trim) {
            None | Some("") | Some("calculate") => Ok(BudgetAction::Calculate),
            Some("save") => Ok(BudgetAction::Save),
            Some(other) => Err(FormError::UnknownAction(form::echoed(other))),
        }
    }

    pub fn parse(self) -> Result<BudgetSubmission, FormError> {
        let expenses = Expenses {
            rent: form::decimal_or_zero("rent", self.rent.as_deref())?,
            groceries: form::decimal_or_zero("groceries", self.groceries.as_deref())?,
            transport: form::decimal_or_zero("transport", self.transport.as_deref())?,
            utilities: form::decimal_or_zero("utilities", self.utilities.as_deref())?,
            other: form::decimal_or_zero("other", self.other.as_deref())?,
        };
        let input = BudgetInput {
            income: form::required_decimal("income", self.income.as_deref())?,
            expenses,
            savings_percent: form::optional_decimal(
                "savings_percent",
                self.savings_percent.as_deref(),
            )?,
        };

        Ok(BudgetSubmission {
            children: form::optional_int("children", self.children.as_deref())?,
            tax_credits: form::optional_decimal("tax_credits", self.tax_credits.as_deref())?,
            name: form::non_blank(self.name),
            input,
            marital_status: form::non_blank(self.marital_status),
            age_group: form::non_blank(self.age_group),
        })
    }
}

impl BudgetSubmission {
    pub fn to_new_budget(self, summary: &BudgetSummary) -> NewBudget {
        let expenses = self.input.expenses;
        NewBudget {
            name: self.name,
            income: self.input.income,
            rent: expenses.rent,
            groceries: expenses.groceries,
            transport: expenses.transport,
            utilities: expenses.utilities,
            other: expenses.other,
            residual_income: summary.residual_income,
            savings_percent: self.input.savings_percent,
            savings_amount: summary.savings_amount,
            marital_status: self.marital_status,
            children: self.children,
            age_group: self.age_group,
            tax_credits: self.tax_credits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::calculator::calculate;

    fn form() -> BudgetForm {
        BudgetForm {
            name: Some("March".to_owned()),
            income: Some("3000".to_owned()),
            rent: Some("1200".to_owned()),
            groceries: Some("400".to_owned()),
            savings_percent: Some("10".to_owned()),
            children: Some("2".to_owned()),
            marital_status: Some("".to_owned()),
            ..BudgetForm::default()
        }
    }

    #[test]
    fn parses_submission() {
        let submission = form().parse().unwrap();
        assert_eq!(Some("March".to_owned()), submission.name);
        assert_eq!(Decimal::from(3000), submission.input.income);
        assert_eq!(Decimal::ZERO, submission.input.expenses.transport);
        assert_eq!(Some(Decimal::from(10)), submission.input.savings_percent);
        assert_eq!(Some(2), submission.children);
        assert_eq!(None, submission.marital_status);
        assert_eq!(None, submission.tax_credits);
    }

    #[test]
    fn income_is_required() {
        let form = BudgetForm {
            income: None,
            ..form()
        };
        assert_eq!(Err(FormError::MissingField("income")), form.parse());
    }

    #[test]
    fn first_invalid_field_fails_the_form() {
        let form = BudgetForm {
            utilities: Some("a lot".to_owned()),
            ..form()
        };
        assert_eq!(
            Err(FormError::InvalidNumber {
                field: "utilities",
                value: "a lot".to_owned()
            }),
            form.parse()
        );
    }

    #[test]
    fn actions() {
        assert_eq!(Ok(BudgetAction::Calculate), form().action());
        let save = BudgetForm {
            action: Some("save".to_owned()),
            ..form()
        };
        assert_eq!(Ok(BudgetAction::Save), save.action());
        let unknown = BudgetForm {
            action: Some("delete".to_owned()),
            ..form()
        };
        assert_eq!(
            Err(FormError::UnknownAction("delete".to_owned())),
            unknown.action()
        );
    }

    #[test]
    fn new_budget_carries_summary() {
        let submission = form().parse().unwrap();
        let summary = calculate(&submission.input).unwrap();
        let new_budget = submission.to_new_budget(&summary);

        assert_eq!(Decimal::from(1400), new_budget.residual_income);
        assert_eq!(Some(Decimal::from(140)), new_budget.savings_amount);
        assert_eq!(Decimal::from(1200), new_budget.rent);
        assert_eq!(Some("March".to_owned()), new_budget.name);
    }
}
