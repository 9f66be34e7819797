//! Flat rate tax estimate. This is placeholder logic, not an implementation of any tax law.

use crate::form::{self, FormError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod handlers;

pub const TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

pub const INCOME_TAX: &str = "Income Tax";
pub const TAX_CREDITS: &str = "Tax Credits";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct TaxForm {
    pub income: Option<String>,
    pub tax_credits: Option<String>,
    pub marital_status: Option<String>,
    pub children: Option<String>,
    pub age_group: Option<String>,
    pub employment_type: Option<String>,
}

/// Only `income` and `tax_credits` affect the estimate.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct TaxInput {
    pub income: Decimal,
    pub tax_credits: Decimal,
    pub marital_status: Option<String>,
    pub children: Option<i32>,
    pub age_group: Option<String>,
    pub employment_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TaxEstimate {
    pub result: Decimal,
    pub breakdown: BTreeMap<String, Decimal>,
}

impl TaxForm {
    pub fn parse(self) -> Result<TaxInput, FormError> {
        Ok(TaxInput {
            income: form::required_decimal("income", self.income.as_deref())?,
            tax_credits: form::decimal_or_zero("tax_credits", self.tax_credits.as_deref())?,
            children: form::optional_int("children", self.children.as_deref())?,
            marital_status: form::non_blank(self.marital_status),
            age_group: form::non_blank(self.age_group),
            employment_type: form::non_blank(self.employment_type),
        })
    }
}

/// `income × TAX_RATE − tax_credits`, with the gross tax and the credits as breakdown.
pub fn estimate_tax(input: &TaxInput) -> Result<TaxEstimate, FormError> {
    let income_tax = input
        .income
        .checked_mul(TAX_RATE)
        .ok_or(FormError::Overflow)?;
    let result = income_tax
        .checked_sub(input.tax_credits)
        .ok_or(FormError::Overflow)?;

    let breakdown = BTreeMap::from([
        (INCOME_TAX.to_owned(), income_tax),
        (TAX_CREDITS.to_owned(), input.tax_credits),
    ]);
    Ok(TaxEstimate { result, breakdown })
}
