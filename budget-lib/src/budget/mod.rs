//! Household budget calculation and the saved budget pages.

pub mod calculator;
pub mod form;
pub mod handlers;
