//! Turning the raw text of a form entry into a `Record`.

use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Record, DATE_FORMAT};
use crate::{Error, Result};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The values a user typed into the entry form.
///
/// `date` is `None` when no date was picked. The amounts are kept as the text that was entered;
/// blank expense fields count as zero, a blank budget is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: Option<NaiveDate>,
    pub budget: String,
    pub food: String,
    pub leisure: String,
    pub other: String,
}

/// A validated entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validated {
    pub record: Record,
    /// Expenses are larger than the budget. This is a warning, the record is still valid.
    pub budget_exceeded: bool,
}

impl Entry {
    pub fn new(
        date: Option<NaiveDate>,
        budget: impl Into<String>,
        food: impl Into<String>,
        leisure: impl Into<String>,
        other: impl Into<String>,
    ) -> Self {
        Self {
            date,
            budget: budget.into(),
            food: food.into(),
            leisure: leisure.into(),
            other: other.into(),
        }
    }

    /// Checks the required fields and parses the amounts.
    ///
    /// # Errors
    /// - `ErrorType::Validation` if the date or the budget is missing.
    /// - `ErrorType::Parse` if any amount is not a finite number.
    pub fn validate(&self) -> Result<Validated> {
        let date = match self.date {
            Some(date) if !self.budget.trim().is_empty() => date,
            _ => return Err(Error::validation("Both the date and the budget are required")),
        };
        let budget = parse_amount("budget", &self.budget)?;
        let food = parse_optional("food", &self.food)?;
        let leisure = parse_optional("leisure", &self.leisure)?;
        let other = parse_optional("other", &self.other)?;

        let record = Record::new(date, budget, food, leisure, other);
        Ok(Validated {
            record,
            budget_exceeded: record.is_over_budget(),
        })
    }
}

/// Parses a date typed by the user. Accepts `dd.mm.yyyy` and `yyyy-mm-dd`. Blank text is `None`.
pub fn parse_date(s: &str) -> Result<Option<NaiveDate>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .with_context(|| format!("'{s}' is not a date, use the form dd.mm.yyyy"))
        .map(Some)
        .pub_result(ErrorType::Parse)
}

fn parse_amount(field: &str, s: &str) -> Result<Amount> {
    Amount::from_str(s)
        .with_context(|| format!("The {field} must be a number"))
        .pub_result(ErrorType::Parse)
}

fn parse_optional(field: &str, s: &str) -> Result<Amount> {
    if s.trim().is_empty() {
        Ok(Amount::ZERO)
    } else {
        parse_amount(field, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, 1)
    }

    #[test]
    fn test_valid_entry() {
        let v = Entry::new(may_first(), "100", "10", "20", "5")
            .validate()
            .unwrap();
        assert_eq!(v.record.total_expenses().value(), 35.0);
        assert_eq!(v.record.remaining().value(), 65.0);
        assert!(!v.budget_exceeded);
    }

    #[test]
    fn test_blank_expenses_are_zero() {
        let v = Entry::new(may_first(), "100", "", " ", "")
            .validate()
            .unwrap();
        assert_eq!(v.record.total_expenses().value(), 0.0);
    }

    #[test]
    fn test_missing_date() {
        let err = Entry::new(None, "100", "", "", "").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorType::Validation);
    }

    #[test]
    fn test_missing_budget() {
        let err = Entry::new(may_first(), "", "1", "", "")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorType::Validation);
    }

    #[test]
    fn test_missing_budget_wins_over_bad_number() {
        let err = Entry::new(may_first(), "  ", "abc", "", "")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorType::Validation);
    }

    #[test]
    fn test_non_numeric_budget() {
        let err = Entry::new(may_first(), "sata", "", "", "")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorType::Parse);
        assert!(err.to_string().contains("budget"), "{err}");
    }

    #[test]
    fn test_non_numeric_expense() {
        let err = Entry::new(may_first(), "100", "", "12,5", "")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorType::Parse);
        assert!(err.to_string().contains("leisure"), "{err}");
    }

    #[test]
    fn test_budget_exceeded_is_advisory() {
        let v = Entry::new(may_first(), "50", "30", "30", "0")
            .validate()
            .unwrap();
        assert!(v.budget_exceeded);
        assert_eq!(v.record.remaining().value(), -10.0);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("01.05.2024").unwrap(), may_first());
        assert_eq!(parse_date("2024-05-01").unwrap(), may_first());
        assert_eq!(parse_date("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_date_invalid() {
        let err = parse_date("31.02.2024").unwrap_err();
        assert_eq!(err.kind(), ErrorType::Parse);
        assert!(parse_date("tomorrow").is_err());
    }
}
