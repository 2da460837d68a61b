use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The date format used in the data file, the report and on the command line, e.g. `01.05.2024`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// One day's budget and expenses.
///
/// A `Record` is never changed after it is built. Entering new values for a date that already has
/// a record replaces the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    date: NaiveDate,
    budget: Amount,
    food: Amount,
    leisure: Amount,
    other: Amount,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        budget: Amount,
        food: Amount,
        leisure: Amount,
        other: Amount,
    ) -> Self {
        Self {
            date,
            budget,
            food,
            leisure,
            other,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn budget(&self) -> Amount {
        self.budget
    }

    pub fn food(&self) -> Amount {
        self.food
    }

    pub fn leisure(&self) -> Amount {
        self.leisure
    }

    pub fn other(&self) -> Amount {
        self.other
    }

    /// `food + leisure + other`
    pub fn total_expenses(&self) -> Amount {
        self.food + self.leisure + self.other
    }

    /// `budget - total_expenses`
    pub fn remaining(&self) -> Amount {
        self.budget - self.total_expenses()
    }

    /// True when the expenses are larger than the budget.
    pub fn is_over_budget(&self) -> bool {
        self.total_expenses() > self.budget
    }

    /// The date as `dd.mm.yyyy`.
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_derived_totals() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let r = Record::new(date, amount("100"), amount("10"), amount("20"), amount("5"));
        assert_eq!(r.total_expenses().value(), 35.0);
        assert_eq!(r.remaining().value(), 65.0);
        assert!(!r.is_over_budget());
    }

    #[test]
    fn test_over_budget() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let r = Record::new(date, amount("50"), amount("30"), amount("30"), Amount::ZERO);
        assert!(r.is_over_budget());
        assert_eq!(r.remaining().value(), -10.0);
    }

    #[test]
    fn test_exactly_on_budget_is_not_over() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let r = Record::new(date, amount("60"), amount("30"), amount("30"), Amount::ZERO);
        assert!(!r.is_over_budget());
    }

    #[test]
    fn test_formatted_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
        let r = Record::new(date, Amount::ZERO, Amount::ZERO, Amount::ZERO, Amount::ZERO);
        assert_eq!(r.formatted_date(), "09.01.2023");
    }
}
