use crate::model::Record;
use chrono::NaiveDate;
use std::collections::HashMap;

/// All records, keyed by date, in the order they were first inserted.
///
/// There is at most one record per date. `put` with a date that is already present replaces the
/// old record in place, so it keeps its position in the display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    records: Vec<Record>,
    index: HashMap<NaiveDate, usize>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under its date. Returns the record it replaced, if there was one.
    pub fn put(&mut self, record: Record) -> Option<Record> {
        match self.index.get(&record.date()) {
            Some(&ix) => Some(std::mem::replace(&mut self.records[ix], record)),
            None => {
                self.index.insert(record.date(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index.contains_key(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Record> {
        self.index.get(&date).map(|&ix| &self.records[ix])
    }

    /// Iterates over the records in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use std::str::FromStr;

    fn record(day: u32, budget: &str) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            Amount::from_str(budget).unwrap(),
            Amount::ZERO,
            Amount::ZERO,
            Amount::ZERO,
        )
    }

    #[test]
    fn test_put_and_get() {
        let mut store = Store::new();
        assert!(store.is_empty());
        assert!(store.put(record(1, "10")).is_none());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(store.contains(date));
        assert_eq!(store.get(date), Some(&record(1, "10")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_same_date_replaces() {
        let mut store = Store::new();
        store.put(record(1, "10"));
        let replaced = store.put(record(1, "20"));
        assert_eq!(replaced, Some(record(1, "10")));
        assert_eq!(store.len(), 1);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(store.get(date), Some(&record(1, "20")));
    }

    #[test]
    fn test_values_in_insertion_order() {
        let mut store = Store::new();
        store.put(record(5, "1"));
        store.put(record(2, "2"));
        store.put(record(9, "3"));
        let days: Vec<u32> = store
            .values()
            .map(|r| chrono::Datelike::day(&r.date()))
            .collect();
        assert_eq!(days, vec![5, 2, 9]);
    }

    #[test]
    fn test_replacement_keeps_position() {
        let mut store = Store::new();
        store.put(record(5, "1"));
        store.put(record(2, "2"));
        store.put(record(5, "7"));
        let budgets: Vec<f64> = store.values().map(|r| r.budget().value()).collect();
        assert_eq!(budgets, vec![7.0, 2.0]);
    }

    #[test]
    fn test_values_is_restartable() {
        let mut store = Store::new();
        store.put(record(1, "1"));
        assert_eq!(store.values().count(), 1);
        store.put(record(2, "1"));
        assert_eq!(store.values().count(), 2);
        assert_eq!(store.values().count(), 2);
    }
}
