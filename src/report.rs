//! The text report of every stored record.

use crate::codec::Block;
use crate::model::Store;
use std::fmt::Write;

/// Renders every record in store order, in the same block format as the data file.
///
/// Nothing is written before the first block or after the last one, so an empty store renders as
/// an empty string.
pub fn render(store: &Store) -> String {
    let mut out = String::new();
    for record in store.values() {
        // Writing to a String cannot fail.
        let _ = write!(out, "{}", Block(record));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use chrono::NaiveDate;

    fn put(store: &mut Store, day: u32, budget: &str, food: &str, leisure: &str, other: &str) {
        let date = NaiveDate::from_ymd_opt(2024, 6, day);
        let v = Entry::new(date, budget, food, leisure, other)
            .validate()
            .unwrap();
        store.put(v.record);
    }

    #[test]
    fn test_empty_store() {
        assert_eq!(render(&Store::new()), "");
    }

    #[test]
    fn test_derived_lines() {
        let mut store = Store::new();
        put(&mut store, 1, "100", "10", "20", "5");
        let report = render(&store);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Päivämäärä: 01.06.2024");
        assert_eq!(lines[5], "Yhteenlasketut kulut: 35.0");
        assert_eq!(lines[6], "Budjetista jäi yli: 65.0");
        assert!(report.ends_with("-\n"));
    }

    #[test]
    fn test_overflowing_totals() {
        let mut store = Store::new();
        put(&mut store, 1, "100", "1e308", "1e308", "1e308");
        let report = render(&store);
        assert!(report.contains("Yhteenlasketut kulut: Infinity\n"), "{report}");
        assert!(report.contains("Budjetista jäi yli: -Infinity\n"), "{report}");
    }

    #[test]
    fn test_blocks_follow_store_order() {
        let mut store = Store::new();
        put(&mut store, 20, "10", "", "", "");
        put(&mut store, 3, "10", "", "", "");
        put(&mut store, 20, "15", "", "", "");
        let report = render(&store);
        let dates: Vec<&str> = report
            .lines()
            .filter(|l| l.starts_with("Päivämäärä"))
            .collect();
        assert_eq!(
            dates,
            vec!["Päivämäärä: 20.06.2024", "Päivämäärä: 03.06.2024"]
        );
        assert!(report.contains("Budjetti: 15.0"));
        assert_eq!(report.matches("Budjetti: ").count(), 2);
    }

    #[test]
    fn test_report_matches_data_file() {
        let mut store = Store::new();
        put(&mut store, 1, "100", "10", "20", "5");
        put(&mut store, 2, "50", "30", "30", "");
        assert_eq!(render(&store), crate::codec::encode(&store));
    }
}
