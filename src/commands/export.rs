//! Exporting the records as CSV.

use crate::args::ExportArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Record, Store};
use crate::session::Session;
use crate::{fs, Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};

// "Date","Budget","Food","Leisure","Other","Total Expenses","Remaining"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CsvRecord {
    pub date: String,
    pub budget: f64,
    pub food: f64,
    pub leisure: f64,
    pub other: f64,
    #[serde(rename = "Total Expenses")]
    pub total_expenses: f64,
    pub remaining: f64,
}

impl From<&Record> for CsvRecord {
    fn from(r: &Record) -> Self {
        Self {
            date: r.formatted_date(),
            budget: r.budget().value(),
            food: r.food().value(),
            leisure: r.leisure().value(),
            other: r.other().value(),
            total_expenses: r.total_expenses().value(),
            remaining: r.remaining().value(),
        }
    }
}

/// Writes every record as a CSV row, in store order, to `args.output()` or to the output text when
/// no path is given.
///
/// # Errors
///
/// - Returns an error if the CSV cannot be written to the output file.
pub fn export(config: Config, args: ExportArgs) -> Result<Out<usize>> {
    let session = Session::open(config);
    let csv = to_csv(session.store()).pub_result(ErrorType::Io)?;
    let count = session.store().len();
    session.close()?;

    match args.output() {
        Some(path) => {
            fs::write_all(path, csv).pub_result(ErrorType::Persistence)?;
            let message = format!("Exported {count} records to {}", path.display());
            Ok(Out::new(message, count))
        }
        None => Ok(Out::new(format!("Exported {count} records"), count).with_text(csv)),
    }
}

fn to_csv(store: &Store) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for record in store.values() {
        wtr.serialize(CsvRecord::from(record))
            .context("Unable to serialize a CSV row")?;
    }
    // The header is only written with the first row.
    if store.is_empty() {
        wtr.write_record([
            "Date",
            "Budget",
            "Food",
            "Leisure",
            "Other",
            "Total Expenses",
            "Remaining",
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Unable to flush the CSV")?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    fn store() -> Store {
        let mut store = Store::new();
        for (day, budget, food) in [(2, "100", "10"), (1, "50", "60.5")] {
            let date = NaiveDate::from_ymd_opt(2024, 5, day);
            let v = Entry::new(date, budget, food, "", "").validate().unwrap();
            store.put(v.record);
        }
        store
    }

    #[test]
    fn test_to_csv() {
        let csv = to_csv(&store()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Date,Budget,Food,Leisure,Other,Total Expenses,Remaining",
                "02.05.2024,100.0,10.0,0.0,0.0,10.0,90.0",
                "01.05.2024,50.0,60.5,0.0,0.0,60.5,-10.5",
            ]
        );
    }

    #[test]
    fn test_to_csv_reads_back() {
        let csv = to_csv(&store()).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<CsvRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].remaining, -10.5);
    }

    #[test]
    fn test_to_csv_empty_has_header() {
        let csv = to_csv(&Store::new()).unwrap();
        assert_eq!(
            csv,
            "Date,Budget,Food,Leisure,Other,Total Expenses,Remaining\n"
        );
    }

    #[test]
    fn test_export_to_file() {
        let env = TestEnv::new();
        let out_path = env.config().root().join("out.csv");
        let out = export(env.config(), ExportArgs::new(Some(out_path.clone()))).unwrap();
        assert_eq!(out.structure(), Some(&0));
        assert!(out.text().is_none());
        assert!(std::fs::read_to_string(out_path)
            .unwrap()
            .starts_with("Date,"));
    }
}
