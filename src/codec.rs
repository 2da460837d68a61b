//! Reading and writing the plain text data file.
//!
//! Every record is written as a block of eight lines:
//!
//! ```text
//! Päivämäärä: 01.05.2024
//! Budjetti: 100.0
//! Ruokakulut: 10.0
//! Vapaa-ajan kulut: 20.0
//! Muut kulut: 5.0
//! Yhteenlasketut kulut: 35.0
//! Budjetista jäi yli: 65.0
//! --------------------------------------------------------------------------
//! ```
//!
//! The last three lines are derived and are ignored when reading. Values are not escaped, so a
//! value containing `": "` or the separator line cannot be read back.

use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Record, Store, DATE_FORMAT};
use crate::{fs, Error, Result};
use anyhow::Context;
use chrono::NaiveDate;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace};

pub const DATE_LABEL: &str = "Päivämäärä";
pub const BUDGET_LABEL: &str = "Budjetti";
pub const FOOD_LABEL: &str = "Ruokakulut";
pub const LEISURE_LABEL: &str = "Vapaa-ajan kulut";
pub const OTHER_LABEL: &str = "Muut kulut";
pub const TOTAL_LABEL: &str = "Yhteenlasketut kulut";
pub const REMAINING_LABEL: &str = "Budjetista jäi yli";
pub const SEPARATOR: &str =
    "--------------------------------------------------------------------------";

const KEY_VALUE: &str = ": ";

/// Displays a `Record` as its eight line block, including the trailing newline.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a>(pub &'a Record);

impl Display for Block<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "{DATE_LABEL}{KEY_VALUE}{}", r.formatted_date())?;
        writeln!(f, "{BUDGET_LABEL}{KEY_VALUE}{}", r.budget())?;
        writeln!(f, "{FOOD_LABEL}{KEY_VALUE}{}", r.food())?;
        writeln!(f, "{LEISURE_LABEL}{KEY_VALUE}{}", r.leisure())?;
        writeln!(f, "{OTHER_LABEL}{KEY_VALUE}{}", r.other())?;
        writeln!(f, "{TOTAL_LABEL}{KEY_VALUE}{}", r.total_expenses())?;
        writeln!(f, "{REMAINING_LABEL}{KEY_VALUE}{}", r.remaining())?;
        writeln!(f, "{SEPARATOR}")
    }
}

/// Serializes every record in `store`, in store order.
pub fn encode(store: &Store) -> String {
    store.values().map(|r| Block(r).to_string()).collect()
}

/// Parses `text` and `put`s every block into `store`. Returns the number of blocks read.
///
/// Parsing stops at the first malformed block. Blocks read before it stay in `store`.
pub fn decode(text: &str, store: &mut Store) -> Result<usize> {
    let mut lines = text.lines().enumerate().map(|(ix, line)| (ix + 1, line));
    let mut count = 0;
    while let Some((line_no, line)) = lines.next() {
        let date = match block_start(line) {
            Some(value) => parse_date(value)
                .with_context(|| format!("Invalid date on line {line_no}"))
                .pub_result(ErrorType::Parse)?,
            None => {
                trace!("Skipping line {line_no} outside of a block");
                continue;
            }
        };
        let mut next_amount = |label: &str| -> Result<Amount> {
            let (line_no, line) = lines.next().ok_or_else(|| {
                Error::parse(format!(
                    "The block for {} ends before the '{label}' line",
                    date.format(DATE_FORMAT)
                ))
            })?;
            parse_value(line)
                .with_context(|| format!("Invalid '{label}' value on line {line_no}"))
                .pub_result(ErrorType::Parse)
        };
        let budget = next_amount(BUDGET_LABEL)?;
        let food = next_amount(FOOD_LABEL)?;
        let leisure = next_amount(LEISURE_LABEL)?;
        let other = next_amount(OTHER_LABEL)?;

        // Derived totals and the separator.
        for _ in 0..3 {
            lines.next();
        }

        store.put(Record::new(date, budget, food, leisure, other));
        count += 1;
    }
    Ok(count)
}

/// Writes the whole store to `path`, replacing whatever was there.
pub fn save(path: &Path, store: &Store) -> Result<()> {
    fs::replace(path, encode(store))
        .context("Unable to save the records")
        .pub_result(ErrorType::Persistence)?;
    debug!("Saved {} records to {}", store.len(), path.display());
    Ok(())
}

/// Reads `path` into `store`. A missing file reads as zero records.
pub fn load(path: &Path, store: &mut Store) -> Result<usize> {
    let text = match fs::read_optional(path).pub_result(ErrorType::Persistence)? {
        Some(text) => text,
        None => {
            debug!("There is no data file at {}", path.display());
            return Ok(0);
        }
    };
    let count = decode(&text, store)?;
    debug!("Loaded {count} records from {}", path.display());
    Ok(count)
}

/// Returns the date text if `line` is the first line of a block.
fn block_start(line: &str) -> Option<&str> {
    let parts: Vec<&str> = line.split(KEY_VALUE).collect();
    match parts.as_slice() {
        [DATE_LABEL, value] => Some(*value),
        _ => None,
    }
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .with_context(|| format!("'{value}' is not a date in the form dd.mm.yyyy"))
}

fn parse_value(line: &str) -> anyhow::Result<Amount> {
    let value = line
        .split(KEY_VALUE)
        .nth(1)
        .with_context(|| format!("Expected 'key{KEY_VALUE}value' but found '{line}'"))?;
    Ok(Amount::from_str(value)?)
}
