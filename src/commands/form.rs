//! The interactive entry form.

use crate::commands::Out;
use crate::entry::{parse_date, Entry};
use crate::error::{ErrorType, IntoResult};
use crate::model::DATE_FORMAT;
use crate::session::Session;
use crate::{codec, Config, Result};
use serde::Serialize;
use std::io::{BufRead, Write};

const QUIT: &str = "q";

/// What happened during a `form` session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormSummary {
    /// Entries that were stored.
    pub stored: usize,
    /// Entries that were rejected as invalid.
    pub rejected: usize,
}

/// Runs the interactive form on `input` and `output`.
///
/// The current report is shown first. Then the form asks for a date, a budget and the three
/// expenses, stores the entry and shows the report again. This repeats until `q` is entered as the
/// date or the input ends. Invalid entries are reported and skipped.
///
/// # Errors
///
/// - Returns an error if reading `input` or writing `output` fails.
/// - Returns an error if the records cannot be saved when the session closes.
pub fn form<R, W>(config: Config, mut input: R, mut output: W) -> Result<Out<FormSummary>>
where
    R: BufRead,
    W: Write,
{
    let mut session = Session::open(config);
    let summary = run(&mut session, &mut input, &mut output).pub_result(ErrorType::Io)?;
    session.close()?;
    let message = format!(
        "Stored {} entries, {} were rejected",
        summary.stored, summary.rejected
    );
    Ok(Out::new(message, summary))
}

fn run(
    session: &mut Session,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<FormSummary> {
    let mut summary = FormSummary::default();
    write!(output, "{}", session.report())?;

    loop {
        let date_text = match prompt(
            input,
            output,
            &format!("{} (dd.mm.yyyy, {QUIT} to quit)", codec::DATE_LABEL),
        )? {
            Some(text) if text.trim() != QUIT => text,
            _ => break,
        };
        let date = match parse_date(&date_text) {
            Ok(date) => date,
            Err(e) => {
                writeln!(output, "{e}")?;
                summary.rejected += 1;
                continue;
            }
        };
        if let Some(date) = date {
            if session.contains(date) {
                writeln!(
                    output,
                    "There is already a record for {}, it will be replaced.",
                    date.format(DATE_FORMAT)
                )?;
            }
        }

        let mut field = |label: &str| -> anyhow::Result<String> {
            Ok(prompt(input, output, label)?.unwrap_or_default())
        };
        let entry = Entry::new(
            date,
            field(codec::BUDGET_LABEL)?,
            field(codec::FOOD_LABEL)?,
            field(codec::LEISURE_LABEL)?,
            field(codec::OTHER_LABEL)?,
        );

        match session.submit(&entry) {
            Ok(submission) => {
                summary.stored += 1;
                if submission.budget_exceeded {
                    writeln!(output, "The expenses exceed the budget!")?;
                }
                if !submission.saved {
                    writeln!(output, "The records could not be saved, see the log.")?;
                }
                write!(output, "{}", submission.report)?;
            }
            Err(e) => {
                summary.rejected += 1;
                writeln!(output, "{e}")?;
            }
        }
    }
    Ok(summary)
}

/// Writes `label` and reads one line. Returns `None` at the end of the input.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> anyhow::Result<Option<String>> {
    write!(output, "{label}: ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
