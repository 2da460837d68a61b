use crate::args::AddArgs;
use crate::commands::Out;
use crate::entry::{parse_date, Entry};
use crate::session::{Session, Submission};
use crate::{Config, Result};
use tracing::warn;

/// Records one day's budget and expenses and returns the refreshed report as the output text.
///
/// A record that already exists for the date is replaced.
///
/// # Arguments
///
/// - `config` - The application configuration naming the records file.
/// - `args` - The entered date, budget and expenses. Blank expenses count as zero.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message saying which date was stored.
/// - The `Submission`.
/// - The report text.
///
/// # Errors
///
/// - Returns a validation error if the date or budget is missing.
/// - Returns a parse error if the date or any amount cannot be parsed.
/// - Returns a persistence error if the records cannot be saved when the session closes.
pub fn add(config: Config, args: AddArgs) -> Result<Out<Submission>> {
    let date = parse_date(args.date())?;
    let entry = Entry::new(
        date,
        args.budget(),
        args.food(),
        args.leisure(),
        args.other(),
    );

    let mut session = Session::open(config);
    if let Some(date) = date {
        if session.contains(date) {
            warn!(
                "There is already a record for {}, it will be replaced",
                date.format(crate::model::DATE_FORMAT)
            );
        }
    }
    let submission = session.submit(&entry)?;
    session.close()?;

    let message = format!(
        "Stored the record for {}{}",
        submission.record.formatted_date(),
        if submission.budget_exceeded {
            ", the expenses exceed the budget"
        } else {
            ""
        }
    );
    let report = submission.report.clone();
    Ok(Out::new(message, submission).with_text(report))
}
