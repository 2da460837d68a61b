use crate::commands::Out;
use crate::session::Session;
use crate::{Config, Result};

/// Loads the records and returns the report as the output text. The structured output is the
/// number of records.
pub fn report(config: Config) -> Result<Out<usize>> {
    let session = Session::open(config);
    let count = session.store().len();
    let text = session.report();
    session.close()?;
    Ok(Out::new(format!("Reported {count} records"), count).with_text(text))
}
