//! The running application state.
//!
//! A `Session` owns the `Config` and the in-memory `Store`. Opening a session backs up and loads
//! the data file. Every submitted entry is stored, saved and rendered in that order. Closing the
//! session, or dropping it, saves the store one last time.

use crate::entry::Entry;
use crate::model::{Record, Store};
use crate::{codec, report, Config, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub struct Session {
    config: Config,
    store: Store,
    closed: bool,
}

/// The outcome of a successful `Session::submit`.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// The record that was stored.
    pub record: Record,
    /// An earlier record for the same date was replaced.
    pub replaced: bool,
    /// The expenses are larger than the budget.
    pub budget_exceeded: bool,
    /// The data file was rewritten. When false the file is stale until the next successful save.
    pub saved: bool,
    /// The report after the change.
    #[serde(skip)]
    pub report: String,
}

impl Session {
    /// Backs up and loads the data file named by `config`.
    ///
    /// Nothing here is fatal. A missing data file gives an empty store. If the file cannot be read
    /// or a block cannot be parsed, the error is logged and the session starts with the records
    /// read before the failure.
    pub fn open(config: Config) -> Self {
        match config.backup().copy_data_file() {
            Ok(Some(path)) => debug!("Backed up the data file to {}", path.display()),
            Ok(None) => {}
            Err(e) => warn!("Unable to back up the data file: {e:#}"),
        }

        let mut store = Store::new();
        match codec::load(config.data_file(), &mut store) {
            Ok(count) => info!(
                "Loaded {count} records from {}",
                config.data_file().display()
            ),
            Err(e) => error!(
                "Problem reading {}, {} records were loaded: {e}",
                config.data_file().display(),
                store.len()
            ),
        }

        Self {
            config,
            store,
            closed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// True if a record for `date` is already stored.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.store.contains(date)
    }

    /// Validates `entry`, stores it, saves the data file and renders the report.
    ///
    /// # Errors
    /// Returns the validation or parse error of the entry. The store is not changed in that case.
    /// A failure to save is logged and reported through `Submission::saved`.
    pub fn submit(&mut self, entry: &Entry) -> Result<Submission> {
        let validated = entry.validate()?;
        let record = validated.record;
        if validated.budget_exceeded {
            warn!(
                "Expenses of {} exceed the budget of {} on {}",
                record.total_expenses(),
                record.budget(),
                record.formatted_date()
            );
        }

        let replaced = self.store.put(record).is_some();
        if replaced {
            debug!("Replaced the record for {}", record.formatted_date());
        }

        let saved = match self.save() {
            Ok(()) => true,
            Err(e) => {
                error!("{e}");
                false
            }
        };

        Ok(Submission {
            record,
            replaced,
            budget_exceeded: validated.budget_exceeded,
            saved,
            report: self.report(),
        })
    }

    /// Renders the report for the current store.
    pub fn report(&self) -> String {
        report::render(&self.store)
    }

    /// Writes the whole store to the data file.
    pub fn save(&self) -> Result<()> {
        codec::save(self.config.data_file(), &self.store)
    }

    /// Saves the store and ends the session.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.save()?;
        info!("Saved {} records", self.store.len());
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.save() {
            error!("Unable to save when closing: {e}");
        }
    }
}
