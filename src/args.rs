//! These structs provide the CLI interface for the budget CLI.

use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// budget: A command-line tool for keeping track of a daily budget.
///
/// For each day you record a budget and what you spent on food, leisure and other things. The
/// records are kept in a plain text file, `kulut.txt` by default, in the home directory. Every
/// command prints or exports a report with the total expenses and how much of the budget was left.
///
/// Entering values for a date that already has a record replaces that record.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory with a config file and a backups directory.
    ///
    /// This is optional. Without a config file the records are kept in `kulut.txt` in the home
    /// directory and no backups are taken. The config file created here keeps 5 backups.
    Init,
    /// Record the budget and expenses for a date and print the report.
    Add(AddArgs),
    /// Print the report of all records.
    Report,
    /// Write all records as CSV.
    Export(ExportArgs),
    /// Enter records interactively, one after another.
    Form,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory that holds the records file and the optional config. Defaults to the current
    /// directory.
    #[arg(long, env = "BUDGET_HOME", default_value_t = DisplayPath::default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// (Not shown): Args for the `budget add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The date, as dd.mm.yyyy or yyyy-mm-dd. Required.
    #[arg(long)]
    date: Option<String>,

    /// The budget for the day. Required.
    #[arg(long, allow_hyphen_values = true)]
    budget: Option<String>,

    /// Food expenses. Defaults to 0.
    #[arg(long, allow_hyphen_values = true)]
    food: Option<String>,

    /// Leisure expenses. Defaults to 0.
    #[arg(long, allow_hyphen_values = true)]
    leisure: Option<String>,

    /// Other expenses. Defaults to 0.
    #[arg(long, allow_hyphen_values = true)]
    other: Option<String>,
}

impl AddArgs {
    pub fn new(
        date: Option<String>,
        budget: Option<String>,
        food: Option<String>,
        leisure: Option<String>,
        other: Option<String>,
    ) -> Self {
        Self {
            date,
            budget,
            food,
            leisure,
            other,
        }
    }

    pub fn date(&self) -> &str {
        self.date.as_deref().unwrap_or_default()
    }

    pub fn budget(&self) -> &str {
        self.budget.as_deref().unwrap_or_default()
    }

    pub fn food(&self) -> &str {
        self.food.as_deref().unwrap_or_default()
    }

    pub fn leisure(&self) -> &str {
        self.leisure.as_deref().unwrap_or_default()
    }

    pub fn other(&self) -> &str {
        self.other.as_deref().unwrap_or_default()
    }
}

/// (Not shown): Args for the `budget export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The CSV file to write. If not supplied, the CSV is printed to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    fn default_home() -> Self {
        Self(PathBuf::from("."))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
