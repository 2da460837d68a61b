//! Backup copies of the data file, taken when a session opens.

use crate::{fs, Config};
use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    data_file: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            data_file: config.data_file().to_path_buf(),
        }
    }

    /// Copies the data file to the backups directory.
    ///
    /// The filename format is `{data file name}.YYYY-MM-DD-NNN`. Old backups are rotated so that
    /// only `backup_copies` files are kept.
    ///
    /// Returns `None` without doing anything when backups are disabled or there is no data file.
    pub fn copy_data_file(&self) -> Result<Option<PathBuf>> {
        if self.backup_copies == 0 || !self.data_file.is_file() {
            return Ok(None);
        }
        fs::create_dir_all(&self.backups_dir)?;

        let prefix = self.prefix();
        let date = today();
        let seq = self.next_sequence_number(&prefix, &date)?;
        let path = self.backups_dir.join(format!("{prefix}.{date}-{seq:03}"));
        fs::copy(&self.data_file, &path)?;

        self.rotate(&prefix)?;
        Ok(Some(path))
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    fn prefix(&self) -> String {
        self.data_file
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "data".to_string())
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let max_seq = fs::file_names(&self.backups_dir)?
            .iter()
            .filter_map(|name| parse_sequence_number(name, prefix, date))
            .max()
            .unwrap_or(0);
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<String> = fs::file_names(&self.backups_dir)?
            .into_iter()
            .filter(|name| is_backup_file(name, prefix))
            .collect();

        // Sorting by name sorts by date and sequence number
        files.sort();

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for name in files.into_iter().take(to_delete) {
            debug!("Removing old backup {name}");
            fs::remove(self.backups_dir.join(name))?;
        }
        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let seq = filename.strip_prefix(&format!("{prefix}.{date}-"))?;
    if seq.len() != 3 {
        return None;
    }
    seq.parse().ok()
}

/// Checks if a filename is a backup with the given prefix: `{prefix}.YYYY-MM-DD-NNN`.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    let Some(rest) = filename.strip_prefix(&format!("{prefix}.")) else {
        return false;
    };
    match rest.rsplit_once('-') {
        Some((date, seq)) => {
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
                && seq.len() == 3
                && seq.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("kulut.txt.2025-12-14-001", "kulut.txt", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("kulut.txt.2025-12-14-042", "kulut.txt", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("other.txt.2025-12-14-001", "kulut.txt", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("kulut.txt.2025-12-13-001", "kulut.txt", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("kulut.txt.2025-12-14-001", "kulut.txt"));
        assert!(!is_backup_file("kulut.txt.tmp", "kulut.txt"));
        assert!(!is_backup_file("kulut.txt.2025-12-14-1", "kulut.txt"));
        assert!(!is_backup_file("other.txt.2025-12-14-001", "kulut.txt"));
    }

    #[test]
    fn test_disabled_backup_does_nothing() {
        let env = TestEnv::with_backups(0);
        std::fs::write(env.config().data_file(), "x").unwrap();
        assert!(env.config().backup().copy_data_file().unwrap().is_none());
    }

    #[test]
    fn test_no_data_file_does_nothing() {
        let env = TestEnv::with_backups(3);
        assert!(env.config().backup().copy_data_file().unwrap().is_none());
    }

    #[test]
    fn test_copy_and_rotate() {
        let env = TestEnv::with_backups(2);
        let config = env.config();
        std::fs::write(config.data_file(), "contents").unwrap();
        let backup = config.backup();

        let first = backup.copy_data_file().unwrap().unwrap();
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "contents");
        backup.copy_data_file().unwrap().unwrap();
        let third = backup.copy_data_file().unwrap().unwrap();
        assert!(third.to_string_lossy().ends_with("-003"));

        let names = fs::file_names(backup.backups_dir()).unwrap();
        assert_eq!(names.len(), 2);
        assert!(!first.exists());
    }
}
