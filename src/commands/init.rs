use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the home directory with:
/// - an initial `config.json` with default settings
/// - the `.backups` directory
///
/// # Arguments
/// - `home` - The directory that will hold the config and the records file.
///
/// # Errors
/// - Returns an error if a config file already exists in `home`.
/// - Returns an error if any file operations fail.
pub fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)?;
    Ok(format!(
        "Successfully created the config at {}",
        config.config_path().display()
    )
    .into())
}
