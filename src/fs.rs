use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

pub(crate) fn file(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).with_context(|| format!("Unable to create file {}", path.display()))
}

pub(crate) fn write_all(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let mut f = file(path)?;
    f.write_all(data.as_ref())
        .and_then(|_| f.sync_all())
        .with_context(|| format!("Unable to write data to {}", path.display()))
}

/// Replaces the contents of `path` by writing a sibling `.tmp` file and renaming it over `path`.
pub(crate) fn replace(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let tmp = tmp_path(path);
    let result = write_all(&tmp, data).and_then(|()| {
        std::fs::rename(&tmp, path).with_context(|| {
            format!(
                "Unable to move '{}' to '{}'",
                tmp.display(),
                path.display()
            )
        })
    });
    if result.is_err() && tmp.exists() {
        if let Err(e) = std::fs::remove_file(&tmp) {
            warn!("Unable to remove '{}': {e}", tmp.display());
        }
    }
    result
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("Unable to read file {}", path.display()))
}

/// Like `read_to_string` but a missing file is `None` rather than an error.
pub(crate) fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            _ => Err(e).with_context(|| format!("Unable to read file {}", path.display())),
        },
    }
}

pub(crate) fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    std::fs::copy(from, to).map(|_| ()).with_context(|| {
        format!(
            "Unable to copy file from '{}' to '{}'",
            from.display(),
            to.display()
        )
    })
}

pub(crate) fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::remove_file(path).with_context(|| format!("Unable to remove {}", path.display()))
}

/// Lists the file names in `dir`.
pub(crate) fn file_names(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Unable to read {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    Ok(names)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
