//! Resolution of the project directory to check

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{DECLARATION_FILE, LOCK_FILE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetResolutionError {
    #[error("Conflicting targets: '{}' and --path '{}'; pass only one", .positional.display(), .option.display())]
    Conflicting { positional: PathBuf, option: PathBuf },

    #[error("Unsupported target file '{}': expected a directory, composer.json or composer.lock", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("Failed to determine current directory: {0}")]
    CurrentDir(String),
}

/// Resolve the project directory from the positional argument, the
/// `--path` option, or the current working directory.
pub fn resolve_target(
    positional: Option<&Path>,
    option: Option<&Path>,
) -> Result<PathBuf, TargetResolutionError> {
    let cwd = std::env::current_dir().map_err(|e| TargetResolutionError::CurrentDir(e.to_string()));
    resolve_target_with_cwd(positional, option, cwd)
}

fn resolve_target_with_cwd(
    positional: Option<&Path>,
    option: Option<&Path>,
    cwd: Result<PathBuf, TargetResolutionError>,
) -> Result<PathBuf, TargetResolutionError> {
    let explicit = match (positional, option) {
        (Some(positional), Some(option)) if positional != option => {
            return Err(TargetResolutionError::Conflicting {
                positional: positional.to_path_buf(),
                option: option.to_path_buf(),
            });
        }
        (Some(path), _) | (None, Some(path)) => Some(path),
        (None, None) => None,
    };

    let Some(path) = explicit else {
        return cwd;
    };

    if path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let is_manifest_file = path
        .file_name()
        .is_some_and(|name| name == DECLARATION_FILE || name == LOCK_FILE);

    if is_manifest_file {
        return match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
            _ => cwd,
        };
    }

    if path.is_file() {
        return Err(TargetResolutionError::UnsupportedFile(path.to_path_buf()));
    }

    // A missing directory surfaces later as a missing composer.json
    Ok(path.to_path_buf())
}
