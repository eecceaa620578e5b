//! Reading and writing a project's composer.json / composer.lock

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::{DECLARATION_FILE, LOCK_FILE};
use crate::manifest::composer_json::{ComposerJson, Section};
use crate::manifest::composer_lock::ComposerLock;
use crate::manifest::error::ManifestError;

/// Prefix of PHP extension requirements (ext-json, ext-mbstring, ...)
const EXTENSION_PREFIX: &str = "ext-";

/// Returns true for real `vendor/name` packages, excluding platform
/// requirements such as `php` or `ext-json`.
pub fn is_registry_package(name: &str) -> bool {
    name.contains('/') && !name.starts_with(EXTENSION_PREFIX)
}

/// Access to the manifest files of a single project directory
#[derive(Debug, Clone)]
pub struct ManifestStore {
    root: PathBuf,
}

impl ManifestStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn declaration_path(&self) -> PathBuf {
        self.root.join(DECLARATION_FILE)
    }

    fn read(&self, file: &'static str) -> Result<(PathBuf, String), ManifestError> {
        let path = self.root.join(file);
        if !path.is_file() {
            return Err(ManifestError::NotFound {
                file,
                dir: self.root.clone(),
            });
        }

        debug!("Reading {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        Ok((path, content))
    }

    /// Load and parse composer.json
    pub fn load_declaration(&self) -> Result<ComposerJson, ManifestError> {
        let (path, content) = self.read(DECLARATION_FILE)?;
        ComposerJson::parse(&content).map_err(|source| ManifestError::Parse { path, source })
    }

    /// Load and parse composer.lock
    pub fn load_lock(&self) -> Result<ComposerLock, ManifestError> {
        let (path, content) = self.read(LOCK_FILE)?;
        ComposerLock::parse(&content).map_err(|source| ManifestError::Parse { path, source })
    }

    /// Declared constraints of `require` and `require-dev`, in file order.
    ///
    /// Platform requirements are filtered out. A package declared in both
    /// sections keeps its first position and the `require-dev` constraint.
    pub fn load_constraints(&self) -> Result<IndexMap<String, String>, ManifestError> {
        let declaration = self.load_declaration()?;

        Ok(Section::ALL
            .into_iter()
            .flat_map(|section| declaration.constraints(section))
            .filter(|(name, _)| is_registry_package(name))
            .map(|(name, constraint)| (name.to_string(), constraint.to_string()))
            .collect())
    }

    /// Installed versions recorded in composer.lock
    pub fn load_installed(&self) -> Result<IndexMap<String, String>, ManifestError> {
        Ok(self.load_lock()?.installed_versions())
    }

    /// Write new constraints back to composer.json.
    ///
    /// Each package is updated in the section it is declared in; packages
    /// not declared anywhere are ignored. The file is only rewritten when at
    /// least one constraint actually changed. Returns the number of changes.
    pub fn apply_rewrites(&self, rewrites: &IndexMap<String, String>) -> Result<usize, ManifestError> {
        let mut declaration = self.load_declaration()?;

        let mut changed = 0;
        for (name, constraint) in rewrites {
            let Some(section) = declaration.section_of(name) else {
                debug!("Skipping {}: not declared in {}", name, DECLARATION_FILE);
                continue;
            };
            if declaration.set_constraint(section, name, constraint) {
                changed += 1;
            }
        }

        if changed == 0 {
            debug!("No constraint changes to write");
            return Ok(0);
        }

        let path = self.declaration_path();
        write_atomic(&path, |file| declaration.write_pretty(file))
            .map_err(|source| ManifestError::WriteFailed { path: path.clone(), source })?;

        info!("Updated {} constraints in {}", changed, path.display());
        Ok(changed)
    }
}

/// Replace `path` with the output of `write`.
///
/// The content goes to a temporary file in the same directory, which is
/// renamed over `path` only after it was written completely. On failure the
/// temporary file is removed and `path` keeps its previous content.
fn write_atomic<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> io::Result<()>,
{
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    write(&mut file)?;
    file.flush()?;

    if let Ok(metadata) = std::fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.as_file().sync_all()?;

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
