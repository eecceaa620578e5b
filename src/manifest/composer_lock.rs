//! composer.lock records

use indexmap::IndexMap;
use serde::Deserialize;

/// A resolved package entry in composer.lock
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    pub version: String,
}

/// The parts of composer.lock needed to know what is installed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComposerLock {
    #[serde(default)]
    packages: Option<Vec<LockedPackage>>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Option<Vec<LockedPackage>>,
}

impl ComposerLock {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Installed version per package, with any `v` prefix removed.
    ///
    /// `packages-dev` is read after `packages` and wins on duplicates.
    pub fn installed_versions(&self) -> IndexMap<String, String> {
        self.packages
            .iter()
            .chain(self.packages_dev.iter())
            .flatten()
            .map(|package| {
                (
                    package.name.clone(),
                    package.version.trim_start_matches('v').to_string(),
                )
            })
            .collect()
    }
}
