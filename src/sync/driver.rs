//! Reconciliation of declared, installed and latest versions
//!
//! One run goes through a fixed sequence:
//! 1. load constraints and installed versions (terminal on failure)
//! 2. fetch every latest version in one concurrent batch
//! 3. build one row per package
//! 4. optionally write safe constraint suggestions back

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::info;

use crate::config::RegistryConfig;
use crate::manifest::error::ManifestError;
use crate::manifest::store::ManifestStore;
use crate::sync::prompt::Confirmer;
use crate::sync::report::{ReconciliationRow, Report, constraint_count};
use crate::sync::target::TargetResolutionError;
use crate::version::fetcher::fetch_latest;
use crate::version::registry::Registry;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Target(#[from] TargetResolutionError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Whether suggested constraints may be written back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Never write
    Skip,
    /// Write without asking (`--write`)
    Apply,
    /// Ask the user first
    Ask,
}

impl WritePolicy {
    pub fn from_flags(write: bool, interactive: bool) -> Self {
        match (write, interactive) {
            (true, _) => WritePolicy::Apply,
            (false, true) => WritePolicy::Ask,
            (false, false) => WritePolicy::Skip,
        }
    }
}

/// What happened to the suggested rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// No row had a safe suggestion
    NothingToApply,
    /// Writing was disabled or the user said no
    Declined,
    /// Number of constraints changed in composer.json
    Applied(usize),
}

/// Packages to check with their declared constraints and installed versions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workset {
    pub constraints: IndexMap<String, String>,
    pub installed: IndexMap<String, String>,
}

impl Workset {
    pub fn package_names(&self) -> Vec<String> {
        self.constraints.keys().cloned().collect()
    }
}

/// Drives a check run with injected registry and confirmation collaborators
pub struct Reconciler {
    registry: Arc<dyn Registry>,
    confirmer: Arc<dyn Confirmer>,
    config: RegistryConfig,
}

impl Reconciler {
    pub fn new(
        registry: Arc<dyn Registry>,
        confirmer: Arc<dyn Confirmer>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            registry,
            confirmer,
            config,
        }
    }

    /// Read the packages to check. No network access happens here.
    pub fn load(&self, store: &ManifestStore) -> Result<Workset, SyncError> {
        let constraints = store.load_constraints()?;
        let installed = store.load_installed()?;
        info!(
            "Loaded {} packages from {}",
            constraints.len(),
            store.root().display()
        );
        Ok(Workset {
            constraints,
            installed,
        })
    }

    /// Fetch latest versions and build the report
    pub async fn reconcile(&self, workset: &Workset) -> Report {
        let names = workset.package_names();
        let latest = fetch_latest(self.registry.as_ref(), &names, &self.config).await;

        let rows = names
            .iter()
            .map(|name| {
                ReconciliationRow::new(
                    name,
                    workset.constraints.get(name).map(String::as_str),
                    workset.installed.get(name).map(String::as_str),
                    latest.get(name).and_then(|v| v.as_deref()),
                )
            })
            .collect();

        Report::new(rows)
    }

    /// Load, fetch and analyze in one go
    pub async fn check(&self, store: &ManifestStore) -> Result<Report, SyncError> {
        let workset = self.load(store)?;
        Ok(self.reconcile(&workset).await)
    }

    /// Write safe suggestions back to composer.json according to the policy.
    ///
    /// Constraints that need manual review are never written.
    pub fn persist(
        &self,
        store: &ManifestStore,
        report: &Report,
        policy: WritePolicy,
    ) -> Result<PersistOutcome, SyncError> {
        let rewrites = report.rewrites();
        if rewrites.is_empty() {
            return Ok(PersistOutcome::NothingToApply);
        }

        let approved = match policy {
            WritePolicy::Skip => false,
            WritePolicy::Apply => true,
            WritePolicy::Ask => self.confirmer.confirm(&format!(
                "Update {} in {}?",
                constraint_count(rewrites.len()),
                store.declaration_path().display()
            )),
        };

        if !approved {
            return Ok(PersistOutcome::Declined);
        }

        Ok(PersistOutcome::Applied(store.apply_rewrites(&rewrites)?))
    }
}
