//! Reconciliation layer
//!
//! Ties manifests and registry lookups together into one check run.
//!
//! # Modules
//!
//! - [`driver`]: `Reconciler`, the load → fetch → analyze → persist sequence
//! - [`report`]: Per-package rows, summary and table/JSON rendering
//! - [`target`]: Resolution of the project directory from CLI input
//! - [`prompt`]: Confirmation before writing constraints back

pub mod driver;
pub mod prompt;
pub mod report;
pub mod target;
