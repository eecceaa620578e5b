//! Version layer for package version checking
//!
//! This module provides the core functionality for fetching the latest
//! releases from Packagist and comparing them with declared constraints.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Fetcher   │────▶│ Constraint  │
//! │  (fetch)    │     │(batch, pick)│     │ (analyze)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ Registries  │                         │   Compare   │
//! │ (packagist) │                         │(version cmp)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`compare`]: Numeric multi-part version comparison
//! - [`constraint`]: Stale-constraint detection and rewrite suggestions
//! - [`fetcher`]: Concurrent batch lookup of latest stable versions
//! - [`registry`]: Registry trait for fetching releases from remote sources
//! - [`registries`]: Concrete registry implementations (Packagist)
//! - [`error`]: Error types for registry operations
//! - [`types`]: Registry response types like `VersionRecord`

pub mod compare;
pub mod constraint;
pub mod error;
pub mod fetcher;
pub mod registries;
pub mod registry;
pub mod types;
