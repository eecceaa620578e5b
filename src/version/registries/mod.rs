//! Registry implementations for fetching package releases

pub mod packagist;

pub use packagist::PackagistRegistry;
