pub mod config;
pub mod manifest;
pub mod sync;
pub mod version;
