//! Manifest layer
//! - composer_json.rs: ordered composer.json document with typed section access
//! - composer_lock.rs: composer.lock records
//! - store.rs: loading constraints/installed versions and writing rewrites back
//! - error.rs: ManifestError

pub mod composer_json;
pub mod composer_lock;
pub mod error;
pub mod store;

pub use composer_json::{ComposerJson, Section};
pub use composer_lock::ComposerLock;
pub use error::ManifestError;
pub use store::ManifestStore;
