//! Host framework seams.
//!
//! The hosting CMS owns persistence, content type registration, and
//! capability checks. Each concern is a trait so the admin feature can be
//! driven by the real host, or by the in-process implementations shipped
//! here for standalone runs and tests.

mod access;
mod registry;
mod storage;

use anyhow::Result;
use async_trait::async_trait;
use tower_sessions::Session;

pub use access::{AllowAll, DenyAll, SessionAccessControl};
pub use registry::{Declaration, RecordingRegistry};
pub use storage::{JsonFileStorage, MemoryConfigStorage};

use crate::registry::{ContentTypeConfig, TaxonomyConfig};

/// Capability required for every mutating admin action.
pub const MANAGE_TYPES: &str = "manage_types";

/// Key-value configuration persistence owned by the host.
#[async_trait]
pub trait ConfigStorage: Send + Sync {
    /// Fetch a config value, `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// The host's content type and taxonomy registration engine.
///
/// Declarations are replayed on every bootstrap; reconciling repeated
/// declarations within one process lifetime is the host's concern.
#[async_trait]
pub trait ContentRegistry: Send + Sync {
    async fn register_content_type(&self, config: ContentTypeConfig) -> Result<()>;

    async fn register_taxonomy(&self, config: TaxonomyConfig) -> Result<()>;
}

/// Capability checks for the current caller.
#[async_trait]
pub trait AccessControl: Send + Sync {
    async fn caller_can(&self, session: &Session, capability: &str) -> bool;
}
