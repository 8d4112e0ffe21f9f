//! Recording content registry.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;

use super::ContentRegistry;
use crate::registry::{ContentTypeConfig, TaxonomyConfig};

/// A declaration received by the registry, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    ContentType(ContentTypeConfig),
    Taxonomy(TaxonomyConfig),
}

/// Registry that records every declaration and logs it.
///
/// Stands in for the host's registration engine in standalone runs, and
/// doubles as the spy in tests.
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    declarations: RwLock<Vec<Declaration>>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All declarations received so far, in order.
    pub fn declarations(&self) -> Vec<Declaration> {
        self.declarations.read().clone()
    }

    pub fn content_types(&self) -> Vec<ContentTypeConfig> {
        self.declarations
            .read()
            .iter()
            .filter_map(|d| match d {
                Declaration::ContentType(c) => Some(c.clone()),
                Declaration::Taxonomy(_) => None,
            })
            .collect()
    }

    pub fn taxonomies(&self) -> Vec<TaxonomyConfig> {
        self.declarations
            .read()
            .iter()
            .filter_map(|d| match d {
                Declaration::Taxonomy(t) => Some(t.clone()),
                Declaration::ContentType(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ContentRegistry for RecordingRegistry {
    async fn register_content_type(&self, config: ContentTypeConfig) -> Result<()> {
        info!(slug = %config.slug, "content type declared");
        self.declarations
            .write()
            .push(Declaration::ContentType(config));
        Ok(())
    }

    async fn register_taxonomy(&self, config: TaxonomyConfig) -> Result<()> {
        info!(name = %config.name, target = %config.target_type, "taxonomy declared");
        self.declarations
            .write()
            .push(Declaration::Taxonomy(config));
        Ok(())
    }
}
