//! Definition store: a thin wrapper over host key-value persistence.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::definition::DefinitionMap;
use crate::host::ConfigStorage;

/// Config key the definition mapping is stored under.
const STORE_KEY: &str = "cpt_builder.types";

/// Slug-keyed definition storage.
///
/// Reads never fail: a missing or unreadable record is treated as an empty
/// mapping. Writes replace the whole mapping in a single host call, so
/// concurrent editors race as last-write-wins.
#[derive(Clone)]
pub struct DefinitionStore {
    storage: Arc<dyn ConfigStorage>,
}

impl DefinitionStore {
    pub fn new(storage: Arc<dyn ConfigStorage>) -> Self {
        Self { storage }
    }

    /// Load the current mapping, empty if never initialized.
    pub async fn load(&self) -> DefinitionMap {
        match self.storage.get(STORE_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(map) => map,
                Err(e) => {
                    warn!(error = %e, "stored definitions are unreadable, treating as empty");
                    DefinitionMap::new()
                }
            },
            Ok(None) => DefinitionMap::new(),
            Err(e) => {
                warn!(error = %e, "failed to read definition store, treating as empty");
                DefinitionMap::new()
            }
        }
    }

    /// Replace the stored mapping. Host persistence failures propagate.
    pub async fn save(&self, definitions: &DefinitionMap) -> Result<()> {
        let value = serde_json::to_value(definitions).context("failed to serialize definitions")?;
        self.storage.set(STORE_KEY, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{Definition, TaxonomyMode};
    use crate::host::MemoryConfigStorage;

    fn store() -> DefinitionStore {
        DefinitionStore::new(Arc::new(MemoryConfigStorage::new()))
    }

    #[tokio::test]
    async fn load_uninitialized_is_empty() {
        assert!(store().load().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = store();
        let mut definitions = DefinitionMap::new();
        definitions.insert(
            "event".to_string(),
            Definition {
                singular_label: "Event".to_string(),
                plural_label: "Events".to_string(),
                taxonomy_mode: TaxonomyMode::Shared,
            },
        );
        definitions.insert(
            "recipe-box".to_string(),
            Definition {
                singular_label: "Recipe".to_string(),
                plural_label: "Recipes".to_string(),
                taxonomy_mode: TaxonomyMode::Custom,
            },
        );

        assert!(store.save(&definitions).await.is_ok());
        let loaded = store.load().await;
        assert_eq!(loaded, definitions);
        // Insertion order survives the round trip.
        let keys: Vec<&String> = loaded.keys().collect();
        assert_eq!(keys, ["event", "recipe-box"]);
    }

    #[tokio::test]
    async fn unreadable_record_reads_as_empty() {
        let storage = Arc::new(MemoryConfigStorage::new());
        let _ = storage.set(STORE_KEY, serde_json::json!("garbage")).await;
        let store = DefinitionStore::new(storage);
        assert!(store.load().await.is_empty());
    }
}
