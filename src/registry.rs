//! Typed registration configs and the bootstrap registration pass.
//!
//! Everything the host registration engine is told about a content type or
//! taxonomy is an explicit struct with named fields; no loosely typed
//! key-value bags cross this boundary.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::definition::{Definition, TaxonomyMode};
use crate::host::ContentRegistry;
use crate::sanitize::capitalize_first;
use crate::store::DefinitionStore;

/// The host's built-in hierarchical taxonomy.
pub const SHARED_CATEGORY: &str = "category";
/// The host's built-in flat taxonomy.
pub const SHARED_TAG: &str = "tag";

/// Standard label set derived from the singular and plural labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSet {
    pub name: String,
    pub singular_name: String,
    pub add_new_item: String,
    pub edit_item: String,
    pub view_item: String,
    pub all_items: String,
    pub search_items: String,
}

impl LabelSet {
    pub fn derive(singular: &str, plural: &str) -> Self {
        Self {
            name: plural.to_string(),
            singular_name: singular.to_string(),
            add_new_item: format!("Add New {singular}"),
            edit_item: format!("Edit {singular}"),
            view_item: format!("View {singular}"),
            all_items: format!("All {plural}"),
            search_items: format!("Search {plural}"),
        }
    }
}

/// Record fields a declared content type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportedField {
    Title,
    Body,
    FeaturedImage,
}

/// Full content type declaration passed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeConfig {
    pub slug: String,
    pub labels: LabelSet,
    pub public: bool,
    pub has_archive: bool,
    pub supports: Vec<SupportedField>,
    pub show_in_rest: bool,
    /// Pre-existing taxonomies to attach. New per-type taxonomies are
    /// declared separately via [`TaxonomyConfig`].
    pub taxonomies: Vec<String>,
}

impl ContentTypeConfig {
    /// Build the declaration for a stored definition.
    pub fn from_definition(slug: &str, definition: &Definition) -> Self {
        let taxonomies = match definition.taxonomy_mode {
            TaxonomyMode::Shared => vec![SHARED_CATEGORY.to_string(), SHARED_TAG.to_string()],
            TaxonomyMode::None | TaxonomyMode::Custom => Vec::new(),
        };
        Self {
            slug: slug.to_string(),
            labels: LabelSet::derive(&definition.singular_label, &definition.plural_label),
            public: true,
            has_archive: true,
            supports: vec![
                SupportedField::Title,
                SupportedField::Body,
                SupportedField::FeaturedImage,
            ],
            show_in_rest: true,
            taxonomies,
        }
    }
}

/// Full taxonomy declaration passed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyConfig {
    pub name: String,
    pub target_type: String,
    pub label: String,
    pub hierarchical: bool,
    pub show_ui: bool,
    pub show_in_rest: bool,
    pub rewrite_slug: String,
}

impl TaxonomyConfig {
    /// The per-type category taxonomy declared for `custom` mode.
    pub fn custom_category(slug: &str, singular: &str) -> Self {
        let name = derive_taxonomy_names(slug).category;
        Self {
            label: format!("{} Categories", capitalize_first(singular)),
            target_type: slug.to_string(),
            hierarchical: true,
            show_ui: true,
            show_in_rest: true,
            rewrite_slug: name.clone(),
            name,
        }
    }

    /// The per-type tag taxonomy declared for `custom` mode.
    pub fn custom_tag(slug: &str, singular: &str) -> Self {
        let name = derive_taxonomy_names(slug).tag;
        Self {
            label: format!("{} Tags", capitalize_first(singular)),
            target_type: slug.to_string(),
            hierarchical: false,
            show_ui: true,
            show_in_rest: true,
            rewrite_slug: name.clone(),
            name,
        }
    }
}

/// Names of the two per-type taxonomies derived from a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyNames {
    pub category: String,
    pub tag: String,
}

/// Derive the per-type taxonomy names for `custom` mode.
pub fn derive_taxonomy_names(slug: &str) -> TaxonomyNames {
    TaxonomyNames {
        category: format!("{slug}_category"),
        tag: format!("{slug}_tag"),
    }
}

/// Replay every stored definition into the host registry.
///
/// Runs once per process bootstrap, before any content-type-dependent
/// request is served. Idempotent from this side; the host reconciles
/// repeated declarations. No validation happens here beyond what the
/// store already guarantees.
pub async fn register_all(store: &DefinitionStore, registry: &dyn ContentRegistry) -> Result<()> {
    let definitions = store.load().await;
    for (slug, definition) in &definitions {
        registry
            .register_content_type(ContentTypeConfig::from_definition(slug, definition))
            .await?;

        if definition.taxonomy_mode == TaxonomyMode::Custom {
            registry
                .register_taxonomy(TaxonomyConfig::custom_category(
                    slug,
                    &definition.singular_label,
                ))
                .await?;
            registry
                .register_taxonomy(TaxonomyConfig::custom_tag(slug, &definition.singular_label))
                .await?;
        }
    }
    info!(count = definitions.len(), "content types registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_set_derivation() {
        let labels = LabelSet::derive("Event", "Events");
        assert_eq!(labels.name, "Events");
        assert_eq!(labels.singular_name, "Event");
        assert_eq!(labels.add_new_item, "Add New Event");
        assert_eq!(labels.edit_item, "Edit Event");
        assert_eq!(labels.view_item, "View Event");
        assert_eq!(labels.all_items, "All Events");
        assert_eq!(labels.search_items, "Search Events");
    }

    #[test]
    fn taxonomy_names_follow_slug() {
        let names = derive_taxonomy_names("recipe-box");
        assert_eq!(names.category, "recipe-box_category");
        assert_eq!(names.tag, "recipe-box_tag");
    }

    #[test]
    fn shared_mode_attaches_builtins() {
        let definition = Definition {
            singular_label: "Event".to_string(),
            plural_label: "Events".to_string(),
            taxonomy_mode: TaxonomyMode::Shared,
        };
        let config = ContentTypeConfig::from_definition("event", &definition);
        assert_eq!(config.taxonomies, [SHARED_CATEGORY, SHARED_TAG]);
        assert!(config.public);
        assert!(config.has_archive);
        assert!(config.show_in_rest);
    }

    #[test]
    fn custom_mode_attaches_no_builtins() {
        let definition = Definition {
            singular_label: "Recipe".to_string(),
            plural_label: "Recipes".to_string(),
            taxonomy_mode: TaxonomyMode::Custom,
        };
        let config = ContentTypeConfig::from_definition("recipe-box", &definition);
        assert!(config.taxonomies.is_empty());
    }

    #[test]
    fn custom_taxonomy_configs() {
        let category = TaxonomyConfig::custom_category("recipe-box", "recipe");
        assert_eq!(category.name, "recipe-box_category");
        assert_eq!(category.label, "Recipe Categories");
        assert_eq!(category.rewrite_slug, "recipe-box_category");
        assert!(category.hierarchical);

        let tag = TaxonomyConfig::custom_tag("recipe-box", "recipe");
        assert_eq!(tag.name, "recipe-box_tag");
        assert_eq!(tag.label, "Recipe Tags");
        assert_eq!(tag.rewrite_slug, "recipe-box_tag");
        assert!(!tag.hierarchical);
    }
}
