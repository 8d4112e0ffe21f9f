//! Content type definitions as entered by the administrator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How taxonomies attach to a content type.
///
/// `Shared` attaches the host's built-in category and tag taxonomies.
/// `Custom` declares two new taxonomies scoped to this type alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyMode {
    #[default]
    None,
    Shared,
    Custom,
}

impl TaxonomyMode {
    /// Parse a submitted value. Anything outside the closed set coerces to
    /// `None` rather than being rejected.
    pub fn parse(value: &str) -> Self {
        match value {
            "shared" => Self::Shared,
            "custom" => Self::Custom,
            _ => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Shared => "shared",
            Self::Custom => "custom",
        }
    }
}

/// One stored definition. The slug is the key of the surrounding map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub singular_label: String,
    pub plural_label: String,
    pub taxonomy_mode: TaxonomyMode,
}

/// Slug-keyed definitions. Insertion order is preserved so the admin list
/// renders in a stable order.
pub type DefinitionMap = IndexMap<String, Definition>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_closed_set() {
        assert_eq!(TaxonomyMode::parse("none"), TaxonomyMode::None);
        assert_eq!(TaxonomyMode::parse("shared"), TaxonomyMode::Shared);
        assert_eq!(TaxonomyMode::parse("custom"), TaxonomyMode::Custom);
    }

    #[test]
    fn parse_coerces_unknown_values_to_none() {
        assert_eq!(TaxonomyMode::parse("bogus"), TaxonomyMode::None);
        assert_eq!(TaxonomyMode::parse(""), TaxonomyMode::None);
        assert_eq!(TaxonomyMode::parse("Shared"), TaxonomyMode::None);
    }

    #[test]
    fn definition_serde_round_trip() {
        let definition = Definition {
            singular_label: "Event".to_string(),
            plural_label: "Events".to_string(),
            taxonomy_mode: TaxonomyMode::Shared,
        };
        let json = serde_json::to_string(&definition).unwrap_or_default();
        assert!(json.contains("\"taxonomy_mode\":\"shared\""));
        let back: Definition = match serde_json::from_str(&json) {
            Ok(d) => d,
            Err(e) => panic!("deserialize failed: {e}"),
        };
        assert_eq!(back, definition);
    }
}
