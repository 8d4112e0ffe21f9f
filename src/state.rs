//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::host::{AccessControl, ConfigStorage};
use crate::store::DefinitionStore;

/// Template name for the admin page.
pub const ADMIN_TEMPLATE: &str = "admin/cpt-builder.html";

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Definition store over the host's config storage.
    definitions: DefinitionStore,

    /// Capability checks for the current caller.
    access: Arc<dyn AccessControl>,

    /// Template engine with the embedded admin template.
    theme: tera::Tera,
}

impl AppState {
    pub fn new(storage: Arc<dyn ConfigStorage>, access: Arc<dyn AccessControl>) -> Result<Self> {
        let mut theme = tera::Tera::default();
        theme
            .add_raw_template(
                ADMIN_TEMPLATE,
                include_str!("../templates/admin/cpt-builder.html"),
            )
            .context("failed to load admin template")?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                definitions: DefinitionStore::new(storage),
                access,
                theme,
            }),
        })
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.inner.definitions
    }

    pub fn access(&self) -> &dyn AccessControl {
        self.inner.access.as_ref()
    }

    pub fn theme(&self) -> &tera::Tera {
        &self.inner.theme
    }
}
