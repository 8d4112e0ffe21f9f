//! Custom content type builder.
//!
//! Lets an administrator define content types (slug, singular/plural label,
//! taxonomy mode) through an admin form, persists the definitions through a
//! host configuration-storage seam, and replays them into the host content
//! registry on every process bootstrap so the types become usable.

pub mod config;
pub mod csrf;
pub mod definition;
pub mod error;
pub mod host;
pub mod registry;
pub mod routes;
pub mod sanitize;
pub mod state;
pub mod store;
