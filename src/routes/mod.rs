//! HTTP routes.

pub mod admin;

use axum::Router;

use crate::state::AppState;

/// Build the application router.
pub fn router() -> Router<AppState> {
    admin::router()
}
