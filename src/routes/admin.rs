//! Admin routes for content type definitions.
//!
//! One page: a create/edit form above the list of stored definitions.
//! Saves arrive as a POST, deletes as a tokenized GET link, and both
//! redirect back to the page.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tower_sessions::Session;

use crate::csrf::{generate_csrf_token, verify_csrf_token};
use crate::definition::{Definition, TaxonomyMode};
use crate::error::AppError;
use crate::host::MANAGE_TYPES;
use crate::sanitize::{sanitize_key, sanitize_text_field, slugify};
use crate::state::{ADMIN_TEMPLATE, AppState};

/// Path of the admin page; mutating actions redirect back here.
pub const ADMIN_PATH: &str = "/admin/structure/cpt";

/// Token action for the save form.
pub const SAVE_ACTION: &str = "cpt_save";

/// Token action for an edit link, scoped to one slug.
pub fn edit_action(slug: &str) -> String {
    format!("cpt_edit_{slug}")
}

/// Token action for a delete link, scoped to one slug.
pub fn delete_action(slug: &str) -> String {
    format!("cpt_delete_{slug}")
}

/// Query parameters of the admin page.
///
/// `delete` turns the request into the delete transition; otherwise `edit`
/// optionally selects the definition to pre-fill the form with.
#[derive(Debug, Default, Deserialize)]
pub struct AdminPageQuery {
    pub edit: Option<String>,
    pub delete: Option<String>,
    #[serde(rename = "_token")]
    pub token: Option<String>,
}

/// Save form fields.
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    #[serde(rename = "_token")]
    pub token: String,
    pub post_type: String,
    pub singular_label: String,
    pub plural_label: String,
    #[serde(default)]
    pub tax_type: String,
}

/// Render the admin page, or apply a delete link.
///
/// GET /admin/structure/cpt
pub async fn admin_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AdminPageQuery>,
) -> Response {
    if let Some(slug) = &query.delete {
        return handle_delete(&state, &session, slug, query.token.as_deref()).await;
    }

    if !state.access().caller_can(&session, MANAGE_TYPES).await {
        return (StatusCode::FORBIDDEN, Html("Access denied")).into_response();
    }

    render_page(&state, &session, query.edit.as_deref()).await
}

/// Apply a create/update submission.
///
/// POST /admin/structure/cpt
pub async fn save_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SaveForm>,
) -> Response {
    match verify_csrf_token(&session, &form.token, SAVE_ACTION).await {
        Ok(true) => {}
        _ => return (StatusCode::FORBIDDEN, Html("Invalid form token")).into_response(),
    }

    if !state.access().caller_can(&session, MANAGE_TYPES).await {
        // The host decides what an unauthorized caller sees; nothing is
        // written and no page is produced here.
        return StatusCode::FORBIDDEN.into_response();
    }

    let slug = slugify(&form.post_type);
    if slug.is_empty() {
        return AppError::BadRequest("post type slug is required".to_string()).into_response();
    }

    let definition = Definition {
        singular_label: sanitize_text_field(&form.singular_label),
        plural_label: sanitize_text_field(&form.plural_label),
        taxonomy_mode: TaxonomyMode::parse(&form.tax_type),
    };

    let mut definitions = state.definitions().load().await;
    // Unconditional upsert: editing and creating over an existing slug are
    // indistinguishable, last write wins.
    definitions.insert(slug.clone(), definition);

    if let Err(e) = state.definitions().save(&definitions).await {
        tracing::error!(error = %e, "failed to save definitions");
        return AppError::Storage(e).into_response();
    }

    tracing::info!(slug = %slug, "content type definition saved");
    Redirect::to(ADMIN_PATH).into_response()
}

/// Delete transition: token is scoped to exactly this slug.
async fn handle_delete(
    state: &AppState,
    session: &Session,
    raw_slug: &str,
    token: Option<&str>,
) -> Response {
    let slug = sanitize_key(raw_slug);
    let verified = match token {
        Some(token) => verify_csrf_token(session, token, &delete_action(&slug)).await,
        None => Ok(false),
    };
    match verified {
        Ok(true) => {}
        _ => return (StatusCode::FORBIDDEN, Html("Invalid form token")).into_response(),
    }

    if !state.access().caller_can(session, MANAGE_TYPES).await {
        return StatusCode::FORBIDDEN.into_response();
    }

    let mut definitions = state.definitions().load().await;
    // A slug that is not stored is a no-op, not an error.
    if definitions.shift_remove(&slug).is_some() {
        if let Err(e) = state.definitions().save(&definitions).await {
            tracing::error!(error = %e, "failed to save definitions");
            return AppError::Storage(e).into_response();
        }
        tracing::info!(slug = %slug, "content type definition deleted");
    }

    Redirect::to(ADMIN_PATH).into_response()
}

/// Pure read + render: the form (pre-filled when editing) and the list of
/// stored definitions with tokenized edit/delete links.
async fn render_page(state: &AppState, session: &Session, edit: Option<&str>) -> Response {
    let definitions = state.definitions().load().await;

    let edit_slug = edit
        .map(sanitize_key)
        .filter(|slug| definitions.contains_key(slug));
    let edit_values = edit_slug.as_deref().and_then(|slug| definitions.get(slug));

    let mut rows = Vec::with_capacity(definitions.len());
    for (slug, definition) in &definitions {
        let edit_token = generate_csrf_token(session, &edit_action(slug))
            .await
            .unwrap_or_default();
        let delete_token = generate_csrf_token(session, &delete_action(slug))
            .await
            .unwrap_or_default();
        let encoded = urlencoding::encode(slug);
        rows.push(serde_json::json!({
            "slug": slug,
            "plural_label": definition.plural_label,
            "taxonomy_mode": definition.taxonomy_mode.as_str(),
            "edit_url": format!("{ADMIN_PATH}?edit={encoded}&_token={edit_token}"),
            "delete_url": format!("{ADMIN_PATH}?delete={encoded}&_token={delete_token}"),
        }));
    }

    // Minted last so list rendering can never prune it from the session.
    let save_token = generate_csrf_token(session, SAVE_ACTION)
        .await
        .unwrap_or_default();

    let mut context = tera::Context::new();
    context.insert("action", ADMIN_PATH);
    context.insert("csrf_token", &save_token);
    context.insert("editing", &edit_slug.is_some());
    context.insert("edit_slug", &edit_slug.unwrap_or_default());
    context.insert(
        "values",
        &serde_json::json!({
            "singular_label": edit_values.map(|d| d.singular_label.as_str()).unwrap_or(""),
            "plural_label": edit_values.map(|d| d.plural_label.as_str()).unwrap_or(""),
            "taxonomy_mode": edit_values.map(|d| d.taxonomy_mode.as_str()).unwrap_or("none"),
        }),
    );
    context.insert("rows", &rows);

    match state.theme().render(ADMIN_TEMPLATE, &context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render admin template");
            AppError::Storage(e.into()).into_response()
        }
    }
}

/// Build the admin router.
pub fn router() -> Router<AppState> {
    Router::new().route(ADMIN_PATH, get(admin_page).post(save_submit))
}
