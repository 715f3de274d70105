//! User handlers.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    User, UserDraft, NO_USER_FOUND, UNABLE_TO_DELETE_USER, USER_ID_INVALID, USER_ID_REQUIRED,
    USER_NOT_FOUND, USER_NOT_UPDATED, USER_PAYLOAD_INVALID, USER_REQUIRED,
};

use crate::state::AppState;

/// Query string for `DELETE /users`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteUserParams {
    /// ID of the user to delete
    pub id: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(add_user)
                .put(update_user)
                .delete(delete_user),
        )
        .route("/:id", get(get_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<User>),
        (status = 404, description = "No user found")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.get_all_users().await?;
    if users.is_empty() {
        return Err(AppError::not_found(NO_USER_FOUND));
    }
    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Missing or malformed ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let id = parse_id(&id)?;

    let user = state
        .user_service
        .get_user_by_id(id)
        .await?
        .ok_or_not_found(USER_NOT_FOUND)?;

    Ok(Json(user))
}

/// Create a user. Any `id` in the body is ignored.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserDraft,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Missing or malformed body, or empty required field"),
        (status = 409, description = "Email already exist")
    )
)]
pub async fn add_user(State(state): State<AppState>, body: Bytes) -> AppResult<Json<User>> {
    let user = state.user_service.add_user(parse_draft(&body)?).await?;

    Ok(Json(user))
}

/// Merge-update a user. Empty or absent fields keep their stored value.
#[utoipa::path(
    put,
    path = "/users",
    tag = "Users",
    request_body = UserDraft,
    responses(
        (status = 200, description = "User updated", body = bool),
        (status = 400, description = "Missing or malformed body, or missing ID"),
        (status = 404, description = "User either not found or unable to update"),
        (status = 409, description = "Email already exist")
    )
)]
pub async fn update_user(State(state): State<AppState>, body: Bytes) -> AppResult<Json<bool>> {
    let Some(draft) = parse_draft(&body)? else {
        return Err(AppError::bad_request(USER_REQUIRED));
    };
    if draft.id.map_or(true, |id| id.is_nil()) {
        return Err(AppError::bad_request(USER_ID_REQUIRED));
    }

    if !state.user_service.update_user(draft).await? {
        return Err(AppError::not_found(USER_NOT_UPDATED));
    }

    Ok(Json(true))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users",
    tag = "Users",
    params(DeleteUserParams),
    responses(
        (status = 200, description = "User deleted", body = bool),
        (status = 400, description = "Missing or malformed ID"),
        (status = 500, description = "Unable to delete this user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(params): Query<DeleteUserParams>,
) -> AppResult<Json<bool>> {
    let id = parse_id(params.id.as_deref().unwrap_or_default())?;

    if !state.user_service.delete_user(id).await? {
        return Err(AppError::application(UNABLE_TO_DELETE_USER));
    }

    Ok(Json(true))
}

/// Decode a JSON user body. An empty body counts as absent.
fn parse_draft(body: &[u8]) -> AppResult<Option<UserDraft>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Json::<UserDraft>::from_bytes(body)
        .map(|Json(draft)| Some(draft))
        .map_err(|e| {
            tracing::debug!(reason = %e.body_text(), "Rejected user payload");
            AppError::bad_request(USER_PAYLOAD_INVALID)
        })
}

/// Parse a user ID, rejecting blank input before format errors.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::bad_request(USER_ID_REQUIRED));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(USER_ID_INVALID))
}
