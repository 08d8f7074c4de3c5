use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use oms_core::entities::Profile;
use oms_core::permissions::{can_edit_profile, can_view_profile};
use oms_core::validation::validate_username;
use oms_db::repos::profiles::NewProfile;
use oms_db::updates::profile::ProfileUpdate;

use crate::error::{PageError, StoreResultExt};
use crate::session::Viewer;
use crate::state::AppState;

const HOME_PATH: &str = "/dashboard";
const USERNAME_TAKEN: &str = "Username is already taken. Please choose another one.";

#[derive(Debug, Serialize)]
pub struct UsersView {
    pub users: Vec<Profile>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub profile: Profile,
    pub can_edit: bool,
    pub can_manage: bool,
}

/// `GET /dashboard/users`
pub async fn list(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> Result<Json<UsersView>, PageError> {
    if !viewer.user_role.can_manage_users() {
        return Err(PageError::redirect(HOME_PATH));
    }
    let users = state.service.list_profiles().await?;
    Ok(Json(UsersView {
        total_count: users.len(),
        users,
    }))
}

/// `POST /dashboard/users`
pub async fn create(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Json(form): Json<NewProfile>,
) -> Result<Json<Profile>, PageError> {
    if !viewer.user_role.can_manage_users() {
        return Err(PageError::Forbidden);
    }
    let profile = state.service.create_profile(&form).await?;
    tracing::info!(by = %viewer.id, user_id = %profile.id, "user invited");
    Ok(Json(profile))
}

/// `GET /dashboard/users/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<String>,
) -> Result<Json<UserView>, PageError> {
    if !can_view_profile(&viewer, &id) {
        return Err(PageError::redirect(HOME_PATH));
    }
    let profile = state
        .service
        .get_profile(&id)
        .await
        .or_not_found("User not found")?;
    Ok(Json(UserView {
        can_edit: can_edit_profile(&viewer, &id),
        can_manage: viewer.user_role.can_manage_users(),
        profile,
    }))
}

/// `POST /dashboard/users/{id}`
pub async fn update(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, PageError> {
    if !can_edit_profile(&viewer, &id) {
        return Err(PageError::Forbidden);
    }
    let touches_access = update.user_role.is_some() || update.user_status.is_some();
    if touches_access && !viewer.user_role.can_manage_users() {
        return Err(PageError::Forbidden);
    }
    if let Some(username) = &update.username {
        let username = username.as_deref().unwrap_or_default();
        validate_username(username)?;
        if state.service.username_taken(username.trim(), &id).await? {
            return Err(PageError::BadRequest(USERNAME_TAKEN.into()));
        }
    }
    let profile = state
        .service
        .update_profile(&id, &update)
        .await
        .or_not_found("User not found")?;
    Ok(Json(profile))
}
