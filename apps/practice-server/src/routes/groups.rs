//! Group management endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::groups::rename_group;
use crate::AppState;

/// PUT /api/groups/{name}
pub async fn rename(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(name): Path<String>,
    Json(payload): Json<RenameGroupRequest>,
) -> Result<Json<RenameGroupResponse>> {
    let response = rename_group(state.api.as_ref(), &auth.token, &name, &payload.new_name).await?;
    Ok(Json(response))
}
