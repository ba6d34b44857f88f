use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams};
use crate::AppState;
use api_shared::{DeleteManyRes, DeleteUserRes, ErrorRes, User, UserReq};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users in creation order", body = [User]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.services.users.list().await?))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user with its shop lists", body = User),
        (status = 404, description = "User not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.services.users.get(&user_id).await?))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserReq,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Username missing", body = ErrorRes),
        (status = 409, description = "Username already taken", body = ErrorRes)
    )
)]
/// Create a user
///
/// Usernames are unique. The uniqueness check and the insert are separate store calls, so two
/// concurrent requests for the same name can both succeed.
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UserReq>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.services.users.create(&req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    request_body = UserReq,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Username missing", body = ErrorRes),
        (status = 404, description = "User not found", body = ErrorRes),
        (status = 409, description = "Username already taken", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<String>,
    JsonBody(req): JsonBody<UserReq>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.services.users.update(&user_id, &req).await?))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserRes),
        (status = 404, description = "User not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<String>,
) -> Result<Json<DeleteUserRes>, ApiError> {
    Ok(Json(state.services.users.delete(&user_id).await?))
}

#[utoipa::path(
    delete,
    path = "/users",
    responses(
        (status = 200, description = "All users deleted", body = DeleteManyRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_all_users(
    State(state): State<AppState>,
) -> Result<Json<DeleteManyRes>, ApiError> {
    Ok(Json(state.services.users.delete_all().await?))
}
