use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::AppState;
use api_shared::{
    DeleteShopListRes, ErrorRes, ShopList, ShopListReq, ShopListSearchParams, TopicSearchRes,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/users/{user_id}/shoplists",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user's shop lists in creation order", body = [ShopList]),
        (status = 404, description = "User not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_shop_lists(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<String>,
) -> Result<Json<Vec<ShopList>>, ApiError> {
    Ok(Json(state.services.shop_lists.list(&user_id).await?))
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/shoplists",
    params(("user_id" = String, Path, description = "User id")),
    request_body = ShopListReq,
    responses(
        (status = 201, description = "Shop list created", body = ShopList),
        (status = 400, description = "Topic or an initial item is invalid", body = ErrorRes),
        (status = 404, description = "User not found", body = ErrorRes)
    )
)]
/// Create a shop list
///
/// Appends the list to the user's shop lists and returns it with its assigned id.
#[axum::debug_handler]
pub async fn create_shop_list(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<String>,
    JsonBody(req): JsonBody<ShopListReq>,
) -> Result<(StatusCode, Json<ShopList>), ApiError> {
    let list = state.services.shop_lists.create(&user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/shoplists/{list_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id")
    ),
    responses(
        (status = 200, description = "The shop list", body = ShopList),
        (status = 404, description = "User or shop list not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_shop_list(
    State(state): State<AppState>,
    PathParams((user_id, list_id)): PathParams<(String, String)>,
) -> Result<Json<ShopList>, ApiError> {
    Ok(Json(state.services.shop_lists.get(&user_id, &list_id).await?))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/shoplists/{list_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id")
    ),
    request_body = ShopListReq,
    responses(
        (status = 200, description = "Topic updated", body = ShopList),
        (status = 400, description = "Topic missing", body = ErrorRes),
        (status = 404, description = "User or shop list not found", body = ErrorRes)
    )
)]
/// Replace a shop list's topic. Items are left as they are.
#[axum::debug_handler]
pub async fn update_shop_list(
    State(state): State<AppState>,
    PathParams((user_id, list_id)): PathParams<(String, String)>,
    JsonBody(req): JsonBody<ShopListReq>,
) -> Result<Json<ShopList>, ApiError> {
    let list = state
        .services
        .shop_lists
        .update(&user_id, &list_id, &req)
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}/shoplists/{list_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id")
    ),
    responses(
        (status = 200, description = "Shop list deleted", body = DeleteShopListRes),
        (status = 404, description = "User or shop list not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_shop_list(
    State(state): State<AppState>,
    PathParams((user_id, list_id)): PathParams<(String, String)>,
) -> Result<Json<DeleteShopListRes>, ApiError> {
    Ok(Json(
        state.services.shop_lists.delete(&user_id, &list_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/shoplists/search",
    params(
        ("user_id" = String, Path, description = "User id"),
        ShopListSearchParams
    ),
    responses(
        (status = 200, description = "Matching shop lists of this user", body = [ShopList]),
        (status = 404, description = "User not found", body = ErrorRes)
    )
)]
/// Search one user's shop lists
///
/// All criteria are optional and combine with AND. `topic` is a case-insensitive substring;
/// `minItems`/`maxItems` are inclusive item-count bounds. Bounds that are not numbers are
/// ignored.
#[axum::debug_handler]
pub async fn search_shop_lists(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<String>,
    QueryParams(params): QueryParams<ShopListSearchParams>,
) -> Result<Json<Vec<ShopList>>, ApiError> {
    Ok(Json(
        state.services.shop_lists.search(&user_id, &params).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/users/shoplists/topics/{topic}",
    params(("topic" = String, Path, description = "Case-insensitive topic substring")),
    responses(
        (status = 200, description = "Matching shop lists across all users", body = TopicSearchRes)
    )
)]
#[axum::debug_handler]
pub async fn search_by_topic(
    State(state): State<AppState>,
    PathParams(topic): PathParams<String>,
) -> Result<Json<TopicSearchRes>, ApiError> {
    Ok(Json(state.services.shop_lists.search_by_topic(&topic).await?))
}
