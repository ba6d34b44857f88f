use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams};
use crate::AppState;
use api_shared::{DeleteItemRes, ErrorRes, ItemReq, ShopListItem};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/users/{user_id}/shoplists/{list_id}/items",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id")
    ),
    responses(
        (status = 200, description = "Items in insertion order", body = [ShopListItem]),
        (status = 404, description = "User or shop list not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_items(
    State(state): State<AppState>,
    PathParams((user_id, list_id)): PathParams<(String, String)>,
) -> Result<Json<Vec<ShopListItem>>, ApiError> {
    Ok(Json(state.services.items.list(&user_id, &list_id).await?))
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/shoplists/{list_id}/items",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id")
    ),
    request_body = ItemReq,
    responses(
        (status = 201, description = "Item appended", body = ShopListItem),
        (status = 400, description = "Name or price missing, or price invalid", body = ErrorRes),
        (status = 404, description = "User or shop list not found", body = ErrorRes)
    )
)]
/// Add an item
///
/// `price` may be a number or numeric text and must be 0 or greater.
#[axum::debug_handler]
pub async fn create_item(
    State(state): State<AppState>,
    PathParams((user_id, list_id)): PathParams<(String, String)>,
    JsonBody(req): JsonBody<ItemReq>,
) -> Result<(StatusCode, Json<ShopListItem>), ApiError> {
    let item = state
        .services
        .items
        .create(&user_id, &list_id, &req)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/shoplists/{list_id}/items/{item_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id"),
        ("item_id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "The item", body = ShopListItem),
        (status = 404, description = "User, shop list or item not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_item(
    State(state): State<AppState>,
    PathParams((user_id, list_id, item_id)): PathParams<(String, String, String)>,
) -> Result<Json<ShopListItem>, ApiError> {
    let item = state
        .services
        .items
        .get(&user_id, &list_id, &item_id)
        .await?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/shoplists/{list_id}/items/{item_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id"),
        ("item_id" = String, Path, description = "Item id")
    ),
    request_body = ItemReq,
    responses(
        (status = 200, description = "Item updated", body = ShopListItem),
        (status = 400, description = "Neither name nor price supplied, or price invalid", body = ErrorRes),
        (status = 404, description = "User, shop list or item not found", body = ErrorRes)
    )
)]
/// Partially update an item
///
/// Only the supplied fields change; at least one of `name` and `price` is required.
#[axum::debug_handler]
pub async fn update_item(
    State(state): State<AppState>,
    PathParams((user_id, list_id, item_id)): PathParams<(String, String, String)>,
    JsonBody(req): JsonBody<ItemReq>,
) -> Result<Json<ShopListItem>, ApiError> {
    let item = state
        .services
        .items
        .update(&user_id, &list_id, &item_id, &req)
        .await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}/shoplists/{list_id}/items/{item_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("list_id" = String, Path, description = "Shop list id"),
        ("item_id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item removed", body = DeleteItemRes),
        (status = 404, description = "User, shop list or item not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_item(
    State(state): State<AppState>,
    PathParams((user_id, list_id, item_id)): PathParams<(String, String, String)>,
) -> Result<Json<DeleteItemRes>, ApiError> {
    let res = state
        .services
        .items
        .delete(&user_id, &list_id, &item_id)
        .await?;
    Ok(Json(res))
}
