use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{patch, post},
};

use crate::{
    dto::carts::{AddCartItemRequest, UpdateCartItemRequest, UpdateCartRequest},
    error::AppResult,
    middleware::validate::ValidatedJson,
    models::{Cart, CartDetails},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route("/{id}", patch(update_cart).get(get_cart))
        .route("/{id}/items", post(add_item))
        .route("/{id}/items/{item_id}", patch(update_item))
}

#[utoipa::path(
    post,
    path = "/api/v1/carts",
    responses(
        (status = 201, description = "Empty cart created", body = ApiResponse<CartDetails>)
    ),
    tag = "Carts"
)]
pub async fn create_cart(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartDetails>>)> {
    let response = cart_service::create_cart(&state).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/carts/{id}",
    params(
        ("id" = i32, Path, description = "Cart ID")
    ),
    request_body = UpdateCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = ApiResponse<Cart>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn update_cart(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCartRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let response = cart_service::update_cart(&state, id, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/carts/{id}",
    params(
        ("id" = i32, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Cart with items, variants and products", body = ApiResponse<CartDetails>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<CartDetails>>> {
    let response = cart_service::get_cart(&state, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/carts/{id}/items",
    params(
        ("id" = i32, Path, description = "Cart ID")
    ),
    request_body = AddCartItemRequest,
    responses(
        (status = 204, description = "Item added"),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Cart or product variant not found"),
    ),
    tag = "Carts"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AddCartItemRequest>,
) -> AppResult<StatusCode> {
    cart_service::add_item(&state, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/carts/{id}/items/{item_id}",
    params(
        ("id" = i32, Path, description = "Cart ID"),
        ("item_id" = i32, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Cart after the item update", body = ApiResponse<CartDetails>),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Cart or cart item not found"),
    ),
    tag = "Carts"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartDetails>>> {
    let response = cart_service::update_item(&state, id, item_id, payload).await?;
    Ok(Json(response))
}
