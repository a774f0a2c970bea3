use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post, put},
};

use crate::{
    domain::invoice::Invoice,
    dto::billing::{
        AddToCartRequest, BillingQueryRequest, BillingResults, CartView, ChangeQuantityRequest,
        CheckoutReceipt,
    },
    error::AppResult,
    response::ApiResponse,
    services::billing_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(billing_products))
        .route("/query", put(set_query))
        .route("/cart", get(cart))
        .route("/cart/items", post(add_to_cart))
        .route(
            "/cart/items/{id}",
            patch(change_quantity).delete(remove_from_cart),
        )
        .route("/checkout", post(checkout))
        .route("/invoice", get(invoice))
}

#[utoipa::path(
    get,
    path = "/api/billing/products",
    responses(
        (status = 200, description = "Products matching the billing search", body = ApiResponse<BillingResults>)
    ),
    tag = "Billing"
)]
pub async fn billing_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BillingResults>>> {
    Ok(Json(billing_service::results(&state).await?))
}

#[utoipa::path(
    put,
    path = "/api/billing/query",
    request_body = BillingQueryRequest,
    responses(
        (status = 200, description = "Search filter updated", body = ApiResponse<BillingResults>)
    ),
    tag = "Billing"
)]
pub async fn set_query(
    State(state): State<AppState>,
    Json(payload): Json<BillingQueryRequest>,
) -> AppResult<Json<ApiResponse<BillingResults>>> {
    Ok(Json(billing_service::set_query(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/billing/cart",
    responses(
        (status = 200, description = "Current cart", body = ApiResponse<CartView>)
    ),
    tag = "Billing"
)]
pub async fn cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(billing_service::cart(&state).await?))
}

#[utoipa::path(
    post,
    path = "/api/billing/cart/items",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Product added or quantity increased", body = ApiResponse<CartView>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Billing"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(billing_service::add_to_cart(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/billing/cart/items/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ChangeQuantityRequest,
    responses(
        (status = 200, description = "Quantity changed", body = ApiResponse<CartView>),
        (status = 404, description = "Product not in cart"),
    ),
    tag = "Billing"
)]
pub async fn change_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChangeQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        billing_service::change_quantity(&state, &id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/billing/cart/items/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartView>),
        (status = 404, description = "Product not in cart"),
    ),
    tag = "Billing"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(billing_service::remove_from_cart(&state, &id).await?))
}

#[utoipa::path(
    post,
    path = "/api/billing/checkout",
    responses(
        (status = 200, description = "Sale recorded", body = ApiResponse<CheckoutReceipt>),
        (status = 400, description = "Cart is empty"),
        (status = 409, description = "Cart references a product no longer in the catalog"),
    ),
    tag = "Billing"
)]
pub async fn checkout(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CheckoutReceipt>>> {
    Ok(Json(billing_service::checkout(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/billing/invoice",
    responses(
        (status = 200, description = "Invoice preview for the current cart", body = ApiResponse<Invoice>)
    ),
    tag = "Billing"
)]
pub async fn invoice(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Invoice>>> {
    Ok(Json(billing_service::invoice(&state).await?))
}
