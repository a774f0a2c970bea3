use axum::{Json, Router, extract::State, routing::get};

use crate::{
    domain::analytics::Dashboard,
    dto::products::ProductList,
    error::AppResult,
    response::ApiResponse,
    services::analytics_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/low-stock", get(low_stock))
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Revenue figures, recent sales and low stock", body = ApiResponse<Dashboard>)
    ),
    tag = "Analytics"
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Dashboard>>> {
    Ok(Json(analytics_service::dashboard(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/analytics/low-stock",
    responses(
        (status = 200, description = "Products at or below their threshold", body = ApiResponse<ProductList>)
    ),
    tag = "Analytics"
)]
pub async fn low_stock(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(analytics_service::low_stock(&state).await?))
}
