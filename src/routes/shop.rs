use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult, models::ShopProfile, response::ApiResponse, services::shop_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

#[utoipa::path(
    get,
    path = "/api/shop",
    responses(
        (status = 200, description = "Shop profile", body = ApiResponse<ShopProfile>)
    ),
    tag = "Shop"
)]
pub async fn get_profile(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ShopProfile>>> {
    Ok(Json(shop_service::get_profile(&state).await?))
}

#[utoipa::path(
    put,
    path = "/api/shop",
    request_body = ShopProfile,
    responses(
        (status = 200, description = "Shop profile saved", body = ApiResponse<ShopProfile>)
    ),
    tag = "Shop"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(payload): Json<ShopProfile>,
) -> AppResult<Json<ApiResponse<ShopProfile>>> {
    Ok(Json(shop_service::update_profile(&state, payload).await?))
}
