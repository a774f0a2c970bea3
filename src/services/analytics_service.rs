use chrono::Local;

use crate::{
    domain::analytics::{self, Dashboard},
    dto::products::ProductList,
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Revenue, recent sales and low stock, evaluated against the local clock.
pub async fn dashboard(state: &AppState) -> AppResult<ApiResponse<Dashboard>> {
    let workspace = state.workspace.lock().await;
    let data = analytics::dashboard(&workspace.catalog, &workspace.ledger, &Local::now());
    let meta = Meta::count(workspace.ledger.len());
    Ok(ApiResponse::success("Analytics", data, Some(meta)))
}

pub async fn low_stock(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let workspace = state.workspace.lock().await;
    let items = analytics::low_stock(&workspace.catalog);
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Low stock", ProductList { items }, Some(meta)))
}
