use axum::Router;

use crate::state::AppState;

pub mod analytics;
pub mod backup;
pub mod billing;
pub mod doc;
pub mod health;
pub mod products;
pub mod shop;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/billing", billing::router())
        .nest("/analytics", analytics::router())
        .nest("/shop", shop::router())
        .nest("/backup", backup::router())
}
