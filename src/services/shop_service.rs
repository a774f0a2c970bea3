use crate::{
    error::AppResult,
    models::ShopProfile,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::Document,
};

pub async fn get_profile(state: &AppState) -> AppResult<ApiResponse<ShopProfile>> {
    let workspace = state.workspace.lock().await;
    Ok(ApiResponse::success("Shop profile", workspace.shop.clone(), None))
}

/// Replaces the profile as a whole; omitted fields become empty.
pub async fn update_profile(
    state: &AppState,
    profile: ShopProfile,
) -> AppResult<ApiResponse<ShopProfile>> {
    let mut workspace = state.workspace.lock().await;
    let persisted = state.storage.save([Document::shop(&profile)]).await;
    workspace.shop = profile.clone();

    tracing::info!(name = %profile.name, "shop profile updated");
    Ok(ApiResponse::success(
        "Shop profile saved",
        profile,
        Some(Meta::persisted(persisted)),
    ))
}
