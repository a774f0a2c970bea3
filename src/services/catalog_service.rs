use crate::{
    domain::{Catalog, ProductDraft, ProductPatch, catalog::sample_products},
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::Document,
};

pub async fn list_products(
    state: &AppState,
    query: Option<String>,
) -> AppResult<ApiResponse<ProductList>> {
    let workspace = state.workspace.lock().await;
    let items: Vec<Product> = match query.as_deref() {
        Some(q) => workspace.catalog.search(q).into_iter().cloned().collect(),
        None => workspace.catalog.products().to_vec(),
    };
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let workspace = state.workspace.lock().await;
    let product = workspace.catalog.find(id).cloned().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let draft = ProductDraft::try_from(payload)?;

    let mut workspace = state.workspace.lock().await;
    let mut catalog = workspace.catalog.clone();
    let product = catalog.add(draft, state.ids.as_ref())?;

    let persisted = state.storage.save([Document::products(catalog.products())]).await;
    workspace.catalog = catalog;

    tracing::info!(product_id = %product.id, sku = %product.sku, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::persisted(persisted)),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let patch = ProductPatch::try_from(payload)?;

    let mut workspace = state.workspace.lock().await;
    let mut catalog = workspace.catalog.clone();
    let product = catalog.update(id, patch)?;

    let persisted = state.storage.save([Document::products(catalog.products())]).await;
    workspace.catalog = catalog;

    Ok(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::persisted(persisted)),
    ))
}

/// Removes a product. Callers must confirm; an unconfirmed request changes nothing.
pub async fn delete_product(
    state: &AppState,
    id: &str,
    confirmed: bool,
) -> AppResult<ApiResponse<Product>> {
    if !confirmed {
        return Err(AppError::BadRequest(
            "deleting a product requires confirm=true".into(),
        ));
    }

    let mut workspace = state.workspace.lock().await;
    let mut catalog = workspace.catalog.clone();
    let product = catalog.remove(id)?;

    let persisted = state.storage.save([Document::products(catalog.products())]).await;
    workspace.catalog = catalog;

    tracing::info!(product_id = %product.id, "product deleted");
    Ok(ApiResponse::success(
        "Deleted",
        product,
        Some(Meta::persisted(persisted)),
    ))
}

/// Seeds the starter catalog, but only into an empty one.
pub async fn load_sample_data(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let mut workspace = state.workspace.lock().await;
    if !workspace.catalog.is_empty() {
        return Err(AppError::BadRequest(
            "sample data can only be loaded into an empty catalog".into(),
        ));
    }

    let items = sample_products(state.ids.as_ref());
    let persisted = state.storage.save([Document::products(&items)]).await;
    workspace.catalog = Catalog::new(items.clone());

    tracing::info!(count = items.len(), "sample catalog loaded");
    let meta = Meta {
        total: Some(items.len()),
        persisted: Some(persisted),
    };
    Ok(ApiResponse::success("Sample data loaded", ProductList { items }, Some(meta)))
}
