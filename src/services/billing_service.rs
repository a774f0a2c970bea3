use chrono::Utc;

use crate::{
    domain::{
        cart::AddOutcome,
        checkout::checkout as run_checkout,
        invoice::{self, Invoice},
        money::format_currency,
    },
    dto::billing::{
        AddToCartRequest, BillingQueryRequest, BillingResults, CartView, ChangeQuantityRequest,
        CheckoutReceipt,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
    storage::Document,
};

pub async fn results(state: &AppState) -> AppResult<ApiResponse<BillingResults>> {
    let workspace = state.workspace.lock().await;
    let items: Vec<_> = workspace
        .billing
        .results(&workspace.catalog)
        .into_iter()
        .cloned()
        .collect();
    let meta = Meta::count(items.len());
    let data = BillingResults {
        query: workspace.billing.query().to_string(),
        items,
    };
    Ok(ApiResponse::success("Billing products", data, Some(meta)))
}

pub async fn set_query(
    state: &AppState,
    payload: BillingQueryRequest,
) -> AppResult<ApiResponse<BillingResults>> {
    state.workspace.lock().await.billing.set_query(payload.query);
    results(state).await
}

pub async fn cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let workspace = state.workspace.lock().await;
    let view = CartView::from(&workspace.billing.cart);
    let meta = Meta::count(view.lines.len());
    Ok(ApiResponse::success("Cart", view, Some(meta)))
}

pub async fn add_to_cart(
    state: &AppState,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let mut workspace = state.workspace.lock().await;
    let product = workspace
        .catalog
        .find(&payload.product_id)
        .cloned()
        .ok_or(AppError::NotFound)?;

    let message = match workspace.billing.cart.add(&product)? {
        AddOutcome::Added => "Added to cart",
        AddOutcome::Incremented => "Quantity increased",
        AddOutcome::AtStockLimit => {
            tracing::debug!(product_id = %product.id, stock = product.stock, "cart at stock limit");
            "Quantity already at available stock"
        }
    };

    let view = CartView::from(&workspace.billing.cart);
    let meta = Meta::count(view.lines.len());
    Ok(ApiResponse::success(message, view, Some(meta)))
}

pub async fn change_quantity(
    state: &AppState,
    product_id: &str,
    payload: ChangeQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let mut workspace = state.workspace.lock().await;
    workspace
        .billing
        .cart
        .change_quantity(product_id, payload.delta)?;
    let view = CartView::from(&workspace.billing.cart);
    let meta = Meta::count(view.lines.len());
    Ok(ApiResponse::success("Quantity updated", view, Some(meta)))
}

pub async fn remove_from_cart(
    state: &AppState,
    product_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let mut workspace = state.workspace.lock().await;
    if !workspace.billing.cart.remove(product_id) {
        return Err(AppError::NotFound);
    }
    let view = CartView::from(&workspace.billing.cart);
    let meta = Meta::count(view.lines.len());
    Ok(ApiResponse::success("Removed from cart", view, Some(meta)))
}

/// Completes the sale: decrements stock, records the sale and clears the
/// billing session. Catalog and ledger change together or not at all.
pub async fn checkout(state: &AppState) -> AppResult<ApiResponse<CheckoutReceipt>> {
    let mut workspace = state.workspace.lock().await;

    let outcome = run_checkout(
        &workspace.billing.cart,
        &workspace.catalog,
        state.ids.as_ref(),
        Utc::now(),
    )?;

    let mut ledger = workspace.ledger.clone();
    ledger.append(outcome.sale.clone());

    let persisted = state
        .storage
        .save([
            Document::products(outcome.catalog.products()),
            Document::sales(ledger.sales()),
        ])
        .await;

    workspace.catalog = outcome.catalog;
    workspace.ledger = ledger;
    workspace.billing.reset();

    tracing::info!(
        sale_id = %outcome.sale.id,
        items = outcome.sale.items.len(),
        total = %outcome.sale.total,
        "sale completed"
    );

    let receipt = CheckoutReceipt {
        total_display: format_currency(outcome.sale.total),
        sale: outcome.sale,
        clamped: outcome.clamped,
    };
    Ok(ApiResponse::success(
        "Sale completed",
        receipt,
        Some(Meta::persisted(persisted)),
    ))
}

pub async fn invoice(state: &AppState) -> AppResult<ApiResponse<Invoice>> {
    let workspace = state.workspace.lock().await;
    let preview = invoice::preview(&workspace.shop, &workspace.billing.cart);
    let meta = Meta::count(preview.lines.len());
    Ok(ApiResponse::success("Invoice preview", preview, Some(meta)))
}
