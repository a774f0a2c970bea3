use std::sync::Arc;

use invento::{
    db::{create_pool, run_migrations},
    domain::CartError,
    dto::{
        billing::{AddToCartRequest, ChangeQuantityRequest},
        products::{CreateProductRequest, NumericInput, UpdateProductRequest},
    },
    error::AppError,
    ids::SequentialIds,
    services::{analytics_service, billing_service, catalog_service},
    state::{AppState, Workspace},
    storage::LocalStorage,
};
use rust_decimal::Decimal;

async fn setup_state() -> anyhow::Result<AppState> {
    let pool = create_pool("sqlite::memory:").await?;
    run_migrations(&pool).await?;
    Ok(AppState::load(LocalStorage::new(pool), Arc::new(SequentialIds::new("id"))).await)
}

fn pen() -> CreateProductRequest {
    CreateProductRequest {
        name: "Pen".into(),
        sku: "PN1".into(),
        price: Some(NumericInput::Number(Decimal::from(10))),
        stock: Some(NumericInput::Text("2".into())),
        low_stock_threshold: Some(NumericInput::Number(Decimal::from(5))),
    }
}

// Cart asks for more pens than are in stock: stock floors at zero while the
// sale still bills every requested unit.
#[tokio::test]
async fn checkout_clamps_stock_and_records_sale() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let created = catalog_service::create_product(&state, pen()).await?;
    let product = created.data.expect("product");
    assert_eq!(product.id, "id-1");
    assert_eq!(created.meta.and_then(|m| m.persisted), Some(true));

    let add = || AddToCartRequest {
        product_id: product.id.clone(),
    };
    billing_service::add_to_cart(&state, add()).await?;
    billing_service::add_to_cart(&state, add()).await?;
    // Third add is refused by the stock limit, so push it through by delta.
    let at_limit = billing_service::add_to_cart(&state, add()).await?;
    assert_eq!(at_limit.data.expect("cart").lines[0].qty, 2);
    billing_service::change_quantity(&state, &product.id, ChangeQuantityRequest { delta: 1 })
        .await?;

    let receipt = billing_service::checkout(&state).await?.data.expect("receipt");
    assert_eq!(receipt.sale.id, "id-2");
    assert_eq!(receipt.sale.total, Decimal::from(30));
    assert_eq!(receipt.sale.items.len(), 1);
    let item = &receipt.sale.items[0];
    assert_eq!(item.product_id, "id-1");
    assert_eq!(item.qty, 3);
    assert_eq!(item.price, Decimal::from(10));
    assert_eq!(item.subtotal, Decimal::from(30));
    assert_eq!(receipt.clamped, vec!["id-1".to_string()]);
    assert_eq!(receipt.total_display, "₹30.00");

    let after = catalog_service::get_product(&state, "id-1").await?;
    assert_eq!(after.data.expect("product").stock, 0);

    // Session is cleared after a sale.
    let cart = billing_service::cart(&state).await?.data.expect("cart");
    assert!(cart.lines.is_empty());

    let low = analytics_service::low_stock(&state).await?.data.expect("low stock");
    assert_eq!(low.items.len(), 1);

    let dashboard = analytics_service::dashboard(&state).await?.data.expect("dashboard");
    assert_eq!(dashboard.revenue.total, Decimal::from(30));
    assert_eq!(dashboard.recent_sales.len(), 1);

    // A fresh workspace loaded from storage sees the same state.
    let reloaded = Workspace::load(&state.storage).await;
    assert_eq!(reloaded.catalog.find("id-1").map(|p| p.stock), Some(0));
    assert_eq!(reloaded.ledger.len(), 1);
    Ok(())
}

#[tokio::test]
async fn empty_cart_checkout_changes_nothing() -> anyhow::Result<()> {
    let state = setup_state().await?;
    catalog_service::create_product(&state, pen()).await?;

    let err = billing_service::checkout(&state).await.unwrap_err();
    assert!(matches!(err, AppError::Checkout(_)));

    let workspace = state.workspace.lock().await;
    assert_eq!(workspace.catalog.find("id-1").map(|p| p.stock), Some(2));
    assert!(workspace.ledger.is_empty());
    Ok(())
}

#[tokio::test]
async fn catalog_validation_and_delete_confirmation() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let missing_price = CreateProductRequest {
        price: Some(NumericInput::Text(String::new())),
        ..pen()
    };
    let err = catalog_service::create_product(&state, missing_price)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    catalog_service::create_product(&state, pen()).await?;
    let updated = catalog_service::update_product(
        &state,
        "id-1",
        UpdateProductRequest {
            name: None,
            sku: None,
            price: Some(NumericInput::Text("12.5".into())),
            stock: None,
            low_stock_threshold: None,
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(updated.price, Decimal::new(125, 1));
    assert_eq!(updated.name, "Pen");

    let err = catalog_service::delete_product(&state, "id-1", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    catalog_service::delete_product(&state, "id-1", true).await?;
    let err = catalog_service::get_product(&state, "id-1").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn sample_data_only_loads_into_empty_catalog() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let loaded = catalog_service::load_sample_data(&state).await?;
    assert_eq!(loaded.data.expect("products").items.len(), 4);

    let err = catalog_service::load_sample_data(&state).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let listed = catalog_service::list_products(&state, Some("pen".into())).await?;
    assert_eq!(listed.data.expect("products").items[0].sku, "GP-BLUE");
    Ok(())
}

#[tokio::test]
async fn runs_in_memory_when_storage_is_disabled() -> anyhow::Result<()> {
    let state = AppState::in_memory();
    let created = catalog_service::create_product(&state, pen()).await?;
    assert_eq!(created.meta.and_then(|m| m.persisted), Some(false));

    let listed = catalog_service::list_products(&state, None).await?;
    assert_eq!(listed.data.expect("products").items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn oversized_cart_amounts_are_refused() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let pricey = CreateProductRequest {
        price: Some(NumericInput::Text("50000000000000000000000000000".into())),
        stock: Some(NumericInput::Number(Decimal::from(5))),
        ..pen()
    };
    catalog_service::create_product(&state, pricey).await?;
    billing_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "id-1".into(),
        },
    )
    .await?;

    let err = billing_service::change_quantity(&state, "id-1", ChangeQuantityRequest { delta: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::AmountTooLarge)));

    let err = billing_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "id-1".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::AmountTooLarge)));

    // The cart is still readable and billable at its last valid state.
    let cart = billing_service::cart(&state).await?.data.expect("cart");
    assert_eq!(cart.lines[0].qty, 1);
    let invoice = billing_service::invoice(&state).await?.data.expect("invoice");
    assert_eq!(invoice.lines.len(), 1);
    let receipt = billing_service::checkout(&state).await?.data.expect("receipt");
    assert_eq!(receipt.sale.items[0].qty, 1);
    Ok(())
}

#[tokio::test]
async fn recorded_sales_ignore_later_product_edits() -> anyhow::Result<()> {
    let state = setup_state().await?;
    catalog_service::create_product(&state, pen()).await?;
    billing_service::add_to_cart(
        &state,
        AddToCartRequest {
            product_id: "id-1".into(),
        },
    )
    .await?;
    let sale = billing_service::checkout(&state).await?.data.expect("receipt").sale;

    catalog_service::update_product(
        &state,
        "id-1",
        UpdateProductRequest {
            name: Some("Fountain Pen".into()),
            sku: None,
            price: Some(NumericInput::Number(Decimal::from(99))),
            stock: None,
            low_stock_threshold: None,
        },
    )
    .await?;
    catalog_service::delete_product(&state, "id-1", true).await?;

    let workspace = state.workspace.lock().await;
    assert_eq!(workspace.ledger.sales(), [sale.clone()]);
    let item = &workspace.ledger.sales()[0].items[0];
    assert_eq!(item.name, "Pen");
    assert_eq!(item.price, Decimal::from(10));
    drop(workspace);

    let reloaded = Workspace::load(&state.storage).await;
    assert_eq!(reloaded.ledger.sales(), [sale]);
    Ok(())
}
