use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        CartLine,
        analytics::{Dashboard, RecentSale, RevenueSummary},
        backup::BackupDocument,
        invoice::{Invoice, InvoiceLine},
    },
    dto::{
        backup::RestoreSummary,
        billing::{
            AddToCartRequest, BillingQueryRequest, BillingResults, CartView,
            ChangeQuantityRequest, CheckoutReceipt,
        },
        products::{CreateProductRequest, NumericInput, ProductList, UpdateProductRequest},
    },
    models::{Product, Sale, SaleItem, ShopProfile},
    response::{ApiResponse, Meta},
    routes::{analytics, backup, billing, health, products as product_routes, shop},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        product_routes::list_products,
        product_routes::create_product,
        product_routes::get_product,
        product_routes::update_product,
        product_routes::delete_product,
        product_routes::load_sample_data,
        billing::billing_products,
        billing::set_query,
        billing::cart,
        billing::add_to_cart,
        billing::change_quantity,
        billing::remove_from_cart,
        billing::checkout,
        billing::invoice,
        analytics::dashboard,
        analytics::low_stock,
        shop::get_profile,
        shop::update_profile,
        backup::export_backup,
        backup::import_backup
    ),
    components(
        schemas(
            Product,
            Sale,
            SaleItem,
            ShopProfile,
            CartLine,
            NumericInput,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            AddToCartRequest,
            ChangeQuantityRequest,
            BillingQueryRequest,
            BillingResults,
            CartView,
            CheckoutReceipt,
            Invoice,
            InvoiceLine,
            Dashboard,
            RevenueSummary,
            RecentSale,
            BackupDocument,
            RestoreSummary,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<CheckoutReceipt>,
            ApiResponse<Dashboard>,
            ApiResponse<ShopProfile>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Billing", description = "Cart, checkout and invoice endpoints"),
        (name = "Analytics", description = "Revenue and stock figures"),
        (name = "Shop", description = "Shop profile endpoints"),
        (name = "Backup", description = "Backup export and restore"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
