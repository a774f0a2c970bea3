use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{Cart, CartLine, money::format_currency},
    models::{Product, Sale},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeQuantityRequest {
    /// Added to the current quantity; the result never drops below 1.
    pub delta: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BillingQueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub total_display: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            lines: cart.lines().to_vec(),
            total,
            total_display: format_currency(total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillingResults {
    pub query: String,
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub sale: Sale,
    /// Products whose stock could not cover the requested quantity.
    pub clamped: Vec<String>,
    pub total_display: String,
}
