use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::{cart::Cart, money},
    models::ShopProfile,
};

const NAME_PLACEHOLDER: &str = "Your Shop Name";
const TAGLINE_PLACEHOLDER: &str = "Tagline goes here";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub product_id: String,
    pub name: String,
    pub qty: u32,
    pub price: Decimal,
    pub subtotal: Decimal,
    pub price_display: String,
    pub subtotal_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub shop_name: String,
    pub tagline: String,
    pub contact: String,
    pub lines: Vec<InvoiceLine>,
    pub total: Decimal,
    pub total_display: String,
}

pub fn preview(shop: &ShopProfile, cart: &Cart) -> Invoice {
    let lines = cart
        .lines()
        .iter()
        .map(|line| {
            let subtotal = line.subtotal();
            InvoiceLine {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                qty: line.qty,
                price: line.price,
                subtotal,
                price_display: money::format_currency(line.price),
                subtotal_display: money::format_currency(subtotal),
            }
        })
        .collect();
    let total = cart.total();

    Invoice {
        shop_name: or_placeholder(&shop.name, NAME_PLACEHOLDER),
        tagline: or_placeholder(&shop.tagline, TAGLINE_PLACEHOLDER),
        contact: shop.contact.clone(),
        lines,
        total,
        total_display: money::format_currency(total),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
