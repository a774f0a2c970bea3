//! Checkout: turns a cart into a sale and the catalog it leaves behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{cart::Cart, catalog::Catalog},
    ids::IdGenerator,
    models::{Sale, SaleItem},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("product {0} is no longer in the catalog")]
    UnknownProduct(String),

    #[error("sale amount is too large")]
    AmountTooLarge,
}

#[derive(Debug, Clone)]
pub struct Checkout {
    pub catalog: Catalog,
    pub sale: Sale,
    /// Products whose stock could not cover the requested quantity and were
    /// floored at zero.
    pub clamped: Vec<String>,
}

/// Computes the post-sale catalog and the sale record. Neither input is
/// modified; the caller applies both results together or not at all.
///
/// Stock is decremented with a floor of zero. The sale always records the
/// requested quantity, so a clamped line still bills every unit asked for.
pub fn checkout(
    cart: &Cart,
    catalog: &Catalog,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Result<Checkout, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut next = catalog.clone();
    let mut items = Vec::with_capacity(cart.lines().len());
    let mut clamped = Vec::new();

    for line in cart.lines() {
        let available = next
            .find(&line.product_id)
            .map(|p| p.stock)
            .ok_or_else(|| CheckoutError::UnknownProduct(line.product_id.clone()))?;

        if line.qty > available {
            tracing::warn!(
                product_id = %line.product_id,
                requested = line.qty,
                available,
                "stock clamped to zero at checkout"
            );
            clamped.push(line.product_id.clone());
        }
        next.set_stock(&line.product_id, available.saturating_sub(line.qty));

        items.push(SaleItem {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            qty: line.qty,
            price: line.price,
            subtotal: line
                .checked_subtotal()
                .ok_or(CheckoutError::AmountTooLarge)?,
        });
    }

    let total = items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal))
        .ok_or(CheckoutError::AmountTooLarge)?;
    let sale = Sale {
        id: ids.next_id(),
        date: now,
        items,
        total,
    };

    Ok(Checkout {
        catalog: next,
        sale,
        clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::cart::CartLine, ids::SequentialIds, models::Product};

    fn pen(stock: u32) -> Product {
        Product {
            id: "p1".into(),
            name: "Pen".into(),
            sku: "PN1".into(),
            price: Decimal::new(10, 0),
            stock,
            low_stock_threshold: 5,
        }
    }

    fn notebook() -> Product {
        Product {
            id: "p2".into(),
            name: "Notebook".into(),
            sku: "NB".into(),
            price: Decimal::new(8999, 2),
            stock: 10,
            low_stock_threshold: 2,
        }
    }

    fn now() -> DateTime<Utc> {
        "2025-06-15T09:30:00Z".parse().unwrap()
    }

    #[test]
    fn decrements_stock_and_totals_lines() {
        let catalog = Catalog::new(vec![pen(5), notebook()]);
        let cart = Cart::from_lines(vec![
            CartLine::snapshot(&pen(5), 2),
            CartLine::snapshot(&notebook(), 3),
        ]);
        let ids = SequentialIds::new("sale");

        let out = checkout(&cart, &catalog, &ids, now()).unwrap();

        assert_eq!(out.catalog.find("p1").unwrap().stock, 3);
        assert_eq!(out.catalog.find("p2").unwrap().stock, 7);
        assert_eq!(out.sale.id, "sale-1");
        assert_eq!(out.sale.date, now());
        assert_eq!(out.sale.total, Decimal::new(28997, 2));
        assert!(out.clamped.is_empty());
        // input untouched
        assert_eq!(catalog.find("p1").unwrap().stock, 5);
    }

    #[test]
    fn insufficient_stock_clamps_but_bills_requested_quantity() {
        let catalog = Catalog::new(vec![pen(2)]);
        let cart = Cart::from_lines(vec![CartLine::snapshot(&pen(2), 3)]);

        let out = checkout(&cart, &catalog, &SequentialIds::new("s"), now()).unwrap();

        assert_eq!(out.catalog.find("p1").unwrap().stock, 0);
        assert_eq!(out.clamped, ["p1"]);
        assert_eq!(
            out.sale.items,
            vec![SaleItem {
                product_id: "p1".into(),
                name: "Pen".into(),
                qty: 3,
                price: Decimal::new(10, 0),
                subtotal: Decimal::new(30, 0),
            }]
        );
        assert_eq!(out.sale.total, Decimal::new(30, 0));
    }

    #[test]
    fn empty_cart_is_rejected() {
        let catalog = Catalog::new(vec![pen(2)]);
        let err = checkout(&Cart::default(), &catalog, &SequentialIds::new("s"), now())
            .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn unknown_product_is_rejected() {
        let catalog = Catalog::new(vec![notebook()]);
        let cart = Cart::from_lines(vec![
            CartLine::snapshot(&notebook(), 1),
            CartLine::snapshot(&pen(1), 1),
        ]);
        let err = checkout(&cart, &catalog, &SequentialIds::new("s"), now()).unwrap_err();
        assert_eq!(err, CheckoutError::UnknownProduct("p1".into()));
    }

    #[test]
    fn sale_keeps_cart_snapshot_price() {
        let mut repriced = pen(4);
        repriced.price = Decimal::new(12, 0);
        let catalog = Catalog::new(vec![repriced]);
        let cart = Cart::from_lines(vec![CartLine::snapshot(&pen(4), 1)]);

        let out = checkout(&cart, &catalog, &SequentialIds::new("s"), now()).unwrap();
        assert_eq!(out.sale.items[0].price, Decimal::new(10, 0));
        assert_eq!(out.catalog.find("p1").unwrap().price, Decimal::new(12, 0));
    }

    #[test]
    fn oversized_amounts_fail_instead_of_overflowing() {
        let mut pricey = pen(5);
        pricey.price = "50000000000000000000000000000".parse().unwrap();
        let catalog = Catalog::new(vec![pricey.clone()]);
        let cart = Cart::from_lines(vec![CartLine::snapshot(&pricey, 2)]);

        let err = checkout(&cart, &catalog, &SequentialIds::new("s"), now()).unwrap_err();
        assert_eq!(err, CheckoutError::AmountTooLarge);
    }

    #[test]
    fn many_fractional_lines_sum_exactly() {
        let mut cheap = pen(1000);
        cheap.price = Decimal::new(10, 2);
        let catalog = Catalog::new(vec![cheap.clone()]);
        let lines = (0..30)
            .map(|_| CartLine::snapshot(&cheap, 1))
            .collect::<Vec<_>>();
        let out = checkout(
            &Cart::from_lines(lines),
            &catalog,
            &SequentialIds::new("s"),
            now(),
        )
        .unwrap();
        assert_eq!(out.sale.total, Decimal::new(300, 2));
        assert_eq!(out.catalog.find("p1").unwrap().stock, 970);
    }
}
