//! Revenue and stock figures derived from the catalog and ledger.
//!
//! Everything here is computed on request from the stores and the supplied
//! instant; nothing is cached between calls.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::{catalog::Catalog, ledger::Ledger, money},
    models::{Product, Sale},
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub total: Decimal,
    pub month_to_date: Decimal,
    pub year_to_date: Decimal,
    pub last_sale: Option<Decimal>,
    /// Latest sale total minus the one before it.
    pub last_sale_delta: Option<Decimal>,
    /// True unless the latest sale was smaller than the previous one.
    pub trend_positive: bool,
    pub delta_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub id: String,
    pub date: DateTime<Utc>,
    pub item_count: usize,
    pub total: Decimal,
}

impl From<&Sale> for RecentSale {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.clone(),
            date: sale.date,
            item_count: sale.items.len(),
            total: sale.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub revenue: RevenueSummary,
    pub recent_sales: Vec<RecentSale>,
    pub low_stock: Vec<Product>,
}

pub fn revenue_summary<Tz: TimeZone>(ledger: &Ledger, now: &DateTime<Tz>) -> RevenueSummary {
    let tz = now.timezone();
    let mut total = Decimal::ZERO;
    let mut month_to_date = Decimal::ZERO;
    let mut year_to_date = Decimal::ZERO;

    // Sums saturate at the Decimal bounds.
    for sale in ledger.sales() {
        total = total.saturating_add(sale.total);
        let local = sale.date.with_timezone(&tz);
        if local.year() == now.year() {
            year_to_date = year_to_date.saturating_add(sale.total);
            if local.month() == now.month() {
                month_to_date = month_to_date.saturating_add(sale.total);
            }
        }
    }

    let last_sale = ledger.last().map(|s| s.total);
    let last_sale_delta = ledger
        .last()
        .zip(ledger.previous())
        .map(|(last, prev)| last.total.saturating_sub(prev.total));

    RevenueSummary {
        total,
        month_to_date,
        year_to_date,
        last_sale,
        last_sale_delta,
        trend_positive: last_sale_delta.is_none_or(|d| !d.is_sign_negative() || d.is_zero()),
        delta_hint: last_sale_delta.map(|d| format!("{} vs last", money::format_signed(d))),
    }
}

pub fn low_stock(catalog: &Catalog) -> Vec<Product> {
    catalog.low_stock().into_iter().cloned().collect()
}

pub fn recent_sales(ledger: &Ledger) -> Vec<RecentSale> {
    ledger.newest_first().map(RecentSale::from).collect()
}

pub fn dashboard<Tz: TimeZone>(catalog: &Catalog, ledger: &Ledger, now: &DateTime<Tz>) -> Dashboard {
    Dashboard {
        revenue: revenue_summary(ledger, now),
        recent_sales: recent_sales(ledger),
        low_stock: low_stock(catalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sale(id: &str, date: &str, total: i64) -> Sale {
        Sale {
            id: id.into(),
            date: date.parse().unwrap(),
            items: vec![],
            total: Decimal::from(total),
        }
    }

    fn product(id: &str, stock: u32, threshold: u32) -> Product {
        Product {
            id: id.into(),
            name: id.to_uppercase(),
            sku: id.into(),
            price: Decimal::ONE,
            stock,
            low_stock_threshold: threshold,
        }
    }

    #[test]
    fn huge_imported_totals_saturate() {
        let mut first = sale("a", "2025-06-01T10:00:00Z", 0);
        first.total = Decimal::MAX;
        let mut second = sale("b", "2025-06-02T10:00:00Z", 0);
        second.total = Decimal::MIN;
        let third = Sale {
            id: "c".into(),
            ..first.clone()
        };
        let ledger = Ledger::new(vec![first, third, second]);
        let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();

        let summary = revenue_summary(&ledger, &now);
        assert_eq!(summary.last_sale_delta, Some(Decimal::MIN));
        assert!(!summary.trend_positive);
        assert_eq!(summary.year_to_date, summary.total);
    }

    #[test]
    fn empty_ledger_reports_zero_and_positive_trend() {
        let catalog = Catalog::new(vec![product("a", 5, 5), product("b", 6, 5)]);
        let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();

        let dash = dashboard(&catalog, &Ledger::default(), &now);

        assert_eq!(dash.revenue.total, Decimal::ZERO);
        assert_eq!(dash.revenue.month_to_date, Decimal::ZERO);
        assert_eq!(dash.revenue.year_to_date, Decimal::ZERO);
        assert_eq!(dash.revenue.last_sale, None);
        assert!(dash.revenue.trend_positive);
        assert_eq!(dash.revenue.delta_hint, None);
        let low: Vec<_> = dash.low_stock.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(low, ["a"]);
        assert!(dash.recent_sales.is_empty());
    }

    #[test]
    fn month_and_year_windows() {
        let ledger = Ledger::new(vec![
            sale("old", "2024-06-20T10:00:00Z", 100),
            sale("jan", "2025-01-05T10:00:00Z", 40),
            sale("jun", "2025-06-01T10:00:00Z", 25),
            sale("jun2", "2025-06-14T10:00:00Z", 5),
        ]);
        let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();

        let summary = revenue_summary(&ledger, &now);

        assert_eq!(summary.total, Decimal::from(170));
        assert_eq!(summary.year_to_date, Decimal::from(70));
        assert_eq!(summary.month_to_date, Decimal::from(30));
    }

    #[test]
    fn calendar_is_evaluated_in_the_callers_zone() {
        // 23:30 UTC on May 31st is already June 1st at UTC+05:30.
        let ledger = Ledger::new(vec![sale("edge", "2025-05-31T23:30:00Z", 50)]);
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = ist.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap();

        assert_eq!(revenue_summary(&ledger, &now).month_to_date, Decimal::from(50));

        let utc_now: DateTime<Utc> = "2025-06-10T03:30:00Z".parse().unwrap();
        assert_eq!(revenue_summary(&ledger, &utc_now).month_to_date, Decimal::ZERO);
    }

    #[test]
    fn last_sale_delta_and_trend() {
        let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();

        let single = Ledger::new(vec![sale("a", "2025-06-01T00:00:00Z", 20)]);
        let summary = revenue_summary(&single, &now);
        assert_eq!(summary.last_sale, Some(Decimal::from(20)));
        assert_eq!(summary.last_sale_delta, None);
        assert!(summary.trend_positive);

        let down = Ledger::new(vec![
            sale("a", "2025-06-01T00:00:00Z", 20),
            sale("b", "2025-06-02T00:00:00Z", 15),
        ]);
        let summary = revenue_summary(&down, &now);
        assert_eq!(summary.last_sale_delta, Some(Decimal::from(-5)));
        assert!(!summary.trend_positive);
        assert_eq!(summary.delta_hint.as_deref(), Some("-5.00 vs last"));

        let flat = Ledger::new(vec![
            sale("a", "2025-06-01T00:00:00Z", 15),
            sale("b", "2025-06-02T00:00:00Z", 15),
        ]);
        let summary = revenue_summary(&flat, &now);
        assert!(summary.trend_positive);
        assert_eq!(summary.delta_hint.as_deref(), Some("+0.00 vs last"));
    }

    #[test]
    fn recent_sales_are_newest_first() {
        let ledger = Ledger::new(vec![
            sale("a", "2025-06-01T00:00:00Z", 1),
            sale("b", "2025-06-02T00:00:00Z", 2),
        ]);
        let ids: Vec<_> = recent_sales(&ledger).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
