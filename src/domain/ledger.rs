use crate::models::Sale;

/// Append-only record of completed sales, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    sales: Vec<Sale>,
}

impl Ledger {
    pub fn new(sales: Vec<Sale>) -> Self {
        Self { sales }
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn into_sales(self) -> Vec<Sale> {
        self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn append(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    pub fn last(&self) -> Option<&Sale> {
        self.sales.last()
    }

    /// The sale recorded just before the latest one.
    pub fn previous(&self) -> Option<&Sale> {
        self.sales.len().checked_sub(2).and_then(|i| self.sales.get(i))
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &Sale> {
        self.sales.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sale(id: &str, total: i64) -> Sale {
        Sale {
            id: id.into(),
            date: "2025-01-01T00:00:00Z".parse().unwrap(),
            items: vec![],
            total: Decimal::from(total),
        }
    }

    #[test]
    fn last_and_previous() {
        let mut ledger = Ledger::default();
        assert!(ledger.last().is_none());
        ledger.append(sale("a", 10));
        assert_eq!(ledger.last().unwrap().id, "a");
        assert!(ledger.previous().is_none());
        ledger.append(sale("b", 20));
        assert_eq!(ledger.previous().unwrap().id, "a");
        let order: Vec<_> = ledger.newest_first().map(|s| s.id.as_str()).collect();
        assert_eq!(order, ["b", "a"]);
    }
}
