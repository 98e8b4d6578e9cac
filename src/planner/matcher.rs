use std::collections::HashMap;

use crate::models::PantryItem;

/// Canonical key for ingredient and pantry names: trimmed, lower-case,
/// internal whitespace runs collapsed to one space.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Pantry quantities keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockMap {
    stock: HashMap<String, f64>,
}

impl StockMap {
    /// Build from a pantry snapshot. Later rows with the same key overwrite earlier ones.
    pub fn from_pantry(items: &[PantryItem]) -> Self {
        let mut stock = HashMap::new();
        for item in items {
            stock.insert(normalize_name(&item.name), item.quantity);
        }
        Self { stock }
    }

    /// Quantity on hand; unknown names have none.
    pub fn available(&self, name: &str) -> f64 {
        self.stock
            .get(&normalize_name(name))
            .copied()
            .unwrap_or(0.0)
    }

    /// True when the pantry lists `name` with at least `quantity` on hand.
    pub fn covers(&self, name: &str, quantity: f64) -> bool {
        self.stock
            .get(&normalize_name(name))
            .is_some_and(|on_hand| *on_hand >= quantity)
    }

    /// Take up to `quantity` from stock and return how much was taken.
    ///
    /// Stock never goes below zero.
    pub fn take(&mut self, name: &str, quantity: f64) -> f64 {
        if quantity <= 0.0 {
            return 0.0;
        }
        match self.stock.get_mut(&normalize_name(name)) {
            Some(on_hand) => {
                let taken = quantity.min(on_hand.max(0.0));
                *on_hand -= taken;
                taken
            }
            None => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Olive   Oil "), "olive oil");
        assert_eq!(normalize_name("EGGS"), "eggs");
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("Green\tPeas"), "green peas");
    }

    #[test]
    fn test_from_pantry_last_row_wins() {
        let items = vec![
            PantryItem::new(1, "Rice", 100.0, "g"),
            PantryItem::new(1, "rice ", 300.0, "g"),
        ];
        let stock = StockMap::from_pantry(&items);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock.available("RICE"), 300.0);
        assert_eq!(stock.available("pasta"), 0.0);

        assert!(stock.covers("Rice", 300.0));
        assert!(!stock.covers("Rice", 300.5));
        assert!(!stock.covers("pasta", 0.0));
    }

    #[test]
    fn test_take_clamps_at_zero() {
        let mut stock = StockMap::from_pantry(&[PantryItem::new(1, "Milk", 250.0, "ml")]);

        assert_eq!(stock.take("milk", 200.0), 200.0);
        assert_eq!(stock.take("Milk", 200.0), 50.0);
        assert_eq!(stock.available("milk"), 0.0);
        assert_eq!(stock.take("milk", 10.0), 0.0);
        assert_eq!(stock.take("butter", 10.0), 0.0);
    }
}
