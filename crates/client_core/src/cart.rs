use shared::protocol::ProductRecord;

/// One selected catalog item. Quantity is implicitly 1: repeated adds of
/// the same product create repeated lines, never a quantity bump.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: ProductRecord,
}

/// Result of committing the order-in-progress. The presentation layer
/// maps this onto whatever confirmation affordance it uses; the core
/// assumes no UI modality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutReceipt {
    pub line_count: usize,
    pub total: f64,
}

/// Order-in-progress. Lines only accumulate or clear wholesale; there is
/// no single-line removal.
#[derive(Debug, Default)]
pub struct CartManager {
    lines: Vec<CartLine>,
}

impl CartManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, product: ProductRecord) {
        self.lines.push(CartLine { product });
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line unit prices, recomputed on every call.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.product.unit_price).sum()
    }

    /// Clears all lines unconditionally and reports what was committed.
    /// Payment confirmation is an external side effect the caller triggers
    /// separately.
    pub fn checkout(&mut self) -> CheckoutReceipt {
        let receipt = CheckoutReceipt {
            line_count: self.lines.len(),
            total: self.total(),
        };
        self.lines.clear();
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::ProductKey;

    fn product(key: i64, unit_price: f64) -> ProductRecord {
        ProductRecord {
            product_key: ProductKey(key),
            name: format!("Product {key}"),
            category: "Audio".into(),
            subcategory: None,
            brand: "Fabrikam".into(),
            unit_price,
        }
    }

    #[test]
    fn total_sums_line_unit_prices() {
        let mut cart = CartManager::new();
        cart.add_item(product(1, 10.0));
        cart.add_item(product(2, 15.5));

        assert_eq!(cart.total(), 25.5);
    }

    #[test]
    fn repeated_adds_create_repeated_lines() {
        let mut cart = CartManager::new();
        cart.add_item(product(1, 10.0));
        cart.add_item(product(1, 10.0));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 20.0);
    }

    #[test]
    fn checkout_clears_the_cart_and_reports_the_commit() {
        let mut cart = CartManager::new();
        cart.add_item(product(1, 10.0));
        cart.add_item(product(2, 15.5));

        let receipt = cart.checkout();
        assert_eq!(receipt.line_count, 2);
        assert_eq!(receipt.total, 25.5);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn checkout_of_an_empty_cart_is_a_zero_receipt() {
        let mut cart = CartManager::new();
        let receipt = cart.checkout();
        assert_eq!(receipt.line_count, 0);
        assert_eq!(receipt.total, 0.0);
    }
}
