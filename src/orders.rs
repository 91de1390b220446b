//! Orders

use rust_decimal::Decimal;

use crate::items::Item;

/// One checkout calculation's worth of context: the line items plus the
/// customer attributes that order-scoped rules read.
///
/// Orders are immutable once built; the `with_*` methods are consuming
/// builders for the customer attributes, which all default to empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    items: Vec<Item>,
    status: String,
    promo_code: String,
    payment_method: String,
    newsletter_subscriber: bool,
    browser: String,
}

impl Order {
    /// Creates an order with the given items and empty customer attributes.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            status: String::new(),
            promo_code: String::new(),
            payment_method: String::new(),
            newsletter_subscriber: false,
            browser: String::new(),
        }
    }

    /// Sets the customer tier (e.g. "Gold").
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the promo code supplied at checkout.
    #[must_use]
    pub fn with_promo_code(mut self, promo_code: impl Into<String>) -> Self {
        self.promo_code = promo_code.into();
        self
    }

    /// Sets the payment method.
    #[must_use]
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }

    /// Sets whether the customer is subscribed to the newsletter.
    #[must_use]
    pub fn with_newsletter_subscriber(mut self, subscribed: bool) -> Self {
        self.newsletter_subscriber = subscribed;
        self
    }

    /// Sets the browser the order was placed from.
    #[must_use]
    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = browser.into();
        self
    }

    /// Returns the line items in order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the customer tier.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the promo code, possibly empty.
    pub fn promo_code(&self) -> &str {
        &self.promo_code
    }

    /// Returns the payment method.
    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    /// Returns whether the customer is subscribed to the newsletter.
    pub fn newsletter_subscriber(&self) -> bool {
        self.newsletter_subscriber
    }

    /// Returns the browser the order was placed from.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Returns the sum of `unit_price * quantity` across all lines, before
    /// any discounts.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(Item::line_total).sum()
    }

    /// Returns the total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Returns the number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn sample_items() -> Result<Vec<Item>, crate::items::ItemError> {
        Ok(vec![
            Item::new("DegraPhone", "Electronics", Decimal::from(1000), 4)?,
            Item::new("Zip-top", "Clothing", Decimal::from(150), 2)?,
        ])
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let order = Order::new(sample_items()?);

        assert_eq!(order.subtotal(), Decimal::from(4300));

        Ok(())
    }

    #[test]
    fn total_quantity_sums_units_across_lines() -> TestResult {
        let order = Order::new(sample_items()?);

        assert_eq!(order.total_quantity(), 6);
        assert_eq!(order.line_count(), 2);

        Ok(())
    }

    #[test]
    fn empty_order_totals_are_zero() {
        let order = Order::new(Vec::new());

        assert_eq!(order.subtotal(), Decimal::ZERO);
        assert_eq!(order.total_quantity(), 0);
        assert_eq!(order.line_count(), 0);
    }

    #[test]
    fn builder_methods_set_customer_attributes() -> TestResult {
        let order = Order::new(sample_items()?)
            .with_status("Platinum")
            .with_promo_code("BIG5")
            .with_payment_method("SigmaBank Card")
            .with_newsletter_subscriber(true)
            .with_browser("TrojanSearcher");

        assert_eq!(order.status(), "Platinum");
        assert_eq!(order.promo_code(), "BIG5");
        assert_eq!(order.payment_method(), "SigmaBank Card");
        assert!(order.newsletter_subscriber());
        assert_eq!(order.browser(), "TrojanSearcher");

        Ok(())
    }

    #[test]
    fn attributes_default_to_empty() {
        let order = Order::new(Vec::new());

        assert_eq!(order.status(), "");
        assert_eq!(order.promo_code(), "");
        assert_eq!(order.payment_method(), "");
        assert!(!order.newsletter_subscriber());
        assert_eq!(order.browser(), "");
    }
}
