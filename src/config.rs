//! Declarative configuration
//!
//! YAML rule sets and orders for callers that populate the registry from
//! files rather than code. A rule-set file is a `rules:` list of tagged
//! records; file order becomes registry order.

use std::{fs, path::Path};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    items::{Item, ItemError},
    orders::Order,
    registry::RuleRegistry,
    rules::{DiscountRule, RuleError},
};

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A rule record failed validation.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// An item record failed validation.
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// One rule record as written in a rule-set file.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleRecord {
    /// Minimum-quantity line discount.
    Quantity {
        /// Minimum number of units on the line.
        min_quantity: u32,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Category line discount.
    Category {
        /// Category the line must match exactly.
        category: String,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Customer tier discount.
    Status {
        /// Customer tier the order must match exactly.
        status: String,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Promo code discount.
    PromoCode {
        /// Promo code the order must match exactly.
        promo_code: String,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Date-window discount, bounds inclusive.
    TimeWindow {
        /// First day the discount applies.
        start: NaiveDate,
        /// Last day the discount applies.
        end: NaiveDate,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Order size discount.
    OrderSize {
        /// Minimum order size.
        min_size: u64,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Payment method discount.
    PaymentMethod {
        /// Payment method the order must match exactly.
        payment_method: String,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Newsletter subscriber discount.
    Newsletter {
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },

    /// Browser discount.
    Browser {
        /// Browser the order must match exactly.
        browser: String,
        /// Percentage deducted, `0..=100`.
        percentage: Decimal,
    },
}

impl TryFrom<RuleRecord> for DiscountRule {
    type Error = RuleError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        match record {
            RuleRecord::Quantity {
                min_quantity,
                percentage,
            } => DiscountRule::quantity(min_quantity, percentage),
            RuleRecord::Category {
                category,
                percentage,
            } => DiscountRule::category(category, percentage),
            RuleRecord::Status { status, percentage } => DiscountRule::status(status, percentage),
            RuleRecord::PromoCode {
                promo_code,
                percentage,
            } => DiscountRule::promo_code(promo_code, percentage),
            RuleRecord::TimeWindow {
                start,
                end,
                percentage,
            } => DiscountRule::time_window(start, end, percentage),
            RuleRecord::OrderSize {
                min_size,
                percentage,
            } => DiscountRule::order_size(min_size, percentage),
            RuleRecord::PaymentMethod {
                payment_method,
                percentage,
            } => DiscountRule::payment_method(payment_method, percentage),
            RuleRecord::Newsletter { percentage } => DiscountRule::newsletter(percentage),
            RuleRecord::Browser {
                browser,
                percentage,
            } => DiscountRule::browser(browser, percentage),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RuleSetFile {
    rules: Vec<RuleRecord>,
}

/// Parses a YAML rule set into a registry, preserving file order.
///
/// # Errors
///
/// - [`ConfigError::Yaml`]: the contents were not a valid rule-set document.
/// - [`ConfigError::Rule`]: a record failed rule validation.
pub fn rules_from_str(contents: &str) -> Result<RuleRegistry, ConfigError> {
    let file: RuleSetFile = serde_norway::from_str(contents)?;

    let mut registry = RuleRegistry::new();

    for record in file.rules {
        registry.add(record.try_into()?);
    }

    Ok(registry)
}

/// Reads and parses a YAML rule-set file.
///
/// # Errors
///
/// - [`ConfigError::Io`]: the file could not be read.
/// - [`ConfigError::Yaml`]: the contents were not a valid rule-set document.
/// - [`ConfigError::Rule`]: a record failed rule validation.
pub fn rules_from_path(path: impl AsRef<Path>) -> Result<RuleRegistry, ConfigError> {
    rules_from_str(&fs::read_to_string(path)?)
}

/// One line-item record in an order file.
#[derive(Debug, Deserialize)]
pub struct ItemRecord {
    /// Product name.
    pub name: String,

    /// Product category.
    pub category: String,

    /// Price of a single unit.
    pub unit_price: Decimal,

    /// Number of units on the line.
    pub quantity: u32,
}

/// An order as written in an order file.
///
/// Customer attributes are optional and default to empty.
#[derive(Debug, Deserialize)]
pub struct OrderRecord {
    /// Line items in order.
    pub items: Vec<ItemRecord>,

    /// Customer tier.
    #[serde(default)]
    pub status: String,

    /// Promo code supplied at checkout.
    #[serde(default)]
    pub promo_code: String,

    /// Payment method.
    #[serde(default)]
    pub payment_method: String,

    /// Whether the customer is subscribed to the newsletter.
    #[serde(default)]
    pub newsletter_subscriber: bool,

    /// Browser the order was placed from.
    #[serde(default)]
    pub browser: String,
}

impl TryFrom<OrderRecord> for Order {
    type Error = ItemError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let items = record
            .items
            .into_iter()
            .map(|item| Item::new(item.name, item.category, item.unit_price, item.quantity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order::new(items)
            .with_status(record.status)
            .with_promo_code(record.promo_code)
            .with_payment_method(record.payment_method)
            .with_newsletter_subscriber(record.newsletter_subscriber)
            .with_browser(record.browser))
    }
}

/// Parses a YAML order document.
///
/// # Errors
///
/// - [`ConfigError::Yaml`]: the contents were not a valid order document.
/// - [`ConfigError::Item`]: an item record failed validation.
pub fn order_from_str(contents: &str) -> Result<Order, ConfigError> {
    let record: OrderRecord = serde_norway::from_str(contents)?;

    Ok(record.try_into()?)
}

/// Reads and parses a YAML order file.
///
/// # Errors
///
/// - [`ConfigError::Io`]: the file could not be read.
/// - [`ConfigError::Yaml`]: the contents were not a valid order document.
/// - [`ConfigError::Item`]: an item record failed validation.
pub fn order_from_path(path: impl AsRef<Path>) -> Result<Order, ConfigError> {
    order_from_str(&fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use crate::rules::RuleKind;

    use super::*;

    const RULES_YAML: &str = "\
rules:
  - type: quantity
    min_quantity: 2
    percentage: 10
  - type: category
    category: Electronics
    percentage: 15
  - type: time_window
    start: 2023-12-01
    end: 2023-12-05
    percentage: 25
  - type: newsletter
    percentage: 1
";

    const ORDER_YAML: &str = "\
items:
  - name: DegraPhone
    category: Electronics
    unit_price: 1000
    quantity: 4
  - name: Zip-top
    category: Clothing
    unit_price: 150
    quantity: 2
status: Platinum
payment_method: SigmaBank Card
";

    #[test]
    fn rules_from_str_preserves_file_order() -> TestResult {
        let registry = rules_from_str(RULES_YAML)?;

        let kinds: Vec<RuleKind> = registry.rules().iter().map(DiscountRule::kind).collect();

        assert_eq!(
            kinds,
            vec![
                RuleKind::Quantity,
                RuleKind::Category,
                RuleKind::TimeWindow,
                RuleKind::Newsletter,
            ]
        );

        Ok(())
    }

    #[test]
    fn rules_from_str_rejects_out_of_range_percentage() {
        let contents = "rules:\n  - type: newsletter\n    percentage: 101\n";

        let result = rules_from_str(contents);

        assert!(matches!(
            result,
            Err(ConfigError::Rule(RuleError::PercentageOutOfRange(_)))
        ));
    }

    #[test]
    fn rules_from_str_rejects_reversed_time_window() {
        let contents = "\
rules:
  - type: time_window
    start: 2023-12-05
    end: 2023-12-01
    percentage: 25
";

        let result = rules_from_str(contents);

        assert!(matches!(
            result,
            Err(ConfigError::Rule(RuleError::ReversedDateRange { .. }))
        ));
    }

    #[test]
    fn rules_from_str_rejects_unknown_rule_type() {
        let contents = "rules:\n  - type: loyalty_points\n    percentage: 5\n";

        assert!(matches!(rules_from_str(contents), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn order_from_str_builds_validated_order() -> TestResult {
        let order = order_from_str(ORDER_YAML)?;

        assert_eq!(order.line_count(), 2);
        assert_eq!(order.subtotal(), Decimal::from(4300));
        assert_eq!(order.status(), "Platinum");
        assert_eq!(order.payment_method(), "SigmaBank Card");
        assert_eq!(order.promo_code(), "");
        assert!(!order.newsletter_subscriber());

        Ok(())
    }

    #[test]
    fn order_from_str_rejects_negative_unit_price() {
        let contents = "\
items:
  - name: Refund voucher
    category: Misc
    unit_price: -5
    quantity: 1
";

        let result = order_from_str(contents);

        assert!(matches!(
            result,
            Err(ConfigError::Item(ItemError::NegativeUnitPrice(_)))
        ));
    }

    #[test]
    fn loaders_read_from_files() -> TestResult {
        let dir = tempfile::tempdir()?;

        let rules_path = dir.path().join("rules.yml");
        let order_path = dir.path().join("order.yml");

        fs::write(&rules_path, RULES_YAML)?;
        fs::write(&order_path, ORDER_YAML)?;

        let registry = rules_from_path(&rules_path)?;
        let order = order_from_path(&order_path)?;

        assert_eq!(registry.len(), 4);
        assert_eq!(order.line_count(), 2);

        Ok(())
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let result = rules_from_path("does-not-exist.yml");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn missing_file_error_renders_a_readable_message() {
        // The CLI reports errors through anyhow; the message the shell
        // sees must be the Display text, not a bare Debug dump.
        let message = rules_from_path("does-not-exist.yml")
            .map_err(anyhow::Error::from)
            .err()
            .map(|err| err.to_string())
            .unwrap_or_default();

        assert!(
            message.contains("failed to read config file"),
            "unexpected message: {message}"
        );
    }
}
