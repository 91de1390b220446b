//! Discount rules

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{items::Item, orders::Order};

/// Errors that can occur while constructing a discount rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The percentage was outside the closed `[0, 100]` range.
    #[error("discount percentage {0} is outside 0..=100")]
    PercentageOutOfRange(Decimal),

    /// The time window ended before it started.
    #[error("time window ends ({end}) before it starts ({start})")]
    ReversedDateRange {
        /// First day of the window.
        start: NaiveDate,
        /// Last day of the window.
        end: NaiveDate,
    },
}

/// A discount percentage, validated to lie in the closed `[0, 100]` range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a percentage from a raw decimal value.
    ///
    /// Out-of-range values are rejected, never clamped.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the value was below 0 or above 100.
    pub fn new(value: Decimal) -> Result<Self, RuleError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(RuleError::PercentageOutOfRange(value));
        }

        Ok(Self(value))
    }

    /// Returns the raw percentage value (e.g. `15` for 15%).
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the portion of `amount` this percentage represents, unrounded.
    #[must_use]
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }
}

/// Whether a rule reads a single line item or the whole order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleScope {
    /// Evaluated per line item, against the item-level running total.
    Item,

    /// Evaluated once per order, against the order-level running total.
    Order,
}

/// Tag identifying a rule's kind, carried on trace entries and receipts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// Minimum-quantity line discount.
    Quantity,

    /// Category line discount.
    Category,

    /// Customer tier discount.
    Status,

    /// Promo code discount.
    PromoCode,

    /// Date-window discount.
    TimeWindow,

    /// Order size discount.
    OrderSize,

    /// Payment method discount.
    PaymentMethod,

    /// Newsletter subscriber discount.
    Newsletter,

    /// Browser discount.
    Browser,
}

impl RuleKind {
    /// Returns the human-readable label used on receipts.
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::Quantity => "Quantity Discount",
            RuleKind::Category => "Category Discount",
            RuleKind::Status => "Status Discount",
            RuleKind::PromoCode => "Promo Code Discount",
            RuleKind::TimeWindow => "Time Discount",
            RuleKind::OrderSize => "Order Size Discount",
            RuleKind::PaymentMethod => "Payment Method Discount",
            RuleKind::Newsletter => "Newsletter Discount",
            RuleKind::Browser => "Browser Discount",
        }
    }
}

/// One discount condition and the percentage it deducts when it fires.
///
/// The enum is closed on purpose: both evaluation phases match on it
/// exhaustively, so a new rule kind cannot be silently ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiscountRule {
    /// Fires on lines carrying at least `min_quantity` units.
    Quantity {
        /// Minimum number of units on the line.
        min_quantity: u32,
        /// Percentage deducted from the line running total.
        percent: Percent,
    },

    /// Fires on lines in the given category.
    Category {
        /// Category the line must match exactly.
        category: String,
        /// Percentage deducted from the line running total.
        percent: Percent,
    },

    /// Fires when the customer holds the given tier.
    Status {
        /// Customer tier the order must match exactly.
        status: String,
        /// Percentage deducted from the order running total.
        percent: Percent,
    },

    /// Fires when the order carries the given promo code.
    PromoCode {
        /// Promo code the order must match exactly.
        promo_code: String,
        /// Percentage deducted from the order running total.
        percent: Percent,
    },

    /// Fires when the evaluation date falls inside the window, bounds inclusive.
    TimeWindow {
        /// First day the discount applies.
        start: NaiveDate,
        /// Last day the discount applies.
        end: NaiveDate,
        /// Percentage deducted from the order running total.
        percent: Percent,
    },

    /// Fires when the order size reaches `min_size`.
    ///
    /// How the order size is measured is an evaluator policy; see
    /// [`OrderSizeBasis`](crate::evaluation::OrderSizeBasis).
    OrderSize {
        /// Minimum order size.
        min_size: u64,
        /// Percentage deducted from the order running total.
        percent: Percent,
    },

    /// Fires when the order was paid with the given method.
    PaymentMethod {
        /// Payment method the order must match exactly.
        payment_method: String,
        /// Percentage deducted from the order running total.
        percent: Percent,
    },

    /// Fires when the customer is subscribed to the newsletter.
    Newsletter {
        /// Percentage deducted from the order running total.
        percent: Percent,
    },

    /// Fires when the order was placed from the given browser.
    Browser {
        /// Browser the order must match exactly.
        browser: String,
        /// Percentage deducted from the order running total.
        percent: Percent,
    },
}

impl DiscountRule {
    /// Creates a minimum-quantity line discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn quantity(min_quantity: u32, percentage: Decimal) -> Result<Self, RuleError> {
        Ok(Self::Quantity {
            min_quantity,
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates a category line discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn category(category: impl Into<String>, percentage: Decimal) -> Result<Self, RuleError> {
        Ok(Self::Category {
            category: category.into(),
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates a customer tier discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn status(status: impl Into<String>, percentage: Decimal) -> Result<Self, RuleError> {
        Ok(Self::Status {
            status: status.into(),
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates a promo code discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn promo_code(promo_code: impl Into<String>, percentage: Decimal) -> Result<Self, RuleError> {
        Ok(Self::PromoCode {
            promo_code: promo_code.into(),
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates a date-window discount covering `start..=end`.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    /// - [`RuleError::ReversedDateRange`]: `start` was after `end`.
    pub fn time_window(
        start: NaiveDate,
        end: NaiveDate,
        percentage: Decimal,
    ) -> Result<Self, RuleError> {
        if start > end {
            return Err(RuleError::ReversedDateRange { start, end });
        }

        Ok(Self::TimeWindow {
            start,
            end,
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates an order size discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn order_size(min_size: u64, percentage: Decimal) -> Result<Self, RuleError> {
        Ok(Self::OrderSize {
            min_size,
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates a payment method discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn payment_method(
        payment_method: impl Into<String>,
        percentage: Decimal,
    ) -> Result<Self, RuleError> {
        Ok(Self::PaymentMethod {
            payment_method: payment_method.into(),
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates a newsletter subscriber discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn newsletter(percentage: Decimal) -> Result<Self, RuleError> {
        Ok(Self::Newsletter {
            percent: Percent::new(percentage)?,
        })
    }

    /// Creates a browser discount.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentageOutOfRange`]: the percentage was outside `[0, 100]`.
    pub fn browser(browser: impl Into<String>, percentage: Decimal) -> Result<Self, RuleError> {
        Ok(Self::Browser {
            browser: browser.into(),
            percent: Percent::new(percentage)?,
        })
    }

    /// Returns the scope this rule is evaluated in.
    pub fn scope(&self) -> RuleScope {
        match self {
            DiscountRule::Quantity { .. } | DiscountRule::Category { .. } => RuleScope::Item,
            DiscountRule::Status { .. }
            | DiscountRule::PromoCode { .. }
            | DiscountRule::TimeWindow { .. }
            | DiscountRule::OrderSize { .. }
            | DiscountRule::PaymentMethod { .. }
            | DiscountRule::Newsletter { .. }
            | DiscountRule::Browser { .. } => RuleScope::Order,
        }
    }

    /// Returns the kind tag for this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            DiscountRule::Quantity { .. } => RuleKind::Quantity,
            DiscountRule::Category { .. } => RuleKind::Category,
            DiscountRule::Status { .. } => RuleKind::Status,
            DiscountRule::PromoCode { .. } => RuleKind::PromoCode,
            DiscountRule::TimeWindow { .. } => RuleKind::TimeWindow,
            DiscountRule::OrderSize { .. } => RuleKind::OrderSize,
            DiscountRule::PaymentMethod { .. } => RuleKind::PaymentMethod,
            DiscountRule::Newsletter { .. } => RuleKind::Newsletter,
            DiscountRule::Browser { .. } => RuleKind::Browser,
        }
    }

    /// Returns the percentage this rule deducts when it fires.
    pub fn percent(&self) -> Percent {
        match self {
            DiscountRule::Quantity { percent, .. }
            | DiscountRule::Category { percent, .. }
            | DiscountRule::Status { percent, .. }
            | DiscountRule::PromoCode { percent, .. }
            | DiscountRule::TimeWindow { percent, .. }
            | DiscountRule::OrderSize { percent, .. }
            | DiscountRule::PaymentMethod { percent, .. }
            | DiscountRule::Newsletter { percent }
            | DiscountRule::Browser { percent, .. } => *percent,
        }
    }

    /// Returns whether this item-scoped rule fires for the given line.
    ///
    /// Order-scoped rules never fire here.
    pub fn fires_for_item(&self, item: &Item) -> bool {
        match self {
            DiscountRule::Quantity { min_quantity, .. } => item.quantity() >= *min_quantity,
            DiscountRule::Category { category, .. } => item.category() == category,
            _ => false,
        }
    }

    /// Returns whether this order-scoped rule fires for the given order.
    ///
    /// `now` is the evaluation date for time windows; `order_size` is the
    /// order's size measured under the evaluator's policy. Item-scoped
    /// rules never fire here.
    pub fn fires_for_order(&self, order: &Order, now: NaiveDate, order_size: u64) -> bool {
        match self {
            DiscountRule::Status { status, .. } => order.status() == status,
            DiscountRule::PromoCode { promo_code, .. } => order.promo_code() == promo_code,
            DiscountRule::TimeWindow { start, end, .. } => *start <= now && now <= *end,
            DiscountRule::OrderSize { min_size, .. } => order_size >= *min_size,
            DiscountRule::PaymentMethod { payment_method, .. } => {
                order.payment_method() == payment_method
            }
            DiscountRule::Newsletter { .. } => order.newsletter_subscriber(),
            DiscountRule::Browser { browser, .. } => order.browser() == browser,
            DiscountRule::Quantity { .. } | DiscountRule::Category { .. } => false,
        }
    }
}
