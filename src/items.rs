//! Line items

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while constructing an item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// The unit price was below zero.
    #[error("unit price {0} is negative")]
    NegativeUnitPrice(Decimal),
}

/// A single order line: a named product, its category, a unit price and a quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    name: String,
    category: String,
    unit_price: Decimal,
    quantity: u32,
}

impl Item {
    /// Creates a new item.
    ///
    /// # Errors
    ///
    /// - [`ItemError::NegativeUnitPrice`]: the unit price was below zero.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self, ItemError> {
        if unit_price < Decimal::ZERO {
            return Err(ItemError::NegativeUnitPrice(unit_price));
        }

        Ok(Self {
            name: name.into(),
            category: category.into(),
            unit_price,
            quantity,
        })
    }

    /// Returns the product name of the item.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the category of the item.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the price of a single unit.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Returns the number of units on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the price of the whole line before any discounts.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
