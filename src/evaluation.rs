//! Evaluation
//!
//! The two-phase pricing pass: item-scoped rules run per line against the
//! line running total, then order-scoped rules run against the accumulated
//! order total, all in registry order. Every fired rule deducts a
//! percentage of the running total at the moment it fires, so discounts
//! compound multiplicatively rather than stacking against a fixed base.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::{
    orders::Order,
    registry::RuleRegistry,
    rules::{RuleKind, RuleScope},
};

/// How an order-size rule measures the order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderSizeBasis {
    /// Sum of unit quantities across all lines.
    #[default]
    TotalQuantity,

    /// Number of distinct lines, regardless of their quantities.
    DistinctLines,
}

/// A record of one fired rule and the amount it deducted.
///
/// Amounts are rounded to two fractional digits for reporting; the running
/// totals the evaluator compounds on stay unrounded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    kind: RuleKind,
    item: Option<String>,
    amount: Decimal,
}

impl TraceEntry {
    fn item_scoped(kind: RuleKind, item: &str, deduction: Decimal) -> Self {
        Self {
            kind,
            item: Some(item.to_string()),
            amount: round_for_reporting(deduction),
        }
    }

    fn order_scoped(kind: RuleKind, deduction: Decimal) -> Self {
        Self {
            kind,
            item: None,
            amount: round_for_reporting(deduction),
        }
    }

    /// Returns the kind of the rule that fired.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Returns the name of the line item the rule fired on, if the rule was
    /// item-scoped.
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    /// Returns the amount deducted, rounded to two fractional digits.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// The outcome of evaluating one order against a rule registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    subtotal: Decimal,
    final_total: Decimal,
    trace: Vec<TraceEntry>,
}

impl Evaluation {
    /// Returns the order total before any discounts.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Returns the order total after all discounts, rounded to two
    /// fractional digits for reporting.
    pub fn final_total(&self) -> Decimal {
        self.final_total
    }

    /// Returns the total amount saved across all fired rules.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.subtotal - self.final_total
    }

    /// Returns the fired rules in firing order.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }
}

/// Applies every rule in the registry to the order and returns the
/// discounted total with an audit trace.
///
/// `now` is supplied by the caller rather than read from a system clock,
/// so time-window rules evaluate reproducibly. Order-size rules measure
/// the order by total unit quantity; use [`evaluate_with`] to choose a
/// different basis.
///
/// An order matching zero rules is not an error: the trace is empty and
/// the total equals the subtotal.
#[must_use]
pub fn evaluate(order: &Order, registry: &RuleRegistry, now: NaiveDate) -> Evaluation {
    evaluate_with(order, registry, now, OrderSizeBasis::default())
}

/// Same as [`evaluate`], with an explicit order-size measurement policy.
#[must_use]
pub fn evaluate_with(
    order: &Order,
    registry: &RuleRegistry,
    now: NaiveDate,
    basis: OrderSizeBasis,
) -> Evaluation {
    let mut trace = Vec::new();
    let mut order_total = Decimal::ZERO;

    // Phase 1: line rules, one registry pass per item.
    for item in order.items() {
        let mut line_total = item.line_total();

        for rule in registry {
            if rule.scope() != RuleScope::Item || !rule.fires_for_item(item) {
                continue;
            }

            let deduction = rule.percent().of(line_total);
            line_total -= deduction;

            debug!(kind = ?rule.kind(), item = item.name(), %deduction, "line rule fired");

            trace.push(TraceEntry::item_scoped(rule.kind(), item.name(), deduction));
        }

        order_total += line_total;
    }

    let order_size = match basis {
        OrderSizeBasis::TotalQuantity => order.total_quantity(),
        OrderSizeBasis::DistinctLines => u64::try_from(order.line_count()).unwrap_or(u64::MAX),
    };

    // Phase 2: order rules against the accumulated total.
    for rule in registry {
        if rule.scope() != RuleScope::Order || !rule.fires_for_order(order, now, order_size) {
            continue;
        }

        let deduction = rule.percent().of(order_total);
        order_total -= deduction;

        debug!(kind = ?rule.kind(), %deduction, "order rule fired");

        trace.push(TraceEntry::order_scoped(rule.kind(), deduction));
    }

    Evaluation {
        subtotal: order.subtotal(),
        final_total: round_for_reporting(order_total),
        trace,
    }
}

/// Rounds a monetary amount to two fractional digits for reporting.
fn round_for_reporting(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
