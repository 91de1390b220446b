//! Rule registry

use crate::rules::DiscountRule;

/// An append-only, insertion-ordered collection of discount rules.
///
/// Iteration order equals insertion order, and that order is the tie-break
/// for how compounding discounts interact: rules earlier in the registry
/// discount a larger running total than later ones. Duplicate rules are
/// legal and fire independently.
///
/// Registries are built once and treated as read-only for the lifetime of
/// any evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleRegistry {
    rules: Vec<DiscountRule>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to the end of the registry.
    pub fn add(&mut self, rule: DiscountRule) {
        self.rules.push(rule);
    }

    /// Returns the rules in insertion order.
    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Returns the number of rules in the registry.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the registry holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Extend<DiscountRule> for RuleRegistry {
    fn extend<I: IntoIterator<Item = DiscountRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl FromIterator<DiscountRule> for RuleRegistry {
    fn from_iter<I: IntoIterator<Item = DiscountRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleRegistry {
    type Item = &'a DiscountRule;
    type IntoIter = std::slice::Iter<'a, DiscountRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
