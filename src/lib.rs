//! Tally
//!
//! Tally is a storefront checkout pricing engine. It applies an ordered
//! registry of percentage discount rules to an order in two phases:
//! item-scoped rules run per line item, then order-scoped rules run
//! against the accumulated total, each fired rule compounding against the
//! running total at the moment it fires.

pub mod config;
pub mod evaluation;
pub mod items;
pub mod orders;
pub mod receipt;
pub mod registry;
pub mod rules;
