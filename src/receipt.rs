//! Receipt rendering

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{evaluation::Evaluation, items::Item, orders::Order};

/// Errors that can occur while writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The receipt could not be written to the output.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// Writes an evaluation as a text receipt: one row per line item, one row
/// per fired rule, then the subtotal, savings and final total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the receipt cannot be written to `out`.
pub fn write_receipt(
    out: &mut impl io::Write,
    order: &Order,
    evaluation: &Evaluation,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Amount"]);

    for item in order.items() {
        builder.push_record([
            item.name().to_string(),
            quantity_cell(item),
            format!("{:.2}", item.line_total()),
        ]);
    }

    let discounts_row = order.items().len() + 1;

    for entry in evaluation.trace() {
        let label = match entry.item() {
            Some(item) => format!("{} ({item})", entry.kind().label()),
            None => entry.kind().label().to_string(),
        };

        builder.push_record([label, String::new(), format!("-{:.2}", entry.amount())]);
    }

    let summary_row = discounts_row + evaluation.trace().len();

    builder.push_record([
        "Subtotal".to_string(),
        String::new(),
        format!("{:.2}", evaluation.subtotal()),
    ]);

    builder.push_record([
        "Savings".to_string(),
        String::new(),
        format!("{:.2}", evaluation.savings()),
    ]);

    builder.push_record([
        "Total".to_string(),
        String::new(),
        format!("{:.2}", evaluation.final_total()),
    ]);

    let mut table = builder.build();

    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    if !evaluation.trace().is_empty() {
        theme.insert_horizontal_line(discounts_row, separator);
    }

    theme.insert_horizontal_line(summary_row, separator);

    table.with(theme);
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn quantity_cell(item: &Item) -> String {
    format!("{} x {:.2}", item.quantity(), item.unit_price())
}
