use crate::core::ledger::FilteredLedger;
use std::fmt::Write;

pub const NO_IDENTITY: &str = "No ID provided yet";

/// Stored identifier for display; empty counts as not provided.
pub fn identity_label(id: Option<&str>) -> &str {
    match id {
        Some(id) if !id.is_empty() => id,
        _ => NO_IDENTITY,
    }
}

const HEADERS: [&str; 5] = ["#", "direction", "sender", "recipient", "amount"];

/// Plain-text table of a wallet's transactions followed by its balance.
pub fn render(id: &str, ledger: &FilteredLedger) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Wallet: {id}");

    if ledger.entries.is_empty() {
        out.push_str("No transactions\n");
    } else {
        let rows: Vec<[String; 5]> = ledger
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                [
                    (i + 1).to_string(),
                    entry.direction.as_str().to_string(),
                    entry.sender.clone(),
                    entry.recipient.clone(),
                    entry.amount.to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        push_row(&mut out, &HEADERS.map(str::to_string), &widths);
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
    }

    let _ = writeln!(out, "Balance: {}", ledger.balance);
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
