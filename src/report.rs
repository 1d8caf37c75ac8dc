//! Table rendering of ranked keywords.

use std::io::{self, Write};

use num_format::{Locale, ToFormattedString};

use crate::rank::RankedEntry;

const HEADERS: [&str; 3] = ["RANK", "KEYWORD", "TOTAL"];

/// Write `entries` as a bordered table with right-aligned rank and total.
///
/// Totals use `,` as the thousands separator.
pub fn render<W: Write>(entries: &[RankedEntry], out: &mut W) -> io::Result<()> {
    let rows: Vec<[String; 3]> = entries
        .iter()
        .map(|e| {
            [
                e.rank.to_string(),
                e.keyword.clone(),
                e.total.to_formatted_string(&Locale::en),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(
        out,
        "| {:>w0$} | {:<w1$} | {:>w2$} |",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    )?;
    writeln!(
        out,
        "|{}|{}|{}|",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2),
        "-".repeat(widths[2] + 2)
    )?;
    for [rank, keyword, total] in &rows {
        writeln!(
            out,
            "| {:>w0$} | {:<w1$} | {:>w2$} |",
            rank,
            keyword,
            total,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        )?;
    }
    out.flush()
}
