use chrono::NaiveDate;

use crate::screening::types::EvaluatedScreening;

/// Placeholder for a cell that does not apply to the row
pub const NOT_APPLICABLE: &str = "—";

/// Format an optional date, or the placeholder
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

pub fn format_importance(screening: &EvaluatedScreening) -> String {
    screening
        .importance()
        .map(|i| i.to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

pub fn format_yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Cells of one screening row: name, importance, last done, next available
pub fn screening_cells(screening: &EvaluatedScreening) -> [String; 4] {
    [
        screening.name.clone(),
        format_importance(screening),
        format_date(screening.last_done()),
        format_date(screening.next_due()),
    ]
}

/// Pad each cell to its column width, measured in characters
pub fn pad_row(cells: &[&str], widths: &[usize]) -> String {
    let mut row = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        let len = cell.chars().count();
        row.push_str(cell);
        row.push_str(&" ".repeat(width.saturating_sub(len) + 2));
    }
    row.trim_end().to_string()
}
