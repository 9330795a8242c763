use colored::Colorize;

use crate::{
    report::formatters::screening_cells,
    screening::types::{labels, EvaluatedScreening},
};

const SCREENING_COLUMNS: [usize; 4] = [36, 10, 12, 14];

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}

/// Print one result bucket under a heading, or "None" when it is empty
pub fn print_screening_bucket(title: &str, screenings: &[EvaluatedScreening]) {
    println!("\n{}", title.cyan().bold());

    if screenings.is_empty() {
        println!("  {}", "None".dimmed());
        return;
    }

    let width = SCREENING_COLUMNS.iter().sum::<usize>() + 2 * (SCREENING_COLUMNS.len() - 1);
    print_table_border(width);
    print_table_row(
        &[
            labels::SCREENING,
            labels::IMPORTANCE,
            labels::LAST_DONE,
            labels::NEXT_AVAILABLE,
        ],
        &SCREENING_COLUMNS,
    );
    print_table_border(width);

    for screening in screenings {
        let cells = screening_cells(screening);
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        print_table_row(&cells, &SCREENING_COLUMNS);
    }
    print_table_border(width);
}
