//! Row-level cleanup of a table. The header row is never removed or moved.

use tidy_sheets_core::Table;

/// Drop data rows where every cell is blank. Returns how many were removed.
pub fn remove_empty_rows(table: &mut Table) -> usize {
    let removed = table.remove_blank_rows();
    tracing::debug!(removed, "removed empty rows");
    removed
}

/// Drop data rows equal to an earlier data row. Returns how many were removed.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let removed = table.remove_duplicate_rows();
    tracing::debug!(removed, "removed duplicate rows");
    removed
}

/// Stable ascending sort of the data rows by column A
pub fn sort_by_first_column(table: &mut Table) {
    table.sort_by_column(0);
}
