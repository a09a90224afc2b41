//! Column alignment for declaration lists.

/// Align rows of cells into columns separated by a single space.
///
/// Every column except the last is padded to the width of its widest cell,
/// the way gofmt lines up consecutive field and constant declarations.
/// Rows may have different lengths; trailing empty cells are dropped.
pub fn align_columns(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        // The last cell of a row never needs padding
        for (i, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let cells: Vec<&String> = {
                let end = row.iter().rposition(|c| !c.is_empty()).map_or(0, |i| i + 1);
                row[..end].iter().collect()
            };
            let mut line = String::new();
            for (i, cell) in cells.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < cells.len() {
                    let pad = widths[i] - cell.chars().count();
                    line.push_str(&" ".repeat(pad + 1));
                }
            }
            line
        })
        .collect()
}
