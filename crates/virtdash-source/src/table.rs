//! Parser for the tabular text `virsh` prints.
//!
//! ```text
//!  Id   Name      State
//! ---------------------------
//!  1    web01     running
//!  -    db01      shut off
//!
//! ```
//!
//! Cells are separated by runs of two or more spaces, so single spaces
//! inside a value ("shut off") survive.

/// Split one line into cells on runs of at least two spaces.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split("  ")
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns true for the dashed rule under the header.
fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-')
}

/// Extract the data rows of a table.
///
/// Everything up to and including the dashed separator is header. Output
/// without a separator (as from `virsh -q`) is all data. Blank lines are
/// dropped wherever they occur.
pub fn parse_rows(output: &str) -> Vec<Vec<String>> {
    let lines: Vec<&str> = output.lines().collect();
    let body = match lines.iter().position(|line| is_separator(line)) {
        Some(idx) => &lines[idx + 1..],
        None => &lines[..],
    };

    body.iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_cells(line))
        .collect()
}

/// Interpret a `yes`/`no` cell.
pub fn parse_flag(cell: &str) -> bool {
    matches!(cell.trim().to_ascii_lowercase().as_str(), "yes" | "enabled" | "true")
}
