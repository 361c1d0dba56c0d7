use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Cell, Table, cell_text};

/// Share of a column's body cells that must be numeric for the column to count as numeric.
const NUMERIC_COLUMN_SHARE: f64 = 0.7;
/// Share of a numeric column's values that must carry a thousands separator.
const SEPARATOR_SHARE: f64 = 0.7;

static NUMERIC_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9+\-]+$").expect("hardcoded numeric cell regex is valid")
});

/// True for bare amounts such as `1,234`, `-56.7` or `+3`.
pub(crate) fn is_numeric_text(text: &str) -> bool {
    let body = text
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '.'))
        .collect::<String>();
    NUMERIC_BODY.is_match(&body)
}

pub(crate) fn is_numeric_cell(cell: &Cell) -> bool {
    cell_text(cell).is_some_and(is_numeric_text)
}

/// Fraction of present cells across `tables` that hold a bare number. Always in `[0, 1]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn numeric_ratio(tables: &[Table]) -> f64 {
    let mut total = 0_usize;
    let mut numeric = 0_usize;

    for cell in tables.iter().flat_map(|table| table.rows.iter().flatten()) {
        let Some(text) = cell_text(cell) else {
            continue;
        };
        total += 1;
        if is_numeric_text(text) {
            numeric += 1;
        }
    }

    if total == 0 {
        0.0
    } else {
        numeric as f64 / total as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnPattern {
    Numeric,
    Text,
}

/// Classifies every header column by the majority type of the cells below the header.
/// Tables without a body row yield no patterns.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn column_patterns(table: &Table) -> Vec<ColumnPattern> {
    if table.row_count() < 2 {
        return Vec::new();
    }

    (0..table.header_width())
        .map(|column| {
            let values = table.rows[1..]
                .iter()
                .filter_map(|row| row.get(column))
                .collect::<Vec<_>>();
            let numeric = values.iter().filter(|cell| is_numeric_cell(cell)).count();
            if !values.is_empty() && numeric as f64 / values.len() as f64 > NUMERIC_COLUMN_SHARE {
                ColumnPattern::Numeric
            } else {
                ColumnPattern::Text
            }
        })
        .collect()
}

/// Scores how much the numeric columns look like deliberately formatted amounts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn numeric_quality(table: &Table) -> f64 {
    if table.row_count() < 3 {
        return 0.0;
    }

    let numeric_columns = column_patterns(table)
        .into_iter()
        .enumerate()
        .filter(|(_, pattern)| *pattern == ColumnPattern::Numeric)
        .map(|(column, _)| column)
        .collect::<Vec<_>>();
    if numeric_columns.is_empty() {
        return 0.0;
    }

    let well_formatted = numeric_columns
        .iter()
        .filter(|&&column| {
            let values = table.rows[1..]
                .iter()
                .filter_map(|row| row.get(column).and_then(cell_text))
                .collect::<Vec<_>>();
            let separated = values.iter().filter(|value| value.contains(',')).count();
            !values.is_empty() && separated as f64 > values.len() as f64 * SEPARATOR_SHARE
        })
        .count();

    let score =
        (numeric_columns.len() + well_formatted) as f64 / (table.header_width() + 2) as f64;
    score.min(1.0)
}
