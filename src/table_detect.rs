use crate::model::Table;
use crate::table_parse::{normalize_rows, split_line_into_cells, split_statement_line};

const MIN_ROW_CELLS: usize = 2;
const MIN_TABLE_ROWS: usize = 2;
/// Label-only lines held while waiting for the next amount row.
const MAX_PENDING_LABELS: usize = 3;
const MAX_LABEL_CHARS: usize = 40;

fn looks_like_sentence(line: &str) -> bool {
    ['.', '!', '?', '。']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation))
}

fn row_cells(line: &str) -> Vec<String> {
    let cells = split_line_into_cells(line);
    if cells.len() >= MIN_ROW_CELLS {
        return cells;
    }
    split_statement_line(line)
}

fn is_section_label(line: &str) -> bool {
    !looks_like_sentence(line) && line.chars().count() <= MAX_LABEL_CHARS
}

fn flush(rows: &mut Vec<Vec<String>>, pending: &mut Vec<String>, tables: &mut Vec<Table>) {
    pending.clear();
    if rows.len() < MIN_TABLE_ROWS {
        rows.clear();
        return;
    }

    let rows = std::mem::take(rows);
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    tables.push(Table::new(normalize_rows(rows, width)));
}

/// Rebuilds tables from the extracted text of one page.
///
/// Consecutive multi-cell lines form a table. Short label-only lines between
/// them (section headings such as `유동자산`) are kept as one-cell rows; blank
/// lines and prose end the table.
pub(crate) fn detect_tables_in_text(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut rows, &mut pending, &mut tables);
            continue;
        }

        let cells = row_cells(line);
        if cells.len() >= MIN_ROW_CELLS && !looks_like_sentence(line) {
            rows.extend(pending.drain(..).map(|label| vec![label]));
            rows.push(cells);
            continue;
        }

        if !rows.is_empty() && is_section_label(line) && pending.len() < MAX_PENDING_LABELS {
            pending.push(line.to_string());
            continue;
        }

        flush(&mut rows, &mut pending, &mut tables);
    }

    flush(&mut rows, &mut pending, &mut tables);
    tables
}
