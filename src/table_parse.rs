use crate::model::Cell;

/// Labels longer than this many words read as prose, not as a line item.
const MAX_LABEL_WORDS: usize = 8;

/// Splits on tabs and runs of two or more spaces, the way column gaps survive
/// text extraction.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    for ch in trimmed.chars() {
        if ch == '\t' || (ch.is_whitespace() && whitespace_run >= 1) {
            if !current.trim().is_empty() {
                cells.push(current.trim().to_string());
            }
            current.clear();
            whitespace_run += 1;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            current.push(' ');
            continue;
        }

        whitespace_run = 0;
        current.push(ch);
    }

    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }

    cells
}

/// `1,234`, `(1,234)`, `-12.5` and lone dashes used for nil amounts.
pub(crate) fn is_amount_token(token: &str) -> bool {
    if matches!(token, "-" | "–" | "—") {
        return true;
    }

    let body = token
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(token);
    body.chars().any(|ch| ch.is_ascii_digit())
        && body
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, ',' | '.' | '-' | '+'))
}

/// Splits a single-spaced statement line into its label and trailing amounts:
/// `유동자산 1,200 (300)` becomes `["유동자산", "1,200", "(300)"]`. Lines without
/// trailing amounts come back as one cell.
pub(crate) fn split_statement_line(line: &str) -> Vec<String> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let label_len = tokens
        .iter()
        .rposition(|token| !is_amount_token(token))
        .map_or(0, |index| index + 1);

    let (label, amounts) = tokens.split_at(label_len);
    if amounts.is_empty() || label.len() > MAX_LABEL_WORDS {
        return if tokens.is_empty() {
            Vec::new()
        } else {
            vec![tokens.join(" ")]
        };
    }

    let mut cells = Vec::with_capacity(amounts.len() + 1);
    if !label.is_empty() {
        cells.push(label.join(" "));
    }
    cells.extend(amounts.iter().map(|amount| (*amount).to_string()));
    cells
}

/// Pads rows to `width`, storing blank text as absent cells.
pub(crate) fn normalize_rows(rows: Vec<Vec<String>>, width: usize) -> Vec<Vec<Cell>> {
    rows.into_iter()
        .map(|row| {
            let mut out = row
                .into_iter()
                .map(|cell| if cell.trim().is_empty() { None } else { Some(cell) })
                .collect::<Vec<_>>();
            out.resize(width, None);
            out
        })
        .collect()
}
