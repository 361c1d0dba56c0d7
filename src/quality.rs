use crate::model::Table;

const MIN_TABLE_ROWS: usize = 5;
const MIN_HEADER_COLUMNS: usize = 2;

/// Keeps tables large enough to be a statement: at least five rows and a header
/// of at least two columns. Legends, titles and footnote boxes fall out here.
#[must_use]
pub fn filter_tables(tables: &[Table]) -> Vec<Table> {
    tables.iter().filter(|table| is_statement_sized(table)).cloned().collect()
}

pub(crate) fn is_statement_sized(table: &Table) -> bool {
    table.row_count() >= MIN_TABLE_ROWS && table.header_width() >= MIN_HEADER_COLUMNS
}

#[cfg(test)]
mod tests {
    use super::filter_tables;
    use crate::model::Table;

    fn table(rows: usize, columns: usize) -> Table {
        Table::from_text_rows((0..rows).map(|row| {
            (0..columns)
                .map(|column| format!("{row}-{column}"))
                .collect::<Vec<_>>()
        }))
    }

    #[test]
    fn drops_short_and_narrow_tables() {
        let kept = filter_tables(&[table(6, 3), table(4, 3), table(8, 1), table(5, 2)]);
        assert_eq!(kept, vec![table(6, 3), table(5, 2)]);
    }

    #[test]
    fn header_width_decides_not_body_width() {
        let mut narrow_header = table(6, 3);
        narrow_header.rows[0].truncate(1);
        assert!(filter_tables(&[narrow_header]).is_empty());
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let tables = vec![table(2, 2), table(7, 4), table(5, 5), table(9, 1)];
        let once = filter_tables(&tables);
        assert_eq!(filter_tables(&once), once);
    }
}
