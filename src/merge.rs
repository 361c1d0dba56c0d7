use crate::model::{ClassificationResult, Document, StatementType, Table, cell_text};
use crate::quality::filter_tables;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatementTable {
    pub page: u32,
    pub statement: StatementType,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MergedOutput {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub table_count: usize,
    pub row_count: usize,
}

/// Statement-sized tables of every detected page, in page order.
pub(crate) fn collect_statement_tables(
    document: &Document,
    result: &ClassificationResult,
) -> Vec<StatementTable> {
    document
        .pages()
        .iter()
        .filter_map(|page| {
            result
                .page_type(page.page_number)
                .map(|statement| (page, statement))
        })
        .flat_map(|(page, statement)| {
            filter_tables(&page.tables)
                .into_iter()
                .map(move |table| StatementTable {
                    page: page.page_number,
                    statement,
                    table,
                })
        })
        .collect()
}

/// One schema for all tables: `page,statement,table_id,col_1..col_n`, padded to the widest row.
pub(crate) fn merge_tables(tables: &[StatementTable]) -> MergedOutput {
    let width = tables
        .iter()
        .flat_map(|entry| entry.table.rows.iter().map(Vec::len))
        .max()
        .unwrap_or(0);

    let mut headers = vec![
        "page".to_string(),
        "statement".to_string(),
        "table_id".to_string(),
    ];
    headers.extend((1..=width).map(|index| format!("col_{index}")));

    let mut rows = Vec::new();
    for (index, entry) in tables.iter().enumerate() {
        for data_row in &entry.table.rows {
            let mut row = Vec::with_capacity(width + 3);
            row.push(entry.page.to_string());
            row.push(entry.statement.as_str().to_string());
            row.push((index + 1).to_string());
            row.extend(
                data_row
                    .iter()
                    .map(|cell| cell_text(cell).unwrap_or_default().to_string()),
            );
            row.resize(width + 3, String::new());
            rows.push(row);
        }
    }

    MergedOutput {
        headers,
        row_count: rows.len(),
        table_count: tables.len(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use crate::merge::{StatementTable, collect_statement_tables, merge_tables};
    use crate::model::{
        ClassificationResult, DetectionOrigin, Document, Page, StatementType, Table,
    };

    fn five_rows(label: &str) -> Table {
        Table::from_text_rows((0..5).map(|row| vec![format!("{label}{row}"), "1,000".to_string()]))
    }

    #[test]
    fn merges_and_pads_rows_to_global_schema() {
        let tables = vec![StatementTable {
            page: 4,
            statement: StatementType::CashFlow,
            table: Table::from_text_rows([vec!["영업활동", "100", "90"], vec!["투자활동", "", ""]]),
        }];

        let merged = merge_tables(&tables);
        assert_eq!(
            merged.headers,
            vec!["page", "statement", "table_id", "col_1", "col_2", "col_3"]
        );
        assert_eq!(merged.rows[1], vec!["4", "cash_flow", "1", "투자활동", "", ""]);
        assert_eq!(merged.row_count, 2);
    }

    #[test]
    fn collects_only_detected_pages_and_qualifying_tables() {
        let document = Document::new(vec![
            Page {
                page_number: 1,
                tables: vec![five_rows("a")],
                text: String::new(),
            },
            Page {
                page_number: 2,
                tables: vec![five_rows("b"), Table::from_text_rows([vec!["x", "y"]])],
                text: String::new(),
            },
        ]);
        let mut result = ClassificationResult::default();
        result.insert(2, StatementType::BalanceSheet, DetectionOrigin::Primary);

        let tables = collect_statement_tables(&document, &result);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].page, 2);
        assert_eq!(tables[0].table, five_rows("b"));
    }
}
