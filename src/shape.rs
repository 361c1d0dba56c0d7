use crate::model::{StatementType, Table};

const ASSET_TERMS: &[&str] = &["자산", "assets"];
const LIABILITY_TERMS: &[&str] = &["부채", "liabilities"];
const EQUITY_TERMS: &[&str] = &["자본", "equity"];

const REVENUE_TERMS: &[&str] = &["매출", "revenue", "sales"];
const PROFIT_TERMS: &[&str] = &["이익", "당기순", "profit", "net income"];
const EXPENSE_TERMS: &[&str] = &["비용", "원가", "expense", "cost of"];

const OPERATING_TERMS: &[&str] = &["영업활동", "operating activities"];
const INVESTING_TERMS: &[&str] = &["투자활동", "investing activities"];
const FINANCING_TERMS: &[&str] = &["재무활동", "financing activities"];

const CAPITAL_TERMS: &[&str] = &["자본금", "잉여금", "capital", "surplus", "retained earnings"];
const BALANCE_TERMS: &[&str] = &["기초", "기말", "beginning", "ending", "balance at"];

const MIN_SHAPE_ROWS: usize = 3;
const MIN_MATRIX_COLUMNS: usize = 3;

fn mentions(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

fn first_row_mentioning(cells: &[String], terms: &[&str]) -> Option<usize> {
    cells.iter().position(|cell| mentions(cell, terms))
}

/// Whether the primary table is laid out like `statement`.
#[must_use]
pub fn has_statement_shape(statement: StatementType, table: &Table) -> bool {
    match statement {
        StatementType::BalanceSheet => has_balance_sheet_shape(table),
        StatementType::IncomeStatement => has_income_statement_shape(table),
        StatementType::CashFlow => has_cash_flow_shape(table),
        StatementType::EquityStatement => has_equity_statement_shape(table),
    }
}

/// Assets in the row labels, plus liabilities or equity.
fn has_balance_sheet_shape(table: &Table) -> bool {
    if table.row_count() < MIN_SHAPE_ROWS {
        return false;
    }

    let labels = table.first_column().join(" ");
    mentions(&labels, ASSET_TERMS)
        && (mentions(&labels, LIABILITY_TERMS) || mentions(&labels, EQUITY_TERMS))
}

/// Revenue in the row labels, plus profit or expense lines. When a profit line is
/// present, revenue must appear on an earlier row.
fn has_income_statement_shape(table: &Table) -> bool {
    if table.row_count() < MIN_SHAPE_ROWS {
        return false;
    }

    let labels = table.first_column();
    let Some(revenue_row) = first_row_mentioning(&labels, REVENUE_TERMS) else {
        return false;
    };

    match first_row_mentioning(&labels, PROFIT_TERMS) {
        Some(profit_row) => revenue_row < profit_row,
        None => first_row_mentioning(&labels, EXPENSE_TERMS).is_some(),
    }
}

/// At least two of the operating/investing/financing sections.
fn has_cash_flow_shape(table: &Table) -> bool {
    if table.row_count() < MIN_SHAPE_ROWS {
        return false;
    }

    let labels = table.first_column().join(" ");
    let sections = [OPERATING_TERMS, INVESTING_TERMS, FINANCING_TERMS]
        .into_iter()
        .filter(|terms| mentions(&labels, terms))
        .count();
    sections >= 2
}

/// A roll-forward matrix: equity components across the header, opening and
/// closing balances down the first column.
fn has_equity_statement_shape(table: &Table) -> bool {
    if table.row_count() < MIN_SHAPE_ROWS || table.header_width() < MIN_MATRIX_COLUMNS {
        return false;
    }

    let header = table.header_row().join(" ");
    let labels = table.first_column().join(" ");
    mentions(&header, CAPITAL_TERMS) && mentions(&labels, BALANCE_TERMS)
}

#[cfg(test)]
mod tests {
    use super::has_statement_shape;
    use crate::model::{StatementType, Table};

    fn labelled(labels: &[&str]) -> Table {
        Table::from_text_rows(labels.iter().map(|label| vec![*label, "1,000", "900"]))
    }

    #[test]
    fn balance_sheet_needs_assets_and_claims() {
        let table = labelled(&["과목", "유동자산", "비유동자산", "유동부채", "자본금"]);
        assert!(has_statement_shape(StatementType::BalanceSheet, &table));

        let assets_only = labelled(&["과목", "유동자산", "비유동자산", "재고"]);
        assert!(!has_statement_shape(StatementType::BalanceSheet, &assets_only));
    }

    #[test]
    fn income_statement_requires_revenue_before_profit() {
        let ordered = labelled(&["Item", "Revenue", "Cost of sales", "Gross profit"]);
        assert!(has_statement_shape(StatementType::IncomeStatement, &ordered));

        let reversed = labelled(&["Item", "Operating profit", "Other", "Revenue"]);
        assert!(!has_statement_shape(StatementType::IncomeStatement, &reversed));
    }

    #[test]
    fn income_statement_accepts_revenue_with_expenses_only() {
        let table = labelled(&["과목", "매출액", "매출원가", "판매비"]);
        assert!(has_statement_shape(StatementType::IncomeStatement, &table));
    }

    #[test]
    fn cash_flow_needs_two_activity_sections() {
        let table = labelled(&["과목", "영업활동현금흐름", "투자활동현금흐름", "기말현금"]);
        assert!(has_statement_shape(StatementType::CashFlow, &table));

        let single = labelled(&["과목", "영업활동현금흐름", "이자지급", "기말현금"]);
        assert!(!has_statement_shape(StatementType::CashFlow, &single));
    }

    #[test]
    fn equity_statement_needs_matrix_layout() {
        let matrix = Table::from_text_rows([
            vec!["구분", "자본금", "이익잉여금", "총계"],
            vec!["기초잔액", "100", "200", "300"],
            vec!["배당", "", "-50", "-50"],
            vec!["기말잔액", "100", "150", "250"],
        ]);
        assert!(has_statement_shape(StatementType::EquityStatement, &matrix));

        let narrow = Table::from_text_rows([
            vec!["구분", "자본금"],
            vec!["기초잔액", "100"],
            vec!["기말잔액", "100"],
        ]);
        assert!(!has_statement_shape(StatementType::EquityStatement, &narrow));
    }
}
