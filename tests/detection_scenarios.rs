use pretty_assertions::assert_eq;
use statement_pages::{
    ClassificationResult, DetectionOrigin, DetectionThresholds, Document, Page, PageScore,
    StatementType, Table, best_candidate, detect, score_page,
};

fn amounts_table(labels: &[&str]) -> Table {
    Table::from_text_rows(labels.iter().enumerate().map(|(row, label)| {
        vec![
            (*label).to_string(),
            format!("{},{:03}", row + 1, row * 110),
            format!("{},{:03}", row + 1, row * 90),
        ]
    }))
}

fn page(page_number: u32, text: &str, tables: Vec<Table>) -> Page {
    Page {
        page_number,
        tables,
        text: text.to_string(),
    }
}

fn text_page(page_number: u32, text: &str) -> Page {
    page(page_number, text, Vec::new())
}

fn balance_sheet(page_number: u32) -> Page {
    page(
        page_number,
        "재무상태표\n제 10 기 2024년 12월 31일 현재",
        vec![Table::from_text_rows([
            vec!["총자산", "5,000", "4,500"],
            vec!["유동자산", "2,000", "1,800"],
            vec!["비유동자산", "3,000", "2,700"],
            vec!["유동부채", "1,000", "900"],
            vec!["비유동부채", "500", "400"],
            vec!["자본금", "3,500", "3,200"],
        ])],
    )
}

/// Same layout as the balance sheet, but with labels no indicator knows.
fn marked_continuation(page_number: u32) -> Page {
    page(
        page_number,
        "(계속)",
        vec![amounts_table(&["항목1", "항목2", "항목3", "항목4", "항목5", "항목6"])],
    )
}

fn legend(page_number: u32) -> Page {
    page(
        page_number,
        "목차 재무상태표 손익계산서 현금흐름표 자본변동표",
        vec![Table::from_text_rows([
            vec!["재무상태표", "손익계산서"],
            vec!["현금흐름표", "자본변동표"],
        ])],
    )
}

fn weak_cash_flow(page_number: u32) -> Page {
    page(
        page_number,
        "현금흐름표",
        vec![amounts_table(&[
            "영업활동현금흐름",
            "투자활동현금흐름",
            "재무활동현금흐름",
            "기타1",
            "기타2",
            "기타3",
        ])],
    )
}

fn english_income_statement(page_number: u32) -> Page {
    page(
        page_number,
        "Statement of Comprehensive Income",
        vec![Table::from_text_rows([
            vec!["Revenue", "12,000", "11,000"],
            vec!["Cost of sales", "7,000", "6,500"],
            vec!["Gross profit", "5,000", "4,500"],
            vec!["Operating profit", "2,000", "1,800"],
            vec!["Net income", "1,500", "1,300"],
        ])],
    )
}

fn annual_report() -> Document {
    Document::new(vec![
        text_page(1, "2024 사업보고서"),
        legend(2),
        balance_sheet(3),
        marked_continuation(4),
        text_page(5, "주석 1. 일반사항"),
        weak_cash_flow(6),
        english_income_statement(7),
    ])
}

fn at(sensitivity: i32, document: &Document) -> ClassificationResult {
    detect(document, &DetectionThresholds::from_sensitivity(sensitivity))
}

fn is_subset(smaller: &ClassificationResult, larger: &ClassificationResult) -> bool {
    smaller
        .iter()
        .all(|(page, entry)| larger.page_type(page) == Some(entry.statement))
}

#[test]
fn korean_balance_sheet_is_detected() {
    let document = Document::new(vec![
        text_page(1, "감사보고서"),
        text_page(2, "독립된 감사인의 감사보고서"),
        balance_sheet(3),
    ]);

    let result = at(5, &document);
    assert_eq!(result.detected_pages(), vec![3]);
    assert_eq!(result.page_type(3), Some(StatementType::BalanceSheet));
}

#[test]
fn marked_page_continues_previous_statement() {
    let document = Document::new(vec![balance_sheet(3), marked_continuation(4)]);

    let result = at(5, &document);
    assert_eq!(result.detected_pages(), vec![3, 4]);
    let entry = result.classification(4).expect("page 4 should be detected");
    assert_eq!(entry.statement, StatementType::BalanceSheet);
    assert_eq!(entry.origin, DetectionOrigin::Continuation);
}

#[test]
fn legend_pages_are_never_detected() {
    let document = Document::new(vec![legend(1)]);
    for sensitivity in 1..=10 {
        assert!(at(sensitivity, &document).is_empty());
    }
}

#[test]
fn annual_report_at_default_sensitivity() {
    let result = at(5, &annual_report());

    assert_eq!(result.detected_pages(), vec![3, 4, 6, 7]);
    assert_eq!(result.page_type(4), Some(StatementType::BalanceSheet));
    assert_eq!(result.page_type(6), Some(StatementType::CashFlow));
    assert_eq!(result.page_type(7), Some(StatementType::IncomeStatement));
}

#[test]
fn stricter_sensitivity_never_adds_pages() {
    let document = annual_report();

    let default = at(5, &document);
    let strict = at(9, &document);
    assert_eq!(strict.detected_pages(), vec![3, 4, 7]);
    assert!(is_subset(&strict, &default));

    for sensitivity in 1..10 {
        let looser = at(sensitivity, &document);
        let stricter = at(sensitivity + 1, &document);
        assert!(
            is_subset(&stricter, &looser),
            "sensitivity {} found pages missing at {sensitivity}",
            sensitivity + 1
        );
    }
}

#[test]
fn equal_scores_resolve_to_the_earlier_statement_type() {
    let score = PageScore {
        page_number: 5,
        scores: [3, 12, 12, 12],
        matched_accounts: [1, 4, 4, 4],
        numeric_ratio: 0.6,
    };
    assert_eq!(best_candidate(&score), (StatementType::IncomeStatement, 12));
}

#[test]
fn page_tied_between_income_and_cash_flow_is_an_income_statement() {
    let tied = page(
        5,
        "",
        vec![amounts_table(&[
            "영업이익",
            "매출액",
            "매출원가",
            "영업활동현금흐름",
            "이자지급",
            "이자수취",
        ])],
    );

    let score = score_page(5, &tied.text, &tied.tables);
    assert_eq!(score.matched_accounts(StatementType::IncomeStatement), 3);
    assert_eq!(score.matched_accounts(StatementType::CashFlow), 3);
    assert_eq!(
        score.score(StatementType::IncomeStatement),
        score.score(StatementType::CashFlow)
    );
    assert_eq!(best_candidate(&score).0, StatementType::IncomeStatement);

    let result = at(5, &Document::new(vec![tied]));
    assert_eq!(result.page_type(5), Some(StatementType::IncomeStatement));
}

#[test]
fn detection_is_deterministic() {
    let document = annual_report();
    let first = at(5, &document);
    for _ in 0..5 {
        assert_eq!(at(5, &document), first);
    }
}

#[test]
fn continuation_requires_a_detected_previous_page() {
    let document = Document::new(vec![text_page(3, "재무상태표"), marked_continuation(4)]);
    assert!(at(5, &document).is_empty());
}

#[test]
fn continuation_never_looks_ahead() {
    let document = Document::new(vec![marked_continuation(2), balance_sheet(3)]);
    assert_eq!(at(5, &document).detected_pages(), vec![3]);
}

#[test]
fn continuation_requires_consecutive_page_numbers() {
    let document = Document::new(vec![balance_sheet(3), marked_continuation(5)]);
    assert_eq!(at(5, &document).detected_pages(), vec![3]);
}

#[test]
fn continuation_pages_do_not_anchor_further_pages() {
    let document = Document::new(vec![
        balance_sheet(3),
        marked_continuation(4),
        marked_continuation(5),
    ]);

    let result = at(5, &document);
    assert_eq!(result.detected_pages(), vec![3, 4]);
    assert_eq!(result.page_type(4), Some(StatementType::BalanceSheet));
}

#[test]
fn anchor_changing_type_keeps_sensitivity_monotonic() {
    let document = Document::new(vec![
        balance_sheet(1),
        page(
            2,
            "(계속)",
            vec![amounts_table(&["영업활동", "투자활동", "재무활동", "항목4", "항목5", "항목6"])],
        ),
        page(
            3,
            "매입채무 차입금",
            vec![amounts_table(&["항목1", "항목2", "항목3", "항목4", "항목5", "항목6"])],
        ),
    ]);

    let default = at(5, &document);
    assert_eq!(default.detected_pages(), vec![1, 2]);
    assert_eq!(default.page_type(2), Some(StatementType::CashFlow));

    let strict = at(6, &document);
    assert_eq!(strict.detected_pages(), vec![1, 2]);
    assert_eq!(
        strict.classification(2).map(|entry| (entry.statement, entry.origin)),
        Some((StatementType::BalanceSheet, DetectionOrigin::Continuation))
    );

    for sensitivity in 1..10 {
        let looser = at(sensitivity, &document);
        let stricter = at(sensitivity + 1, &document);
        assert!(
            stricter.detected_pages().iter().all(|page| looser.contains(*page)),
            "sensitivity {} found pages missing at {sensitivity}",
            sensitivity + 1
        );
    }
}

#[test]
fn unmarked_continuation_needs_a_partial_score() {
    let document = Document::new(vec![
        balance_sheet(1),
        page(
            2,
            "",
            vec![amounts_table(&["매입채무", "차입금", "항목3", "항목4", "항목5", "항목6"])],
        ),
    ]);

    let lenient = at(5, &document);
    assert_eq!(lenient.detected_pages(), vec![1, 2]);
    assert_eq!(
        lenient.classification(2).map(|entry| entry.origin),
        Some(DetectionOrigin::Continuation)
    );

    let strict = at(10, &document);
    assert_eq!(strict.detected_pages(), vec![1]);
}

#[test]
fn different_layout_breaks_the_continuation() {
    let wide = page(
        4,
        "재무상태표 (계속)",
        vec![Table::from_text_rows((0..6).map(|row| {
            vec![
                format!("항목{row}"),
                "1,000".to_string(),
                "900".to_string(),
                "800".to_string(),
            ]
        }))],
    );
    let document = Document::new(vec![balance_sheet(3), wide]);
    assert_eq!(at(5, &document).detected_pages(), vec![3]);
}
