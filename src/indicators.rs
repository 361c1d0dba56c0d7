use crate::model::StatementType;

/// Keyword evidence for one statement type. Keywords are matched after whitespace
/// removal and lower-casing, so spacing inside them does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementIndicator {
    /// Statement titles; the first one found in the page text scores `keyword_weight` once.
    pub required_keywords: &'static [&'static str],
    /// Canonical line items; each one found scores `account_weight`.
    pub account_keywords: &'static [&'static str],
    pub keyword_weight: u32,
    pub account_weight: u32,
}

const BALANCE_SHEET: StatementIndicator = StatementIndicator {
    required_keywords: &[
        "재무상태표",
        "대차대조표",
        "balance sheet",
        "statement of financial position",
    ],
    account_keywords: &[
        "자산",
        "부채",
        "자본",
        "유동자산",
        "비유동자산",
        "유동부채",
        "비유동부채",
        "자본금",
        "자본잉여금",
        "이익잉여금",
        "현금및현금성자산",
        "매출채권",
        "재고자산",
        "유형자산",
        "무형자산",
        "투자자산",
        "매입채무",
        "차입금",
        "선수금",
        "total assets",
        "current assets",
        "non-current assets",
        "total liabilities",
        "current liabilities",
        "total equity",
        "accounts receivable",
        "inventories",
        "property, plant and equipment",
        "intangible assets",
        "accounts payable",
        "borrowings",
    ],
    keyword_weight: 5,
    account_weight: 1,
};

const INCOME_STATEMENT: StatementIndicator = StatementIndicator {
    required_keywords: &[
        "손익계산서",
        "포괄손익계산서",
        "income statement",
        "statement of comprehensive income",
        "statement of profit or loss",
    ],
    account_keywords: &[
        "매출액",
        "매출원가",
        "매출총이익",
        "영업이익",
        "영업비용",
        "당기순이익",
        "판매비와관리비",
        "영업외수익",
        "영업외비용",
        "법인세",
        "기타포괄손익",
        "주당이익",
        "세전이익",
        "판관비",
        "revenue",
        "cost of sales",
        "gross profit",
        "operating income",
        "operating profit",
        "net income",
        "selling, general and administrative",
        "income tax expense",
        "earnings per share",
        "profit before tax",
        "finance costs",
    ],
    keyword_weight: 5,
    account_weight: 1,
};

const CASH_FLOW: StatementIndicator = StatementIndicator {
    required_keywords: &["현금흐름표", "cash flow statement", "statement of cash flows"],
    account_keywords: &[
        "영업활동",
        "투자활동",
        "재무활동",
        "현금유입",
        "현금유출",
        "현금및현금성자산",
        "순증감",
        "기초현금",
        "기말현금",
        "이자수취",
        "이자지급",
        "배당금",
        "법인세납부",
        "operating activities",
        "investing activities",
        "financing activities",
        "operating cash flow",
        "cash generated from operations",
        "interest received",
        "interest paid",
        "dividends paid",
        "income taxes paid",
        "net increase in cash",
        "cash and cash equivalents",
    ],
    keyword_weight: 5,
    account_weight: 1,
};

const EQUITY_STATEMENT: StatementIndicator = StatementIndicator {
    required_keywords: &["자본변동표", "statement of changes in equity"],
    account_keywords: &[
        "자본금",
        "자본잉여금",
        "이익잉여금",
        "기타자본",
        "기타포괄손익누계액",
        "자기주식",
        "주식발행초과금",
        "전기이월",
        "배당금",
        "자본총계",
        "share capital",
        "capital surplus",
        "retained earnings",
        "treasury shares",
        "accumulated other comprehensive income",
        "dividends",
        "balance at beginning",
        "balance at end",
    ],
    keyword_weight: 5,
    account_weight: 1,
};

impl StatementType {
    #[must_use]
    pub const fn indicator(self) -> &'static StatementIndicator {
        match self {
            Self::BalanceSheet => &BALANCE_SHEET,
            Self::IncomeStatement => &INCOME_STATEMENT,
            Self::CashFlow => &CASH_FLOW,
            Self::EquityStatement => &EQUITY_STATEMENT,
        }
    }
}
