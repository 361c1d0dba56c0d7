use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize, Serializer};

/// A table cell; `None` when the extractor found nothing at that position.
pub type Cell = Option<String>;

/// Returns the trimmed content of a cell, or `None` for absent and blank cells.
#[must_use]
pub fn cell_text(cell: &Cell) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    #[must_use]
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Builds a table from plain strings, turning blank strings into absent cells.
    pub fn from_text_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let cell = cell.as_ref();
                        if cell.trim().is_empty() {
                            None
                        } else {
                            Some(cell.to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row, which is treated as the header.
    #[must_use]
    pub fn header_width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Lower-cased contents of the first cell of every row; absent cells yield `""`.
    #[must_use]
    pub fn first_column(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.first()
                    .and_then(cell_text)
                    .map(str::to_lowercase)
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Lower-cased contents of the header row; absent cells yield `""`.
    #[must_use]
    pub fn header_row(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| {
                row.iter()
                    .map(|cell| cell_text(cell).map(str::to_lowercase).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub page_number: u32,
    pub tables: Vec<Table>,
    pub text: String,
}

/// Pages of one report, ordered by page number. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    #[must_use]
    pub fn new(mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(|page| page.page_number);
        pages.dedup_by_key(|page| page.page_number);
        Self { pages }
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages
            .binary_search_by_key(&page_number, |page| page.page_number)
            .ok()
            .map(|index| &self.pages[index])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// The four statement kinds, in tie-break order: earlier variants win equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementType {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
    EquityStatement,
}

impl StatementType {
    pub const ALL: [Self; 4] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlow,
        Self::EquityStatement,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::BalanceSheet => 0,
            Self::IncomeStatement => 1,
            Self::CashFlow => 2,
            Self::EquityStatement => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlow => "cash_flow",
            Self::EquityStatement => "equity_statement",
        }
    }

    #[must_use]
    pub const fn korean_name(self) -> &'static str {
        match self {
            Self::BalanceSheet => "재무상태표",
            Self::IncomeStatement => "손익계산서",
            Self::CashFlow => "현금흐름표",
            Self::EquityStatement => "자본변동표",
        }
    }
}

impl Display for StatementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::BalanceSheet => "balance sheet",
            Self::IncomeStatement => "income statement",
            Self::CashFlow => "cash flow statement",
            Self::EquityStatement => "statement of changes in equity",
        };
        f.write_str(label)
    }
}

/// Per-page scoring snapshot; recomputed on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageScore {
    pub page_number: u32,
    pub scores: [u32; 4],
    pub matched_accounts: [usize; 4],
    pub numeric_ratio: f64,
}

impl PageScore {
    #[must_use]
    pub fn score(&self, statement: StatementType) -> u32 {
        self.scores[statement.index()]
    }

    #[must_use]
    pub fn matched_accounts(&self, statement: StatementType) -> usize {
        self.matched_accounts[statement.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionOrigin {
    /// Accepted on its own score.
    Primary,
    /// Accepted as the continuation of the previous page.
    Continuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageClassification {
    pub statement: StatementType,
    pub origin: DetectionOrigin,
}

/// Detected pages and their statement types. A page carries exactly one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pages: BTreeMap<u32, PageClassification>,
}

impl ClassificationResult {
    /// Records a page unless it is already classified. Returns whether it was added.
    pub(crate) fn insert(
        &mut self,
        page_number: u32,
        statement: StatementType,
        origin: DetectionOrigin,
    ) -> bool {
        if self.pages.contains_key(&page_number) {
            return false;
        }
        self.pages
            .insert(page_number, PageClassification { statement, origin });
        true
    }

    /// Detected page numbers, ascending and without duplicates.
    #[must_use]
    pub fn detected_pages(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    #[must_use]
    pub fn page_type(&self, page_number: u32) -> Option<StatementType> {
        self.pages.get(&page_number).map(|entry| entry.statement)
    }

    #[must_use]
    pub fn classification(&self, page_number: u32) -> Option<PageClassification> {
        self.pages.get(&page_number).copied()
    }

    #[must_use]
    pub fn contains(&self, page_number: u32) -> bool {
        self.pages.contains_key(&page_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, PageClassification)> + '_ {
        self.pages.iter().map(|(page, entry)| (*page, *entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            detected_pages: Vec<u32>,
            page_type: BTreeMap<u32, StatementType>,
            continuation_pages: Vec<u32>,
        }

        Wire {
            detected_pages: self.detected_pages(),
            page_type: self
                .pages
                .iter()
                .map(|(page, entry)| (*page, entry.statement))
                .collect(),
            continuation_pages: self
                .pages
                .iter()
                .filter(|(_, entry)| entry.origin == DetectionOrigin::Continuation)
                .map(|(page, _)| *page)
                .collect(),
        }
        .serialize(serializer)
    }
}
