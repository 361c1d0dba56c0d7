use tracing::{debug, trace};

use crate::model::{Page, PageScore, StatementType, Table};
use crate::numeric::numeric_ratio;
use crate::options::DetectionThresholds;
use crate::quality::filter_tables;
use crate::scorer::{best_candidate, score_page};

/// What the first pass learned about one page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PageAssessment {
    pub page_number: u32,
    /// Tables that survived the quality filter; the first is the primary table.
    pub tables: Vec<Table>,
    /// Present only when the page passed the table and numeric-density gates.
    pub score: Option<PageScore>,
    pub accepted: Option<StatementType>,
}

impl PageAssessment {
    pub(crate) fn primary_table(&self) -> Option<&Table> {
        self.tables.first()
    }

    pub(crate) fn is_candidate(&self) -> bool {
        self.score.is_some()
    }
}

pub(crate) fn assess_page(page: &Page, thresholds: &DetectionThresholds) -> PageAssessment {
    let tables = filter_tables(&page.tables);
    let mut assessment = PageAssessment {
        page_number: page.page_number,
        tables,
        score: None,
        accepted: None,
    };

    if assessment.tables.is_empty() {
        trace!(page = page.page_number, "no statement-sized tables");
        return assessment;
    }

    let ratio = numeric_ratio(&assessment.tables);
    if ratio < thresholds.numeric_content_ratio {
        trace!(page = page.page_number, ratio, "numeric density below threshold");
        return assessment;
    }

    let score = score_page(page.page_number, &page.text, &assessment.tables);
    let (statement, best) = best_candidate(&score);
    let accounts = score.matched_accounts(statement);
    let accepted = f64::from(best) >= thresholds.min_score_threshold
        && accounts >= thresholds.min_accounts_required;

    debug!(
        page = page.page_number,
        candidate = statement.as_str(),
        score = best,
        accounts,
        ratio,
        accepted,
        "scored page"
    );

    assessment.accepted = accepted.then_some(statement);
    assessment.score = Some(score);
    assessment
}

/// Classifies a single page on its own evidence, without continuation context.
#[must_use]
pub fn classify_page(page: &Page, thresholds: &DetectionThresholds) -> Option<StatementType> {
    assess_page(page, thresholds).accepted
}
