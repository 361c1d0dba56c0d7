use rayon::prelude::*;
use tracing::debug;

use crate::classify::PageAssessment;
use crate::model::{ClassificationResult, DetectionOrigin, Page, StatementType, Table};
use crate::numeric::column_patterns;
use crate::options::DetectionThresholds;
use crate::scorer::normalize;

/// Literal hints that a page carries on the statement before it.
const CONTINUATION_MARKERS: &[&str] = &[
    "(계속)",
    "계속",
    "(continued)",
    "continued",
    "이익잉여금처분계산서",
    "statement of appropriation of retained earnings",
];

/// Minimum share of columns whose numeric/text pattern must agree.
const PATTERN_AGREEMENT: f64 = 0.7;
/// A page without a marker needs this share of the minimum score for the anchor's type.
const CONTINUATION_SCORE_SHARE: f64 = 0.7;

/// Strict structural match: identical header width and mostly agreeing column types.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn similar_structure(previous: &Table, current: &Table) -> bool {
    if previous.row_count() == 0 || current.row_count() == 0 {
        return false;
    }
    if previous.header_width() != current.header_width() {
        return false;
    }

    let previous_patterns = column_patterns(previous);
    let current_patterns = column_patterns(current);
    if previous_patterns.is_empty() {
        return true;
    }

    let agreeing = previous_patterns
        .iter()
        .zip(&current_patterns)
        .filter(|(left, right)| left == right)
        .count();
    agreeing as f64 / previous_patterns.len() as f64 >= PATTERN_AGREEMENT
}

pub(crate) fn has_continuation_marker(text: &str) -> bool {
    let text = normalize(text);
    CONTINUATION_MARKERS
        .iter()
        .any(|marker| text.contains(&normalize(marker)))
}

/// Whether `current` continues the statement `previous` was accepted as in the
/// first pass. Only the two pages themselves are consulted.
fn continues_previous(
    previous: &PageAssessment,
    current: &PageAssessment,
    text: &str,
    thresholds: &DetectionThresholds,
) -> Option<StatementType> {
    let statement = previous.accepted?;
    if current.accepted.is_some() || !current.is_candidate() {
        return None;
    }
    if previous.page_number.checked_add(1) != Some(current.page_number) {
        return None;
    }

    let similar = match (previous.primary_table(), current.primary_table()) {
        (Some(previous), Some(current)) => similar_structure(previous, current),
        _ => false,
    };
    if !similar {
        return None;
    }

    let marked = has_continuation_marker(text);
    let scored = current.score.as_ref().is_some_and(|score| {
        f64::from(score.score(statement))
            >= thresholds.min_score_threshold * CONTINUATION_SCORE_SHARE
    });
    (marked || scored).then_some(statement)
}

/// Second pass. Adds every page that was not accepted on its own but continues
/// a first-pass page directly before it, giving it the same statement type.
/// Only look-behind is used, and a continuation page never anchors another, so
/// every page pair is decided independently.
pub(crate) fn propagate_continuations(
    pages: &[Page],
    assessments: &[PageAssessment],
    thresholds: &DetectionThresholds,
    result: &mut ClassificationResult,
) {
    let accepted = (1..assessments.len())
        .into_par_iter()
        .filter_map(|index| {
            continues_previous(
                &assessments[index - 1],
                &assessments[index],
                &pages[index].text,
                thresholds,
            )
            .map(|statement| (assessments[index].page_number, statement))
        })
        .collect::<Vec<_>>();

    for (page_number, statement) in accepted {
        debug!(
            page = page_number,
            statement = statement.as_str(),
            "accepted continuation page"
        );
        result.insert(page_number, statement, DetectionOrigin::Continuation);
    }
}
