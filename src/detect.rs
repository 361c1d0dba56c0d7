use rayon::prelude::*;
use tracing::info;

use crate::classify::assess_page;
use crate::continuation::propagate_continuations;
use crate::model::{ClassificationResult, DetectionOrigin, Document};
use crate::options::DetectionThresholds;

/// Finds the statement pages of `document`.
///
/// Pages are first scored independently (in parallel), then pages directly
/// after a first-pass page are checked for continuations. Documents without
/// pages or tables give an empty result.
#[must_use]
pub fn detect(document: &Document, thresholds: &DetectionThresholds) -> ClassificationResult {
    let assessments = document
        .pages()
        .par_iter()
        .map(|page| assess_page(page, thresholds))
        .collect::<Vec<_>>();

    let mut result = ClassificationResult::default();
    for assessment in &assessments {
        if let Some(statement) = assessment.accepted {
            result.insert(assessment.page_number, statement, DetectionOrigin::Primary);
        }
    }
    let primary = result.len();

    propagate_continuations(document.pages(), &assessments, thresholds, &mut result);

    info!(
        pages = document.len(),
        primary,
        continuations = result.len() - primary,
        "statement detection finished"
    );
    result
}
