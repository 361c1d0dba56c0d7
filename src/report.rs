use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::DetectError;
use crate::model::{ClassificationResult, DetectionOrigin, Document, StatementType};
use crate::options::DetectionThresholds;
use crate::warning::DetectWarning;

/// A run of consecutive pages holding the same statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementGroup {
    pub statement: StatementType,
    pub first_page: u32,
    pub last_page: u32,
    pub pages: Vec<u32>,
}

/// Groups detected pages into maximal runs of consecutive page numbers with the same type.
#[must_use]
pub fn group_pages(result: &ClassificationResult) -> Vec<StatementGroup> {
    let mut groups: Vec<StatementGroup> = Vec::new();
    for (page, entry) in result.iter() {
        match groups.last_mut() {
            Some(group)
                if group.statement == entry.statement
                    && group.last_page.checked_add(1) == Some(page) =>
            {
                group.last_page = page;
                group.pages.push(page);
            }
            _ => groups.push(StatementGroup {
                statement: entry.statement,
                first_page: page,
                last_page: page,
                pages: vec![page],
            }),
        }
    }
    groups
}

#[must_use]
pub fn count_by_type(result: &ClassificationResult) -> BTreeMap<StatementType, usize> {
    let mut counts = BTreeMap::new();
    for (_, entry) in result.iter() {
        *counts.entry(entry.statement).or_insert(0) += 1;
    }
    counts
}

/// Text of the detected pages only, in page order and separated by form feeds,
/// ready to hand to a downstream extraction step.
#[must_use]
pub fn statement_text(document: &Document, result: &ClassificationResult) -> String {
    document
        .pages()
        .iter()
        .filter(|page| result.contains(page.page_number))
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\u{000C}")
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub page_count: usize,
    pub thresholds: DetectionThresholds,
    pub result: ClassificationResult,
    pub groups: Vec<StatementGroup>,
    pub counts: BTreeMap<StatementType, usize>,
    pub warnings: Vec<DetectWarning>,
}

impl DetectionReport {
    #[must_use]
    pub fn new(
        document: &Document,
        thresholds: DetectionThresholds,
        result: ClassificationResult,
        warnings: Vec<DetectWarning>,
    ) -> Self {
        Self {
            page_count: document.len(),
            thresholds,
            groups: group_pages(&result),
            counts: count_by_type(&result),
            result,
            warnings,
        }
    }

    #[must_use]
    pub fn detected_pages(&self) -> Vec<u32> {
        self.result.detected_pages()
    }

    pub fn to_json(&self) -> Result<String, DetectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable listing of the groups, one line per run.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.result.is_empty() {
            return format!("no statement pages found in {} page(s)\n", self.page_count);
        }

        let pages = self
            .detected_pages()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("statement pages: {pages}\n");

        for group in &self.groups {
            let span = if group.first_page == group.last_page {
                format!("page {}", group.first_page)
            } else {
                format!("pages {}-{}", group.first_page, group.last_page)
            };
            let continued = group
                .pages
                .iter()
                .filter(|page| {
                    self.result
                        .classification(**page)
                        .is_some_and(|entry| entry.origin == DetectionOrigin::Continuation)
                })
                .count();
            let _ = write!(
                out,
                "  {} ({}): {span}",
                group.statement,
                group.statement.korean_name()
            );
            if continued > 0 {
                let _ = write!(out, " [{continued} continuation]");
            }
            out.push('\n');
        }
        out
    }
}
