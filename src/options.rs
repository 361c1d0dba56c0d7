use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SENSITIVITY: i32 = 5;
pub const MIN_SENSITIVITY: i32 = 1;
pub const MAX_SENSITIVITY: i32 = 10;
/// Largest number of pages a single `start-end` range may name.
const MAX_RANGE_PAGES: u32 = 10_000;

/// Gates a page must clear to be accepted. Derived from a sensitivity value and
/// passed by reference into every classification call; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionThresholds {
    pub min_score_threshold: f64,
    pub min_accounts_required: usize,
    pub numeric_content_ratio: f64,
}

impl DetectionThresholds {
    /// Maps a sensitivity in `1..=10` onto thresholds. Higher is stricter.
    /// Out-of-range values are clamped.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_sensitivity(sensitivity: i32) -> Self {
        let offset = f64::from(sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY) - 5);
        Self {
            min_score_threshold: 5.0 + offset,
            min_accounts_required: (3.0 + offset * 0.5).round().max(2.0) as usize,
            numeric_content_ratio: 0.15 + offset * 0.03,
        }
    }
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self::from_sensitivity(DEFAULT_SENSITIVITY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some((start, end)) = token.split_once('-') {
                let start: u32 = start
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid page range start: '{start}'"))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid page range end: '{end}'"))?;
                if start == 0 || end == 0 {
                    return Err("pages are 1-based".to_string());
                }
                if end < start {
                    return Err(format!(
                        "invalid range '{token}': end is smaller than start"
                    ));
                }
                if end - start >= MAX_RANGE_PAGES {
                    return Err(format!(
                        "range '{token}' spans more than {MAX_RANGE_PAGES} pages"
                    ));
                }
                pages.extend(start..=end);
            } else {
                let page: u32 = token
                    .parse()
                    .map_err(|_| format!("invalid page number: '{token}'"))?;
                if page == 0 {
                    return Err("pages are 1-based".to_string());
                }
                pages.insert(page);
            }
        }

        if pages.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }

        Ok(Self { pages })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectOptions {
    pub pages: Option<PageSelection>,
    pub sensitivity: i32,
    /// Field delimiter for CSV export.
    pub delimiter: u8,
}

impl DetectOptions {
    #[must_use]
    pub fn thresholds(&self) -> DetectionThresholds {
        DetectionThresholds::from_sensitivity(self.sensitivity)
    }
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            pages: None,
            sensitivity: DEFAULT_SENSITIVITY,
            delimiter: b',',
        }
    }
}
