use crate::model::{PageScore, StatementType, Table, cell_text};
use crate::numeric::{numeric_quality, numeric_ratio};
use crate::shape::has_statement_shape;

const MAX_DENSITY_BONUS: u32 = 3;
const SHAPE_BONUS: u32 = 5;
const FORMAT_BONUS: u32 = 2;
const FORMAT_QUALITY_CUTOFF: f64 = 0.5;

/// Lower-cases and removes all whitespace so that `Total  Assets` matches `total assets`.
pub(crate) fn normalize(text: &str) -> String {
    text.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn table_haystack(tables: &[Table]) -> String {
    let mut joined = String::new();
    for row in tables.iter().flat_map(|table| table.rows.iter()) {
        for text in row.iter().filter_map(cell_text) {
            joined.push_str(text);
            joined.push(' ');
        }
    }
    normalize(&joined)
}

/// Integer bonus for pages whose text is dominated by matched line items,
/// one point per percent of the text they cover.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn density_bonus(matched_chars: usize, text_chars: usize) -> u32 {
    if text_chars == 0 {
        return 0;
    }
    let density = matched_chars as f64 / text_chars as f64;
    ((density * 100.0).floor() as u32).min(MAX_DENSITY_BONUS)
}

/// Scores `tables` (already quality-filtered) and `text` of one page against every
/// statement type. The first table is the primary one used for shape checks.
#[must_use]
pub fn score_page(page_number: u32, text: &str, tables: &[Table]) -> PageScore {
    let page_text = normalize(text);
    let page_chars = page_text.chars().count();
    let table_text = table_haystack(tables);

    let primary = tables.first();
    let format_bonus = primary
        .filter(|table| numeric_quality(table) > FORMAT_QUALITY_CUTOFF)
        .map_or(0, |_| FORMAT_BONUS);

    let mut scores = [0_u32; 4];
    let mut matched_accounts = [0_usize; 4];

    for statement in StatementType::ALL {
        let indicator = statement.indicator();
        let mut score = 0;

        if indicator
            .required_keywords
            .iter()
            .any(|keyword| page_text.contains(&normalize(keyword)))
        {
            score += indicator.keyword_weight;
        }

        let mut accounts = 0_usize;
        let mut matched_chars = 0_usize;
        for account in indicator.account_keywords {
            let account = normalize(account);
            let in_text = page_text.contains(&account);
            if in_text || table_text.contains(&account) {
                accounts += 1;
            }
            if in_text {
                matched_chars += account.chars().count();
            }
        }
        score += u32::try_from(accounts).unwrap_or(u32::MAX) * indicator.account_weight;
        score += density_bonus(matched_chars, page_chars);

        if let Some(table) = primary {
            if has_statement_shape(statement, table) {
                score += SHAPE_BONUS;
            }
            score += format_bonus;
        }

        scores[statement.index()] = score;
        matched_accounts[statement.index()] = accounts;
    }

    PageScore {
        page_number,
        scores,
        matched_accounts,
        numeric_ratio: numeric_ratio(tables),
    }
}

/// Highest-scoring statement type. Equal scores go to the type declared first.
#[must_use]
pub fn best_candidate(score: &PageScore) -> (StatementType, u32) {
    let mut best = (StatementType::ALL[0], score.score(StatementType::ALL[0]));
    for statement in &StatementType::ALL[1..] {
        let candidate = score.score(*statement);
        if candidate > best.1 {
            best = (*statement, candidate);
        }
    }
    best
}
