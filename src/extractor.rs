use tracing::warn;

use crate::error::DetectError;
use crate::model::{Document, Page, Table};
use crate::options::PageSelection;
use crate::warning::{DetectWarning, WarningCode};

/// Source of per-page tables and text. Page numbers are 1-based.
pub trait TableExtractor {
    fn page_count(&self) -> u32;

    fn extract_text(&self, page_number: u32) -> Result<String, DetectError>;

    fn extract_tables(&self, page_number: u32) -> Result<Vec<Table>, DetectError>;
}

/// Reads every selected page from `extractor` into a [`Document`].
///
/// A page that fails to extract becomes a page without tables, so it can never
/// be classified but does not stop the rest of the document.
pub fn load_document(
    extractor: &impl TableExtractor,
    selection: Option<&PageSelection>,
    warnings: &mut Vec<DetectWarning>,
) -> Document {
    let page_count = extractor.page_count();
    check_selection(selection, page_count, warnings);
    let mut pages = Vec::new();

    for page_number in 1..=page_count {
        if selection.is_some_and(|selection| !selection.contains(page_number)) {
            continue;
        }

        let text = extractor.extract_text(page_number);
        let tables = extractor.extract_tables(page_number);
        let failure = text
            .as_ref()
            .err()
            .or(tables.as_ref().err())
            .map(ToString::to_string);
        let tables = match failure {
            Some(error) => {
                warn!(page = page_number, %error, "page extraction failed; treating it as table-free");
                warnings.push(
                    DetectWarning::new(WarningCode::PageUnreadable, error).with_page(page_number),
                );
                Vec::new()
            }
            None => tables.unwrap_or_default(),
        };

        pages.push(Page {
            page_number,
            tables,
            text: text.unwrap_or_default(),
        });
    }

    Document::new(pages)
}

/// Warns about selected pages that the document does not have.
fn check_selection(
    selection: Option<&PageSelection>,
    page_count: u32,
    warnings: &mut Vec<DetectWarning>,
) {
    let Some(selection) = selection else {
        return;
    };
    for page in selection.pages().filter(|page| *page > page_count) {
        warnings.push(
            DetectWarning::new(
                WarningCode::SelectedPageMissing,
                format!("document has only {page_count} page(s)"),
            )
            .with_page(page),
        );
    }
}
