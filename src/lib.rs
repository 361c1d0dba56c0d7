mod classify;
mod continuation;
mod csv_out;
mod detect;
mod error;
mod extractor;
mod indicators;
mod merge;
mod model;
mod numeric;
mod options;
mod pdf_reader;
mod quality;
mod report;
mod scorer;
mod shape;
mod table_detect;
mod table_parse;
mod warning;

use std::path::Path;

use crate::csv_out::{write_csv, write_csv_to_string};
use crate::merge::{collect_statement_tables, merge_tables};

pub use classify::classify_page;
pub use detect::detect;
pub use error::DetectError;
pub use extractor::{TableExtractor, load_document};
pub use indicators::StatementIndicator;
pub use model::{
    Cell, ClassificationResult, DetectionOrigin, Document, Page, PageClassification, PageScore,
    StatementType, Table,
};
pub use numeric::{numeric_quality, numeric_ratio};
pub use options::{
    DEFAULT_SENSITIVITY, DetectOptions, DetectionThresholds, MAX_SENSITIVITY, MIN_SENSITIVITY,
    PageSelection,
};
pub use pdf_reader::PdfTableExtractor;
pub use quality::filter_tables;
pub use report::{DetectionReport, StatementGroup, count_by_type, group_pages, statement_text};
pub use scorer::{best_candidate, score_page};
pub use shape::has_statement_shape;
pub use warning::{DetectWarning, WarningCode};

#[derive(Debug, Clone)]
pub struct ExportReport {
    pub detection: DetectionReport,
    pub row_count: usize,
    pub table_count: usize,
}

fn validate_options(options: &DetectOptions) -> Result<(), DetectError> {
    if options.pages.as_ref().is_some_and(PageSelection::is_empty) {
        return Err(DetectError::InvalidPageSelection(
            "page selection cannot be empty".to_string(),
        ));
    }
    if !options.delimiter.is_ascii() {
        return Err(DetectError::InvalidOption(
            "delimiter must be a single ASCII character".to_string(),
        ));
    }
    Ok(())
}

/// Loads the pages, classifies them, and assembles the report.
pub fn run_detection(
    extractor: &impl TableExtractor,
    options: &DetectOptions,
) -> (Document, DetectionReport) {
    let mut warnings = Vec::new();
    let document = load_document(extractor, options.pages.as_ref(), &mut warnings);
    let thresholds = options.thresholds();
    let result = detect(&document, &thresholds);
    if result.is_empty() {
        warnings.push(DetectWarning::new(
            WarningCode::NoStatementsDetected,
            "no page qualified as a financial statement",
        ));
    }

    let report = DetectionReport::new(&document, thresholds, result, warnings);
    (document, report)
}

pub fn detect_statement_pages(
    input_pdf: &Path,
    options: &DetectOptions,
) -> Result<DetectionReport, DetectError> {
    validate_options(options)?;
    let extractor = PdfTableExtractor::open(input_pdf)?;
    Ok(run_detection(&extractor, options).1)
}

pub fn detect_statement_pages_from_bytes(
    input_pdf: &[u8],
    options: &DetectOptions,
) -> Result<DetectionReport, DetectError> {
    validate_options(options)?;
    let extractor = PdfTableExtractor::from_bytes(input_pdf)?;
    Ok(run_detection(&extractor, options).1)
}

/// Detects statement pages and returns the text of those pages only.
pub fn extract_statement_text(
    input_pdf: &Path,
    options: &DetectOptions,
) -> Result<(String, DetectionReport), DetectError> {
    validate_options(options)?;
    let extractor = PdfTableExtractor::open(input_pdf)?;
    let (document, report) = run_detection(&extractor, options);
    Ok((statement_text(&document, &report.result), report))
}

pub fn export_statement_tables_to_csv(
    input_pdf: &Path,
    output_csv: &Path,
    options: &DetectOptions,
) -> Result<ExportReport, DetectError> {
    validate_options(options)?;
    let extractor = PdfTableExtractor::open(input_pdf)?;
    let (document, detection) = run_detection(&extractor, options);
    let merged = merge_tables(&collect_statement_tables(&document, &detection.result));
    write_csv(output_csv, &merged, options.delimiter)?;

    Ok(ExportReport {
        detection,
        row_count: merged.row_count,
        table_count: merged.table_count,
    })
}

pub fn export_statement_tables_to_csv_string(
    input_pdf: &[u8],
    options: &DetectOptions,
) -> Result<(String, ExportReport), DetectError> {
    validate_options(options)?;
    let extractor = PdfTableExtractor::from_bytes(input_pdf)?;
    let (document, detection) = run_detection(&extractor, options);
    let merged = merge_tables(&collect_statement_tables(&document, &detection.result));
    let csv = write_csv_to_string(&merged, options.delimiter)?;

    Ok((
        csv,
        ExportReport {
            detection,
            row_count: merged.row_count,
            table_count: merged.table_count,
        },
    ))
}
