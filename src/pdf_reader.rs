use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::{EUC_KR, UTF_16BE};
use lopdf::Document;
use lopdf::Object;
use lopdf::content::Content;
use tracing::debug;

use crate::error::DetectError;
use crate::extractor::TableExtractor;
use crate::model::Table;
use crate::table_detect::detect_tables_in_text;
use crate::table_parse::{is_amount_token, split_line_into_cells, split_statement_line};

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

/// Adobe-Korea1 CMaps: `KSC-EUC-H`, `KSCms-UHC-H` and friends.
fn is_korean_cmap(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("ksc") || lower.contains("uhc") || lower.contains("euc-kr")
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    if encoding.is_some_and(is_korean_cmap) {
        let (korean, _, had_errors) = EUC_KR.decode(bytes);
        if !had_errors && !korean.is_empty() {
            return korean.into_owned();
        }
    }

    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(&bytes[2..]);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    if let Some(name) = encoding {
        let lower = name.to_ascii_lowercase();

        if lower.contains("utf16")
            || lower.contains("ucs2")
            || lower.contains("identity-h")
            || lower.contains("unicode")
        {
            let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
            if !had_errors && !utf16.is_empty() {
                return utf16.into_owned();
            }
        }
    }

    String::from_utf8_lossy(bytes).to_string()
}

/// Prefers candidates that read like statement tables: lines that split into
/// cells, and lines carrying formatted amounts.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut amount_lines = 0_i64;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        non_empty_lines += 1;

        if split_line_into_cells(line).len() >= 2 || split_statement_line(line).len() >= 2 {
            multi_cell_lines += 1;
        }

        if line
            .split_whitespace()
            .any(|token| token.contains(',') && is_amount_token(token))
        {
            amount_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + amount_lines * 15 + non_empty_lines - broken_penalty
}

fn choose_best_text(candidates: Vec<String>) -> Option<String> {
    candidates
        .into_iter()
        .max_by_key(|text| extraction_quality_score(text))
}

fn is_zero(operand: Option<&Object>) -> bool {
    match operand {
        Some(Object::Integer(value)) => *value == 0,
        Some(Object::Real(value)) => *value == 0.0,
        _ => false,
    }
}

fn extract_text_from_page_content(document: &Document, page_id: lopdf::ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    text.push_str(&decode_pdf_bytes(encoding, bytes));
                }
                Object::Array(items) => {
                    collect_text(text, encoding, items);
                }
                Object::Integer(value) => {
                    if *value < -100 {
                        text.push(' ');
                    }
                }
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    current_encoding = encodings.get(font_name).copied();
                }
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            // A purely horizontal move stays on the line: it is a column gap.
            "Td" | "TD" if is_zero(operation.operands.get(1)) => {
                if !current.trim().is_empty() {
                    current.push_str("  ");
                }
            }
            "T*" | "Td" | "TD" | "ET" => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Per-page text of a PDF, read once up front. Tables are rebuilt from the text
/// on request.
#[derive(Debug, Clone, Default)]
pub struct PdfTableExtractor {
    pages: Vec<Option<String>>,
}

impl PdfTableExtractor {
    pub fn open(input_pdf: &Path) -> Result<Self, DetectError> {
        let document = Document::load(input_pdf)?;
        let whole_text = pdf_extract::extract_text(input_pdf).ok();
        Ok(Self::from_document(&document, whole_text.as_deref()))
    }

    pub fn from_bytes(input_pdf: &[u8]) -> Result<Self, DetectError> {
        let document = Document::load_mem(input_pdf)?;
        let whole_text = pdf_extract::extract_text_from_mem(input_pdf).ok();
        Ok(Self::from_document(&document, whole_text.as_deref()))
    }

    fn from_document(document: &Document, whole_text: Option<&str>) -> Self {
        let pages_map = document.get_pages();
        let split_pages = whole_text
            .map(split_text_into_pages)
            .filter(|pages| pages.len() == pages_map.len());

        let pages = pages_map
            .iter()
            .enumerate()
            .map(|(index, (page_no, page_id))| {
                let mut candidates = Vec::new();
                if let Some(text) = split_pages
                    .as_ref()
                    .and_then(|pages| pages.get(index).cloned())
                    .filter(|text| !text.trim().is_empty())
                {
                    candidates.push(text);
                }
                if let Some(text) = extract_text_from_page_content(document, *page_id) {
                    candidates.push(text);
                }
                if let Some(text) = document
                    .extract_text(&[*page_no])
                    .ok()
                    .filter(|text| !text.trim().is_empty())
                {
                    candidates.push(text);
                }

                let text = choose_best_text(candidates);
                if text.is_none() {
                    debug!(page = *page_no, "no text candidate for page");
                }
                text
            })
            .collect();

        Self { pages }
    }
}

impl TableExtractor for PdfTableExtractor {
    fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    fn extract_text(&self, page_number: u32) -> Result<String, DetectError> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .and_then(Clone::clone)
            .ok_or(DetectError::PageUnreadable { page: page_number })
    }

    fn extract_tables(&self, page_number: u32) -> Result<Vec<Table>, DetectError> {
        self.extract_text(page_number)
            .map(|text| detect_tables_in_text(&text))
    }
}
