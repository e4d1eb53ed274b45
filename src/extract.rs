// File: ./src/extract.rs
//! Entry points: CSV text in, canonical block list out.
//!
//! Pipeline: tokenize header record -> reconcile header cells into
//! (date, range) matches -> filter by mode -> dedup and sort.
use crate::csv;
use crate::error::ExtractError;
use crate::model::header::{self, HeaderMatch};
use crate::model::merge::{canonical_templates, dedup_blocks};
use crate::model::{Block, BlockTemplate, DatedBlockCandidate, DayRange, RawRecord};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The string form of a mode, as written in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModeKind {
    #[default]
    Weekly,
    Dated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Month-independent templates keyed by weekday.
    Weekly,
    /// Blocks bound to calendar dates in `year`/`month`.
    Dated { year: i32, month: u32 },
}

impl ExtractMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            ExtractMode::Weekly => ModeKind::Weekly,
            ExtractMode::Dated { .. } => ModeKind::Dated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: ExtractMode,
    /// Only consulted in dated mode.
    pub valid_days: DayRange,
    /// Attach the source header text to each block.
    pub with_labels: bool,
}

impl ExtractOptions {
    pub fn weekly() -> Self {
        Self {
            mode: ExtractMode::Weekly,
            valid_days: DayRange::default(),
            with_labels: false,
        }
    }

    pub fn dated(year: i32, month: u32) -> Self {
        Self {
            mode: ExtractMode::Dated { year, month },
            ..Self::weekly()
        }
    }

    pub fn with_valid_days(mut self, days: DayRange) -> Self {
        self.valid_days = days;
        self
    }

    pub fn labelled(mut self, on: bool) -> Self {
        self.with_labels = on;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::weekly()
    }
}

fn header_matches(csv_text: &str) -> Result<Vec<HeaderMatch>, ExtractError> {
    let header: RawRecord = csv::parse_header(csv_text)
        .ok_or_else(|| ExtractError::MalformedInput("no CSV records found".to_string()))?;
    let matches = header::reconcile_header(&header);
    log::info!(
        "Scanned {} header columns, recognized {} schedule pairings",
        header.len(),
        matches.len()
    );
    Ok(matches)
}

/// Recurring weekday templates from a CSV export.
pub fn extract_weekly(
    csv_text: &str,
    with_labels: bool,
) -> Result<Vec<BlockTemplate>, ExtractError> {
    let matches = header_matches(csv_text)?;
    let blocks = canonical_templates(header::weekly_candidates(&matches, with_labels));
    log::info!("Extracted {} weekly block templates", blocks.len());
    Ok(blocks)
}

/// Dated blocks for one month of a CSV export.
pub fn extract_dated(
    csv_text: &str,
    year: i32,
    month: u32,
    valid_days: DayRange,
    with_labels: bool,
) -> Result<Vec<DatedBlockCandidate>, ExtractError> {
    let matches = header_matches(csv_text)?;
    let candidates = header::dated_candidates(&matches, year, month, valid_days, with_labels);
    let blocks = dedup_blocks(candidates);
    log::info!(
        "Extracted {} dated blocks for {}-{:02}",
        blocks.len(),
        year,
        month
    );
    Ok(blocks)
}

/// Extracts the canonical, deduplicated and ordered block list for `options.mode`.
///
/// Only input with no CSV record at all is an error; a header without any
/// schedule columns yields an empty list.
pub fn extract_block_templates(
    csv_text: &str,
    options: &ExtractOptions,
) -> Result<Vec<Block>, ExtractError> {
    match options.mode {
        ExtractMode::Weekly => Ok(extract_weekly(csv_text, options.with_labels)?
            .into_iter()
            .map(Block::Weekly)
            .collect()),
        ExtractMode::Dated { year, month } => Ok(extract_dated(
            csv_text,
            year,
            month,
            options.valid_days,
            options.with_labels,
        )?
        .into_iter()
        .map(Block::Dated)
        .collect()),
    }
}

/// Like [`extract_block_templates`] for raw bytes, which must be UTF-8.
pub fn extract_from_bytes(
    bytes: &[u8],
    options: &ExtractOptions,
) -> Result<Vec<Block>, ExtractError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExtractError::MalformedInput(format!("input is not valid UTF-8 text: {}", e))
    })?;
    extract_block_templates(text, options)
}
