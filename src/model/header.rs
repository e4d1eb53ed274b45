// File: ./src/model/header.rs
//! Pairs date cells with time-range cells in a spreadsheet header row.
//!
//! Two layouts are recognized:
//!
//! - **Combined**: one cell holds both, on separate lines, in either order
//!   (`"Wednesday, October 1\n8AM - 10AM"`). Cells with more than two lines
//!   are scanned top to bottom over adjacent non-empty lines; a line joins at
//!   most one pair, so after a match the scan resumes below both lines.
//! - **Adjacent pair**: a date-only cell next to a range-only cell, in either
//!   left/right order. A cell mixing a date with clock times on one line is
//!   neither.
//!
//! Combined cells are resolved first, so a self-sufficient cell is never
//! taken by a neighbouring pair. Every cell contributes to at most one
//! adjacent pair.
use crate::model::block::{
    BlockCandidate, DateCellInfo, DatedBlockCandidate, DayRange, TimeRange,
};
use crate::model::parser::{contains_clock_time, parse_date_expression, parse_time_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Combined,
    AdjacentPair,
}

/// A recognized (date, range) pairing, still carrying its month/day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub date: DateCellInfo,
    pub range: TimeRange,
    pub layout: Layout,
    /// Index of the (first) header column the match came from.
    pub column: usize,
    /// Source text of the two halves, in source order, joined with " | ".
    pub source: String,
}

enum CellKind {
    Date(DateCellInfo),
    Range(TimeRange),
}

/// Classifies a single line or cell. A date must be the whole of its text:
/// a date followed by clock times on the same line is neither kind.
fn classify(text: &str) -> Option<CellKind> {
    if let Some(range) = parse_time_range(text) {
        return Some(CellKind::Range(range));
    }
    if contains_clock_time(text) {
        return None;
    }
    parse_date_expression(text).map(CellKind::Date)
}

fn pair(first: &str, second: &str) -> Option<(DateCellInfo, TimeRange)> {
    match (classify(first)?, classify(second)?) {
        (CellKind::Date(d), CellKind::Range(r)) | (CellKind::Range(r), CellKind::Date(d)) => {
            Some((d, r))
        }
        _ => None,
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn combined_matches(column: usize, field: &str) -> Vec<HeaderMatch> {
    let lines: Vec<&str> = field
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut found = Vec::new();
    let mut i = 0;
    while i + 1 < lines.len() {
        if let Some((date, range)) = pair(lines[i], lines[i + 1]) {
            found.push(HeaderMatch {
                date,
                range,
                layout: Layout::Combined,
                column,
                source: format!(
                    "{} | {}",
                    collapse_whitespace(lines[i]),
                    collapse_whitespace(lines[i + 1])
                ),
            });
            i += 2;
        } else {
            i += 1;
        }
    }
    found
}

/// Finds every (date, range) pairing in a header row, ordered by column.
pub fn reconcile_header(fields: &[String]) -> Vec<HeaderMatch> {
    let mut matches = Vec::new();
    let mut consumed = vec![false; fields.len()];

    // Pass 1: self-sufficient multi-line cells.
    for (column, field) in fields.iter().enumerate() {
        let found = combined_matches(column, field);
        if !found.is_empty() {
            consumed[column] = true;
            matches.extend(found);
        }
    }

    // Pass 2: neighbours, left to right.
    let flat: Vec<String> = fields.iter().map(|f| collapse_whitespace(f)).collect();
    let mut i = 0;
    while i + 1 < flat.len() {
        if consumed[i] || consumed[i + 1] {
            i += 1;
            continue;
        }
        if let Some((date, range)) = pair(&flat[i], &flat[i + 1]) {
            consumed[i] = true;
            consumed[i + 1] = true;
            matches.push(HeaderMatch {
                date,
                range,
                layout: Layout::AdjacentPair,
                column: i,
                source: format!("{} | {}", flat[i], flat[i + 1]),
            });
            i += 2;
        } else {
            i += 1;
        }
    }

    for (column, field) in flat.iter().enumerate() {
        if !consumed[column] && !field.is_empty() {
            log::debug!("Column {} ({:?}) is not a schedule column", column, field);
        }
    }

    matches.sort_by_key(|m| m.column);
    for m in &matches {
        log::debug!(
            "Column {} ({:?}): {} {}/{} {}",
            m.column,
            m.layout,
            m.date.weekday,
            m.date.month,
            m.date.day,
            m.range
        );
    }
    matches
}

/// Weekday-keyed candidates for recurring templates; month is ignored.
pub fn weekly_candidates(matches: &[HeaderMatch], with_labels: bool) -> Vec<BlockCandidate> {
    matches
        .iter()
        .map(|m| BlockCandidate {
            weekday: m.date.weekday,
            range: m.range,
            is_class: m.date.is_class,
            label: with_labels.then(|| m.source.clone()),
        })
        .collect()
}

/// Date-keyed candidates restricted to `year`/`month` and the `days` window.
///
/// The calendar date wins over the weekday written in the header; a
/// disagreement is only reported.
pub fn dated_candidates(
    matches: &[HeaderMatch],
    year: i32,
    month: u32,
    days: DayRange,
    with_labels: bool,
) -> Vec<DatedBlockCandidate> {
    let mut out = Vec::new();
    for m in matches {
        if m.date.month != month {
            log::debug!(
                "Skipping {:?}: month {} is not target month {}",
                m.source,
                m.date.month,
                month
            );
            continue;
        }
        if !days.contains(m.date.day) {
            log::debug!(
                "Skipping {:?}: day {} outside {}..={}",
                m.source,
                m.date.day,
                days.start,
                days.end
            );
            continue;
        }
        let Some(date) = m.date.calendar_date(year) else {
            log::debug!("Skipping {:?}: no such date in {}", m.source, year);
            continue;
        };
        if let Some(actual) = m.date.calendar_weekday(year)
            && actual != m.date.weekday
        {
            log::warn!(
                "Header {:?} says {} but {} is a {}",
                m.source,
                m.date.weekday,
                date,
                actual
            );
        }
        out.push(DatedBlockCandidate {
            date,
            range: m.range,
            is_class: m.date.is_class,
            label: with_labels.then(|| m.source.clone()),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_combined_cell_is_not_stolen_by_neighbour() {
        // Cell 1 is self-sufficient; cell 0 must not pair with it.
        let fields = row(&["7AM - 10AM", "Monday, October 6\n1PM - 3PM"]);
        let matches = reconcile_header(&fields);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].layout, Layout::Combined);
        assert_eq!(matches[0].range.start_min, 780);
    }

    #[test]
    fn test_each_cell_pairs_at_most_once() {
        let fields = row(&["Thursday, October 2", "7AM - 10AM", "Friday, October 3"]);
        let matches = reconcile_header(&fields);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].column, 0);
        assert_eq!(matches[0].source, "Thursday, October 2 | 7AM - 10AM");
    }

    #[test]
    fn test_stray_blank_lines_in_combined_cell() {
        let fields = row(&["\n\nWednesday, October 1\n\n8AM - 10AM\n"]);
        let matches = reconcile_header(&fields);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].date.day, 1);
    }
}
