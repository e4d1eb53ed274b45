// File: ./src/model/block.rs
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a day. `TimeRange::end_min` may equal this (a block ending at midnight).
pub const MINUTES_PER_DAY: u16 = 1440;

/// One logical CSV record: the ordered field strings, embedded newlines preserved.
pub type RawRecord = Vec<String>;

// --- TIME ---

/// A half-open span of the day in minutes from midnight. Always `start_min < end_min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_min: u16,
    pub end_min: u16,
}

impl TimeRange {
    /// Returns None for empty, reversed (overnight) or out-of-day ranges.
    pub fn new(start_min: u16, end_min: u16) -> Option<Self> {
        if start_min < end_min && end_min <= MINUTES_PER_DAY {
            Some(Self { start_min, end_min })
        } else {
            None
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}

// --- DATE CELLS ---

/// Inclusive day-of-month window used to drop partial weeks in dated mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayRange {
    pub start: u32,
    pub end: u32,
}

impl DayRange {
    pub fn new(start: u32, end: u32) -> Option<Self> {
        if (1..=31).contains(&start) && (1..=31).contains(&end) && start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn contains(&self, day: u32) -> bool {
        (self.start..=self.end).contains(&day)
    }
}

impl Default for DayRange {
    fn default() -> Self {
        Self { start: 1, end: 31 }
    }
}

/// A parsed "Weekday, Month Day [CLASS]" expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCellInfo {
    pub weekday: Weekday,
    pub month: u32,
    pub day: u32,
    pub is_class: bool,
}

impl DateCellInfo {
    /// The absolute date in `year`, or None when (month, day) does not exist in that year.
    pub fn calendar_date(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// The weekday the calendar assigns to this date, which may disagree with the label.
    pub fn calendar_weekday(&self, year: i32) -> Option<Weekday> {
        self.calendar_date(year).map(|d| d.weekday())
    }
}

// --- BLOCKS ---

/// A recognized (weekday, time range) pairing before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCandidate {
    pub weekday: Weekday,
    pub range: TimeRange,
    pub is_class: bool,
    pub label: Option<String>,
}

/// A recognized (calendar date, time range) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedBlockCandidate {
    #[serde(rename = "dateISO")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub range: TimeRange,
    pub is_class: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Canonical recurring block, unique per (weekday, start, end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTemplate {
    #[serde(with = "iso_weekday")]
    pub weekday: Weekday,
    #[serde(flatten)]
    pub range: TimeRange,
    pub is_class: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<BlockCandidate> for BlockTemplate {
    fn from(c: BlockCandidate) -> Self {
        Self {
            weekday: c.weekday,
            range: c.range,
            is_class: c.is_class,
            label: c.label,
        }
    }
}

/// Output of the generic entry point; serialized without a tag so the JSON
/// objects carry exactly the block fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Block {
    Weekly(BlockTemplate),
    Dated(DatedBlockCandidate),
}

impl Block {
    pub fn range(&self) -> TimeRange {
        match self {
            Block::Weekly(t) => t.range,
            Block::Dated(d) => d.range,
        }
    }

    pub fn is_class(&self) -> bool {
        match self {
            Block::Weekly(t) => t.is_class,
            Block::Dated(d) => d.is_class,
        }
    }
}

/// Serializes `chrono::Weekday` as its ISO number (Monday = 1 .. Sunday = 7).
pub mod iso_weekday {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(day.number_from_monday() as u8)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Weekday, D::Error> {
        let n = u8::deserialize(d)?;
        from_number(n).ok_or_else(|| D::Error::custom(format!("weekday out of range: {}", n)))
    }

    pub fn from_number(n: u8) -> Option<Weekday> {
        match n {
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            7 => Some(Weekday::Sun),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_rejects_overnight_and_empty() {
        assert!(TimeRange::new(1380, 60).is_none());
        assert!(TimeRange::new(600, 600).is_none());
        assert!(TimeRange::new(0, 1441).is_none());
        assert!(TimeRange::new(0, 1440).is_some());
    }

    #[test]
    fn test_template_json_shape() {
        let t = BlockTemplate {
            weekday: Weekday::Thu,
            range: TimeRange::new(420, 600).unwrap(),
            is_class: false,
            label: None,
        };
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"weekday": 4, "startMin": 420, "endMin": 600, "isClass": false})
        );
        let back: BlockTemplate = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_dated_json_uses_iso_date() {
        let d = DatedBlockCandidate {
            date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
            range: TimeRange::new(780, 990).unwrap(),
            is_class: true,
            label: Some("Sunday, October 5 CLASS".to_string()),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["dateISO"], "2025-10-05");
        assert_eq!(json["endMin"], 990);
        assert_eq!(json["label"], "Sunday, October 5 CLASS");
    }

    #[test]
    fn test_calendar_weekday_can_disagree_with_label() {
        // October 7, 2025 is a Tuesday.
        let info = DateCellInfo {
            weekday: Weekday::Wed,
            month: 10,
            day: 7,
            is_class: false,
        };
        assert_eq!(info.calendar_weekday(2025), Some(Weekday::Tue));
        assert!(
            DateCellInfo { month: 2, day: 30, ..info }
                .calendar_date(2025)
                .is_none()
        );
    }
}
