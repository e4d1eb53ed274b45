// File: src/model/parser.rs
//! Token-level parsers for schedule header text.
//!
//! Everything here is parse-or-None: most header cells (Timestamp, Name,
//! free-text notes) are not schedule columns, so failing to match is the
//! common case and must stay cheap and silent.
use crate::model::block::{DateCellInfo, MINUTES_PER_DAY, TimeRange};
use chrono::Weekday;

// --- TIME PARSING ---

/// Parses a single clock expression into minutes from midnight.
///
/// Accepts `7AM`, `7 am`, `11:30 PM`, `7p.m.` (12-hour, hour 1..=12) and the
/// bare 24-hour forms `18:30` and `18`. `24:00` is accepted as end of day.
pub fn parse_clock_token(text: &str) -> Option<u16> {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    let (body, meridiem) = split_meridiem(&lower);
    let (h, m) = split_hour_minute(body.trim_end())?;

    match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&h) || m > 59 {
                return None;
            }
            let h_24 = if h == 12 {
                if is_pm { 12 } else { 0 }
            } else if is_pm {
                h + 12
            } else {
                h
            };
            Some(h_24 * 60 + m)
        }
        None => {
            if h == 24 && m == 0 {
                return Some(MINUTES_PER_DAY);
            }
            if h > 23 || m > 59 {
                return None;
            }
            Some(h * 60 + m)
        }
    }
}

/// Returns the text before the meridiem and `Some(is_pm)` when one was present.
fn split_meridiem(lower: &str) -> (&str, Option<bool>) {
    for (suffix, is_pm) in [("a.m.", false), ("p.m.", true), ("am", false), ("pm", true)] {
        if let Some(stripped) = lower.strip_suffix(suffix) {
            return (stripped, Some(is_pm));
        }
    }
    (lower, None)
}

fn split_hour_minute(s: &str) -> Option<(u16, u16)> {
    if let Some((h_str, m_str)) = s.split_once(':') {
        if m_str.len() != 2 {
            return None;
        }
        Some((parse_digits(h_str, 2)?, parse_digits(m_str, 2)?))
    } else {
        Some((parse_digits(s, 2)?, 0))
    }
}

/// Parses 1..=`max_len` ASCII digits; rejects signs and whitespace that `str::parse` would not.
fn parse_digits(s: &str, max_len: usize) -> Option<u16> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u16>().ok()
}

/// Parses `"7AM - 10AM"` / `"18:30–21:00"` into a range.
///
/// Exactly one separator (hyphen or en dash) is allowed. Ranges whose end is
/// not strictly after the start, including overnight ones, yield None.
pub fn parse_time_range(text: &str) -> Option<TimeRange> {
    let trimmed = text.trim();
    let mut parts = trimmed.split(['-', '\u{2013}']);
    let left = parts.next()?;
    let right = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let start = parse_clock_token(left)?;
    let end = parse_clock_token(right)?;
    TimeRange::new(start, end)
}

/// True when `text` holds a clock time written with a meridiem or minutes
/// (`8AM`, `8 am`, `18:30`). Bare numbers are ignored: in a date cell they
/// are days of the month.
pub fn contains_clock_time(text: &str) -> bool {
    let tokens: Vec<String> = text
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '-' | '\u{2013}' | '(' | ')' | '/'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();

    tokens.iter().enumerate().any(|(i, token)| {
        let explicit = token.contains(':') || split_meridiem(token).1.is_some();
        if explicit && parse_clock_token(token).is_some() {
            return true;
        }
        // "8 am": number and meridiem split by a space
        tokens.get(i + 1).is_some_and(|next| {
            split_meridiem(next).0.is_empty()
                && parse_clock_token(&format!("{}{}", token, next)).is_some()
        })
    })
}

// --- DATE PARSING ---

fn parse_weekday_name(word: &str) -> Option<Weekday> {
    match word {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "weds" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month_name(word: &str) -> Option<u32> {
    match word {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

/// Day of month, with an optional ordinal suffix ("2", "02", "21st").
fn parse_day_of_month(word: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|sfx| word.strip_suffix(sfx))
        .unwrap_or(word);
    let day = u32::from(parse_digits(digits, 2)?);
    (1..=31).contains(&day).then_some(day)
}

/// Splits into lowercase words on anything that is not a letter or digit.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Parses a "Weekday, Month Day" expression with an optional `CLASS` marker anywhere in it.
///
/// The weekday name is taken as written; it is not checked against the calendar.
pub fn parse_date_expression(text: &str) -> Option<DateCellInfo> {
    let words = words(text);

    let mut weekday = None;
    let mut month_day = None;
    let mut is_class = false;

    for (i, word) in words.iter().enumerate() {
        if word == "class" {
            is_class = true;
            continue;
        }
        if weekday.is_none()
            && let Some(wd) = parse_weekday_name(word)
        {
            weekday = Some(wd);
            continue;
        }
        if month_day.is_none()
            && let Some(month) = parse_month_name(word)
            && let Some(day) = words.get(i + 1).and_then(|w| parse_day_of_month(w))
        {
            month_day = Some((month, day));
        }
    }

    let (month, day) = month_day?;
    Some(DateCellInfo {
        weekday: weekday?,
        month,
        day,
        is_class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_meridiem_edges() {
        assert_eq!(parse_clock_token("12AM"), Some(0));
        assert_eq!(parse_clock_token("12:30 am"), Some(30));
        assert_eq!(parse_clock_token("12PM"), Some(720));
        assert_eq!(parse_clock_token("7 p.m."), Some(1140));
    }

    #[test]
    fn test_clock_rejects_garbage() {
        assert_eq!(parse_clock_token(""), None);
        assert_eq!(parse_clock_token("13PM"), None);
        assert_eq!(parse_clock_token("0AM"), None);
        assert_eq!(parse_clock_token("7:5"), None);
        assert_eq!(parse_clock_token("+7"), None);
        assert_eq!(parse_clock_token("Timestamp"), None);
    }

    #[test]
    fn test_clock_time_detection() {
        assert!(contains_clock_time("Wednesday, October 1 8AM - 10AM"));
        assert!(contains_clock_time("Monday, October 6 at 8 a.m."));
        assert!(contains_clock_time("Friday, October 3 18:30"));
        assert!(!contains_clock_time("Thursday, October 2"));
        assert!(!contains_clock_time("Tuesday, October 7 CLASS"));
        assert!(!contains_clock_time("Sam's shift, Sunday October 5"));
    }

    #[test]
    fn test_words_split_on_punctuation() {
        assert_eq!(words("Thursday,October 2."), vec!["thursday", "october", "2"]);
    }

    #[test]
    fn test_day_needs_to_follow_month() {
        assert!(parse_date_expression("Thursday 2 October").is_none());
        assert!(parse_date_expression("Thursday, October 32").is_none());
    }
}
