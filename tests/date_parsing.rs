// Tests for "Weekday, Month Day [CLASS]" cells.
use chrono::Weekday;
use shiftblocks::model::DateCellInfo;
use shiftblocks::model::parser::parse_date_expression;

fn info(weekday: Weekday, month: u32, day: u32, is_class: bool) -> Option<DateCellInfo> {
    Some(DateCellInfo {
        weekday,
        month,
        day,
        is_class,
    })
}

#[test]
fn test_full_names() {
    assert_eq!(
        parse_date_expression("Thursday, October 2"),
        info(Weekday::Thu, 10, 2, false)
    );
}

#[test]
fn test_weekday_abbreviations() {
    assert_eq!(
        parse_date_expression("Wed, October 1"),
        info(Weekday::Wed, 10, 1, false)
    );
    assert_eq!(
        parse_date_expression("Weds October 1"),
        info(Weekday::Wed, 10, 1, false)
    );
    assert_eq!(
        parse_date_expression("Thurs, October 9"),
        info(Weekday::Thu, 10, 9, false)
    );
    assert_eq!(
        parse_date_expression("tues october 7"),
        info(Weekday::Tue, 10, 7, false)
    );
}

#[test]
fn test_class_marker_position_independent() {
    let expected = info(Weekday::Sun, 10, 5, true);
    assert_eq!(parse_date_expression("Sunday, October 5 CLASS"), expected);
    assert_eq!(parse_date_expression("CLASS Sunday, October 5"), expected);
    assert_eq!(parse_date_expression("Sunday, CLASS October 5"), expected);
    assert_eq!(parse_date_expression("Sunday, October 5 (class)"), expected);
}

#[test]
fn test_class_must_be_whole_word() {
    assert_eq!(
        parse_date_expression("Sunday, October 5 classroom"),
        info(Weekday::Sun, 10, 5, false)
    );
}

#[test]
fn test_extra_whitespace_and_newlines() {
    assert_eq!(
        parse_date_expression("  Friday ,   October   3  "),
        info(Weekday::Fri, 10, 3, false)
    );
}

#[test]
fn test_month_abbreviation_and_ordinal() {
    assert_eq!(
        parse_date_expression("Tuesday, Sept 30th"),
        info(Weekday::Tue, 9, 30, false)
    );
}

#[test]
fn test_weekday_is_trusted_as_written() {
    // October 7, 2025 is a Tuesday; the label is kept anyway.
    assert_eq!(
        parse_date_expression("Wednesday, October 7"),
        info(Weekday::Wed, 10, 7, false)
    );
}

#[test]
fn test_weekday_must_be_whole_word() {
    assert!(parse_date_expression("Sundays, October 5").is_none());
    assert!(parse_date_expression("Monument October 6").is_none());
}

#[test]
fn test_missing_parts_yield_none() {
    assert!(parse_date_expression("October 2").is_none());
    assert!(parse_date_expression("Thursday").is_none());
    assert!(parse_date_expression("Thursday, October").is_none());
    assert!(parse_date_expression("Timestamp").is_none());
    assert!(parse_date_expression("").is_none());
}
