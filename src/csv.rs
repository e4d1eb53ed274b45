// File: ./src/csv.rs
//! Quote-aware CSV record tokenizer.
//!
//! Quoted fields may contain commas, `""` escapes and raw line breaks; the
//! latter are kept verbatim so multi-line header cells survive tokenizing.
//! Malformed input never fails: an unterminated quote simply swallows the
//! rest of the text into the current field.
use crate::model::RawRecord;
use std::iter::Peekable;
use std::mem::take;
use std::str::Chars;

const SEP: char = ',';

struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            chars: text.chars().peekable(),
        }
    }

    /// Reads the next logical record, or None at end of input.
    /// Records made of a single empty field (blank lines) are skipped.
    fn next_record(&mut self) -> Option<RawRecord> {
        loop {
            self.chars.peek()?;
            let row = self.read_physical_record();
            if !(row.len() == 1 && row[0].is_empty()) {
                return Some(row);
            }
        }
    }

    fn read_physical_record(&mut self) -> RawRecord {
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        while let Some(ch) = self.chars.next() {
            match ch {
                '"' => {
                    if in_quotes && self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        in_quotes = !in_quotes;
                    }
                }
                c if c == SEP && !in_quotes => row.push(take(&mut field)),
                '\n' | '\r' if !in_quotes => {
                    if ch == '\r' && self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    row.push(field);
                    return row;
                }
                _ => field.push(ch),
            }
        }

        // End of input without a trailing newline (or inside an open quote).
        row.push(field);
        row
    }
}

impl Iterator for RecordReader<'_> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        self.next_record()
    }
}

/// Tokenizes every logical record in `text`.
pub fn parse_records(text: &str) -> Vec<RawRecord> {
    RecordReader::new(text).collect()
}

/// Tokenizes only the first logical record (the header row) and stops there.
pub fn parse_header(text: &str) -> Option<RawRecord> {
    RecordReader::new(text).next_record()
}
