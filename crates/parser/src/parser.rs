// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This library provides the log parser for the [benchsift](https://github.com/benchsift/benchsift) project.
//!
//! Benchmark runners emit fixed-layout text logs: named sections at known
//! line offsets, where each data row starts with a `-` marker and ends with a
//! measurement token such as `842.500ms`. The parser slices the log with a
//! [Layout], extracts the trailing token of every data row and normalizes
//! milliseconds to seconds:
//!
//! ```rust
//! # use benchsift_parser::{parse_lines, Layout, SectionDescriptor};
//! let layout = Layout::new(vec![SectionDescriptor::new("warmup", 0, 3)]).unwrap();
//! let table = parse_lines(
//!     &["== warmup ==", "- pass 1: 12.500ms", "- pass 2: 7.000"],
//!     &layout,
//! ).unwrap();
//! assert_eq!(table.get("warmup"), Some(&[0.0125, 7.0][..]));
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

pub mod layout;
pub mod sweep;

use benchsift_report::{SampleTable, SectionSamples};
pub use layout::{Layout, SectionDescriptor};
pub use sweep::{parse_sweep_lines, parse_sweep_path};

/// The parser error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("line {line}: malformed measurement token {token:?}")]
    MalformedRow { line: usize, token: Box<str> },

    #[error("line {line}: missing sweep key in {text:?}")]
    MissingKey { line: usize, text: Box<str> },
}

/// Marker of a data row, at column 0.
const ROW_MARKER: char = '-';

lazy_static! {
    static ref DECIMAL_RE: Regex = Regex::new(r"\d+\.\d+").unwrap();
}

/// Split a measurement token into its numeric part and unit suffix.
fn split_unit(token: &str) -> (&str, &str) {
    let suffix_len = token
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    token.split_at(token.len() - suffix_len)
}

#[test]
fn test_split_unit() {
    assert_eq!(split_unit("842.500ms"), ("842.500", "ms"));
    assert_eq!(split_unit("7.000"), ("7.000", ""));
    assert_eq!(split_unit("13.8]"), ("13.8]", ""));
    assert_eq!(split_unit("ms"), ("", "ms"));
}

/// Extract the normalized value of a measurement token, in seconds.
///
/// The unit suffix is the trailing run of letters, the value is the first
/// decimal literal of the remainder. Only `ms` triggers a conversion, any
/// other suffix is assumed to already be in seconds.
pub fn token_value(token: &str) -> Option<f64> {
    let (number, unit) = split_unit(token);
    let literal = DECIMAL_RE.find(number)?;
    let value: f64 = literal.as_str().parse().ok()?;
    Some(if unit == "ms" { value / 1000.0 } else { value })
}

#[test]
fn test_token_value() {
    assert_eq!(token_value("842.500ms"), Some(0.8425));
    assert_eq!(token_value("12.500ms"), Some(0.0125));
    assert_eq!(token_value("7.000"), Some(7.0));
    assert_eq!(token_value("27.350s"), Some(27.35));
    // surrounding punctuation is tolerated, the first literal wins
    assert_eq!(token_value("[13.8]"), Some(13.8));
    // no decimal literal
    assert_eq!(token_value("n/a"), None);
    assert_eq!(token_value("42"), None);
    assert_eq!(token_value("-"), None);
    // the unit must not hide the literal
    assert_eq!(token_value("ms"), None);
}

/// Parse benchmark sections out of a sequence of log lines.
///
/// Every section of the layout is present in the result, in layout order,
/// empty when no line of its range qualifies. Lines outside all ranges are
/// ignored.
pub fn parse_lines<S: AsRef<str>>(lines: &[S], layout: &Layout) -> Result<SampleTable, Error> {
    if lines.len() < layout.line_count() {
        tracing::warn!(
            expected = layout.line_count(),
            got = lines.len(),
            "Log file is shorter than the section layout, trailing sections will be truncated"
        );
    }
    let mut sections = Vec::with_capacity(layout.sections().len());
    for section in layout.sections() {
        let start = section.start.min(lines.len());
        let end = section.end.min(lines.len());
        let mut samples = Vec::new();
        for (offset, line) in lines[start..end].iter().enumerate() {
            let line = line.as_ref();
            if !line.starts_with(ROW_MARKER) {
                continue;
            }
            let token = line.split_whitespace().last().unwrap_or("");
            let value = token_value(token).ok_or_else(|| Error::MalformedRow {
                line: start + offset + 1,
                token: token.into(),
            })?;
            samples.push(value);
        }
        sections.push(SectionSamples {
            name: section.name.clone(),
            samples,
        });
    }
    Ok(SampleTable { sections })
}

/// Parse a benchmark log file.
pub fn parse_path(path: &Path, layout: &Layout) -> Result<SampleTable, Error> {
    tracing::debug!(path = path.to_str(), "Reading benchmark log");
    let content = std::fs::read_to_string(path)?;
    parse_lines(&content.lines().collect::<Vec<_>>(), layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_section(end: usize) -> Layout {
        Layout::new(vec![SectionDescriptor::new("x", 0, end)]).unwrap()
    }

    #[test]
    fn test_unit_normalization() {
        let lines = ["- a b 12.500ms", "- c d 7.000"];
        let table = parse_lines(&lines, &single_section(2)).unwrap();
        assert_eq!(table.get("x"), Some(&[0.0125, 7.0][..]));
    }

    #[test]
    fn test_row_marker_position() {
        // the marker only counts at column 0
        let lines = [
            "--- summary 0.000",
            "  - indented 1.500",
            "pass - 2.500",
            "- kept 3.500",
        ];
        let table = parse_lines(&lines, &single_section(4)).unwrap();
        assert_eq!(table.get("x"), Some(&[0.0, 3.5][..]));
    }

    #[test]
    fn test_empty_section_is_present() {
        let layout = Layout::new(vec![
            SectionDescriptor::new("a", 0, 2),
            SectionDescriptor::new("b", 2, 4),
        ])
        .unwrap();
        let lines = ["- 1.000", "header", "no rows", "here"];
        let table = parse_lines(&lines, &layout).unwrap();
        assert_eq!(table.get("a"), Some(&[1.0][..]));
        assert_eq!(table.get("b"), Some(&[][..]));
    }

    #[test]
    fn test_out_of_range_lines_are_ignored() {
        let layout = Layout::new(vec![SectionDescriptor::new("a", 1, 2)]).unwrap();
        let lines = ["- 1.000", "- 2.000", "- 3.000"];
        let table = parse_lines(&lines, &layout).unwrap();
        assert_eq!(table.get("a"), Some(&[2.0][..]));
        assert_eq!(table.sections.len(), 1);
    }

    #[test]
    fn test_malformed_row() {
        let lines = ["- pass 1: oops"];
        match parse_lines(&lines, &single_section(1)) {
            Err(Error::MalformedRow { line, token }) => {
                assert_eq!(line, 1);
                assert_eq!(token.as_ref(), "oops");
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_separator_row_is_not_skipped() {
        // `---` starts with the marker, so it must carry a value or fail,
        // it is never silently dropped
        let lines = ["--- summary ---"];
        assert!(matches!(
            parse_lines(&lines, &single_section(1)),
            Err(Error::MalformedRow { line: 1, .. })
        ));
    }

    #[test]
    fn test_short_file_is_truncated() {
        let table = parse_lines(&["- 1.500"], &single_section(38)).unwrap();
        assert_eq!(table.get("x"), Some(&[1.5][..]));
    }

    #[test]
    fn test_parse_path() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "== x ==\n- pass 0: 250.000ms\n- pass 1: 0.250\n").unwrap();
        let table = parse_path(file.path(), &single_section(3)).unwrap();
        assert_eq!(table.get("x"), Some(&[0.25, 0.25][..]));

        assert!(matches!(
            parse_path(Path::new("/does/not/exist"), &Layout::reference()),
            Err(Error::IOError(_))
        ));
    }
}
