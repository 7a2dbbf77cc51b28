// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module provides the parameter sweep scan.
//!
//! Sweep runs print one line per configuration, e.g.
//! `dpa temp/dpa_t2_p4 12.50 13.10 13.80`. The scan accumulates the decimal
//! values of every `dpa`-prefixed line under the last segment of its
//! `temp/...` token. Unlike the section parser there is no range table and
//! no unit normalization, values are kept as printed.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::Error;
use benchsift_report::SweepTable;

/// Prefix of a sweep result line.
const SWEEP_PREFIX: &str = "dpa";

lazy_static! {
    static ref KEY_RE: Regex = Regex::new(r"temp/\S+").unwrap();
    static ref VALUE_RE: Regex = Regex::new(r"(\d+\.\d+)(?:\s|$)").unwrap();
}

fn sweep_key(line: &str) -> Option<&str> {
    KEY_RE.find(line)?.as_str().split('/').last()
}

#[test]
fn test_sweep_key() {
    assert_eq!(sweep_key("dpa temp/dpa_t2_p4 1.0"), Some("dpa_t2_p4"));
    assert_eq!(sweep_key("dpa temp/a/b/c"), Some("c"));
    assert_eq!(sweep_key("dpa no key here"), None);
}

fn sweep_values(line: &str) -> Vec<f64> {
    VALUE_RE
        .captures_iter(line)
        .filter_map(|m| m[1].parse().ok())
        .collect()
}

#[test]
fn test_sweep_values() {
    // only whitespace (or end of line) terminated literals count
    assert_eq!(
        sweep_values("dpa temp/x 12.50 13.10\t14.80"),
        vec![12.5, 13.1, 14.8]
    );
    assert_eq!(sweep_values("dpa temp/x [1.5] 2.5"), vec![2.5]);
    assert_eq!(sweep_values("dpa temp/x"), Vec::<f64>::new());
}

/// Accumulate sweep results out of a sequence of log lines.
///
/// Lines not starting with `dpa` are skipped. A duplicated key keeps its
/// first position and takes the values of its last line.
pub fn parse_sweep_lines<S: AsRef<str>>(lines: &[S]) -> Result<SweepTable, Error> {
    let mut table = SweepTable::default();
    for (nr, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if !line.starts_with(SWEEP_PREFIX) {
            continue;
        }
        let key = sweep_key(line).ok_or_else(|| Error::MissingKey {
            line: nr + 1,
            text: line.into(),
        })?;
        table.insert(key, sweep_values(line));
    }
    Ok(table)
}

/// Accumulate sweep results out of a log file.
pub fn parse_sweep_path(path: &Path) -> Result<SweepTable, Error> {
    tracing::debug!(path = path.to_str(), "Reading sweep log");
    let content = std::fs::read_to_string(path)?;
    parse_sweep_lines(&content.lines().collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_accumulation() {
        let lines = [
            "running 4 sweeps",
            "dpa temp/dpa_t2_p2 10.50 11.00",
            "dpa temp/dpa_t2_p4 9.25 9.75",
            "  dpa indented is skipped",
            "hda temp/hda_t2_p2 1.00",
        ];
        let table = parse_sweep_lines(&lines).unwrap();
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.get("dpa_t2_p2"), Some(&[10.5, 11.0][..]));
        assert_eq!(table.get("dpa_t2_p4"), Some(&[9.25, 9.75][..]));
        assert_eq!(table.get("hda_t2_p2"), None);
    }

    #[test]
    fn test_duplicate_key_takes_last_values() {
        let lines = ["dpa temp/x 1.50", "dpa temp/y 2.50", "dpa temp/x 3.50"];
        let table = parse_sweep_lines(&lines).unwrap();
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].key.as_ref(), "x");
        assert_eq!(table.get("x"), Some(&[3.5][..]));
    }

    #[test]
    fn test_missing_key() {
        match parse_sweep_lines(&["dpa without a path token 1.50"]) {
            Err(Error::MissingKey { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_values_are_not_normalized() {
        let table = parse_sweep_lines(&["dpa temp/x 1500.00 2.00"]).unwrap();
        assert_eq!(table.get("x"), Some(&[1500.0, 2.0][..]));
    }
}
