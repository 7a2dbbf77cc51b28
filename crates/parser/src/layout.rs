// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module provides the section layout table.
//!
//! A layout is authored against one expected file shape, it is never derived
//! from the file content. The reference layout below matches the historical
//! runner output: 13 sections of 38 lines each.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A named line range `[start, end)` in the log file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// The section name, unique within a layout.
    pub name: Box<str>,
    /// First line of the section, 0-based.
    pub start: usize,
    /// One past the last line of the section.
    pub end: usize,
}

impl SectionDescriptor {
    /// Create a descriptor for the `[start, end)` line range.
    pub fn new(name: &str, start: usize, end: usize) -> SectionDescriptor {
        SectionDescriptor {
            name: name.into(),
            start,
            end,
        }
    }
}

/// An ordered list of disjoint section descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(Vec<SectionDescriptor>);

/// The layout loading error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid file: {0}")]
    BadFile(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    BadJSON(#[from] serde_json::Error),

    #[error("invalid yaml: {0}")]
    BadYAML(#[from] serde_yaml::Error),

    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("bad range for {0}: sections must be non-empty, disjoint and in file order")]
    BadRange(Box<str>),
}

impl Layout {
    /// Validate and build a layout from descriptors.
    pub fn new(sections: Vec<SectionDescriptor>) -> Result<Layout, Error> {
        let mut pos = 0;
        for section in &sections {
            if section.start >= section.end || section.start < pos {
                return Err(Error::BadRange(section.name.clone()));
            }
            pos = section.end;
        }
        Ok(Layout(sections))
    }

    /// The layout of the reference runner output.
    pub fn reference() -> Layout {
        const STRIDE: usize = 38;
        let names = [
            "seq", "dpa_t2", "dpa_t4", "dpa_t8", "dpa_t16", "hda_t2", "hda_t4", "hda_t8",
            "hda_t16", "ahda_t2", "ahda_t4", "ahda_t8", "ahda_t16",
        ];
        Layout(
            names
                .iter()
                .enumerate()
                .map(|(nr, name)| SectionDescriptor::new(name, nr * STRIDE, (nr + 1) * STRIDE))
                .collect(),
        )
    }

    /// Load a layout from a `.yaml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Layout, Error> {
        let file = std::fs::File::open(path)?;
        Layout::from_reader(path, file)
    }

    fn from_reader<R: std::io::Read>(path: &Path, file: R) -> Result<Layout, Error> {
        let reader = std::io::BufReader::new(file);
        let sections = match path.extension().and_then(std::ffi::OsStr::to_str) {
            Some("yaml") => Ok(serde_yaml::from_reader(reader)?),
            Some("json") => Ok(serde_json::from_reader(reader)?),
            m_ext => Err(Error::UnknownFormat(
                m_ext.map(|s| s.to_string()).unwrap_or_default(),
            )),
        }?;
        Layout::new(sections)
    }

    /// The descriptors, in file order.
    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.0
    }

    /// The number of lines the layout expects the file to have.
    pub fn line_count(&self) -> usize {
        self.0.last().map(|section| section.end).unwrap_or(0)
    }
}

#[test]
fn test_reference_layout() {
    let layout = Layout::reference();
    assert_eq!(layout.sections().len(), 13);
    assert_eq!(layout.line_count(), 494);
    assert_eq!(layout.sections()[1], SectionDescriptor::new("dpa_t2", 38, 76));
    assert_eq!(
        layout.sections().last().unwrap(),
        &SectionDescriptor::new("ahda_t16", 456, 494)
    );
}

#[test]
fn test_bad_ranges() {
    for sections in [
        // overlapping
        vec![
            SectionDescriptor::new("a", 0, 10),
            SectionDescriptor::new("b", 5, 15),
        ],
        // out of order
        vec![
            SectionDescriptor::new("a", 10, 20),
            SectionDescriptor::new("b", 0, 10),
        ],
        // empty
        vec![SectionDescriptor::new("a", 10, 10)],
    ] {
        assert!(matches!(Layout::new(sections), Err(Error::BadRange(_))));
    }
}

#[test]
fn test_from_reader() {
    let yaml = "- name: seq\n  start: 0\n  end: 38\n- name: dpa_t2\n  start: 38\n  end: 76\n";
    let layout = Layout::from_reader(Path::new("layout.yaml"), yaml.as_bytes()).unwrap();
    assert_eq!(layout.sections()[1].name.as_ref(), "dpa_t2");
    assert!(matches!(
        Layout::from_reader(Path::new("layout.toml"), yaml.as_bytes()),
        Err(Error::UnknownFormat(_))
    ));
}
