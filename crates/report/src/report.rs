// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This library provides the benchsift output data model: the sample table
//! produced by the section parser, the sweep table produced by the sweep
//! scan, and the exploratory statistics artifacts built from them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub mod stats;

pub use stats::{Bandwidth, DensityCurve, Histogram};

/// The report codec error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("not enough samples: got {0}")]
    NotEnoughSamples(usize),

    #[error("samples have zero variance")]
    ZeroVariance,
}

/// The ordered samples of one benchmark section, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionSamples {
    pub name: Box<str>,
    pub samples: Vec<f64>,
}

/// The parse result: one entry per layout section, in layout order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleTable {
    pub sections: Vec<SectionSamples>,
}

impl SampleTable {
    /// Lookup a section by name.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.sections
            .iter()
            .find(|section| section.name.as_ref() == name)
            .map(|section| &section.samples[..])
    }

    /// The section names, in layout order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_ref())
    }

    /// Total number of samples across all sections.
    pub fn sample_count(&self) -> usize {
        self.sections
            .iter()
            .fold(0, |acc, section| acc + section.samples.len())
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(std::io::BufWriter::new(file), self).map_err(Error::DecodeError)
    }

    pub fn load(path: &Path) -> Result<SampleTable, Error> {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(Error::DecodeError)
    }

    pub fn sample() -> Self {
        SampleTable {
            sections: vec![
                SectionSamples {
                    name: "seq".into(),
                    samples: vec![27.35, 26.8, 0.8425],
                },
                SectionSamples {
                    name: "dpa_t2".into(),
                    samples: vec![],
                },
            ],
        }
    }
}

#[test]
fn test_sample_table() {
    let table = SampleTable::sample();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["seq", "dpa_t2"]);
    assert_eq!(table.get("seq"), Some(&[27.35, 26.8, 0.8425][..]));
    assert_eq!(table.get("dpa_t2"), Some(&[][..]));
    assert_eq!(table.get("hda_t2"), None);
    assert_eq!(table.sample_count(), 3);
}

#[test]
fn test_save_load() {
    let table = SampleTable::sample();
    let file = tempfile::NamedTempFile::new().unwrap();
    table.save(file.path()).unwrap();
    assert_eq!(SampleTable::load(file.path()).unwrap(), table);
}

/// The values collected for one sweep key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub key: Box<str>,
    pub values: Vec<f64>,
}

/// The sweep scan result, in first-seen key order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepTable {
    pub entries: Vec<SweepEntry>,
}

impl SweepTable {
    /// Record the values of a key. A known key keeps its position and takes
    /// the new values.
    pub fn insert(&mut self, key: &str, values: Vec<f64>) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.key.as_ref() == key)
        {
            Some(entry) => entry.values = values,
            None => self.entries.push(SweepEntry {
                key: key.into(),
                values,
            }),
        }
    }

    /// Lookup the values of a key.
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|entry| entry.key.as_ref() == key)
            .map(|entry| &entry.values[..])
    }
}

#[test]
fn test_sweep_table() {
    let mut table = SweepTable::default();
    table.insert("a", vec![1.0]);
    table.insert("b", vec![2.0]);
    table.insert("a", vec![3.0]);
    assert_eq!(table.entries.len(), 2);
    assert_eq!(table.entries[0].key.as_ref(), "a");
    assert_eq!(table.get("a"), Some(&[3.0][..]));
    assert_eq!(table.get("c"), None);
}
