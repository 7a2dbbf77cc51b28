// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module provides the exploratory statistics artifacts.
//!
//! The artifacts are plain data: a consumer renders them however it likes,
//! the command line prints them as text rows.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Arithmetic mean. Empty input yields NaN.
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Corrected sample standard deviation. Fewer than two samples yield NaN.
pub fn std_dev(samples: &[f64]) -> f64 {
    let m = mean(samples);
    let var = samples.iter().map(|x| (x - m) * (x - m)).sum::<f64>()
        / (samples.len() as f64 - 1.0);
    var.sqrt()
}

#[test]
fn test_mean_std() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    assert_eq!(std_dev(&[1.0, 2.0, 3.0]), 1.0);
    assert!(std_dev(&[1.0]).is_nan());
}

/// An equal-width binning of a sample sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Smallest sample, left edge of the first bin.
    pub min: f64,
    /// Largest sample, right edge of the last bin (inclusive).
    pub max: f64,
    /// Samples per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the samples. At least one sample and one bin are required.
    pub fn from_samples(samples: &[f64], bins: usize) -> Result<Histogram, Error> {
        if samples.is_empty() || bins == 0 {
            return Err(Error::NotEnoughSamples(samples.len()));
        }
        let (min, max) = match samples.iter().copied().minmax().into_option() {
            Some(edges) => edges,
            None => return Err(Error::NotEnoughSamples(0)),
        };
        let mut counts = vec![0; bins];
        let span = max - min;
        for sample in samples {
            let nr = if span == 0.0 {
                0
            } else {
                // the top edge falls into the last bin
                (((sample - min) / span * bins as f64) as usize).min(bins - 1)
            };
            counts[nr] += 1;
        }
        Ok(Histogram { min, max, counts })
    }

    /// Width of one bin.
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    /// Center position of a bin.
    pub fn bin_center(&self, nr: usize) -> f64 {
        self.min + (nr as f64 + 0.5) * self.bin_width()
    }

    /// Total binned sample count.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}


/// A kernel bandwidth selector.
///
/// The factor is multiplied by the sample standard deviation to get the
/// kernel width, so `Factor(0.1)` means a tenth of the spread.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Bandwidth {
    /// Scott's rule, `n^(-1/5)`.
    Scott,
    /// A fixed factor.
    Factor(f64),
}

impl Bandwidth {
    /// The factor for a sample count.
    pub fn factor(&self, n: usize) -> f64 {
        match self {
            Bandwidth::Scott => (n as f64).powf(-0.2),
            Bandwidth::Factor(factor) => *factor,
        }
    }
}

impl FromStr for Bandwidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Bandwidth::Scott),
            _ => s
                .parse()
                .map(Bandwidth::Factor)
                .map_err(|e| format!("bad bandwidth {:?}: {}", s, e)),
        }
    }
}

impl std::fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bandwidth::Scott => write!(f, "auto"),
            Bandwidth::Factor(factor) => write!(f, "{}", factor),
        }
    }
}

#[test]
fn test_bandwidth() {
    assert_eq!("auto".parse(), Ok(Bandwidth::Scott));
    assert_eq!("0.1".parse(), Ok(Bandwidth::Factor(0.1)));
    assert!("wide".parse::<Bandwidth>().is_err());
    // 32^(-1/5) is exactly one half
    assert!((Bandwidth::Scott.factor(32) - 0.5).abs() < 1e-12);
    assert_eq!(Bandwidth::Scott.to_string(), "auto");
}

/// A gaussian kernel density estimate sampled over a display domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    pub bandwidth: Bandwidth,
    /// First evaluation position.
    pub start: f64,
    /// Last evaluation position (inclusive).
    pub stop: f64,
    /// Density at evenly spaced positions from start to stop.
    pub values: Vec<f64>,
}

impl DensityCurve {
    /// Estimate the density of the samples on `points` evenly spaced
    /// positions across the domain.
    ///
    /// The estimate needs a spread: at least two samples, not all equal.
    pub fn evaluate(
        samples: &[f64],
        bandwidth: Bandwidth,
        domain: (f64, f64),
        points: usize,
    ) -> Result<DensityCurve, Error> {
        if samples.len() < 2 {
            return Err(Error::NotEnoughSamples(samples.len()));
        }
        let width = bandwidth.factor(samples.len()) * std_dev(samples);
        if width == 0.0 || !width.is_finite() {
            return Err(Error::ZeroVariance);
        }
        let (start, stop) = domain;
        let points = points.max(2);
        let step = (stop - start) / (points - 1) as f64;
        let norm = 1.0 / (samples.len() as f64 * width * (2.0 * std::f64::consts::PI).sqrt());
        let values = (0..points)
            .map(|nr| {
                let pos = start + nr as f64 * step;
                norm * samples
                    .iter()
                    .map(|sample| {
                        let z = (pos - sample) / width;
                        (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
            })
            .collect();
        Ok(DensityCurve {
            bandwidth,
            start,
            stop,
            values,
        })
    }

    /// The evaluation positions, paired with [DensityCurve::values].
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        let step = (self.stop - self.start) / self.values.len().saturating_sub(1).max(1) as f64;
        (0..self.values.len()).map(move |nr| self.start + nr as f64 * step)
    }

    /// The highest density value.
    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}
