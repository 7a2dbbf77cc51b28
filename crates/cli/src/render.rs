// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering of the output tables and statistics artifacts.

use itertools::Itertools;

use crate::OutputMode;
use benchsift_report::stats::mean;
use benchsift_report::{DensityCurve, Histogram, SampleTable, SweepTable};

/// Widest histogram bar, in characters.
const BAR_WIDTH: usize = 50;

/// Density sparkline width, in characters.
const SPARK_WIDTH: usize = 80;

/// Density sparkline levels, lowest first.
const SPARK_RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', 'o', '*', '%', '@'];

pub fn histogram(hist: &Histogram, output: OutputMode) {
    println!(
        "histogram: {} samples in {} bins, {:.3} .. {:.3}",
        hist.total(),
        hist.counts.len(),
        hist.min,
        hist.max
    );
    let top = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    for (nr, count) in hist.counts.iter().enumerate() {
        let bar = "#".repeat(count * BAR_WIDTH / top);
        if output.colored() {
            println!(
                "{:>10.3} | \x1b[0;32m{}\x1b[0m {}",
                hist.bin_center(nr),
                bar,
                count
            );
        } else {
            println!("{:>10.3} | {} {}", hist.bin_center(nr), bar, count);
        }
    }
}

pub fn density(curve: &DensityCurve, output: OutputMode) {
    let peak = curve.peak();
    let spark = sparkline(&curve.values, peak);
    let label = format!("bw = {}", curve.bandwidth);
    if output.colored() {
        println!(
            "{:<10} [{:.1} .. {:.1}] \x1b[0;36m{}\x1b[0m peak {:.4}",
            label, curve.start, curve.stop, spark, peak
        );
    } else {
        println!(
            "{:<10} [{:.1} .. {:.1}] {} peak {:.4}",
            label, curve.start, curve.stop, spark, peak
        );
    }
}

/// Compress values into a fixed-width character row, scaled to the peak.
fn sparkline(values: &[f64], peak: f64) -> String {
    if values.is_empty() || peak <= 0.0 {
        return String::new();
    }
    let chunk = values.len().div_ceil(SPARK_WIDTH);
    values
        .chunks(chunk)
        .map(|bucket| {
            let level = mean(bucket) / peak * (SPARK_RAMP.len() - 1) as f64;
            SPARK_RAMP[(level.round() as usize).min(SPARK_RAMP.len() - 1)]
        })
        .collect()
}

#[test]
fn test_sparkline() {
    let spark = sparkline(&[0.0, 0.5, 1.0], 1.0);
    // levels 0, 4.5 (rounds away from zero) and 9
    assert_eq!(spark, " +@");
    assert_eq!(sparkline(&[], 1.0), "");
}

pub fn sample_table(table: &SampleTable) {
    for section in &table.sections {
        println!("{}: {} samples", section.name, section.samples.len());
        if !section.samples.is_empty() {
            println!(
                "  {}",
                section
                    .samples
                    .iter()
                    .map(|value| format!("{:.4}", value))
                    .join(" ")
            );
        }
    }
}

pub fn sweep_table(table: &SweepTable) {
    if table.entries.is_empty() {
        println!("no sweep lines found");
        return;
    }
    for entry in &table.entries {
        println!(
            "{}: {}",
            entry.key,
            entry
                .values
                .iter()
                .map(|value| format!("{}", value))
                .join(" ")
        );
    }
}
