// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module is the entrypoint of the benchsift command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::path::PathBuf;

use benchsift_parser::Layout;
use benchsift_report::{Bandwidth, DensityCurve, Histogram};

mod render;

/// Evaluation positions of a density curve.
const DENSITY_POINTS: usize = 200;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_subcommand = true)]
struct Cli {
    #[clap(long, help = "Section layout file (yaml or json)", value_name = "FILE")]
    layout: Option<PathBuf>,

    #[clap(long, help = "Save the parsed table as json", value_name = "FILE")]
    report: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[clap(about = "Draw a section histogram with density overlays")]
    Hist {
        path: PathBuf,

        #[clap(long, default_value = "seq", help = "Section to draw")]
        section: String,

        #[clap(long, default_value_t = 50, help = "Histogram bin count")]
        bins: usize,

        #[clap(
            long,
            value_delimiter = ',',
            default_value = "auto,0.1,0.01",
            help = "Density kernel bandwidths"
        )]
        bandwidth: Vec<Bandwidth>,

        #[clap(
            long,
            value_parser = parse_domain,
            default_value = "1:40",
            help = "Density display domain"
        )]
        domain: (f64, f64),
    },

    #[clap(about = "Print every section of a benchmark log")]
    Parse { path: PathBuf },

    #[clap(about = "Accumulate a parameter sweep log")]
    Sweep { path: PathBuf },

    // Debug row tokenizer
    #[clap(hide = true, about = "Tokenize a single data row")]
    DebugRow { line: String },
}

fn parse_domain(s: &str) -> Result<(f64, f64), String> {
    let (start, stop) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:STOP, got {:?}", s))?;
    let start: f64 = start
        .parse()
        .map_err(|e| format!("bad domain start: {}", e))?;
    let stop: f64 = stop.parse().map_err(|e| format!("bad domain stop: {}", e))?;
    if stop <= start {
        return Err(format!("empty domain: {}:{}", start, stop));
    }
    Ok((start, stop))
}

impl Cli {
    fn run(self, output: OutputMode) -> Result<()> {
        let layout = match &self.layout {
            Some(path) => Layout::from_path(path).context("Failed to load the layout")?,
            None => Layout::reference(),
        };
        match self.command {
            Commands::Hist {
                path,
                section,
                bins,
                bandwidth,
                domain,
            } => {
                let table = benchsift_parser::parse_path(&path, &layout)
                    .with_context(|| format!("Failed to parse {:?}", path))?;
                if let Some(report) = self.report {
                    table.save(&report).context("Failed to write the report")?;
                    tracing::info!("Wrote report {:?}", report);
                    return Ok(());
                }
                let samples = table.get(&section).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unknown section {:?}, expected one of: {}",
                        section,
                        table.names().join(", ")
                    )
                })?;
                let hist = Histogram::from_samples(samples, bins)
                    .with_context(|| format!("No histogram for section {:?}", section))?;
                render::histogram(&hist, output);
                for bw in bandwidth {
                    match DensityCurve::evaluate(samples, bw, domain, DENSITY_POINTS) {
                        Ok(curve) => render::density(&curve, output),
                        Err(e) => tracing::warn!("No density curve for bw = {}: {}", bw, e),
                    }
                }
                Ok(())
            }

            Commands::Parse { path } => {
                let table = benchsift_parser::parse_path(&path, &layout)
                    .with_context(|| format!("Failed to parse {:?}", path))?;
                match self.report {
                    Some(report) => {
                        table.save(&report).context("Failed to write the report")?;
                        tracing::info!("Wrote report {:?}", report);
                    }
                    None => render::sample_table(&table),
                }
                Ok(())
            }

            Commands::Sweep { path } => {
                let table = benchsift_parser::parse_sweep_path(&path)
                    .with_context(|| format!("Failed to parse {:?}", path))?;
                render::sweep_table(&table);
                Ok(())
            }

            Commands::DebugRow { line } => {
                let token = line.split_whitespace().last().unwrap_or("");
                match benchsift_parser::token_value(token) {
                    Some(value) => println!("{:?} -> {}", token, value),
                    None => println!("{:?} -> malformed", token),
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Copy)]
pub enum OutputMode {
    // Print every steps
    Debug,
    // Render with ansi colors
    FastTerminal,
    // Render plain text
    Quiet,
}

impl OutputMode {
    pub fn colored(&self) -> bool {
        matches!(self, OutputMode::FastTerminal)
    }
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let logger = tracing_subscriber::Registry::default();

    let (_flush, debug) = match std::env::var_os("BENCHSIFT_LOG") {
        None => {
            // Default INFO stdout logger
            logger
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .compact()
                        .with_filter(tracing_subscriber::filter::LevelFilter::INFO),
                )
                .init();
            (None, false)
        }
        Some(_level) => {
            // Tracing spans
            let logger = logger.with(
                tracing_tree::HierarchicalLayer::new(1)
                    .with_targets(true)
                    .with_bracketed_fields(true)
                    .with_filter(tracing_subscriber::filter::EnvFilter::from_env(
                        "BENCHSIFT_LOG",
                    )),
            );
            let flush = if let Ok(fp) = std::env::var("BENCHSIFT_TRACE") {
                let chrome = tracing_chrome::ChromeLayerBuilder::new()
                    .file(fp)
                    .include_args(true)
                    .build();
                logger.with(chrome.0).init();
                // Return the chrome flush guard so that it is not dropped until the end
                Some(chrome.1)
            } else {
                logger.init();
                None
            };
            (flush, true)
        }
    };
    let output_mode = if debug {
        OutputMode::Debug
    } else if atty::is(atty::Stream::Stdout) {
        OutputMode::FastTerminal
    } else {
        OutputMode::Quiet
    };
    Cli::parse().run(output_mode)
}
