// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Geobridge CLI
//!
//! Converts native scene files (JSON-extracted host entities) to the
//! canonical geometry model and back.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use geobridge::{convert, convert_batch, NativeEntity, ScaleContext, Units};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geobridge")]
#[command(about = "Geobridge - canonical geometry interchange for CAD/BIM hosts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a native scene file to canonical JSON
    Convert {
        /// Input scene JSON file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Unit override (mm, cm, m, km, in, ft, yd, mi)
        #[arg(short, long)]
        units: Option<String>,
    },

    /// Convert to canonical and back, reporting the deviation
    Roundtrip {
        /// Input scene JSON file
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// On-disk form of an extracted host model: the cached per-document
/// scale state plus the entity list.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NativeScene {
    uor_per_unit: f64,
    units: Units,
    #[serde(default)]
    tolerance: Option<f64>,
    entities: Vec<NativeEntity>,
}

impl NativeScene {
    fn context(&self) -> ScaleContext {
        let ctx = ScaleContext::new(self.uor_per_unit, self.units);
        match self.tolerance {
            Some(t) => ctx.with_tolerance(t),
            None => ctx,
        }
    }
}

fn load_scene(path: &PathBuf) -> Result<NativeScene> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scene file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing scene file {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            units,
        } => {
            let scene = load_scene(&input)?;
            let mut ctx = scene.context();
            if let Some(name) = units {
                ctx = ctx.with_units_override(&name)?;
            }

            let outcome = convert_batch(&scene.entities, &ctx);
            for err in &outcome.errors {
                eprintln!("entity {}: {}", err.index, err.error);
            }
            if outcome.dropped_segments > 0 {
                eprintln!(
                    "warning: {} chain segment(s) could not be placed and were dropped",
                    outcome.dropped_segments
                );
            }
            if outcome.all_failed() {
                bail!("all {} entities failed to convert", outcome.errors.len());
            }

            let json = serde_json::to_string_pretty(&outcome.elements)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!(
                        "converted {} of {} entities -> {}",
                        outcome.elements.len(),
                        scene.entities.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
        }

        Commands::Roundtrip { input } => {
            let scene = load_scene(&input)?;
            let ctx = scene.context();
            let mut max_deviation: f64 = 0.0;
            let mut failures = 0usize;

            for (i, entity) in scene.entities.iter().enumerate() {
                let first = match convert::to_canonical(entity, &ctx) {
                    Ok(e) => e,
                    Err(err) => {
                        eprintln!("entity {}: {}", i, err);
                        failures += 1;
                        continue;
                    }
                };
                let rebuilt = convert::to_native(&first, &ctx)?;
                let second = convert::to_canonical(&rebuilt, &ctx)?;
                if let (Some(a), Some(b)) = (first.bbox(), second.bbox()) {
                    let da = a.base_plane.origin.distance_to(&b.base_plane.origin);
                    let ds = ((a.x_size.length() - b.x_size.length()).powi(2)
                        + (a.y_size.length() - b.y_size.length()).powi(2)
                        + (a.z_size.length() - b.z_size.length()).powi(2))
                    .sqrt();
                    max_deviation = max_deviation.max(da).max(ds);
                }
            }
            println!(
                "round-tripped {} entities, max bbox deviation {:.3e} {}",
                scene.entities.len() - failures,
                max_deviation,
                ctx.units
            );
            if failures > 0 {
                eprintln!("{} entities failed", failures);
            }
        }

        Commands::Version => {
            println!("geobridge {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
