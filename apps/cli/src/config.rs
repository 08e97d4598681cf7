// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converter configuration: environment variables overridden by arguments.

use std::path::PathBuf;

use clap::Parser;

/// Convert a space-boundary document into an EnergyPlus IDF file
#[derive(Debug, Parser)]
#[command(name = "zonekit", version, about, long_about = None)]
pub struct Cli {
    /// Engine document (JSON)
    pub input: PathBuf,

    /// Output IDF file [default: input with .idf extension]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Material library (JSON)
    #[arg(long)]
    pub materials: Option<PathBuf>,

    /// Simulation settings (JSON)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Maximum shading snap distance in metres
    #[arg(long)]
    pub snap_distance: Option<f64>,
}

/// Resolved configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// `ZONEKIT_MATERIALS`
    pub materials: Option<PathBuf>,
    /// `ZONEKIT_SETTINGS`
    pub settings: Option<PathBuf>,
    /// `ZONEKIT_SNAP_DISTANCE`
    pub snap_distance: Option<f64>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            materials: std::env::var("ZONEKIT_MATERIALS").ok().map(PathBuf::from),
            settings: std::env::var("ZONEKIT_SETTINGS").ok().map(PathBuf::from),
            snap_distance: std::env::var("ZONEKIT_SNAP_DISTANCE")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Apply command-line arguments on top
    pub fn with_cli(self, cli: Cli) -> Self {
        Self {
            input: cli.input,
            output: cli.output,
            materials: cli.materials.or(self.materials),
            settings: cli.settings.or(self.settings),
            snap_distance: cli.snap_distance.or(self.snap_distance),
        }
    }

    /// Output path, defaulting to the input with an `.idf` extension
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("idf"))
    }
}
