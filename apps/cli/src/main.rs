// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ZoneKit CLI - converts a space-boundary document into an EnergyPlus IDF.
//!
//! The conversion runs on a blocking worker thread. Its events are streamed
//! back over a channel while it works; the IDF file is only written when the
//! run produced a model.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinError;
use zonekit_core::{
    Event, EventSink, MaterialLibrary, Pipeline, Reporter, RunOutcome, RunStatus, Severity,
    SimulationSettings,
};

mod config;

use config::{Cli, Config};

/// Forwards pipeline events to the async side
struct ChannelSink(UnboundedSender<Event>);

impl EventSink for ChannelSink {
    fn emit(&self, event: Event) {
        let _ = self.0.send(event);
    }
}

/// Events seen per severity
#[derive(Debug, Default)]
struct Tally {
    warnings: usize,
    errors: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,zonekit_core=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(RunStatus::Errors) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunStatus> {
    let config = Config::from_env().with_cli(cli);
    let output = config.output_path();

    let library = match &config.materials {
        Some(path) => MaterialLibrary::load(path)
            .with_context(|| format!("loading material library {}", path.display()))?,
        None => MaterialLibrary::new(),
    };
    let mut settings = match &config.settings {
        Some(path) => SimulationSettings::load(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => SimulationSettings::default(),
    };
    if let Some(distance) = config.snap_distance {
        settings.max_snap_distance = distance;
    }

    tracing::info!(
        input = %config.input.display(),
        output = %output.display(),
        materials = library.len(),
        snap_distance = settings.max_snap_distance,
        "Starting conversion"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let collector = tokio::spawn(async move {
        let mut tally = Tally::default();
        while let Some(event) = rx.recv().await {
            match event.severity {
                Severity::Warning => tally.warnings += 1,
                Severity::Error => tally.errors += 1,
                Severity::Notification => {}
            }
        }
        tally
    });

    let pipeline = Pipeline::new(library, settings);
    let input = config.input.clone();
    let failure_tx = tx.clone();
    let worker = tokio::task::spawn_blocking(move || {
        let sink = ChannelSink(tx);
        pipeline.run_file(&input, &sink)
    });
    let outcome = settle(worker.await, &ChannelSink(failure_tx));

    // Both senders are gone now, which ends the stream
    let tally = collector.await.context("event collector failed")?;

    if let Some(model) = &outcome.model {
        model
            .write_to(&output)
            .with_context(|| format!("writing {}", output.display()))?;
        tracing::info!(path = %output.display(), "Wrote IDF");
    }
    if let Some(summary) = &outcome.summary {
        println!("{summary}");
    }
    println!(
        "Status: {} ({} warnings, {} errors)",
        outcome.status.as_str(),
        tally.warnings,
        tally.errors
    );

    Ok(outcome.status)
}

/// Outcome of the worker task. A panic becomes the run's single error event.
fn settle(joined: Result<RunOutcome, JoinError>, sink: &dyn EventSink) -> RunOutcome {
    match joined {
        Ok(outcome) => outcome,
        Err(e) => {
            let reporter = Reporter::new(sink);
            reporter.error(format!("Conversion failed: {e}"));
            RunOutcome {
                model: None,
                summary: None,
                status: reporter.status(),
            }
        }
    }
}
