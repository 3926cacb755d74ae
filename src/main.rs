mod args;
mod classifier;
mod diagnostics;
mod error;
mod lookup_table;
mod output;
mod parsers;
mod protocol;
mod records;
mod tests;

use std::{fs::OpenOptions, process::ExitCode, time::Instant};

use anyhow::Context;
use args::{Cli, ConfigFile};
use clap::Parser;
use classifier::process_flow_log;
use diagnostics::{DiagnosticSink, LogSink};
use env_logger::{Env, Target};
use log::{debug, error, warn};
use lookup_table::load_lookup_table;
use output::write_output;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref());

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Error loading configuration file: {:?}", e);
            return ExitCode::FAILURE;
        }
    };

    if run(&config, &LogSink) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Sends log output to `log_file` when given, to stderr otherwise. `RUST_LOG` overrides
/// the default `info` filter.
fn init_logging(log_file: Option<&str>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    let mut open_error = None;
    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => open_error = Some((path, e)),
        }
    }

    builder.init();

    if let Some((path, e)) = open_error {
        warn!("Could not open log file {}, logging to stderr: {}", path, e);
    }
}

/// A configuration file, when given, replaces the input and output options.
fn load_config(cli: &Cli) -> anyhow::Result<ConfigFile> {
    match &cli.config_file {
        Some(path) => confy::load_path::<ConfigFile>(path)
            .with_context(|| format!("failed to load configuration from {}", path)),
        None => Ok(ConfigFile {
            input: cli.input.clone(),
            output: cli.output.clone(),
        }),
    }
}

/// Loads the lookup table, classifies the flow log and writes the report.
///
/// Unreadable inputs leave their stage empty and the report is still written.
/// Returns `false` only if the report could not be written.
fn run(config: &ConfigFile, sink: &dyn DiagnosticSink) -> bool {
    let start = Instant::now();

    let table = load_lookup_table(&config.input.lookup, sink);
    let counts = process_flow_log(&config.input.flow_log, &table, sink);
    let written = write_output(
        config.output.output,
        &config.output.export_path,
        &counts,
        sink,
    );

    debug!(
        "Duration: {:?} milliseconds",
        start.elapsed().as_millis()
    );
    written
}
