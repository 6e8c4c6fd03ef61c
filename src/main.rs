mod cli;
mod ui;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{Cli, Command};
use ui::{Report, Spinner};
use usersync::config::SyncConfig;
use usersync::engine::{Reconciler, assign_single_team, compare, record_emails, table_emails};
use usersync::io;
use usersync::model::{DirectorySnapshot, Table, Template, UserRecord};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let report = Report::default();

    let config = match SyncConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report.error(&format!("{e:#}"));
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cli, &config);

    match run(cli.command, &config, &report) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli, config: &SyncConfig) {
    let level = if cli.verbose {
        "debug"
    } else {
        cli.log_level.as_deref().unwrap_or(&config.log_level)
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(command: Command, config: &SyncConfig, report: &Report) -> Result<()> {
    match command {
        Command::Process {
            input,
            template,
            directory,
            generate_extensions,
            json,
            csv,
        } => {
            let template = Template::load(&template)
                .with_context(|| format!("failed to load template {}", template.display()))?;
            let snapshot = DirectorySnapshot::load(&directory)
                .with_context(|| format!("failed to load directory {}", directory.display()))?;
            let table = read_input(&input, config)?;

            let directory = snapshot.directory();
            let registry = snapshot.registry();
            let mut allocator = snapshot.allocator();
            info!(
                identities = directory.len(),
                teams = registry.len(),
                extensions_in_use = allocator.len(),
                "directory snapshot loaded"
            );

            let generate = generate_extensions || config.generate_extensions;
            let reconciler = Reconciler::new(&template, &directory, &registry);
            let outcome = reconciler
                .run(&table, generate.then_some(&mut allocator))
                .with_context(|| format!("failed to process {}", input.display()))?;

            report.print_batch(&outcome);
            write_outputs(
                &template,
                &outcome.records,
                json.as_deref(),
                csv.as_deref(),
                config,
                report,
            )?;
        }

        Command::Compare { records, input } => {
            let current = io::load_records(&records)
                .with_context(|| format!("failed to load records {}", records.display()))?;
            let table = read_input(&input, config)?;
            let incoming = table_emails(&table)
                .with_context(|| format!("failed to read emails from {}", input.display()))?;

            let comparison = compare(record_emails(&current), incoming);
            report.print_comparison(&comparison);
        }

        Command::SetTeam {
            records,
            team,
            template,
            json,
            csv,
        } => {
            let mut loaded = io::load_records(&records)
                .with_context(|| format!("failed to load records {}", records.display()))?;
            let touched = assign_single_team(&mut loaded, &team)?;
            report.success(&format!(
                "Team '{team}' set for all {} users ({touched} carry that team)",
                loaded.len()
            ));

            let template = template
                .map(|path| {
                    Template::load(&path)
                        .with_context(|| format!("failed to load template {}", path.display()))
                })
                .transpose()?;
            let json = json.unwrap_or(records);
            match &template {
                Some(template) => write_outputs(
                    template,
                    &loaded,
                    Some(json.as_path()),
                    csv.as_deref(),
                    config,
                    report,
                )?,
                None => {
                    io::save_json(&json, &loaded)
                        .with_context(|| format!("failed to write {}", json.display()))?;
                    report.success(&format!("JSON saved to '{}'", json.display()));
                }
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path, config: &SyncConfig) -> Result<Table> {
    let spinner = Spinner::start(&format!("Reading {}", path.display()));
    let table = io::read_table(path, config.header_row);
    spinner.finish();
    let table = table.with_context(|| format!("failed to read {}", path.display()))?;
    info!(rows = table.len(), columns = table.headers.len(), "input loaded");
    Ok(table)
}

fn write_outputs(
    template: &Template,
    records: &[UserRecord],
    json: Option<&Path>,
    csv: Option<&Path>,
    config: &SyncConfig,
    report: &Report,
) -> Result<()> {
    if let Some(path) = json {
        io::save_json(path, records)
            .with_context(|| format!("failed to write {}", path.display()))?;
        report.success(&format!("JSON saved to '{}'", path.display()));
    }
    if let Some(path) = csv {
        io::save_csv(path, template, records, config.delimiter_byte())
            .with_context(|| format!("failed to write {}", path.display()))?;
        report.success(&format!("CSV saved to '{}'", path.display()));
    }
    Ok(())
}
