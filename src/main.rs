//! CLI entry point for paramedit.

use std::io;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};

use paramedit::cli::Cli;
use paramedit::config::AppConfig;
use paramedit::host::{Host, SnapshotSink, output_sink};
use paramedit::logging::{LogTarget, init_logging};
use paramedit::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "paramedit", &mut io::stdout());
        return Ok(());
    }

    let log_target = LogTarget::resolve(cli.log_file.as_deref(), cli.interactive);
    let _guard = init_logging(&log_target, &cli.log_level);

    let config = AppConfig::figment(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    if cli.interactive {
        return tui::run(config, &cli);
    }

    let sink = output_sink(cli.output.as_deref(), config.output.format)?;
    run_headless(&cli, config, sink)?;
    if let Some(ref path) = cli.output {
        eprintln!("Wrote snapshot to {}", path.display());
    }

    Ok(())
}

/// Apply scripted edits to a fresh editor and save once.
fn run_headless<S: SnapshotSink>(cli: &Cli, config: AppConfig, sink: S) -> Result<()> {
    let mut host = Host::with_editor(config.editor.params, config.editor.model, sink);
    if let Some(editor) = host.editor_mut() {
        cli.apply_edits(editor);
    }
    host.save()?;
    Ok(())
}
