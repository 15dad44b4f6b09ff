// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Undine CLI entrypoint.
//!
//! Runs the interactive TUI. The generation backend address comes from `--backend`, the
//! `UNDINE_BACKEND_URL` environment variable, or the local development default. Diagnostics
//! go to a log file (`--log-file` / `UNDINE_LOG`) so they never corrupt the alternate screen;
//! without one, log events are dropped.

use std::error::Error;
use std::io;
use std::sync::Mutex;

use undine::client::GenerationClient;
use undine::config::{BackendConfig, LOG_FILE_ENV};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--backend <url>] [--log-file <path>] [--demo]\n\n\
         --backend   generation backend base URL (default: $UNDINE_BACKEND_URL or http://localhost:8000)\n\
         --log-file  append diagnostics to this file (default: $UNDINE_LOG, or discard)\n\
         --demo      preload a built-in sample result; no backend required"
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    backend: Option<String>,
    log_file: Option<String>,
    demo: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--backend" => {
                if options.backend.is_some() {
                    return Err(());
                }
                options.backend = Some(args.next().ok_or(())?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_logging(log_file: Option<String>) -> Result<(), Box<dyn Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("undine=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "undine".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let log_file = options.log_file.or_else(|| std::env::var(LOG_FILE_ENV).ok());
        init_logging(log_file)?;

        let config = options.backend.map(BackendConfig::new).unwrap_or_else(BackendConfig::from_env);
        tracing::info!(backend = config.base_url(), demo = options.demo, "undine starting");
        let client = GenerationClient::new(&config);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let handle = tokio::runtime::Handle::current();
            let demo = options.demo;
            let tui_join = tokio::task::spawn_blocking(move || {
                undine::tui::run(client, handle, demo).map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(io::Error::new(io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("undine: {err}");
        std::process::exit(1);
    }
}
