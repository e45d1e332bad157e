// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

#[cfg(test)]
mod test_support {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Serializes tests that touch process environment variables.
    pub fn env_lock() -> MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

use anyhow::{Context, Result, bail};
use config::Config;
use misprofes_app::{AnsweringService, AppState, ConversationSession};
use runtime::ServiceRuntime;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `misprofes --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_path()?;
    logging::init(&log_path, config.log_level())
        .with_context(|| format!("set up logging; check [log] in {}", options.config_path.display()))?;

    let client = misprofes_api::Client::new(
        &config.api_base_url(),
        config.api_schema(),
        config.api_timeout()?,
    )
    .with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/schema/timeout or set MISPROFES_API_URL",
            options.config_path.display()
        )
    })?;
    tracing::info!(
        endpoint = %client.endpoint(),
        schema = client.schema().as_str(),
        timeout_ms = client.timeout().as_millis() as u64,
        config = %options.config_path.display(),
        "answering service configured"
    );

    if options.check_only {
        return Ok(());
    }

    if let Some(question) = options.ask {
        let mut client = client;
        return ask_once(&mut client, &question);
    }

    let mut state = AppState::default();
    let mut runtime = ServiceRuntime::new(client);
    misprofes_tui::run_app(&mut state, &mut runtime, config.ui_options())
}

/// One turn without the TUI. The assistant message, fallback included, goes
/// to stdout; a failed turn also exits non-zero.
fn ask_once<S: AnsweringService + ?Sized>(service: &mut S, question: &str) -> Result<()> {
    let mut session = ConversationSession::new();
    let Some(settlement) = session.run_turn(service, question) else {
        bail!("--ask needs a non-empty question");
    };
    if let Some(message) = session.log().get(settlement.message_index) {
        println!("{}", message.text);
    }
    match settlement.failure {
        Some(failure) => {
            tracing::warn!(%failure, "one-shot turn failed");
            bail!("query failed: {failure}")
        }
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    ask: Option<String>,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        ask: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--ask" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--ask requires a question"))?;
                options.ask = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("misprofes: pregunta sobre tus profesores");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and service settings");
    println!("  --ask <question>         Ask one question without the TUI");
    println!("  --help                   Show this help");
}
