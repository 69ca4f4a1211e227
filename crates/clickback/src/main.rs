//! clickback - record left clicks and keystrokes, then play them back
//!
//! Supported: Windows

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod console;
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod prompt;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use clickback_core::Error;
use clickback_recorder::SessionReport;

#[derive(Parser)]
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
#[command(name = "clickback")]
#[command(about = "Record left clicks and keystrokes until CTRL + ALT + Q, then play them back")]
#[command(version)]
struct Cli {
    /// Number of playback passes (asked for when omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    repeat: Option<u32>,
    /// Pause after each replayed click, in ms (asked for when omitted)
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u32).range(1..))]
    click_delay: Option<u32>,
    /// Pause after each replayed key event, in ms (asked for when omitted)
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u32).range(1..))]
    key_delay: Option<u32>,
    /// Seconds to wait before recording starts
    #[arg(long, value_name = "SECS", default_value = "4")]
    countdown: u32,
    /// Invalid answers allowed per question
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..))]
    attempts: u32,
    #[arg(long)]
    no_banner: bool,
    /// Don't echo captured events or print progress dots
    #[arg(short, long)]
    quiet: bool,
    /// Print the session report as JSON on stdout
    #[arg(long)]
    json: bool,
    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Output<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Error>,
}

impl<T: Serialize> Output<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }
    fn err(e: Error) -> Output<()> {
        Output { success: false, data: None, error: Some(e) }
    }
}

fn print_json<T: Serialize>(output: &T) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to encode report: {}", e),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Keep stdout clean for the JSON report
    let human: Box<dyn Write> = if cli.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    let result = run(&cli, human);

    match result {
        Ok(report) => {
            if cli.json {
                print_json(&Output::ok(report));
            }
        }
        Err(e) => {
            let err = match e.downcast::<Error>() {
                Ok(err) => err,
                Err(e) => Error::from(e),
            };
            if cli.json {
                print_json(&Output::<()>::err(err.clone()));
            } else {
                eprintln!("Error: {}", err.message);
                for s in &err.suggestions {
                    eprintln!("  hint: {}", s);
                }
            }
            std::process::exit(err.code.exit_code());
        }
    }
}

#[cfg(target_os = "windows")]
fn run(cli: &Cli, human: Box<dyn Write>) -> Result<SessionReport> {
    use crate::console::Console;
    use crate::prompt::{Prompter, REPEAT_QUESTION};
    use clickback_core::{ErrorCode, SendInputInjector};
    use clickback_recorder::prelude::*;

    let config = RecorderConfig::default();
    let mut console = Console::new(human, cli.quiet);
    let prompt_out: Box<dyn Write> = if cli.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut prompter = Prompter::new(io::stdin().lock(), prompt_out, cli.attempts);

    if !cli.no_banner {
        console.banner();
    }
    console.countdown(cli.countdown, &config.stop_gesture, &mut ThreadPacer);
    let repeat = prompter.value_or_prompt(cli.repeat, REPEAT_QUESTION)?;

    let mut session = RecordingSession::new();
    let handle = session.stop_handle();
    // Playback always runs to completion, reset included
    ctrlc::set_handler(move || match handle.interrupt() {
        InterruptOutcome::Stopped => {}
        InterruptOutcome::Ignored => tracing::warn!("playback cannot be interrupted"),
        InterruptOutcome::Idle => std::process::exit(ErrorCode::Interrupted.exit_code()),
    })?;

    let mut controller = SessionController::new(HookSource::new(), ThreadPacer, config);
    let mut injector = SendInputInjector::new();
    let report = controller.run(&mut session, &mut injector, &mut console, |_| {
        prompter.playback(repeat, cli.click_delay, cli.key_delay)
    })?;

    console.summary(report.stats.passes, report.events_recorded);
    Ok(report)
}

#[cfg(not(target_os = "windows"))]
fn run(_cli: &Cli, _human: Box<dyn Write>) -> Result<SessionReport> {
    tracing::warn!(os = std::env::consts::OS, "no native input hooks");
    Err(Error::not_supported("Global input capture").into())
}
