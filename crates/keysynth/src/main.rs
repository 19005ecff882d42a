//! keysynth command-line entry point.
//!
//! Loads the configuration, builds the layout resolver and event sink, then
//! runs one typing job on the blocking pool.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()              -- TOML file, then CLI overrides
//!  └─ LayoutResolver::new()      -- default table + locale patch
//!  └─ build_sink()               -- CoreGraphics on macOS, dry run elsewhere
//!  └─ EventSequencer / ChatDispatcher
//!  └─ TypingWorker::spawn(job)   -- Ctrl-C cancels at the next character
//! ```
//!
//! # Permissions (for beginners)
//!
//! On macOS, posting keyboard events requires the terminal (or the app that
//! launches keysynth) to be listed under System Settings → Privacy &
//! Security → Accessibility.  Without it the sink refuses to start.  Use
//! `--dry-run` to see what would be typed without that permission.

use std::{
    path::PathBuf,
    sync::{atomic::Ordering, Arc},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keysynth::application::{
    dispatch_chat::ChatDispatcher,
    type_text::{EventSequencer, FallbackPolicy, KeyEventSink},
};
use keysynth::infrastructure::{
    event_sink::dry_run::DryRunSink,
    storage::config::{load_config, AppConfig},
    worker::{JobOutcome, TypingJob, TypingWorker},
};
use keysynth_core::{LayoutResolver, ResolvedKey};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Layout-aware keyboard event synthesizer.
#[derive(Debug, Parser)]
#[command(name = "keysynth", version, about)]
struct Cli {
    /// Path to the configuration file (defaults to the platform config dir).
    #[arg(long, env = "KEYSYNTH_CONFIG")]
    config: Option<PathBuf>,

    /// Locale id selecting a layout patch, e.g. `de` or `de-DE`.
    #[arg(long, env = "KEYSYNTH_LOCALE")]
    locale: Option<String>,

    /// Delay before and after every key event, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Log events instead of posting them to the OS.
    #[arg(long)]
    dry_run: bool,

    /// Refuse text containing characters the layout cannot map.
    #[arg(long)]
    reject_unmapped: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type a string into the focused window.
    Type { text: String },
    /// Tap named keys in order, e.g. `esc t enter`.
    Tap {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Open the chat box, type and submit each message, then close it.
    Chat {
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Show how each character of TEXT resolves, without typing.
    Resolve {
        text: String,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(locale) = &self.locale {
            config.keyboard.locale = Some(locale.clone());
        }
        if let Some(delay_ms) = self.delay_ms {
            config.keyboard.key_delay_ms = delay_ms;
        }
        if self.reject_unmapped {
            config.keyboard.fallback = FallbackPolicy::Reject;
        }
    }
}

#[derive(Debug, Serialize)]
struct ResolveRow {
    character: char,
    #[serde(flatten)]
    key: ResolvedKey,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let resolver = Arc::new(LayoutResolver::new(config.keyboard.locale.as_deref()));
    match resolver.locale() {
        Some(locale) => info!(%locale, "using locale patch"),
        None => info!("using default ANSI layout"),
    }

    let job = match cli.command {
        Command::Resolve { text, json } => return print_resolution(&resolver, &text, json),
        Command::Type { text } => TypingJob::Type(text),
        Command::Tap { keys } => TypingJob::Tap(keys),
        Command::Chat { messages } => TypingJob::Chat(messages),
    };

    let sink = build_sink(cli.dry_run)?;
    let sequencer = EventSequencer::new(resolver, sink)
        .with_key_delay(config.keyboard.key_delay())
        .with_fallback_policy(config.keyboard.fallback);
    let dispatcher = ChatDispatcher::new(Arc::new(sequencer), config.chat.keys())
        .with_delays(config.chat.focus_delay(), config.chat.message_delay());
    let worker = TypingWorker::new(Arc::new(dispatcher));

    let handle = worker.spawn(job);

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let cancel = handle.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping after the current character");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let outcome = handle.wait().await?;
    match outcome {
        JobOutcome::Typed(typed) => info!(chars = typed.typed(), "typing finished"),
        JobOutcome::Tapped { tapped, .. } => info!(tapped, "key taps finished"),
        JobOutcome::Chat(report) => info!(sent = report.sent, "chat finished"),
    }
    if outcome.is_cancelled() {
        warn!("stopped early by interrupt");
    }

    Ok(())
}

/// Picks the event sink for this run.
fn build_sink(dry_run: bool) -> anyhow::Result<Arc<dyn KeyEventSink>> {
    if dry_run {
        return Ok(Arc::new(DryRunSink::new()));
    }

    #[cfg(target_os = "macos")]
    let sink: Arc<dyn KeyEventSink> = Arc::new(
        keysynth::infrastructure::event_sink::macos::MacosEventSink::new()
            .context("cannot post keyboard events (grant Accessibility access or use --dry-run)")?,
    );

    #[cfg(not(target_os = "macos"))]
    let sink: Arc<dyn KeyEventSink> = {
        warn!("no native event backend on this platform, running as --dry-run");
        Arc::new(DryRunSink::new())
    };

    Ok(sink)
}

fn print_resolution(resolver: &LayoutResolver, text: &str, json: bool) -> anyhow::Result<()> {
    let rows: Vec<ResolveRow> = text
        .chars()
        .map(|character| ResolveRow {
            character,
            key: resolver.resolve(character),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        let mut mods = Vec::new();
        if row.key.needs_shift {
            mods.push("shift");
        }
        if row.key.needs_option {
            mods.push("option");
        }
        println!(
            "{:?}\t{}\t{}{}",
            row.character,
            row.key.code,
            if mods.is_empty() { "-".to_string() } else { mods.join("+") },
            if row.key.is_fallback() { "\t(unmapped, raw code point)" } else { "" },
        );
    }
    Ok(())
}
