//! stacknav
//!
//! Replays deep links through the navigation coordinator and prints every
//! router event as one JSON object per line.
//!
//! # Architecture Overview
//!
//! ```text
//!   deep links ──▶ DeepLinkRouter ──▶ PendingActionGate ──┐
//!                                                         ▼
//!   flow outputs ─────────────────────────────────▶ Coordinator ──▶ RouterEvent (stdout)
//!                                                   │    ▲
//!                                  ┌────────────────┘    │
//!                                  ▼                     │
//!                        NavigationSequencer        Scheduler<Timer>
//!                        PresentationQueue               ▲
//!                                                        │
//!                                          driver (tokio or manual clock)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use stacknav::app::Session;
use stacknav::config::{load_config, NavConfig};
use stacknav::lifecycle::driver::{advance, run_until_idle, DriveOutcome};
use stacknav::observability;
use stacknav::routing::{match_path, PathPattern};
use stacknav::schedule::{Clock, ManualClock, TokioClock};
use stacknav::{Coordinator, RouterEvent};

#[derive(Parser)]
#[command(name = "stacknav")]
#[command(about = "Drive the navigation coordinator from the command line", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open deep links (e.g. `cards/42 account/profile`) and print router events
    Replay {
        /// Start with the demo session instead of the login screen
        #[arg(long)]
        signed_in: bool,

        /// Skip real waiting; settle delays elapse on a virtual clock
        #[arg(long)]
        virtual_time: bool,

        links: Vec<String>,
    },
    /// Match a path against a pattern and print the extracted parameters
    Match {
        pattern: String,
        path: String,

        #[arg(long)]
        case_sensitive: bool,

        /// Require the whole path to match instead of a prefix
        #[arg(long)]
        exact: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => NavConfig::default(),
    };
    observability::init(&config.observability.log_level);

    tracing::info!(
        settle_delay_ms = config.navigation.settle_delay_ms,
        presentation_delay_ms = config.navigation.presentation_delay_ms,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Replay {
            signed_in,
            virtual_time,
            links,
        } => replay(config, signed_in, virtual_time, &links).await?,
        Commands::Match {
            pattern,
            path,
            case_sensitive,
            exact,
        } => {
            let pattern = PathPattern::new(pattern)
                .case_sensitive(case_sensitive || config.matching.case_sensitive)
                .match_to_end(exact)
                .boundary_chars(config.matching.boundary_chars.clone());
            if let Err(err) = pattern.compile() {
                return Err(err.clone().into());
            }
            let output = match match_path(&pattern, &path) {
                Some(m) => json!({
                    "matched_path": m.matched_path,
                    "base_path": m.base_path,
                    "parameters": m.parameters,
                }),
                None => serde_json::Value::Null,
            };
            println!("{output}");
        }
    }

    Ok(())
}

async fn replay(
    config: NavConfig,
    signed_in: bool,
    virtual_time: bool,
    links: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let manual = ManualClock::new();
    let tokio_clock = TokioClock::new();
    let clock: Arc<dyn Clock> = if virtual_time {
        Arc::new(manual.clone())
    } else {
        Arc::new(tokio_clock)
    };

    let mut coordinator = Coordinator::new(config, clock.clone());
    let printer = tokio::spawn(print_events(coordinator.subscribe()));

    if signed_in {
        coordinator.sign_in(Session::demo());
    }

    for link in links {
        let segments: Vec<&str> = link.split('/').filter(|s| !s.is_empty()).collect();
        if !coordinator.open_url(&segments) {
            tracing::warn!(link = %link, "No route for deep link");
        }

        if virtual_time {
            while let Some(deadline) = coordinator.next_deadline() {
                advance(&mut coordinator, &manual, deadline.saturating_sub(manual.now()));
            }
        } else {
            let outcome = run_until_idle(&mut coordinator, &tokio_clock, async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await;
            if outcome == DriveOutcome::Shutdown {
                break;
            }
        }
    }

    let summary = json!({
        "event": "final_state",
        "elapsed_ms": clock.now().as_millis() as u64,
        "root": coordinator.root(),
        "screens": coordinator.screens(),
        "presentation": coordinator.presentation(),
        "pending_action": coordinator.pending_action().map(|p| &p.action),
        "deferred_link": coordinator.has_deferred_link(),
    });

    // Closing the channel lets the printer drain and exit.
    drop(coordinator);
    printer.await?;
    println!("{summary}");
    Ok(())
}

async fn print_events(mut events: tokio::sync::broadcast::Receiver<RouterEvent>) {
    use tokio::sync::broadcast::error::RecvError;

    loop {
        match events.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::error!(error = %err, "Failed to encode router event"),
            },
            Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "Event printer lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}
