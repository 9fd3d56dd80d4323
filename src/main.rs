//! MindMate CLI
//!
//! Usage:
//!   mindmate --serve                              # HTTP API server
//!   mindmate --mood sad --note "long week"        # One-shot check-in
//!   mindmate --mood stressed --rich               # One-shot with walker calls
//!   mindmate --mood happy --json                  # JSON output

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use serde_json::json;

use mindmate::core::{run_server, Orchestrator};
use mindmate::types::{
    ComposedResponse, GenerationSettings, MoodRequest, Provenance, Sentiment, Settings,
    WalkerResult, WalkerSchedule, WalkerSettings,
};
use mindmate::{GENERATION_TIMEOUT_SECS, VERSION, WALKER_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "mindmate",
    version = VERSION,
    about = "MindMate - mood check-ins with generated or fallback support",
    long_about = "MindMate classifies a mood, asks a generation service for a\n\
                  supportive message, and falls back to a fixed catalog when the\n\
                  service is unavailable.\n\n\
                  Modes:\n  \
                  --serve        HTTP API server\n  \
                  --mood <MOOD>  One-shot check-in (add --rich for walker calls)"
)]
struct Args {
    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Mood for a one-shot check-in
    #[arg(short, long)]
    mood: Option<String>,

    /// Optional note for a one-shot check-in
    #[arg(short, long, default_value = "")]
    note: String,

    /// One-shot: structured support plus walker calls
    #[arg(long)]
    rich: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Generation service credential
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Generation service endpoint override
    #[arg(long, env = "GEMINI_URL")]
    endpoint: Option<String>,

    /// Generation timeout in seconds
    #[arg(long, default_value_t = GENERATION_TIMEOUT_SECS)]
    generation_timeout_secs: u64,

    /// Walker engine executable
    #[arg(long, env = "JAC_BIN", default_value = "jac")]
    jac_bin: PathBuf,

    /// Walker program entry point
    #[arg(long, env = "JAC_MAIN", default_value = "jaseci/walkers/main.jac")]
    jac_main: PathBuf,

    /// Per-walker timeout in seconds
    #[arg(long, default_value_t = WALKER_TIMEOUT_SECS)]
    walker_timeout_secs: u64,

    /// Run the four walker calls concurrently instead of in sequence
    #[arg(long)]
    concurrent_walkers: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            generation: GenerationSettings {
                api_key: self.api_key.clone(),
                endpoint: self.endpoint.clone(),
                timeout: Duration::from_secs(self.generation_timeout_secs),
            },
            walker: WalkerSettings {
                jac_bin: self.jac_bin.clone(),
                entry_point: self.jac_main.clone(),
                timeout: Duration::from_secs(self.walker_timeout_secs),
            },
            schedule: if self.concurrent_walkers {
                WalkerSchedule::Concurrent
            } else {
                WalkerSchedule::Sequential
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mindmate=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let orchestrator = Orchestrator::from_settings(args.settings());

    match args.mood.as_deref() {
        Some(mood) if !args.serve => run_once(&orchestrator, mood, &args).await,
        _ => run_server(&args.addr, orchestrator).await,
    }
}

/// Run a single check-in and print the result
async fn run_once(orchestrator: &Orchestrator, mood: &str, args: &Args) -> anyhow::Result<()> {
    let request = MoodRequest::new(mood, args.note.as_str());

    let response = if args.rich {
        let raw = json!({ "mood": mood, "note": args.note });
        orchestrator.support(&request, &raw).await
    } else {
        orchestrator.analyze(&request).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

/// Terminal rendering of a composed response
fn print_response(response: &ComposedResponse) {
    let sentiment = match response.analysis.sentiment {
        Sentiment::Positive => "positive".green(),
        Sentiment::Negative => "negative".yellow(),
    };
    let provenance = match response.provenance {
        Provenance::Generated => "generated".cyan(),
        Provenance::Fallback => "fallback".bright_black(),
    };

    println!(
        "{} {} (confidence {:.2}) [{}]",
        "sentiment:".bold(),
        sentiment,
        response.analysis.confidence,
        provenance
    );
    println!("{} {}", "support:".bold(), response.support.supportive_text());
    for affirmation in response.support.affirmations() {
        println!("  - {}", affirmation.italic());
    }

    let walkers = [
        ("analyze_mood", &response.mood_analysis),
        ("log_mood", &response.log),
        ("store_suggestion", &response.store),
        ("trend_agent", &response.trend),
    ];
    for (name, result) in walkers {
        if let Some(result) = result {
            print_walker(name, result);
        }
    }
    println!("{} {}", "status:".bold(), response.status);
}

fn print_walker(name: &str, result: &WalkerResult) {
    let detail = match result {
        WalkerResult::Json(value) => value.to_string().normal(),
        WalkerResult::Raw { raw } => raw.as_str().normal(),
        WalkerResult::Error { error } => error.as_str().red(),
    };
    println!("  {:<17} {:<5} {}", name, result.kind(), detail);
}
