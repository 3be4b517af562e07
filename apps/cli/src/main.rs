mod jump;
mod osc52;
mod render;

use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hypr_explain_client::{DEFAULT_TOP_K, ExplainClient};
use hypr_explain_session::{ExplainSession, NavigationBridge, SessionStatus};
use hypr_highlight::{HighlightController, HighlightState};
use hypr_http::ReqwestHttpClient;

use crate::jump::JumpTarget;
use crate::osc52::Osc52Clipboard;
use crate::render::TerminalViewport;

#[derive(Parser)]
#[command(name = "why", version, about = "Ask why something happened in a transcript")]
struct Cli {
    /// Question to explain, e.g. "Why was the release delayed?"
    #[arg(long, short)]
    query: String,

    /// `speaker|text` transcript file; reads stdin when absent or `-`.
    #[arg(long, short)]
    transcript: Option<PathBuf>,

    #[arg(long, env = "EXPLAIN_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, env = "EXPLAIN_TOP_K", default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Evidence to jump to after the answer, as `<claim>.<evidence>` (1-based).
    #[arg(long)]
    jump: Option<JumpTarget>,

    #[arg(long, env = "EXPLAIN_HIGHLIGHT_MS", default_value_t = 2500)]
    highlight_ms: u64,

    /// Lines shown on each side of a jump target.
    #[arg(long, default_value_t = 2)]
    context: usize,

    /// Copy the explanation summary to the terminal clipboard (OSC 52).
    #[arg(long)]
    copy: bool,

    /// Copy the text of one transcript line (0-based turn index) to the clipboard.
    #[arg(long, value_name = "N")]
    copy_turn: Option<usize>,

    /// Print the normalized explanation as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_transcript(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript {}", path.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read transcript from stdin")?;
            Ok(raw)
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(err) = run(Cli::parse()).await {
        tracing::error!(error = %err, "command_failed");
        for cause in err.chain().skip(1) {
            tracing::error!(cause = %cause, "caused_by");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let raw = read_transcript(cli.transcript.as_ref())?;
    let http = ReqwestHttpClient::new(&cli.base_url).map_err(|e| anyhow!(e))?;

    let mut session = ExplainSession::new(ExplainClient::new(http)).with_top_k(cli.top_k);
    session.set_transcript(raw);
    session.set_query(cli.query);
    tracing::info!(
        turns = session.turns().len(),
        base_url = %cli.base_url,
        "requesting_explanation"
    );

    let explanation = match session.run().await? {
        SessionStatus::Ready(explanation) => explanation.clone(),
        SessionStatus::Failed(message) => return Err(anyhow!("{message}")),
        SessionStatus::Idle | SessionStatus::Loading => {
            return Err(anyhow!("request finished without a result"));
        }
    };

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &explanation)?;
        writeln!(stdout)?;
    } else {
        render::transcript(&mut stdout, session.turns())?;
        render::explanation(&mut stdout, &explanation)?;
    }
    drop(stdout);

    if cli.copy && session.copy_summary(&Osc52Clipboard) {
        tracing::info!("summary_copied");
    }

    if let Some(turn_index) = cli.copy_turn {
        if session.copy_turn(turn_index, &Osc52Clipboard) {
            tracing::info!(turn_index, "turn_copied");
        } else {
            tracing::warn!(turn_index, "turn_not_copied");
        }
    }

    if let Some(target) = cli.jump {
        let citation = target
            .select(&explanation)
            .ok_or_else(|| anyhow!("no evidence {target} in this explanation"))?;

        let viewport = TerminalViewport::new(session.turns(), cli.context);
        let highlight = HighlightController::builder()
            .hold(Duration::from_millis(cli.highlight_ms))
            .build();
        let mut rx = highlight.subscribe();
        let mut bridge = NavigationBridge::new(&viewport, highlight);

        let Some(index) = bridge.jump_to(citation, session.turns()) else {
            tracing::info!("transcript_empty_nothing_to_jump_to");
            return Ok(());
        };

        rx.borrow_and_update();
        while rx.changed().await.is_ok() {
            if *rx.borrow_and_update() == HighlightState::Idle {
                break;
            }
        }
        viewport.redraw(index)?;
    }

    Ok(())
}
