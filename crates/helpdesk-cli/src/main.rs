//! `helpdesk` command-line front end: interactive chat and one-shot answers.

mod config;
mod repl;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::HelpdeskConfig;
use helpdesk_core::{Persona, Tone};
use helpdesk_retrieval::{load_corpus, RetrievalEngine, SimilarityIndex};
use helpdesk_session::{ChatSession, CsvFeedbackSink};
use repl::Repl;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "helpdesk.toml";

#[derive(Parser)]
#[command(name = "helpdesk", about = "Helpdesk — FAQ answers from a support Q&A corpus")]
struct Cli {
    /// Path to config file (defaults to ./helpdesk.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Corpus CSV (overrides config)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Persona, e.g. "returns_specialist" (overrides config)
    #[arg(long)]
    persona: Option<Persona>,

    /// Tone, e.g. "friendly" (overrides config)
    #[arg(long)]
    tone: Option<Tone>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat
    Chat,
    /// Answer a single question and exit
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// List available personas
    Personas,
    /// List available tones
    Tones,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn build_engine(config: &HelpdeskConfig) -> anyhow::Result<Arc<RetrievalEngine>> {
    let entries = load_corpus(&config.corpus.path, config.corpus.min_answer_chars)
        .await
        .with_context(|| format!("Failed to load corpus '{}'", config.corpus.path.display()))?;
    let index = SimilarityIndex::build(entries)?;
    Ok(Arc::new(RetrievalEngine::new(Arc::new(index), config.retrieval)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Personas => {
            println!("{}", repl::list_personas());
            return Ok(());
        }
        Commands::Tones => {
            println!("{}", repl::list_tones());
            return Ok(());
        }
        Commands::Chat | Commands::Ask { .. } => {}
    }

    // Load config
    let (config_path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    let mut config = HelpdeskConfig::load(&config_path, required).await?;
    if let Some(corpus) = cli.corpus {
        config.corpus.path = corpus;
    }
    if let Some(persona) = cli.persona {
        config.session.persona = persona;
    }
    if let Some(tone) = cli.tone {
        config.session.tone = tone;
    }

    let engine = build_engine(&config).await?;
    info!(
        entries = engine.index().len(),
        vocabulary = engine.index().vocabulary_size(),
        threshold = engine.config().confidence_threshold,
        "Helpdesk ready"
    );

    let mut session = ChatSession::new(engine, config.session);

    match cli.command {
        Commands::Ask { question } => {
            let question = question.join(" ");
            if let Some(reply) = session.submit_message(&question) {
                println!(
                    "{}",
                    repl::render_reply(session.persona(), &reply.text, &reply.suggestions)
                );
            }
        }
        Commands::Chat => {
            let sink = CsvFeedbackSink::new(config.output.feedback_path.clone());
            let mut repl = Repl::new(session, sink, config.output.transcript_path.clone());
            println!("{}", repl.banner());

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                match repl.handle_line(&line).await {
                    Ok(Some(output)) if output.is_empty() => {}
                    Ok(Some(output)) => println!("{output}"),
                    Ok(None) => break,
                    Err(e) => eprintln!("Error: {e}"),
                }
            }

            let stats = repl.session().stats();
            info!(
                session_id = %repl.session().id(),
                queries = stats.queries_handled,
                feedback = stats.feedback_received,
                "Session ended"
            );
        }
        Commands::Personas | Commands::Tones => {}
    }

    Ok(())
}
