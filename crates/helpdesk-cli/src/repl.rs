//! Interactive chat loop.
//!
//! Plain lines are questions; lines starting with `/` are commands.

use helpdesk_core::{HelpdeskResult, Persona, Tone};
use helpdesk_session::{export_json, ChatSession, FeedbackSink, Vote};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  /persona <name>      switch persona (see /personas)
  /tone <name>         switch tone (see /tones)
  /good, /bad          rate the last reply
  /stats               show session analytics
  /export [path]       save the chat log as text
  /export-json [path]  save every turn as JSON
  /personas, /tones    list available presets
  /help                show this help
  /quit                leave";

/// A parsed input line.
#[derive(Debug, PartialEq)]
pub enum Command {
    Message(String),
    Persona(String),
    Tone(String),
    Vote(Vote),
    Stats,
    Export(Option<PathBuf>),
    ExportJson(Option<PathBuf>),
    Personas,
    Tones,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let Some(rest) = line.trim().strip_prefix('/') else {
        return Command::Message(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let path_arg = || (!arg.is_empty()).then(|| PathBuf::from(arg));
    match name {
        "persona" => Command::Persona(arg.to_string()),
        "tone" => Command::Tone(arg.to_string()),
        "good" | "helpful" => Command::Vote(Vote::Helpful),
        "bad" | "unhelpful" => Command::Vote(Vote::NotHelpful),
        "stats" => Command::Stats,
        "export" => Command::Export(path_arg()),
        "export-json" => Command::ExportJson(path_arg()),
        "personas" => Command::Personas,
        "tones" => Command::Tones,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Lines printed after a bot reply: the labelled text plus suggestions.
pub fn render_reply(persona: Persona, text: &str, suggestions: &[String]) -> String {
    let mut out = format!("🤖 {persona}: {text}");
    if !suggestions.is_empty() {
        let bullets: Vec<String> = suggestions.iter().map(|q| format!("  • {q}")).collect();
        out.push_str("\nRelated Questions:\n");
        out.push_str(&bullets.join("\n"));
    }
    out
}

pub fn list_personas() -> String {
    Persona::ALL
        .iter()
        .map(|p| format!("  {p} — {}", p.greeting()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn list_tones() -> String {
    Tone::ALL
        .iter()
        .map(|t| format!("  {t}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drives one [`ChatSession`] from text commands.
pub struct Repl<S: FeedbackSink> {
    session: ChatSession,
    sink: S,
    transcript_path: PathBuf,
}

impl<S: FeedbackSink> Repl<S> {
    pub fn new(session: ChatSession, sink: S, transcript_path: PathBuf) -> Self {
        Self {
            session,
            sink,
            transcript_path,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Greeting shown when the loop starts.
    pub fn banner(&self) -> String {
        format!(
            "🤖 {}: {}\n(type /help for commands)",
            self.session.persona(),
            self.session.greeting()
        )
    }

    /// Handle one input line. Returns `None` when the user quits.
    pub async fn handle_line(&mut self, line: &str) -> HelpdeskResult<Option<String>> {
        let output = match parse_command(line) {
            Command::Quit => return Ok(None),
            Command::Message(text) => match self.session.submit_message(&text) {
                Some(reply) => render_reply(self.session.persona(), &reply.text, &reply.suggestions),
                None => String::new(),
            },
            Command::Persona(name) => match name.parse::<Persona>() {
                Ok(persona) => {
                    self.session.set_persona(persona);
                    format!("🤖 {persona}: {}", persona.greeting())
                }
                Err(e) => e.to_string(),
            },
            Command::Tone(name) => match name.parse::<Tone>() {
                Ok(tone) => {
                    self.session.set_tone(tone);
                    format!("Tone set to {tone}.")
                }
                Err(e) => e.to_string(),
            },
            Command::Vote(vote) => match self.session.last_bot_reply().map(str::to_string) {
                Some(reply) => {
                    self.session.record_feedback(reply, vote);
                    self.sink.save(self.session.feedback()).await?;
                    format!("Thanks! Recorded as {vote}.")
                }
                None => "Nothing to rate yet.".to_string(),
            },
            Command::Stats => {
                let stats = self.session.stats();
                format!(
                    "Queries handled: {}\nFeedback received: {} ({} helpful, {} not helpful)",
                    stats.queries_handled, stats.feedback_received, stats.helpful, stats.not_helpful
                )
            }
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| self.transcript_path.clone());
                tokio::fs::write(&path, self.session.export_transcript()).await?;
                format!("Chat log saved to {}", path.display())
            }
            Command::ExportJson(path) => {
                let path = path.unwrap_or_else(|| self.transcript_path.with_extension("json"));
                tokio::fs::write(&path, export_json(self.session.turns())?).await?;
                format!("Transcript saved to {}", path.display())
            }
            Command::Personas => list_personas(),
            Command::Tones => list_tones(),
            Command::Help => HELP.to_string(),
            Command::Unknown(name) => format!("Unknown command '/{name}'. Type /help for commands."),
        };
        Ok(Some(output))
    }
}
