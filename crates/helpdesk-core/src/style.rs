use crate::{HelpdeskError, HelpdeskResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercase a selection string and fold spaces/hyphens to underscores,
/// so both "Returns Specialist" and "returns_specialist" resolve.
fn selection_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

// --- Persona ---

/// A named response-voice preset. Controls the assistant's greeting and
/// the label shown next to bot replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// General-purpose support voice.
    #[default]
    SupportAssistant,
    /// Focused on returns and refunds.
    ReturnsSpecialist,
    /// Terse refund-handling voice.
    RefundBot,
    /// Catch-all helper.
    GeneralHelp,
}

impl Persona {
    /// Every persona, in display order.
    pub const ALL: [Persona; 4] = [
        Persona::SupportAssistant,
        Persona::ReturnsSpecialist,
        Persona::RefundBot,
        Persona::GeneralHelp,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Persona::SupportAssistant => "Support Assistant",
            Persona::ReturnsSpecialist => "Returns Specialist",
            Persona::RefundBot => "Refund Bot",
            Persona::GeneralHelp => "General Help",
        }
    }

    /// Introductory greeting for this persona.
    pub fn greeting(self) -> &'static str {
        match self {
            Persona::SupportAssistant => "Hi there! How can I help you today?",
            Persona::ReturnsSpecialist => "Hey! Got a return or refund issue? I’m here to help!",
            Persona::RefundBot => "Hello. Let's talk about refunds. Share your details, please.",
            Persona::GeneralHelp => "Hi! Ask me anything, I’ll try to assist.",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Persona {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> HelpdeskResult<Self> {
        match selection_key(s).as_str() {
            "support_assistant" => Ok(Persona::SupportAssistant),
            "returns_specialist" => Ok(Persona::ReturnsSpecialist),
            "refund_bot" => Ok(Persona::RefundBot),
            "general_help" => Ok(Persona::GeneralHelp),
            _ => Err(HelpdeskError::Config(format!("Unknown persona: {s}"))),
        }
    }
}

// --- Tone ---

/// A text-transform preset applied to every bot reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Reply text unchanged.
    #[default]
    Professional,
    /// Cheerful emoji prefix.
    Friendly,
    /// Emoji prefix plus a joke teaser.
    Funny,
    /// First sentence only.
    Minimal,
}

impl Tone {
    /// Every tone, in display order.
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Friendly, Tone::Funny, Tone::Minimal];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Funny => "Funny",
            Tone::Minimal => "Minimal",
        }
    }

    /// Apply this tone to `text`. See [`apply_tone`].
    pub fn apply(self, text: &str) -> String {
        apply_tone(self, text)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> HelpdeskResult<Self> {
        match selection_key(s).as_str() {
            "professional" => Ok(Tone::Professional),
            "friendly" => Ok(Tone::Friendly),
            "funny" => Ok(Tone::Funny),
            "minimal" => Ok(Tone::Minimal),
            _ => Err(HelpdeskError::Config(format!("Unknown tone: {s}"))),
        }
    }
}

/// Transform a reply according to `tone`.
///
/// `Minimal` keeps the text up to and including the first `.`; text without
/// a period is returned unchanged.
pub fn apply_tone(tone: Tone, text: &str) -> String {
    match tone {
        Tone::Professional => text.to_string(),
        Tone::Friendly => format!("😊 Sure! {text}"),
        Tone::Funny => format!("😄 You got it! {text} (and maybe a joke later!)"),
        Tone::Minimal => match text.find('.') {
            Some(idx) => text[..=idx].to_string(),
            None => text.to_string(),
        },
    }
}
