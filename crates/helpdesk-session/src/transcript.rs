use crate::session::ChatTurn;
use helpdesk_core::HelpdeskResult;

/// Render user/bot exchanges as a plain-text log.
///
/// Each user message is paired with a bot reply by position, giving
/// `"You: …\nBot: …"` per pair, pairs joined by newlines. Suggestions turns
/// are skipped. Pairing is positional: if the two counts ever diverge the
/// surplus turns are dropped.
pub fn export_text(turns: &[ChatTurn]) -> String {
    let users = turns.iter().filter_map(|t| match t {
        ChatTurn::User { text } => Some(text.as_str()),
        _ => None,
    });
    let bots = turns.iter().filter_map(|t| match t {
        ChatTurn::Bot { text } => Some(text.as_str()),
        _ => None,
    });
    users
        .zip(bots)
        .map(|(user, bot)| format!("You: {user}\nBot: {bot}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize every turn, suggestions included, as a pretty JSON array.
pub fn export_json(turns: &[ChatTurn]) -> HelpdeskResult<String> {
    Ok(serde_json::to_string_pretty(turns)?)
}
