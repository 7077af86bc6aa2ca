use regex::Regex;
use std::sync::LazyLock;

/// URL-like and `@mention` tokens, each running up to the next whitespace.
static LINK_OR_MENTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"http\S+|@\S+").ok());

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()
}

fn clean_once(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = match LINK_OR_MENTION.as_ref() {
        Some(re) => re.replace_all(&lowered, ""),
        None => lowered.as_str().into(),
    };
    let kept: String = stripped.chars().filter(|&c| is_kept(c)).collect();
    kept.trim().to_string()
}

/// Normalize free text for indexing and lookup.
///
/// Lowercases, removes `http…` links and `@mentions`, drops every character
/// outside `[a-z0-9]` and whitespace, then trims. Total and deterministic;
/// garbage input yields the empty string.
///
/// Corpus questions and live queries must both pass through this function
/// so that their vocabularies line up.
pub fn normalize(text: &str) -> String {
    let mut current = clean_once(text);
    // Dropping punctuation can splice a fresh "http" prefix together
    // ("ht!tpx" -> "httpx"), so repeat until stable.
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
