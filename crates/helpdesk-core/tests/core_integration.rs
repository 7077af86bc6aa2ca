#![allow(clippy::unwrap_used, clippy::expect_used)]

use helpdesk_core::*;

// ---------------------------------------------------------------------------
// 1. Every persona has a distinct, non-empty greeting
// ---------------------------------------------------------------------------

#[test]
fn persona_greetings_are_distinct() {
    let greetings: Vec<&str> = Persona::ALL.iter().map(|p| p.greeting()).collect();
    for (i, g) in greetings.iter().enumerate() {
        assert!(!g.is_empty());
        assert!(
            !greetings[i + 1..].contains(g),
            "greeting {g:?} appears twice"
        );
    }
}

// ---------------------------------------------------------------------------
// 2. Tone dispatch through the enum method matches the free function
// ---------------------------------------------------------------------------

#[test]
fn tone_method_matches_free_function() {
    let msg = "Visit Returns > Start a Return within 30 days of purchase. Keep the receipt.";
    for tone in Tone::ALL {
        assert_eq!(tone.apply(msg), apply_tone(tone, msg));
    }
    assert_eq!(
        Tone::Minimal.apply(msg),
        "Visit Returns > Start a Return within 30 days of purchase."
    );
}

// ---------------------------------------------------------------------------
// 3. Unknown selections surface as config errors with the offending name
// ---------------------------------------------------------------------------

#[test]
fn unknown_selection_reports_name() {
    let err = "Sarcastic".parse::<Tone>().unwrap_err();
    assert!(matches!(err, HelpdeskError::Config(_)));
    assert!(err.to_string().contains("Sarcastic"));
}

// ---------------------------------------------------------------------------
// 4. Defaults match the initial session configuration
// ---------------------------------------------------------------------------

#[test]
fn defaults_are_support_assistant_and_professional() {
    assert_eq!(Persona::default(), Persona::SupportAssistant);
    assert_eq!(Tone::default(), Tone::Professional);
}
