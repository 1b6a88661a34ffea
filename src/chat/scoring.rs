//! Rule-based message scoring
//!
//! Every pattern is checked independently against the raw message, so one
//! word can trigger more than one rule ("whatever" is both dismissive and a
//! brush-off). Deltas are summed, then applied to the current levels with
//! clamping to 0..=100.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MIN_LEVEL: u32 = 0;
pub const MAX_LEVEL: u32 = 100;

/// Interest at or above which a late message offers to meet again
pub const CLOSING_OFFER_INTEREST: u32 = 85;
/// Messages left at or below which the closing offer is possible
pub const CLOSING_OFFER_MESSAGES_LEFT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Tone {
    fn from_interest_delta(delta: i32) -> Self {
        if delta > 5 {
            Tone::Positive
        } else if delta < -5 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageAnalysis {
    pub interest: u32,
    pub smoothness: u32,
    pub tone: Tone,
    pub should_offer_closing: bool,
    pub interest_delta: i32,
    pub smoothness_delta: i32,
    pub reasons: Vec<&'static str>,
}

/// Which level a rule moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Interest,
    Smoothness,
}

struct PatternRule {
    pattern: Regex,
    axis: Axis,
    delta: i32,
    reason: &'static str,
}

const RULE_TABLE: &[(&str, Axis, i32, &str)] = &[
    (r"(?i)\b(interesting|fascinating|amazing|incredible)\b", Axis::Interest, 8, "expressed fascination"),
    (r"(?i)\b(you seem|you're)\s+(smart|intelligent|thoughtful|insightful)\b", Axis::Interest, 10, "complimented intelligence"),
    (r"(?i)\b(tell me more|what do you think|how do you)\b", Axis::Interest, 6, "asked engaging question"),
    (r"(?i)\b(coffee|study|psychology|literature|books)\b", Axis::Interest, 5, "showed interest in her interests"),
    (r"\?\s*$", Axis::Interest, 4, "asked question"),
    (r"😊|😄|👋|❤️", Axis::Interest, 3, "used positive emoji"),
    (r"(?i)\b(whatever|boring|don't care|who cares)\b", Axis::Interest, -15, "dismissive language"),
    (r"(?i)\b(hot|sexy|beautiful)\b", Axis::Interest, -8, "inappropriate comment"),
    (r"(?i)\b(wanna hook up|netflix and chill|come over)\b", Axis::Interest, -20, "inappropriate advance"),
    (r"😒|😤|🙄", Axis::Interest, -5, "negative emoji"),
    (r"(?i)\b(busy|gotta go|whatever)\b", Axis::Interest, -10, "dismissive"),
    (r"(?i)\b(would you like|how about|what if we)\b", Axis::Smoothness, 8, "smooth suggestion"),
    (r"(?i)\b(by the way|speaking of|that reminds me)\b", Axis::Smoothness, 5, "smooth transition"),
    (r"(?i)\b(I noticed|I saw|I heard)\b", Axis::Smoothness, 4, "observational opener"),
];

fn rules() -> &'static [PatternRule] {
    static RULES: OnceLock<Vec<PatternRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|&(pattern, axis, delta, reason)| PatternRule {
                pattern: Regex::new(pattern).expect("scoring pattern literal"),
                axis,
                delta,
                reason,
            })
            .collect()
    })
}

/// Apply a signed delta to a level, clamped to 0..=100
pub fn clamp_level(current: u32, delta: i32) -> u32 {
    (current as i64 + delta as i64).clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u32
}

/// Summed (interest, smoothness) deltas and the rules that fired
pub fn message_deltas(message: &str) -> (i32, i32, Vec<&'static str>) {
    let mut interest = 0;
    let mut smoothness = 0;
    let mut reasons = Vec::new();

    for rule in rules() {
        if rule.pattern.is_match(message) {
            match rule.axis {
                Axis::Interest => interest += rule.delta,
                Axis::Smoothness => smoothness += rule.delta,
            }
            reasons.push(rule.reason);
        }
    }

    let length = message.chars().count();
    if length > 150 {
        interest -= 5;
        reasons.push("message too long");
    } else if length < 10 {
        interest -= 8;
        smoothness -= 5;
        reasons.push("message too short");
    } else if (30..=100).contains(&length) {
        interest += 3;
        smoothness += 3;
        reasons.push("good message length");
    }

    (interest, smoothness, reasons)
}

/// Score one learner message against the current conversation levels
pub fn score_message(
    message: &str,
    current_interest: u32,
    current_smoothness: u32,
    messages_left: u32,
) -> MessageAnalysis {
    let (interest_delta, smoothness_delta, reasons) = message_deltas(message);
    let interest = clamp_level(current_interest, interest_delta);
    let smoothness = clamp_level(current_smoothness, smoothness_delta);

    let analysis = MessageAnalysis {
        interest,
        smoothness,
        tone: Tone::from_interest_delta(interest_delta),
        should_offer_closing: messages_left <= CLOSING_OFFER_MESSAGES_LEFT
            && interest >= CLOSING_OFFER_INTEREST,
        interest_delta,
        smoothness_delta,
        reasons,
    };

    tracing::debug!(
        "Scored message: interest {} -> {} ({:+}), smoothness {} -> {} ({:+}), {:?}: {}",
        current_interest,
        interest,
        interest_delta,
        current_smoothness,
        smoothness,
        smoothness_delta,
        analysis.tone,
        if analysis.reasons.is_empty() {
            "standard message".to_string()
        } else {
            analysis.reasons.join(", ")
        }
    );

    analysis
}

/// Final conversation score, 60% interest and 40% smoothness
pub fn composite_score(interest: u32, smoothness: u32) -> u32 {
    (interest as f64 * 0.6 + smoothness as f64 * 0.4).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(rules().len(), RULE_TABLE.len());
    }

    #[test]
    fn test_fascination_and_question() {
        // 31 chars: fascination +8, question +4, length +3
        let msg = "That sounds really interesting?";
        let analysis = score_message(msg, 50, 50, 10);
        assert_eq!(analysis.interest_delta, 15);
        assert_eq!(analysis.smoothness_delta, 3);
        assert_eq!(analysis.interest, 65);
        assert_eq!(analysis.tone, Tone::Positive);
    }

    #[test]
    fn test_whatever_hits_two_rules() {
        let analysis = score_message("whatever, i am bored now", 50, 50, 10);
        assert_eq!(analysis.interest_delta, -25);
        assert!(analysis.reasons.contains(&"dismissive language"));
        assert!(analysis.reasons.contains(&"dismissive"));
        assert_eq!(analysis.tone, Tone::Negative);
    }

    #[test]
    fn test_short_message_penalty() {
        let analysis = score_message("hey", 50, 50, 10);
        assert_eq!(analysis.interest_delta, -8);
        assert_eq!(analysis.smoothness_delta, -5);
        assert_eq!(analysis.interest, 42);
        assert_eq!(analysis.smoothness, 45);
    }

    #[test]
    fn test_long_message_penalty() {
        let msg = "a ".repeat(80);
        let analysis = score_message(&msg, 50, 50, 10);
        assert_eq!(analysis.interest_delta, -5);
        assert_eq!(analysis.smoothness_delta, 0);
        assert_eq!(analysis.tone, Tone::Neutral);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // nine characters, many more bytes
        let analysis = score_message("ééééééééé", 50, 50, 10);
        assert!(analysis.reasons.contains(&"message too short"));
    }

    #[test]
    fn test_smoothness_patterns() {
        let msg = "By the way, would you like to grab a table outside";
        let (interest, smoothness, _) = message_deltas(msg);
        assert_eq!(smoothness, 8 + 5 + 3);
        assert_eq!(interest, 3);
    }

    #[test]
    fn test_compliment_pattern() {
        let (interest, _, reasons) = message_deltas("Honestly you seem smart and kind");
        assert!(reasons.contains(&"complimented intelligence"));
        assert_eq!(interest, 10 + 3);
    }

    #[test]
    fn test_emoji_patterns() {
        let (interest, _, _) = message_deltas("ok then 🙄");
        assert_eq!(interest, -5 - 8);
        let (interest, _, _) = message_deltas("Nice to meet you too 😊");
        assert_eq!(interest, 3);
    }

    #[test]
    fn test_closing_offer_needs_late_and_high_interest() {
        let msg = "That is fascinating, tell me more?";
        assert!(score_message(msg, 80, 50, 2).should_offer_closing);
        assert!(!score_message(msg, 80, 50, 3).should_offer_closing);
        assert!(!score_message(msg, 40, 50, 1).should_offer_closing);
    }

    #[test]
    fn test_clamped_at_bounds() {
        let analysis = score_message("wanna hook up? whatever", 5, 0, 10);
        assert_eq!(analysis.interest, 0);
        let analysis = score_message("That is amazing, what do you think about books?", 99, 100, 10);
        assert_eq!(analysis.interest, 100);
        assert_eq!(analysis.smoothness, 100);
    }

    #[test]
    fn test_composite() {
        assert_eq!(composite_score(90, 50), 74);
        assert_eq!(composite_score(95, 55), 79);
        assert_eq!(composite_score(0, 0), 0);
        assert_eq!(composite_score(100, 100), 100);
        assert_eq!(composite_score(50, 50), 50);
    }

    proptest! {
        #[test]
        fn prop_levels_stay_in_range(msg in ".{0,200}", interest in 0u32..=100, smooth in 0u32..=100, left in 0u32..=10) {
            let analysis = score_message(&msg, interest, smooth, left);
            prop_assert!(analysis.interest <= 100);
            prop_assert!(analysis.smoothness <= 100);
        }

        #[test]
        fn prop_composite_between_inputs(i in 0u32..=100, s in 0u32..=100) {
            let c = composite_score(i, s);
            prop_assert!(c >= i.min(s) && c <= i.max(s));
        }

        #[test]
        fn prop_clamp_level(current in 0u32..=100, delta in -300i32..300) {
            let level = clamp_level(current, delta);
            prop_assert!(level <= 100);
            if (0..=100).contains(&(current as i32 + delta)) {
                prop_assert_eq!(level as i32, current as i32 + delta);
            }
        }
    }
}
