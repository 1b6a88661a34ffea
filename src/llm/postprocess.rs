//! Turn raw model output into a single in-character reply

use super::persona::{LEARNER_LABEL, PARTNER_NAME};

/// Replies longer than this are cut back
pub const MAX_REPLY_CHARS: usize = 250;
/// A cut only snaps to a sentence end found after this many characters
const MIN_SENTENCE_CUT: usize = 100;
/// Anything shorter is treated as unusable
pub const MIN_REPLY_CHARS: usize = 10;

/// Pull the partner's first line out of the model output
pub fn extract_reply(generated: &str, prompt: &str) -> String {
    let marker = format!("{}:", PARTNER_NAME);
    let body = match generated.rfind(&marker) {
        Some(idx) => generated[idx + marker.len()..].trim().to_string(),
        None => generated.replace(prompt, "").trim().to_string(),
    };

    let first_line = body.lines().next().unwrap_or("");
    let learner_marker = format!("{}:", LEARNER_LABEL);
    let own_turn = first_line.split(learner_marker.as_str()).next().unwrap_or("");
    own_turn
        .trim_matches(|c: char| c == '"' || c.is_whitespace())
        .to_string()
}

/// Strip a wrapping quote and cap the length, preferring a sentence end
pub fn clean_reply(reply: &str) -> String {
    let is_quote = |c: char| c == '"' || c == '\'';
    let reply = reply.strip_prefix(is_quote).unwrap_or(reply);
    let reply = reply.strip_suffix(is_quote).unwrap_or(reply).trim();

    let chars: Vec<char> = reply.chars().collect();
    if chars.len() <= MAX_REPLY_CHARS {
        return reply.to_string();
    }

    let capped: String = chars[..MAX_REPLY_CHARS].iter().collect();
    let capped = capped.trim();
    let capped_chars: Vec<char> = capped.chars().collect();
    match capped_chars
        .iter()
        .rposition(|&c| matches!(c, '.' | '!' | '?'))
    {
        Some(end) if end > MIN_SENTENCE_CUT => capped_chars[..=end].iter().collect(),
        _ => capped.to_string(),
    }
}

/// Nudge reply length toward the current interest level
pub fn adjust_to_interest(reply: &str, interest: u32) -> String {
    let length = reply.chars().count();
    if interest > 80 && length < 30 {
        return format!("{} I'd love to hear more about that!", reply);
    }
    if interest < 30 && length > 100 {
        let first = reply
            .split(|c: char| matches!(c, '.' | '!' | '?'))
            .next()
            .unwrap_or(reply);
        return format!("{}.", first);
    }
    reply.to_string()
}

/// Full pipeline; `None` when nothing usable is left
pub fn finish_reply(generated: &str, prompt: &str, interest: u32) -> Option<String> {
    let reply = extract_reply(generated, prompt);
    let reply = clean_reply(&reply);
    let reply = adjust_to_interest(&reply, interest);
    if reply.chars().count() < MIN_REPLY_CHARS {
        None
    } else {
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_after_last_partner_marker() {
        let generated = "Person: hi\nSarah: \"Oh hey, I love this place!\"\nPerson: me too";
        assert_eq!(extract_reply(generated, ""), "Oh hey, I love this place!");
    }

    #[test]
    fn test_extract_without_marker_strips_prompt() {
        let prompt = "Conversation so far:\nPerson: hi\nSarah:";
        let generated = format!("{} Nice to meet you too. Person: and you", prompt);
        assert_eq!(extract_reply(&generated, "unused"), "Nice to meet you too.");

        let generated = "Just a plain answer here.\nSecond line";
        assert_eq!(extract_reply(generated, "prompt"), "Just a plain answer here.");
    }

    #[test]
    fn test_clean_caps_at_sentence_end() {
        let sentence = "This is a sentence that keeps going for a while. ";
        let long = sentence.repeat(8);
        let cleaned = clean_reply(&long);
        assert!(cleaned.chars().count() <= MAX_REPLY_CHARS);
        assert!(cleaned.ends_with('.'));
    }

    #[test]
    fn test_clean_hard_cut_without_late_sentence_end() {
        let long = "word ".repeat(80);
        let cleaned = clean_reply(&long);
        assert_eq!(cleaned.chars().count(), MAX_REPLY_CHARS - 1);
    }

    #[test]
    fn test_clean_strips_single_quotes() {
        assert_eq!(clean_reply("'Sure thing!'"), "Sure thing!");
    }

    #[test]
    fn test_adjust_to_interest() {
        assert_eq!(
            adjust_to_interest("Ha, nice.", 90),
            "Ha, nice. I'd love to hear more about that!"
        );
        let long = format!("Sure. {}", "x".repeat(120));
        assert_eq!(adjust_to_interest(&long, 10), "Sure.");
        assert_eq!(adjust_to_interest("Okay then.", 50), "Okay then.");
    }

    #[test]
    fn test_finish_rejects_too_short() {
        assert_eq!(finish_reply("Sarah: Hm.", "", 50), None);
        assert_eq!(
            finish_reply("Sarah: That's a lovely idea!", "", 50).as_deref(),
            Some("That's a lovely idea!")
        );
    }
}
