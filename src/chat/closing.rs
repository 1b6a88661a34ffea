//! Fixed lines that open and close the conversation

pub const WELCOME_MESSAGE: &str =
    "Hi! I'm Sarah. I come here often to study and grab coffee. Nice to meet you! 😊";

/// Interest floor and line for each closing tier, best first
const CLOSING_TIERS: [(u32, &str); 4] = [
    (
        90,
        "You know what? I've really enjoyed chatting with you! Here's my number - text me and we'll set up that coffee date! 😊 I'd love to continue this conversation over dinner sometime.",
    ),
    (
        80,
        "I've really enjoyed our conversation! Maybe we could grab coffee together sometime? I'd love to chat more! 😊",
    ),
    (
        65,
        "This has been a really nice chat! I hope I see you around here again sometime. 😊",
    ),
    (45, "Thanks for the chat! Maybe I'll see you around here again. 👋"),
];

const CLOSING_BRUSH_OFF: &str = "Well, I should really get back to my studying. Take care! 👋";

/// The last thing said once the message budget runs out
pub fn closing_line(final_interest: u32) -> &'static str {
    CLOSING_TIERS
        .iter()
        .find(|(floor, _)| final_interest >= *floor)
        .map(|(_, line)| *line)
        .unwrap_or(CLOSING_BRUSH_OFF)
}
