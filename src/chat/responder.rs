//! Rule-based partner replies
//!
//! Replies are picked by topic first, then by conversation stage, then by
//! interest tier. Where a tier has several interchangeable lines the choice
//! comes from a seeded RNG so a whole conversation replays identically.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// How far into the conversation we are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Early,
    Middle,
    Late,
}

impl Stage {
    /// Stage from the number of messages already sent
    pub fn from_sent(sent: u32) -> Self {
        if sent <= 3 {
            Stage::Early
        } else if sent <= 7 {
            Stage::Middle
        } else {
            Stage::Late
        }
    }
}

const ENGAGED: [&str; 5] = [
    "That's really fascinating!",
    "Oh wow, I love that perspective!",
    "That's such an interesting way to think about it!",
    "You have such thoughtful insights!",
    "I'm really enjoying our conversation!",
];

const INTERESTED: [&str; 5] = [
    "That's interesting!",
    "I can see what you mean.",
    "That's a good point.",
    "That makes sense.",
    "I hadn't thought of it that way.",
];

const NEUTRAL: [&str; 5] = ["I see.", "That's nice.", "Mm-hmm.", "Okay.", "Right."];

const DISINTERESTED: [&str; 5] = [
    "Oh, okay.",
    "I see.",
    "That's... interesting.",
    "Mm-hmm.",
    "Right.",
];

const FALLBACK_HIGH: [&str; 5] = [
    "That's really fascinating! Tell me more about that.",
    "Oh wow, I never thought about it that way! What made you think of that?",
    "That's such an interesting perspective! I'd love to hear more.",
    "You have such thoughtful insights! What else do you think about this?",
    "I'm really enjoying our conversation! That's a great point.",
];

const FALLBACK_MEDIUM: [&str; 5] = [
    "That's interesting! Tell me more about that.",
    "Oh really? I'd like to hear more about that.",
    "That's a good point. What do you think about it?",
    "Hmm, that's worth thinking about.",
    "I see what you mean. That makes sense.",
];

const FALLBACK_LOW: [&str; 5] = [
    "Oh, okay. That's nice.",
    "Mm-hmm, I see.",
    "That's... interesting.",
    "Oh, alright then.",
    "Yeah, I guess so.",
];

/// Suggests meeting again; only sent when the scorer says to offer a closing
pub const MEET_AGAIN_LINE: &str = "You know what? I've really enjoyed talking with you! Maybe we could continue this conversation over dinner sometime? 😊";

/// Pick one of four lines by interest tier (>=80, >=60, >=40, below)
fn by_tier(interest: u32, lines: [&'static str; 4]) -> &'static str {
    if interest >= 80 {
        lines[0]
    } else if interest >= 60 {
        lines[1]
    } else if interest >= 40 {
        lines[2]
    } else {
        lines[3]
    }
}

fn mentions_any(lower: &str, words: &[&str]) -> bool {
    words.iter().any(|w| lower.contains(w))
}

/// Deterministic reply source for the conversation partner
#[derive(Debug, Clone)]
pub struct RuleResponder {
    rng: ChaCha8Rng,
    budget: u32,
}

impl RuleResponder {
    pub fn new(seed: u64, budget: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            budget,
        }
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        pool.choose(&mut self.rng).copied().unwrap_or("Mm-hmm.")
    }

    /// Reply to `message`.
    ///
    /// `interest` and `messages_left` are the values before this message was
    /// counted.
    pub fn reply(
        &mut self,
        message: &str,
        interest: u32,
        messages_left: u32,
        offer_closing: bool,
    ) -> String {
        if offer_closing {
            return MEET_AGAIN_LINE.to_string();
        }

        let stage = Stage::from_sent(self.budget.saturating_sub(messages_left));
        let lower = message.to_lowercase();

        if mentions_any(&lower, &["coffee", "drink", "latte", "tea"]) {
            return by_tier(
                interest,
                [
                    "I love coffee! This place has amazing latte art. We should definitely grab coffee together sometime! ☕ What's your favorite type of coffee?",
                    "The coffee here is really good! I usually get their vanilla latte. What about you? ☕",
                    "Yeah, the coffee here is decent. I come here pretty regularly. ☕",
                    "Mm-hmm, it's okay. I'm not too particular about coffee. ☕",
                ],
            )
            .to_string();
        }

        if mentions_any(
            &lower,
            &["study", "psychology", "school", "university", "major"],
        ) {
            return by_tier(
                interest,
                [
                    "Psychology is so fascinating! I love understanding how people think and behave. What got you interested in that topic?",
                    "I'm studying psychology! It's really interesting learning about human behavior. Are you in school too?",
                    "Yeah, I'm a psychology major. Just taking a break from studying right now.",
                    "I study psychology. Just trying to get through my coursework.",
                ],
            )
            .to_string();
        }

        if mentions_any(
            &lower,
            &["you seem", "you look", "you're", "smart", "interesting"],
        ) {
            return by_tier(
                interest,
                [
                    "That's so sweet of you to say! I really appreciate that. You seem pretty thoughtful yourself! 😊",
                    "Thank you! That's really nice of you to say. 😊",
                    "Thanks, I appreciate that.",
                    "Oh, thanks. That's nice of you to say.",
                ],
            )
            .to_string();
        }

        if lower.contains('?') {
            return if interest >= 80 {
                format!(
                    "That's such a great question! I love that you asked that. {}",
                    self.pick(&ENGAGED)
                )
            } else if interest >= 60 {
                format!("{} What made you think of that?", self.pick(&INTERESTED))
            } else if interest >= 40 {
                self.pick(&NEUTRAL).to_string()
            } else {
                self.pick(&DISINTERESTED).to_string()
            };
        }

        if stage == Stage::Late {
            let line = if interest >= 70 {
                "This has been a really nice chat! I hope we run into each other here again. 😊"
            } else if interest >= 50 {
                "Thanks for the chat! Maybe I'll see you around here again."
            } else {
                "Well, I should probably get back to my studying. Take care!"
            };
            return line.to_string();
        }

        if interest >= 80 {
            format!("{} Tell me more about that!", self.pick(&ENGAGED))
        } else if interest >= 60 {
            self.pick(&INTERESTED).to_string()
        } else if interest >= 40 {
            self.pick(&NEUTRAL).to_string()
        } else {
            self.pick(&DISINTERESTED).to_string()
        }
    }

    /// Stand-in when a generated reply is unusable
    pub fn fallback_reply(&mut self, message: &str, interest: u32) -> String {
        let lower = message.to_lowercase();
        if mentions_any(&lower, &["coffee", "drink"]) {
            return if interest > 60 {
                "I love coming here for the coffee! Their latte art is amazing. Do you come here often? ☕"
            } else {
                "Yeah, the coffee here is decent. ☕"
            }
            .to_string();
        }
        if mentions_any(&lower, &["study", "school", "book"]) {
            return if interest > 60 {
                "I'm actually taking a break from studying psychology right now. What do you study or what kind of books do you like?"
            } else {
                "I'm studying psychology. Just taking a quick break."
            }
            .to_string();
        }

        let pool: &[&'static str] = if interest >= 70 {
            &FALLBACK_HIGH
        } else if interest <= 40 {
            &FALLBACK_LOW
        } else {
            &FALLBACK_MEDIUM
        };
        self.pick(pool).to_string()
    }
}
