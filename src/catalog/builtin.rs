//! Built-in lessons

use super::lesson::{
    Difficulty, DragDropQuestion, LessonDefinition, LessonMetadata, MultipleChoiceQuestion,
    Question,
};
use crate::core::types::{generate_id, LessonId, QuestionId};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn lessons() -> Vec<LessonDefinition> {
    vec![breaking_the_ice(), active_listening(), reading_body_language()]
}

fn breaking_the_ice() -> LessonDefinition {
    LessonDefinition {
        id: LessonId::new(generate_id("lesson", 1)),
        title: "Breaking the Ice".into(),
        description: "Learn how to start conversations naturally and confidently".into(),
        icon: "🌟".into(),
        metadata: LessonMetadata {
            xp_reward: 100,
            estimated_minutes: 15,
            difficulty: Difficulty::Beginner,
            required_level: 1,
            completion_emoji: "🎉".into(),
        },
        questions: vec![
            Question::MultipleChoice(MultipleChoiceQuestion {
                id: QuestionId::new(generate_id("q1", 1)),
                prompt: "What's the best way to start a conversation in a casual setting?".into(),
                options: strings(&[
                    "Hey, nice weather we're having!",
                    "I noticed you like [something they're wearing/doing]. That's really cool!",
                    "Do you come here often?",
                    "What's your sign?",
                ]),
                correct_answer:
                    "I noticed you like [something they're wearing/doing]. That's really cool!"
                        .into(),
                explanation:
                    "Personal observations show genuine interest and create a natural conversation opener."
                        .into(),
                emoji: "👋".into(),
            }),
            Question::DragDrop(DragDropQuestion {
                id: QuestionId::new(generate_id("q1", 2)),
                prompt: "Arrange these words to create a natural conversation starter:".into(),
                words: strings(&["that", "book", "interesting", "looks", "you're", "reading"]),
                correct_order: strings(&[
                    "that",
                    "book",
                    "you're",
                    "reading",
                    "looks",
                    "interesting",
                ]),
                explanation:
                    "This opener shows genuine interest in their activity and invites further discussion."
                        .into(),
                emoji: "📚".into(),
            }),
        ],
        prerequisites: Vec::new(),
    }
}

fn active_listening() -> LessonDefinition {
    LessonDefinition {
        id: LessonId::new(generate_id("lesson", 2)),
        title: "Active Listening".into(),
        description: "Master the art of engaging and attentive conversation".into(),
        icon: "👂".into(),
        metadata: LessonMetadata {
            xp_reward: 120,
            estimated_minutes: 20,
            difficulty: Difficulty::Beginner,
            required_level: 2,
            completion_emoji: "🎯".into(),
        },
        questions: vec![
            Question::MultipleChoice(MultipleChoiceQuestion {
                id: QuestionId::new(generate_id("q2", 1)),
                prompt: "Which response shows the best active listening?".into(),
                options: strings(&[
                    "That's cool.",
                    "Oh yeah, that reminds me of something that happened to me...",
                    "That sounds challenging. How did you handle that situation?",
                    "Interesting.",
                ]),
                correct_answer: "That sounds challenging. How did you handle that situation?"
                    .into(),
                explanation:
                    "This response acknowledges their feelings and encourages them to share more."
                        .into(),
                emoji: "🎯".into(),
            }),
            Question::DragDrop(DragDropQuestion {
                id: QuestionId::new(generate_id("q2", 2)),
                prompt: "Arrange these words to form an empathetic response:".into(),
                words: strings(&["must", "that", "been", "have", "difficult", "for", "you"]),
                correct_order: strings(&["that", "must", "have", "been", "difficult", "for", "you"]),
                explanation: "This response shows empathy and understanding of their experience."
                    .into(),
                emoji: "💭".into(),
            }),
        ],
        prerequisites: Vec::new(),
    }
}

fn reading_body_language() -> LessonDefinition {
    LessonDefinition {
        id: LessonId::new(generate_id("lesson", 3)),
        title: "Reading Body Language".into(),
        description: "Learn to interpret and use non-verbal communication".into(),
        icon: "🤸‍♀️".into(),
        metadata: LessonMetadata {
            xp_reward: 150,
            estimated_minutes: 25,
            difficulty: Difficulty::Intermediate,
            required_level: 3,
            completion_emoji: "✨".into(),
        },
        questions: vec![
            Question::MultipleChoice(MultipleChoiceQuestion {
                id: QuestionId::new(generate_id("q3", 1)),
                prompt: "What does it typically mean when someone mirrors your body position?"
                    .into(),
                options: strings(&[
                    "They're mocking you",
                    "They're comfortable and engaged with you",
                    "They're tired",
                    "They're not interested",
                ]),
                correct_answer: "They're comfortable and engaged with you".into(),
                explanation: "Mirroring is a natural sign of rapport and connection.".into(),
                emoji: "🪞".into(),
            }),
            Question::DragDrop(DragDropQuestion {
                id: QuestionId::new(generate_id("q3", 2)),
                prompt: "Arrange these body language cues from most to least positive:".into(),
                words: strings(&[
                    "crossed arms",
                    "eye contact",
                    "genuine smile",
                    "facing away",
                    "leaning in",
                ]),
                correct_order: strings(&[
                    "genuine smile",
                    "eye contact",
                    "leaning in",
                    "crossed arms",
                    "facing away",
                ]),
                explanation: "Open and engaged body language signals interest and comfort.".into(),
                emoji: "👥".into(),
            }),
        ],
        prerequisites: Vec::new(),
    }
}
