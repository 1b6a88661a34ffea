//! Lesson and question definitions

use crate::core::types::{LessonId, QuestionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Display and reward metadata for a lesson
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonMetadata {
    /// XP granted for a 100% score
    pub xp_reward: u32,
    pub estimated_minutes: u32,
    pub difficulty: Difficulty,
    pub required_level: u32,
    #[serde(default)]
    pub completion_emoji: String,
}

/// A learner's answer to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Choice(String),
    Order(Vec<String>),
}

/// A quiz question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Question {
    MultipleChoice(MultipleChoiceQuestion),
    DragDrop(DragDropQuestion),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub emoji: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragDropQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub words: Vec<String>,
    pub correct_order: Vec<String>,
    pub explanation: String,
    #[serde(default)]
    pub emoji: String,
}

impl MultipleChoiceQuestion {
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}

impl DragDropQuestion {
    /// Order matters: the same words in another order are wrong
    pub fn is_correct(&self, order: &[String]) -> bool {
        order == self.correct_order.as_slice()
    }

    /// Whether `correct_order` uses exactly the multiset of `words`
    pub fn order_is_permutation(&self) -> bool {
        let mut words = self.words.clone();
        let mut order = self.correct_order.clone();
        words.sort();
        order.sort();
        words == order
    }
}

impl Question {
    pub fn id(&self) -> &QuestionId {
        match self {
            Question::MultipleChoice(q) => &q.id,
            Question::DragDrop(q) => &q.id,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.prompt,
            Question::DragDrop(q) => &q.prompt,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.explanation,
            Question::DragDrop(q) => &q.explanation,
        }
    }

    /// Check an answer; an answer of the wrong kind is simply incorrect
    pub fn is_correct(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (Question::MultipleChoice(q), Answer::Choice(choice)) => q.is_correct(choice),
            (Question::DragDrop(q), Answer::Order(order)) => q.is_correct(order),
            _ => false,
        }
    }
}

/// A complete lesson
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonDefinition {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub metadata: LessonMetadata,
    pub questions: Vec<Question>,
    /// Lessons that must be completed before this one unlocks
    #[serde(default)]
    pub prerequisites: Vec<LessonId>,
}

impl LessonDefinition {
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}
