use thiserror::Error;

use crate::core::types::{LessonId, QuestionId};

#[derive(Error, Debug)]
pub enum HuzzError {
    #[error("Lesson not found: {0}")]
    LessonNotFound(LessonId),

    #[error("Question {question} not found in lesson {lesson}")]
    QuestionNotFound { lesson: LessonId, question: QuestionId },

    #[error("Lesson {0} has no questions left")]
    LessonFinished(LessonId),

    #[error("Conversation is over: no messages left")]
    ConversationOver,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("A drag is already in progress")]
    DragInProgress,

    #[error("No drag in progress")]
    NoActiveDrag,

    #[error("Invalid drag: {0}")]
    InvalidDrag(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HuzzError>;
