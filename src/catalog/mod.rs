//! Static lesson catalog
//!
//! The catalog is read-only configuration data: a built-in set of lessons
//! ships with the crate and a replacement can be loaded from TOML.

pub mod builtin;
pub mod lesson;
pub mod loader;

pub use lesson::{
    Answer, Difficulty, DragDropQuestion, LessonDefinition, LessonMetadata,
    MultipleChoiceQuestion, Question,
};

use crate::core::error::{HuzzError, Result};
use crate::core::types::LessonId;
use std::collections::HashSet;

/// Ordered, validated list of lessons
#[derive(Debug, Clone)]
pub struct LessonCatalog {
    lessons: Vec<LessonDefinition>,
}

impl LessonCatalog {
    /// Build a catalog, rejecting inconsistent lesson data
    pub fn new(lessons: Vec<LessonDefinition>) -> Result<Self> {
        let catalog = Self { lessons };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The lessons that ship with the game
    pub fn builtin() -> Self {
        Self {
            lessons: builtin::lessons(),
        }
    }

    pub fn get(&self, id: &LessonId) -> Option<&LessonDefinition> {
        self.lessons.iter().find(|l| &l.id == id)
    }

    pub fn require(&self, id: &LessonId) -> Result<&LessonDefinition> {
        self.get(id)
            .ok_or_else(|| HuzzError::LessonNotFound(id.clone()))
    }

    pub fn first(&self) -> Option<&LessonDefinition> {
        self.lessons.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LessonDefinition> {
        self.lessons.iter()
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Check ids, prerequisites and question invariants
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let mut lesson_ids = HashSet::new();

        for lesson in &self.lessons {
            if !lesson_ids.insert(&lesson.id) {
                errors.push(format!("duplicate lesson id '{}'", lesson.id));
            }

            if lesson.questions.is_empty() {
                errors.push(format!("{}: lesson has no questions", lesson.id));
            }

            let mut question_ids = HashSet::new();
            for question in &lesson.questions {
                if !question_ids.insert(question.id()) {
                    errors.push(format!(
                        "{}: duplicate question id '{}'",
                        lesson.id,
                        question.id()
                    ));
                }
                match question {
                    Question::MultipleChoice(q) => {
                        if !q.options.contains(&q.correct_answer) {
                            errors.push(format!(
                                "{}/{}: correct answer is not one of the options",
                                lesson.id, q.id
                            ));
                        }
                    }
                    Question::DragDrop(q) => {
                        if !q.order_is_permutation() {
                            errors.push(format!(
                                "{}/{}: correct order is not a permutation of the words",
                                lesson.id, q.id
                            ));
                        }
                    }
                }
            }
        }

        for lesson in &self.lessons {
            for prereq in &lesson.prerequisites {
                if !lesson_ids.contains(prereq) {
                    errors.push(format!(
                        "{}: unknown prerequisite '{}'",
                        lesson.id, prereq
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(HuzzError::InvalidCatalog(errors.join("; ")))
        }
    }
}

impl Default for LessonCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
