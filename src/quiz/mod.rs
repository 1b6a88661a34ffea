//! Interactive question state
//!
//! Per-question input handling for the two question kinds. Both produce an
//! [`Answer`] that the lesson run checks against the catalog.

pub mod drag_drop;
pub mod multiple_choice;

pub use drag_drop::{insertion_index, resolve_drop_target, DragDropBoard, DragState, TokenList};
pub use multiple_choice::ChoicePicker;

use crate::catalog::{Answer, Question};

/// Live input state for whichever question is on screen
#[derive(Debug, Clone)]
pub enum QuestionInput {
    Choice(ChoicePicker),
    Reorder(DragDropBoard),
}

impl QuestionInput {
    pub fn for_question(question: &Question) -> Self {
        match question {
            Question::MultipleChoice(q) => QuestionInput::Choice(ChoicePicker::new(q)),
            Question::DragDrop(q) => QuestionInput::Reorder(DragDropBoard::new(q)),
        }
    }

    /// The learner's current answer, if one has been given
    pub fn answer(&self) -> Option<Answer> {
        match self {
            QuestionInput::Choice(picker) => {
                picker.selected().map(|s| Answer::Choice(s.to_string()))
            }
            QuestionInput::Reorder(board) if !board.answer().is_empty() => {
                Some(Answer::Order(board.answer().to_vec()))
            }
            QuestionInput::Reorder(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LessonCatalog;

    #[test]
    fn test_input_matches_question_kind() {
        let catalog = LessonCatalog::builtin();
        let lesson = catalog.first().unwrap();

        let first = QuestionInput::for_question(&lesson.questions[0]);
        let second = QuestionInput::for_question(&lesson.questions[1]);
        assert!(matches!(first, QuestionInput::Choice(_)));
        assert!(matches!(second, QuestionInput::Reorder(_)));
        assert!(first.answer().is_none());
        assert!(second.answer().is_none());
    }

    #[test]
    fn test_reorder_answer_checks_against_question() {
        let catalog = LessonCatalog::builtin();
        let question = &catalog.first().unwrap().questions[1];
        let Question::DragDrop(dd) = question else {
            panic!("expected a drag-drop question");
        };

        let mut input = QuestionInput::for_question(question);
        if let QuestionInput::Reorder(board) = &mut input {
            for word in &dd.correct_order {
                let index = board.available().iter().position(|w| w == word).unwrap();
                board.begin_drag(word, TokenList::Available, index).unwrap();
                board.commit_drop(TokenList::Answer).unwrap();
            }
            assert!(board.is_correct());
        }
        assert!(question.is_correct(&input.answer().unwrap()));
    }
}
