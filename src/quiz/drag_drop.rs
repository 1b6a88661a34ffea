//! Drag-to-reorder word board
//!
//! Two token lists (the word bank and the learner's answer) and at most one
//! drag in flight. The pointer geometry (midpoints, overlaps, distances) is
//! measured by the front-end; this module only does the index arithmetic.

use crate::catalog::DragDropQuestion;
use crate::core::error::{HuzzError, Result};

/// Which list a token is dragged from or dropped on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenList {
    Available,
    Answer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub token: String,
    pub source: TokenList,
    pub source_index: usize,
    /// Insertion slot in the answer list the pointer is over
    pub hover_index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DragDropBoard {
    words: Vec<String>,
    correct_order: Vec<String>,
    available: Vec<String>,
    answer: Vec<String>,
    drag: Option<DragState>,
}

/// Insertion slot for a pointer: before the first token whose midpoint lies
/// right of the pointer, otherwise at the end
pub fn insertion_index(pointer_x: f64, midpoints: &[f64]) -> usize {
    midpoints
        .iter()
        .position(|&mid| pointer_x < mid)
        .unwrap_or(midpoints.len())
}

/// Pick the list a released token lands in.
///
/// Overlapping the answer area always wins, even when the token also
/// overlaps the word bank. With no overlap the nearer container wins and a
/// tie goes to the answer list.
pub fn resolve_drop_target(
    overlaps_answer: bool,
    overlaps_available: bool,
    distance_to_answer: f64,
    distance_to_available: f64,
) -> TokenList {
    if overlaps_answer {
        TokenList::Answer
    } else if overlaps_available {
        TokenList::Available
    } else if distance_to_answer <= distance_to_available {
        TokenList::Answer
    } else {
        TokenList::Available
    }
}

impl DragDropBoard {
    pub fn new(question: &DragDropQuestion) -> Self {
        Self::from_words(question.words.clone(), question.correct_order.clone())
    }

    pub fn from_words(words: Vec<String>, correct_order: Vec<String>) -> Self {
        Self {
            available: words.clone(),
            words,
            correct_order,
            answer: Vec::new(),
            drag: None,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn answer(&self) -> &[String] {
        &self.answer
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn list(&self, which: TokenList) -> &[String] {
        match which {
            TokenList::Available => &self.available,
            TokenList::Answer => &self.answer,
        }
    }

    pub fn begin_drag(&mut self, token: &str, source: TokenList, index: usize) -> Result<()> {
        if self.drag.is_some() {
            return Err(HuzzError::DragInProgress);
        }
        match self.list(source).get(index) {
            Some(found) if found == token => {}
            Some(found) => {
                return Err(HuzzError::InvalidDrag(format!(
                    "slot {} of {:?} holds '{}', not '{}'",
                    index, source, found, token
                )))
            }
            None => {
                return Err(HuzzError::InvalidDrag(format!(
                    "slot {} out of range for {:?}",
                    index, source
                )))
            }
        }

        self.drag = Some(DragState {
            token: token.to_string(),
            source,
            source_index: index,
            hover_index: None,
        });
        Ok(())
    }

    /// Track the pointer over the answer area; returns the hover slot
    pub fn update_hover(&mut self, pointer_x: f64, midpoints: &[f64]) -> Option<usize> {
        let index = insertion_index(pointer_x, midpoints);
        self.hover_at(index)
    }

    /// Set the hover slot directly.
    ///
    /// Hovering an answer token over its own slot keeps the previous hover.
    pub fn hover_at(&mut self, index: usize) -> Option<usize> {
        let drag = self.drag.as_mut()?;
        if drag.source == TokenList::Answer && drag.source_index == index {
            return drag.hover_index;
        }
        drag.hover_index = Some(index.min(self.answer.len()));
        drag.hover_index
    }

    /// Pointer left the answer area
    pub fn leave_answer_area(&mut self) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover_index = None;
        }
    }

    /// Abandon the drag without moving anything
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Release the dragged token onto `target` and end the drag
    pub fn commit_drop(&mut self, target: TokenList) -> Result<()> {
        let drag = self.drag.take().ok_or(HuzzError::NoActiveDrag)?;

        match (drag.source, target) {
            (TokenList::Available, TokenList::Answer) => {
                self.available.remove(drag.source_index);
                let at = drag
                    .hover_index
                    .unwrap_or(self.answer.len())
                    .min(self.answer.len());
                self.answer.insert(at, drag.token);
            }
            (TokenList::Answer, TokenList::Answer) => {
                if let Some(hover) = drag.hover_index {
                    if hover != drag.source_index {
                        let token = self.answer.remove(drag.source_index);
                        let at = if drag.source_index < hover {
                            hover - 1
                        } else {
                            hover
                        };
                        self.answer.insert(at.min(self.answer.len()), token);
                    }
                }
            }
            (TokenList::Answer, TokenList::Available) => {
                let token = self.answer.remove(drag.source_index);
                self.available.push(token);
            }
            (TokenList::Available, TokenList::Available) => {
                let token = self.available.remove(drag.source_index);
                self.available.push(token);
            }
        }
        Ok(())
    }

    /// Click-to-remove: send an answer token back to the word bank
    pub fn remove_from_answer(&mut self, index: usize) -> Result<String> {
        if self.drag.is_some() {
            return Err(HuzzError::DragInProgress);
        }
        if index >= self.answer.len() {
            return Err(HuzzError::InvalidDrag(format!(
                "no answer token at slot {}",
                index
            )));
        }
        let token = self.answer.remove(index);
        self.available.push(token.clone());
        Ok(token)
    }

    /// Exact ordered match against the correct order
    pub fn is_correct(&self) -> bool {
        self.answer == self.correct_order
    }

    /// Put every word back in the bank in its original order
    pub fn reset(&mut self) {
        self.available = self.words.clone();
        self.answer.clear();
        self.drag = None;
    }
}
