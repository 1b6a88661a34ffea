use crate::catalog::MultipleChoiceQuestion;

/// Single-shot option picker: the first selection locks the question
#[derive(Debug, Clone)]
pub struct ChoicePicker {
    options: Vec<String>,
    correct_answer: String,
    selected: Option<String>,
}

impl ChoicePicker {
    pub fn new(question: &MultipleChoiceQuestion) -> Self {
        Self {
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
            selected: None,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Pick an option; `None` if already answered or not an option
    pub fn select(&mut self, option: &str) -> Option<bool> {
        if self.selected.is_some() || !self.options.iter().any(|o| o == option) {
            return None;
        }
        self.selected = Some(option.to_string());
        Some(option == self.correct_answer)
    }

    /// Pick by zero-based position
    pub fn select_index(&mut self, index: usize) -> Option<bool> {
        let option = self.options.get(index)?.clone();
        self.select(&option)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::QuestionId;

    fn question() -> MultipleChoiceQuestion {
        MultipleChoiceQuestion {
            id: QuestionId::from("q"),
            prompt: "Pick one".into(),
            options: vec!["Hey".into(), "hey".into(), "Sup".into()],
            correct_answer: "Hey".into(),
            explanation: String::new(),
            emoji: String::new(),
        }
    }

    #[test]
    fn test_exact_match_only() {
        let mut picker = ChoicePicker::new(&question());
        assert_eq!(picker.select("hey"), Some(false));

        let mut picker = ChoicePicker::new(&question());
        assert_eq!(picker.select_index(0), Some(true));
    }

    #[test]
    fn test_first_selection_locks() {
        let mut picker = ChoicePicker::new(&question());
        assert_eq!(picker.select("Sup"), Some(false));
        assert_eq!(picker.select("Hey"), None);
        assert_eq!(picker.selected(), Some("Sup"));

        picker.clear();
        assert_eq!(picker.select("Hey"), Some(true));
    }

    #[test]
    fn test_unknown_option_ignored() {
        let mut picker = ChoicePicker::new(&question());
        assert_eq!(picker.select("Yo"), None);
        assert_eq!(picker.select_index(7), None);
        assert!(picker.selected().is_none());
    }
}
