use serde::Serialize;
use tracing::debug;

/// State of the "name your feed" field in the save-feed modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedNameForm {
    value: String,
    focused: bool,
    max_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedNameView {
    pub value: String,
    pub char_count: String,
    pub save_enabled: bool,
    pub label_floated: bool,
    pub focused: bool,
}

impl FeedNameForm {
    pub fn new(max_chars: usize) -> Self {
        Self {
            value: String::new(),
            focused: false,
            max_chars: max_chars.max(1),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Input longer than the limit is cut at the limit, counted in chars.
    pub fn input(&mut self, text: &str) {
        let truncated: String = text.chars().take(self.max_chars).collect();
        if truncated.len() != text.len() {
            debug!(max = self.max_chars, "feed name truncated");
        }
        self.value = truncated;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Returns the submitted name, or None when the save button is disabled.
    pub fn save(&mut self) -> Option<String> {
        if !self.save_enabled() {
            return None;
        }
        Some(std::mem::take(&mut self.value))
    }

    pub fn save_enabled(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn view(&self) -> FeedNameView {
        FeedNameView {
            value: self.value.clone(),
            char_count: format!("{}/{} characters", self.value.chars().count(), self.max_chars),
            save_enabled: self.save_enabled(),
            label_floated: !self.value.is_empty() || self.focused,
            focused: self.focused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_and_save_state_follow_value() {
        let mut form = FeedNameForm::new(50);
        let empty = form.view();
        assert_eq!(empty.char_count, "0/50 characters");
        assert!(!empty.save_enabled);
        assert!(!empty.label_floated);

        form.focus();
        assert!(form.view().label_floated);

        form.input("Weekend hikes");
        let filled = form.view();
        assert_eq!(filled.char_count, "13/50 characters");
        assert!(filled.save_enabled);
    }

    #[test]
    fn input_is_capped_at_max_chars() {
        let mut form = FeedNameForm::new(5);
        form.input("ñandú trails");
        assert_eq!(form.value(), "ñandú");
        assert_eq!(form.view().char_count, "5/5 characters");
    }

    #[test]
    fn save_takes_the_name_and_clears() {
        let mut form = FeedNameForm::new(50);
        assert_eq!(form.save(), None);
        form.input("Trips");
        assert_eq!(form.save().as_deref(), Some("Trips"));
        assert!(form.value().is_empty());
    }
}
