use serde::Serialize;
use uuid::Uuid;

use crate::clipboard::CopyButton;

pub const COPY_LINK_LABEL: &str = "Copy link";
pub const COPY_MESSAGE_LABEL: &str = "Copy message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyTarget {
    Link,
    Message,
}

/// Contents of the share-feed modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareSheet {
    base_url: String,
    pub link: String,
    pub personal_message: String,
    pub message_expanded: bool,
    pub link_button: CopyButton,
    pub message_button: CopyButton,
}

impl ShareSheet {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            link: String::new(),
            personal_message: String::new(),
            message_expanded: false,
            link_button: CopyButton::new(COPY_LINK_LABEL),
            message_button: CopyButton::new(COPY_MESSAGE_LABEL),
        }
    }

    pub fn toggle_personal_message(&mut self) -> bool {
        self.message_expanded = !self.message_expanded;
        self.message_expanded
    }

    /// Fills the link on first use and returns the text to copy.
    pub fn link_text(&mut self) -> String {
        if self.link.is_empty() {
            self.link = format!("{}/generated_link_{}", self.base_url, Uuid::new_v4().simple());
        }
        self.link.clone()
    }

    pub fn message_text(&mut self) -> String {
        if self.personal_message.is_empty() {
            let link = self.link_text();
            self.personal_message = format!("Hey! Check out this feed on Domino: {link}");
        }
        self.personal_message.clone()
    }

    pub fn text_for(&mut self, target: CopyTarget) -> String {
        match target {
            CopyTarget::Link => self.link_text(),
            CopyTarget::Message => self.message_text(),
        }
    }

    pub fn button_mut(&mut self, target: CopyTarget) -> &mut CopyButton {
        match target {
            CopyTarget::Link => &mut self.link_button,
            CopyTarget::Message => &mut self.message_button,
        }
    }
}
