use anyhow::anyhow;
use serde::Serialize;
use tracing::{debug, error};

pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_FAILED_LABEL: &str = "Copy failed";
pub const ACCENT_OUTLINE: &str = "2px solid var(--color-accent-primary)";
pub const ERROR_OUTLINE: &str = "2px solid red";

pub trait Clipboard {
    fn write(&mut self, text: &str) -> anyhow::Result<()>;
}

/// In-process clipboard; can be told to refuse writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    failing: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            contents: None,
            failing: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> anyhow::Result<()> {
        if self.failing {
            return Err(anyhow!("clipboard write rejected"));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Writes through `primary` when it exists, otherwise through the
/// synchronous selection-copy `fallback`. Errors end here.
#[tracing::instrument(skip_all)]
pub fn copy_text(primary: Option<&mut dyn Clipboard>, fallback: &mut dyn Clipboard, text: &str) -> CopyOutcome {
    let (path, result) = match primary {
        Some(clipboard) => ("primary", clipboard.write(text)),
        None => ("fallback", fallback.write(text)),
    };
    match result {
        Ok(()) => {
            debug!(path, chars = text.chars().count(), "copied to clipboard");
            CopyOutcome::Copied
        }
        Err(err) => {
            error!(path, error = %err, "clipboard copy failed");
            CopyOutcome::Failed
        }
    }
}

/// A copy button's transient ARIA/outline feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyButton {
    original_label: String,
    aria_label: String,
    outline: Option<&'static str>,
}

impl CopyButton {
    pub fn new(aria_label: &str) -> Self {
        Self {
            original_label: aria_label.to_string(),
            aria_label: aria_label.to_string(),
            outline: None,
        }
    }

    pub fn aria_label(&self) -> &str {
        &self.aria_label
    }

    pub fn outline(&self) -> Option<&'static str> {
        self.outline
    }

    pub fn show_feedback(&mut self, outcome: CopyOutcome) {
        let (label, outline) = match outcome {
            CopyOutcome::Copied => (COPIED_LABEL, ACCENT_OUTLINE),
            CopyOutcome::Failed => (COPY_FAILED_LABEL, ERROR_OUTLINE),
        };
        self.aria_label = label.to_string();
        self.outline = Some(outline);
    }

    /// Always restores the label the button was built with, so an early
    /// revert from an older copy cannot leave "Copied!" stuck.
    pub fn revert(&mut self) {
        self.aria_label = self.original_label.clone();
        self.outline = None;
    }

    pub fn is_showing_feedback(&self) -> bool {
        self.outline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_fallback_when_primary_missing() {
        let mut fallback = MemoryClipboard::new();
        let outcome = copy_text(None, &mut fallback, "https://example.com/feed/x");
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(fallback.contents(), Some("https://example.com/feed/x"));
    }

    #[test]
    fn failure_is_reported_not_raised() {
        let mut primary = MemoryClipboard::failing();
        let mut fallback = MemoryClipboard::new();
        let outcome = copy_text(Some(&mut primary as &mut dyn Clipboard), &mut fallback, "hello");
        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(fallback.contents().is_none());
    }

    #[test]
    fn double_feedback_still_reverts_to_original() {
        let mut button = CopyButton::new("Copy link");
        button.show_feedback(CopyOutcome::Copied);
        button.show_feedback(CopyOutcome::Copied);
        assert_eq!(button.aria_label(), COPIED_LABEL);
        button.revert();
        assert_eq!(button.aria_label(), "Copy link");
        assert!(!button.is_showing_feedback());

        button.show_feedback(CopyOutcome::Failed);
        assert_eq!(button.aria_label(), COPY_FAILED_LABEL);
        assert_eq!(button.outline(), Some(ERROR_OUTLINE));
    }
}
