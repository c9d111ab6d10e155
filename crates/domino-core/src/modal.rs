use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Other,
}

/// Where focus should go after a modal event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum FocusMove {
    Control(String),
    /// No focusable descendants: the content box itself takes focus.
    Content(String),
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyOutcome {
    pub focus: FocusMove,
    pub prevent_default: bool,
    pub closed: Option<String>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self {
            focus: FocusMove::Unchanged,
            prevent_default: false,
            closed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct OpenModal {
    id: String,
    opener: Option<String>,
}

/// Stack of open modals with Tab containment and focus restore.
#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    focusables: HashMap<String, Vec<String>>,
    open: Vec<OpenModal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: &str, focusables: &[&str]) {
        self.focusables.insert(
            id.to_string(),
            focusables.iter().map(|control| control.to_string()).collect(),
        );
    }

    pub fn topmost(&self) -> Option<&str> {
        self.open.last().map(|modal| modal.id.as_str())
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }

    /// Unknown ids are ignored.
    #[tracing::instrument(skip(self))]
    pub fn open(&mut self, id: &str, opener: Option<&str>) -> FocusMove {
        let Some(focusables) = self.focusables.get(id) else {
            debug!(modal = id, "no such modal; ignoring open");
            return FocusMove::Unchanged;
        };
        let focus = match focusables.first() {
            Some(first) => FocusMove::Control(first.clone()),
            None => FocusMove::Content(id.to_string()),
        };
        self.open.retain(|modal| modal.id != id);
        self.open.push(OpenModal {
            id: id.to_string(),
            opener: opener.map(str::to_string),
        });
        focus
    }

    #[tracing::instrument(skip(self))]
    pub fn close(&mut self, id: &str) -> FocusMove {
        let Some(index) = self.open.iter().position(|modal| modal.id == id) else {
            debug!(modal = id, "modal not open; ignoring close");
            return FocusMove::Unchanged;
        };
        let closed = self.open.remove(index);
        match closed.opener {
            Some(opener) => FocusMove::Control(opener),
            None => FocusMove::Unchanged,
        }
    }

    pub fn close_topmost(&mut self) -> Option<(String, FocusMove)> {
        let id = self.topmost()?.to_string();
        let focus = self.close(&id);
        Some((id, focus))
    }

    /// A click that lands on the backdrop of the topmost modal closes it.
    pub fn backdrop_click(&mut self, id: &str) -> FocusMove {
        if self.topmost() != Some(id) {
            return FocusMove::Unchanged;
        }
        self.close(id)
    }

    pub fn handle_key(&mut self, key: Key, shift: bool, focused: Option<&str>) -> KeyOutcome {
        match key {
            Key::Escape => match self.close_topmost() {
                Some((id, focus)) => KeyOutcome {
                    focus,
                    prevent_default: false,
                    closed: Some(id),
                },
                None => KeyOutcome::ignored(),
            },
            Key::Tab => match self.topmost() {
                Some(top) => self.contain_tab(top, shift, focused),
                None => KeyOutcome::ignored(),
            },
            Key::Other => KeyOutcome::ignored(),
        }
    }

    fn contain_tab(&self, id: &str, shift: bool, focused: Option<&str>) -> KeyOutcome {
        let Some(focusables) = self.focusables.get(id) else {
            warn!(modal = id, "open modal has no registration");
            return KeyOutcome::ignored();
        };
        let (Some(first), Some(last)) = (focusables.first(), focusables.last()) else {
            return KeyOutcome {
                focus: FocusMove::Unchanged,
                prevent_default: true,
                closed: None,
            };
        };

        let wrap_to = if shift && focused == Some(first.as_str()) {
            Some(last)
        } else if !shift && focused == Some(last.as_str()) {
            Some(first)
        } else {
            None
        };

        match wrap_to {
            Some(target) => KeyOutcome {
                focus: FocusMove::Control(target.clone()),
                prevent_default: true,
                closed: None,
            },
            None => KeyOutcome::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> ModalStack {
        let mut modals = ModalStack::new();
        modals.register("share", &["copy-link", "copy-message", "send-invites"]);
        modals.register("empty", &[]);
        modals
    }

    #[test]
    fn open_focuses_first_and_close_restores_opener() {
        let mut modals = stack();
        assert_eq!(
            modals.open("share", Some("share-btn")),
            FocusMove::Control("copy-link".into())
        );
        assert_eq!(modals.close("share"), FocusMove::Control("share-btn".into()));
        assert!(!modals.any_open());
    }

    #[test]
    fn tab_wraps_both_directions() {
        let mut modals = stack();
        modals.open("share", None);

        let forward = modals.handle_key(Key::Tab, false, Some("send-invites"));
        assert_eq!(forward.focus, FocusMove::Control("copy-link".into()));
        assert!(forward.prevent_default);

        let backward = modals.handle_key(Key::Tab, true, Some("copy-link"));
        assert_eq!(backward.focus, FocusMove::Control("send-invites".into()));

        let middle = modals.handle_key(Key::Tab, false, Some("copy-message"));
        assert!(!middle.prevent_default);
    }

    #[test]
    fn empty_modal_focuses_content_and_swallows_tab() {
        let mut modals = stack();
        assert_eq!(modals.open("empty", None), FocusMove::Content("empty".into()));
        assert!(modals.handle_key(Key::Tab, false, None).prevent_default);
    }

    #[test]
    fn escape_closes_only_topmost() {
        let mut modals = stack();
        modals.open("share", Some("a"));
        modals.open("empty", Some("b"));
        let outcome = modals.handle_key(Key::Escape, false, None);
        assert_eq!(outcome.closed.as_deref(), Some("empty"));
        assert_eq!(outcome.focus, FocusMove::Control("b".into()));
        assert_eq!(modals.topmost(), Some("share"));
    }

    #[test]
    fn keys_ignored_without_modal() {
        let mut modals = stack();
        assert_eq!(modals.handle_key(Key::Escape, false, None), KeyOutcome::ignored());
        assert_eq!(modals.handle_key(Key::Tab, true, Some("a")), KeyOutcome::ignored());
        assert_eq!(modals.open("missing", None), FocusMove::Unchanged);
    }
}
