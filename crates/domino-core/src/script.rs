//! Line-oriented event scripts replayed against a [`Session`](crate::session::Session).
//!
//! One event per line; blank lines and `#` comments are skipped. Words are
//! separated by whitespace and free-text arguments (location names, feed
//! names, typed text) take the rest of the line.

use anyhow::{Context, anyhow, bail};
use tracing::trace;

use crate::filter::TimeframeTag;
use crate::modal::Key;
use crate::panels::{ClickTarget, PanelId};
use crate::session::{SAVE_FEED_MODAL, SHARE_FEED_MODAL, UiEvent};
use crate::share::CopyTarget;
use crate::view::SurfaceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine {
    Event(UiEvent),
    Show,
}

#[tracing::instrument(skip(text))]
pub fn parse(text: &str) -> anyhow::Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(line) = parse_line(raw).with_context(|| format!("script line {}: {}", idx + 1, raw.trim()))? {
            lines.push(line);
        }
    }
    trace!(count = lines.len(), "parsed script");
    Ok(lines)
}

pub fn parse_line(raw: &str) -> anyhow::Result<Option<ScriptLine>> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (head, rest) = split_word(line);
    let event = match head.to_ascii_lowercase().as_str() {
        "show" => return Ok(Some(ScriptLine::Show)),
        "click" => parse_click(rest)?,
        "desktop" => parse_desktop(rest)?,
        "mobile" => parse_mobile(rest)?,
        "nav" => UiEvent::Navigate(required(rest, "nav needs a tab")?.parse()?),
        "feed" => UiEvent::SelectFeed(required(rest, "feed needs a name")?.to_string()),
        "feed-button" => UiEvent::PressFeedButton,
        "modal" => parse_modal(rest)?,
        "key" => parse_key(rest)?,
        "copy" => UiEvent::Copy(parse_copy_target(rest)?),
        "share" => match rest.to_ascii_lowercase().as_str() {
            "toggle-message" | "message" => UiEvent::TogglePersonalMessage,
            other => bail!("unknown share action: {other:?}"),
        },
        "name" => parse_name(rest)?,
        "save-default" => UiEvent::SaveAsDefault,
        "restore" => UiEvent::Restore,
        "tick" => {
            let ms = required(rest, "tick needs milliseconds")?;
            UiEvent::Tick(ms.parse::<u64>().with_context(|| format!("invalid tick duration: {ms}"))?)
        }
        other => bail!("unknown command: {other}"),
    };
    Ok(Some(ScriptLine::Event(event)))
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn required<'a>(text: &'a str, message: &str) -> anyhow::Result<&'a str> {
    if text.is_empty() { Err(anyhow!("{message}")) } else { Ok(text) }
}

fn parse_surface(word: &str) -> anyhow::Result<SurfaceKind> {
    match word.to_ascii_lowercase().as_str() {
        "desktop" => Ok(SurfaceKind::Desktop),
        "mobile" => Ok(SurfaceKind::Mobile),
        other => Err(anyhow!("unknown surface: {other:?}")),
    }
}

fn parse_click(rest: &str) -> anyhow::Result<UiEvent> {
    let (surface, rest) = split_word(rest);
    let surface = parse_surface(surface)?;
    let (kind, panel) = split_word(rest);
    let target = match kind.to_ascii_lowercase().as_str() {
        "trigger" => ClickTarget::Trigger(panel.parse::<PanelId>()?),
        "panel" => ClickTarget::Panel(panel.parse::<PanelId>()?),
        "elsewhere" | "outside" => ClickTarget::Elsewhere,
        other => bail!("unknown click target: {other:?}"),
    };
    Ok(UiEvent::Click { surface, target })
}

fn parse_desktop(rest: &str) -> anyhow::Result<UiEvent> {
    let (segment, arg) = split_word(rest);
    let event = match segment.to_ascii_lowercase().as_str() {
        "where" => match arg {
            "clear" => UiEvent::DesktopClearLocation,
            value => UiEvent::DesktopSelectLocation(required(value, "where needs a location")?.to_string()),
        },
        // typed text; empty clears
        "where-text" => UiEvent::DesktopTypeLocation(arg.to_string()),
        "when" => UiEvent::DesktopToggleTimeframe(arg.parse::<TimeframeTag>()?),
        "activity" => UiEvent::DesktopToggleActivity(required(arg, "activity needs a value")?.to_string()),
        "activity-text" => UiEvent::DesktopTypeActivity(arg.to_string()),
        "who" => match arg {
            "+" | "inc" | "increment" => UiEvent::GroupSizeIncrement,
            "-" | "dec" | "decrement" => UiEvent::GroupSizeDecrement,
            other => bail!("who expects + or -, got {other:?}"),
        },
        other => bail!("unknown desktop segment: {other:?}"),
    };
    Ok(event)
}

fn parse_mobile(rest: &str) -> anyhow::Result<UiEvent> {
    let (action, arg) = split_word(rest);
    let event = match action.to_ascii_lowercase().as_str() {
        "open" => UiEvent::OpenMobileOverlay,
        "apply" => UiEvent::MobileApply,
        "close" => UiEvent::CloseMobileOverlay,
        "where" => match arg {
            "clear" => UiEvent::MobileClearLocation,
            value => UiEvent::MobileSelectLocation(required(value, "where needs a location")?.to_string()),
        },
        "when" => UiEvent::MobileToggleTimeframe(arg.parse::<TimeframeTag>()?),
        "activity" => UiEvent::MobileToggleActivity(required(arg, "activity needs a value")?.to_string()),
        other => bail!("unknown mobile action: {other:?}"),
    };
    Ok(event)
}

fn modal_id(word: &str) -> anyhow::Result<String> {
    let id = match word {
        "save" => SAVE_FEED_MODAL,
        "share" => SHARE_FEED_MODAL,
        other => required(other, "modal needs an id")?,
    };
    Ok(id.to_string())
}

fn parse_modal(rest: &str) -> anyhow::Result<UiEvent> {
    let (action, rest) = split_word(rest);
    let (id, opener) = split_word(rest);
    let id = modal_id(id)?;
    let event = match action.to_ascii_lowercase().as_str() {
        "open" => UiEvent::OpenModal {
            id,
            opener: (!opener.is_empty()).then(|| opener.to_string()),
        },
        "close" => UiEvent::CloseModal(id),
        "backdrop" => UiEvent::ModalBackdrop(id),
        other => bail!("unknown modal action: {other:?}"),
    };
    Ok(event)
}

fn parse_key(rest: &str) -> anyhow::Result<UiEvent> {
    let (name, focused) = split_word(rest);
    let (key, shift) = match name.to_ascii_lowercase().as_str() {
        "escape" | "esc" => (Key::Escape, false),
        "tab" => (Key::Tab, false),
        "shift-tab" => (Key::Tab, true),
        "" => bail!("key needs a name"),
        _ => (Key::Other, false),
    };
    Ok(UiEvent::Key {
        key,
        shift,
        focused: (!focused.is_empty()).then(|| focused.to_string()),
    })
}

fn parse_copy_target(rest: &str) -> anyhow::Result<CopyTarget> {
    match rest.to_ascii_lowercase().as_str() {
        "link" => Ok(CopyTarget::Link),
        "message" => Ok(CopyTarget::Message),
        other => Err(anyhow!("copy expects link or message, got {other:?}")),
    }
}

fn parse_name(rest: &str) -> anyhow::Result<UiEvent> {
    let (action, text) = split_word(rest);
    let event = match action.to_ascii_lowercase().as_str() {
        "input" => UiEvent::FeedNameInput(text.to_string()),
        "focus" => UiEvent::FeedNameFocus,
        "blur" => UiEvent::FeedNameBlur,
        "clear" => UiEvent::FeedNameClear,
        "save" => UiEvent::FeedNameSave,
        other => bail!("unknown name action: {other:?}"),
    };
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affordance::NavTab;

    fn event(line: &str) -> UiEvent {
        match parse_line(line).expect("parse").expect("not blank") {
            ScriptLine::Event(event) => event,
            ScriptLine::Show => panic!("unexpected show"),
        }
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line("   ").expect("blank"), None);
        assert_eq!(parse_line("# setup").expect("comment"), None);
        assert_eq!(parse_line("show").expect("show"), Some(ScriptLine::Show));
    }

    #[test]
    fn parses_surface_edits() {
        assert_eq!(
            event("desktop when this-weekend"),
            UiEvent::DesktopToggleTimeframe(TimeframeTag::ThisWeekend)
        );
        assert_eq!(
            event("desktop where Hudson Valley"),
            UiEvent::DesktopSelectLocation("Hudson Valley".into())
        );
        assert_eq!(event("desktop who -"), UiEvent::GroupSizeDecrement);
        assert_eq!(
            event("desktop where-text Park Slope"),
            UiEvent::DesktopTypeLocation("Park Slope".into())
        );
        assert_eq!(
            event("desktop activity-text hiking, surfing"),
            UiEvent::DesktopTypeActivity("hiking, surfing".into())
        );
        assert_eq!(event("mobile activity kayaking"), UiEvent::MobileToggleActivity("kayaking".into()));
        assert_eq!(event("mobile where clear"), UiEvent::MobileClearLocation);
    }

    #[test]
    fn parses_clicks_modals_and_keys() {
        assert_eq!(
            event("click desktop trigger when"),
            UiEvent::Click {
                surface: SurfaceKind::Desktop,
                target: ClickTarget::Trigger(PanelId::Timeframe),
            }
        );
        assert_eq!(
            event("click mobile elsewhere"),
            UiEvent::Click {
                surface: SurfaceKind::Mobile,
                target: ClickTarget::Elsewhere,
            }
        );
        assert_eq!(
            event("modal open share copyLinkBtn"),
            UiEvent::OpenModal {
                id: SHARE_FEED_MODAL.into(),
                opener: Some("copyLinkBtn".into()),
            }
        );
        assert_eq!(
            event("key shift-tab feedNameInput"),
            UiEvent::Key {
                key: Key::Tab,
                shift: true,
                focused: Some("feedNameInput".into()),
            }
        );
        assert_eq!(event("nav my-feeds"), UiEvent::Navigate(NavTab::MyFeeds));
        assert_eq!(event("name input Weekend trips"), UiEvent::FeedNameInput("Weekend trips".into()));
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse("show\ntick soon\n").expect_err("bad tick");
        assert!(format!("{err:#}").contains("script line 2"));
        assert!(parse_line("desktop when someday").is_err());
        assert!(parse_line("dance").is_err());
    }
}
