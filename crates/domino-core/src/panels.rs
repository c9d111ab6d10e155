use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::Serialize;
use tracing::debug;

use crate::view::SurfaceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    Location,
    Timeframe,
    Activity,
    GroupSize,
    FeedSelect,
}

impl PanelId {
    pub const ALL: [PanelId; 5] = [
        PanelId::Location,
        PanelId::Timeframe,
        PanelId::Activity,
        PanelId::GroupSize,
        PanelId::FeedSelect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PanelId::Location => "where",
            PanelId::Timeframe => "when",
            PanelId::Activity => "activity",
            PanelId::GroupSize => "who",
            PanelId::FeedSelect => "feeds",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PanelId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "where" | "location" => Ok(PanelId::Location),
            "when" | "timeframe" => Ok(PanelId::Timeframe),
            "activity" | "what" => Ok(PanelId::Activity),
            "who" | "group" | "group_size" => Ok(PanelId::GroupSize),
            "feeds" | "feed" | "feed_select" => Ok(PanelId::FeedSelect),
            other => Err(anyhow!("unknown panel: {other}")),
        }
    }
}

/// Where a click landed relative to the known trigger/panel pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Trigger(PanelId),
    Panel(PanelId),
    Elsewhere,
}

/// Per-surface popover state: `Closed` or exactly one open panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelController {
    surface: SurfaceKind,
    open: Option<PanelId>,
}

impl PanelController {
    pub fn new(surface: SurfaceKind) -> Self {
        Self { surface, open: None }
    }

    pub fn open_panel(&self) -> Option<PanelId> {
        self.open
    }

    pub fn is_open(&self, id: PanelId) -> bool {
        self.open == Some(id)
    }

    pub fn toggle(&mut self, id: PanelId) {
        self.open = if self.open == Some(id) { None } else { Some(id) };
        debug!(surface = ?self.surface, panel = %id, open = ?self.open, "panel toggled");
    }

    pub fn close(&mut self, id: PanelId) {
        if self.open == Some(id) {
            self.open = None;
        }
    }

    pub fn close_all(&mut self) {
        if self.open.take().is_some() {
            debug!(surface = ?self.surface, "closed all panels");
        }
    }

    pub fn handle_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Trigger(id) => self.toggle(id),
            ClickTarget::Panel(id) if self.is_open(id) => {}
            ClickTarget::Panel(_) | ClickTarget::Elsewhere => self.close_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_same_panel_closes_it() {
        let mut panels = PanelController::new(SurfaceKind::Desktop);
        panels.toggle(PanelId::Timeframe);
        assert!(panels.is_open(PanelId::Timeframe));
        panels.toggle(PanelId::Timeframe);
        assert_eq!(panels.open_panel(), None);
    }

    #[test]
    fn opening_another_panel_replaces_the_first() {
        let mut panels = PanelController::new(SurfaceKind::Desktop);
        panels.toggle(PanelId::Location);
        panels.toggle(PanelId::GroupSize);
        assert_eq!(panels.open_panel(), Some(PanelId::GroupSize));
        assert!(!panels.is_open(PanelId::Location));
    }

    #[test]
    fn at_most_one_open_after_any_sequence() {
        let mut panels = PanelController::new(SurfaceKind::Mobile);
        let mut seed: u32 = 7;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = PanelId::ALL[(seed >> 16) as usize % PanelId::ALL.len()];
            panels.toggle(id);
            let open = PanelId::ALL.iter().filter(|id| panels.is_open(**id)).count();
            assert!(open <= 1);
        }
    }

    #[test]
    fn clicks_inside_open_panel_keep_it_open() {
        let mut panels = PanelController::new(SurfaceKind::Desktop);
        panels.handle_click(ClickTarget::Trigger(PanelId::Activity));
        panels.handle_click(ClickTarget::Panel(PanelId::Activity));
        assert!(panels.is_open(PanelId::Activity));
        panels.handle_click(ClickTarget::Elsewhere);
        assert_eq!(panels.open_panel(), None);
    }

    #[test]
    fn parses_segment_names() {
        assert_eq!("when".parse::<PanelId>().expect("parse"), PanelId::Timeframe);
        assert_eq!("Feeds".parse::<PanelId>().expect("parse"), PanelId::FeedSelect);
        assert!("sidebar".parse::<PanelId>().is_err());
    }
}
