//! One page session: the store, both surfaces and every overlay that sits
//! on top of them, driven through [`Session::dispatch`].

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::affordance::{self, Affordance, AffordanceInput, FeedSelection, NavTab};
use crate::catalog::OptionCatalog;
use crate::clipboard::{Clipboard, MemoryClipboard, copy_text};
use crate::config::Config;
use crate::dates::{DateLabelSet, labels_for};
use crate::feed_form::{FeedNameForm, FeedNameView};
use crate::filter::{FilterState, TimeframeTag};
use crate::modal::{FocusMove, Key, ModalStack};
use crate::panels::{ClickTarget, PanelController, PanelId};
use crate::share::{CopyTarget, ShareSheet};
use crate::store::FilterStore;
use crate::timers::TimerQueue;
use crate::view::{
    AppliedFilters, DesktopDisplay, DesktopView, MobileSummaries, MobileView, SurfaceKind, sync_from_desktop,
    sync_from_mobile,
};

pub const SAVE_FEED_MODAL: &str = "saveFeedModalOverlay";
pub const SHARE_FEED_MODAL: &str = "shareFeedModalOverlay";
pub const FEED_BUTTON: &str = "unified-save-feed-btn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click { surface: SurfaceKind, target: ClickTarget },
    DesktopSelectLocation(String),
    DesktopClearLocation,
    DesktopTypeLocation(String),
    DesktopTypeActivity(String),
    DesktopToggleTimeframe(TimeframeTag),
    DesktopToggleActivity(String),
    GroupSizeIncrement,
    GroupSizeDecrement,
    OpenMobileOverlay,
    MobileSelectLocation(String),
    MobileClearLocation,
    MobileToggleTimeframe(TimeframeTag),
    MobileToggleActivity(String),
    MobileApply,
    CloseMobileOverlay,
    Navigate(NavTab),
    SelectFeed(String),
    PressFeedButton,
    OpenModal { id: String, opener: Option<String> },
    CloseModal(String),
    ModalBackdrop(String),
    Key { key: Key, shift: bool, focused: Option<String> },
    Copy(CopyTarget),
    TogglePersonalMessage,
    FeedNameInput(String),
    FeedNameFocus,
    FeedNameBlur,
    FeedNameClear,
    FeedNameSave,
    SaveAsDefault,
    Restore,
    Tick(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTask {
    RevertCopy(CopyTarget),
    Remeasure { revision: u64 },
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    copy_feedback_ms: u64,
    settle_delay_ms: u64,
}

pub struct Session {
    store: Rc<FilterStore>,
    labels: DateLabelSet,
    desktop: Rc<DesktopView>,
    mobile: Rc<MobileView>,
    desktop_panels: PanelController,
    mobile_panels: PanelController,
    modals: ModalStack,
    last_focus: FocusMove,
    nav: NavTab,
    feed: FeedSelection,
    affordance: Affordance,
    saved_default: Option<FilterState>,
    saved_feeds: Vec<String>,
    feed_form: FeedNameForm,
    share: ShareSheet,
    primary_clipboard: Option<Box<dyn Clipboard>>,
    fallback_clipboard: Box<dyn Clipboard>,
    timers: TimerQueue<TimerTask>,
    timing: Timing,
}

impl Session {
    #[tracing::instrument(skip_all)]
    pub fn new(cfg: &Config, catalog: &OptionCatalog) -> anyhow::Result<Self> {
        let primary: Option<Box<dyn Clipboard>> = if cfg.clipboard_available() {
            Some(Box::new(MemoryClipboard::new()))
        } else {
            None
        };
        Self::with_clipboards(cfg, catalog, primary, Box::new(MemoryClipboard::new()))
    }

    pub fn with_clipboards(
        cfg: &Config,
        catalog: &OptionCatalog,
        primary_clipboard: Option<Box<dyn Clipboard>>,
        fallback_clipboard: Box<dyn Clipboard>,
    ) -> anyhow::Result<Self> {
        let reference = cfg.reference_date()?;
        let labels = labels_for(reference);
        let store = FilterStore::new(cfg.default_group_size()?);
        let desktop = DesktopView::new(Rc::clone(&store), catalog, &labels);
        let mobile = MobileView::new(Rc::clone(&store), catalog, &labels);

        let mut modals = ModalStack::new();
        modals.register(
            SAVE_FEED_MODAL,
            &["feedNameInput", "modalClearBtn", "saveFeedConfirmBtn", "modalCloseBtn"],
        );
        modals.register(
            SHARE_FEED_MODAL,
            &["copyLinkBtn", "shareFeedLink", "togglePersonalMessage", "copyMessageBtn", "sendInvitesBtn"],
        );

        let nav = NavTab::default();
        let feed = FeedSelection::default();
        let affordance = affordance::derive(AffordanceInput {
            has_any_filter: store.has_any_filter(),
            tab: nav,
            feed: &feed,
        });

        info!(
            reference = %reference,
            primary_clipboard = primary_clipboard.is_some(),
            "page session ready"
        );

        Ok(Self {
            labels,
            desktop,
            mobile,
            desktop_panels: PanelController::new(SurfaceKind::Desktop),
            mobile_panels: PanelController::new(SurfaceKind::Mobile),
            modals,
            last_focus: FocusMove::Unchanged,
            nav,
            feed,
            affordance,
            saved_default: None,
            saved_feeds: Vec::new(),
            feed_form: FeedNameForm::new(cfg.feed_name_max_chars()?),
            share: ShareSheet::new(&cfg.share_base_url()),
            primary_clipboard,
            fallback_clipboard,
            timers: TimerQueue::new(),
            timing: Timing {
                copy_feedback_ms: cfg.copy_feedback_ms()?,
                settle_delay_ms: cfg.settle_delay_ms()?,
            },
            store,
        })
    }

    pub fn store(&self) -> &Rc<FilterStore> {
        &self.store
    }

    pub fn desktop(&self) -> &DesktopView {
        &self.desktop
    }

    pub fn mobile(&self) -> &MobileView {
        &self.mobile
    }

    pub fn labels(&self) -> &DateLabelSet {
        &self.labels
    }

    pub fn panels(&self, surface: SurfaceKind) -> &PanelController {
        match surface {
            SurfaceKind::Desktop => &self.desktop_panels,
            SurfaceKind::Mobile => &self.mobile_panels,
        }
    }

    pub fn affordance(&self) -> &Affordance {
        &self.affordance
    }

    pub fn topmost_modal(&self) -> Option<&str> {
        self.modals.topmost()
    }

    pub fn share(&self) -> &ShareSheet {
        &self.share
    }

    pub fn saved_feeds(&self) -> &[String] {
        &self.saved_feeds
    }

    /// Runs one input event to completion.
    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click { surface, target } => self.click(surface, target),
            UiEvent::DesktopSelectLocation(value) => {
                if self.desktop.select_location(&value) {
                    self.desktop_panels.close(PanelId::Location);
                }
            }
            UiEvent::DesktopClearLocation => self.desktop.clear_location(),
            UiEvent::DesktopTypeLocation(text) => {
                self.desktop.type_location(&text);
            }
            UiEvent::DesktopTypeActivity(text) => self.desktop.type_activity(&text),
            UiEvent::DesktopToggleTimeframe(tag) => {
                self.desktop.toggle_timeframe(tag);
            }
            UiEvent::DesktopToggleActivity(value) => {
                self.desktop.toggle_activity(&value);
            }
            UiEvent::GroupSizeIncrement => self.desktop.increment_group_size(),
            UiEvent::GroupSizeDecrement => {
                self.desktop.decrement_group_size();
            }
            UiEvent::OpenMobileOverlay => self.open_mobile_overlay(),
            UiEvent::MobileSelectLocation(value) => {
                self.mobile.select_location(&value);
            }
            UiEvent::MobileClearLocation => {
                self.mobile.clear_location();
            }
            UiEvent::MobileToggleTimeframe(tag) => {
                self.mobile.toggle_timeframe(tag);
            }
            UiEvent::MobileToggleActivity(value) => {
                self.mobile.toggle_activity(&value);
            }
            UiEvent::MobileApply => self.apply_mobile_overlay(),
            UiEvent::CloseMobileOverlay => {
                self.mobile.close_overlay();
                self.mobile_panels.close_all();
            }
            UiEvent::Navigate(tab) => self.navigate(tab),
            UiEvent::SelectFeed(name) if self.nav != NavTab::MyFeeds => {
                debug!(feed = %name, "feed picker only exists on my feeds; ignoring");
            }
            UiEvent::SelectFeed(name) => {
                self.feed = FeedSelection::from_display(&name);
                self.desktop_panels.close(PanelId::FeedSelect);
                self.mobile_panels.close(PanelId::FeedSelect);
                debug!(feed = %self.feed.display(), "feed selected");
            }
            UiEvent::PressFeedButton => self.press_feed_button(),
            UiEvent::OpenModal { id, opener } => {
                self.last_focus = self.modals.open(&id, opener.as_deref());
            }
            UiEvent::CloseModal(id) => {
                self.last_focus = self.modals.close(&id);
            }
            UiEvent::ModalBackdrop(id) => {
                self.last_focus = self.modals.backdrop_click(&id);
            }
            UiEvent::Key { key, shift, focused } => {
                let outcome = self.modals.handle_key(key, shift, focused.as_deref());
                if outcome.focus != FocusMove::Unchanged {
                    self.last_focus = outcome.focus;
                }
            }
            UiEvent::Copy(target) => self.copy(target),
            UiEvent::TogglePersonalMessage => {
                self.share.toggle_personal_message();
            }
            UiEvent::FeedNameInput(text) => self.feed_form.input(&text),
            UiEvent::FeedNameFocus => self.feed_form.focus(),
            UiEvent::FeedNameBlur => self.feed_form.blur(),
            UiEvent::FeedNameClear => self.feed_form.clear(),
            UiEvent::FeedNameSave => {
                if let Some(name) = self.feed_form.save() {
                    info!(feed = %name, "feed saved");
                    self.saved_feeds.push(name);
                    self.last_focus = self.modals.close(SAVE_FEED_MODAL);
                }
            }
            UiEvent::SaveAsDefault => {
                self.saved_default = Some(self.store.snapshot());
                debug!("current filters saved as default");
            }
            UiEvent::Restore => match self.saved_default.clone() {
                Some(saved) => self.store.replace(saved),
                None => self.store.reset(),
            },
            UiEvent::Tick(ms) => self.tick(ms),
        }
        self.refresh_affordance();
    }

    fn click(&mut self, surface: SurfaceKind, target: ClickTarget) {
        if self.modals.any_open() {
            debug!(?surface, ?target, "modal open; panel click suppressed");
            return;
        }
        match surface {
            SurfaceKind::Desktop => {
                self.desktop_panels.handle_click(target);
                // segment clicks re-measure once the dropdown has settled
                if matches!(target, ClickTarget::Trigger(_)) {
                    self.timers.schedule(
                        self.timing.settle_delay_ms,
                        TimerTask::Remeasure {
                            revision: self.store.revision(),
                        },
                    );
                }
            }
            SurfaceKind::Mobile => {
                let accordion = match target {
                    ClickTarget::Trigger(id) | ClickTarget::Panel(id) => id != PanelId::FeedSelect,
                    ClickTarget::Elsewhere => false,
                };
                // filter accordions live inside the overlay
                if accordion && !self.mobile.is_overlay_open() {
                    debug!(?target, "mobile overlay closed; accordion click ignored");
                    return;
                }
                self.mobile_panels.handle_click(target);
            }
        }
    }

    fn open_mobile_overlay(&mut self) {
        sync_from_desktop(&self.desktop, &self.mobile);
        self.mobile_panels.close_all();
        self.mobile.open_overlay();
    }

    fn apply_mobile_overlay(&mut self) {
        if !self.mobile.is_overlay_open() {
            debug!("apply pressed with overlay closed; ignoring");
            return;
        }
        sync_from_mobile(&self.desktop, &self.mobile);
        self.mobile.close_overlay();
        self.mobile_panels.close_all();
    }

    fn navigate(&mut self, tab: NavTab) {
        if self.nav != tab {
            info!(from = %self.nav, to = %tab, "navigation changed");
        }
        self.nav = tab;
        self.feed = FeedSelection::All;
        self.desktop_panels.close_all();
        self.mobile_panels.close_all();
    }

    fn press_feed_button(&mut self) {
        if !self.affordance.button_visible {
            debug!("feed button hidden; ignoring press");
            return;
        }
        let modal = match self.nav {
            NavTab::Explore => SAVE_FEED_MODAL,
            NavTab::MyFeeds => SHARE_FEED_MODAL,
        };
        self.last_focus = self.modals.open(modal, Some(FEED_BUTTON));
    }

    fn copy(&mut self, target: CopyTarget) {
        let text = self.share.text_for(target);
        let primary = self
            .primary_clipboard
            .as_mut()
            .map(|clipboard| clipboard.as_mut() as &mut dyn Clipboard);
        let outcome = copy_text(primary, self.fallback_clipboard.as_mut(), &text);
        self.share.button_mut(target).show_feedback(outcome);
        self.timers
            .schedule(self.timing.copy_feedback_ms, TimerTask::RevertCopy(target));
    }

    fn tick(&mut self, ms: u64) {
        for task in self.timers.advance(ms) {
            match task {
                TimerTask::RevertCopy(target) => self.share.button_mut(target).revert(),
                TimerTask::Remeasure { revision } => {
                    if revision != self.store.revision() {
                        debug!(
                            scheduled = revision,
                            current = self.store.revision(),
                            "state moved on since re-measure was scheduled"
                        );
                    }
                    self.refresh_affordance();
                }
            }
        }
    }

    fn refresh_affordance(&mut self) {
        let next = affordance::derive(AffordanceInput {
            has_any_filter: self.store.has_any_filter(),
            tab: self.nav,
            feed: &self.feed,
        });
        if next != self.affordance {
            debug!(label = next.label, visible = next.button_visible, "affordance changed");
            self.affordance = next;
        }
    }

    pub fn render(&self) -> PageView {
        let snapshot = self.store.snapshot();
        if snapshot.has_any_filter(self.store.default_group_size()) != self.store.has_any_filter() {
            warn!("store snapshot disagrees with live state");
        }
        PageView {
            reference_date: self.labels.reference().format("%Y-%m-%d").to_string(),
            date_labels: self
                .labels
                .iter()
                .map(|(tag, label)| (tag.token().to_string(), label.to_string()))
                .collect(),
            has_any_filter: self.store.has_any_filter(),
            revision: self.store.revision(),
            filter: snapshot,
            desktop: DesktopPage {
                display: self.desktop.display(),
                open_panel: self.desktop_panels.open_panel(),
            },
            mobile: MobilePage {
                overlay_open: self.mobile.is_overlay_open(),
                summaries: self.mobile.summaries(),
                applied: self.mobile.applied_filters(),
                open_panel: self.mobile_panels.open_panel(),
            },
            nav: self.nav,
            feed: self.feed.display().to_string(),
            affordance: self.affordance.clone(),
            modal: self.modals.topmost().map(str::to_string),
            focus: self.last_focus.clone(),
            feed_form: self.feed_form.view(),
            share: ShareView {
                link: self.share.link.clone(),
                message_expanded: self.share.message_expanded,
                link_button: self.share.link_button.aria_label().to_string(),
                message_button: self.share.message_button.aria_label().to_string(),
            },
            saved_feeds: self.saved_feeds.clone(),
            clock_ms: self.timers.now_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DesktopPage {
    pub display: DesktopDisplay,
    pub open_panel: Option<PanelId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MobilePage {
    pub overlay_open: bool,
    pub summaries: MobileSummaries,
    pub applied: AppliedFilters,
    pub open_panel: Option<PanelId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareView {
    pub link: String,
    pub message_expanded: bool,
    pub link_button: String,
    pub message_button: String,
}

/// Everything a renderer needs to paint the page after an event.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub reference_date: String,
    pub date_labels: BTreeMap<String, String>,
    pub filter: FilterState,
    pub has_any_filter: bool,
    pub revision: u64,
    pub desktop: DesktopPage,
    pub mobile: MobilePage,
    pub nav: NavTab,
    pub feed: String,
    pub affordance: Affordance,
    pub modal: Option<String>,
    pub focus: FocusMove,
    pub feed_form: FeedNameView,
    pub share: ShareView,
    pub saved_feeds: Vec<String>,
    pub clock_ms: u64,
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::clipboard::{COPIED_LABEL, COPY_FAILED_LABEL};
    use crate::share::COPY_LINK_LABEL;

    #[derive(Clone, Default)]
    struct SharedClipboard {
        writes: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl Clipboard for SharedClipboard {
        fn write(&mut self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("denied");
            }
            self.writes.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn config() -> Config {
        let mut cfg = Config::default();
        cfg.set("reference.date", "2025-05-19");
        cfg
    }

    fn session() -> Session {
        Session::new(&config(), &OptionCatalog::default()).expect("session")
    }

    #[test]
    fn feed_button_appears_with_first_filter() {
        let mut page = session();
        assert!(!page.affordance().button_visible);

        page.dispatch(UiEvent::DesktopToggleActivity("hiking".into()));
        assert!(page.affordance().button_visible);
        assert_eq!(page.affordance().label, affordance::SAVE_FEED_LABEL);

        page.dispatch(UiEvent::DesktopToggleActivity("hiking".into()));
        assert!(!page.affordance().button_visible);
    }

    #[test]
    fn modal_suppresses_panel_toggles() {
        let mut page = session();
        page.dispatch(UiEvent::Click {
            surface: SurfaceKind::Desktop,
            target: ClickTarget::Trigger(PanelId::Timeframe),
        });
        page.dispatch(UiEvent::OpenModal {
            id: SHARE_FEED_MODAL.into(),
            opener: None,
        });
        page.dispatch(UiEvent::Click {
            surface: SurfaceKind::Desktop,
            target: ClickTarget::Trigger(PanelId::Activity),
        });
        assert_eq!(page.panels(SurfaceKind::Desktop).open_panel(), Some(PanelId::Timeframe));

        page.dispatch(UiEvent::Key {
            key: Key::Escape,
            shift: false,
            focused: None,
        });
        assert!(page.topmost_modal().is_none());
        assert_eq!(page.panels(SurfaceKind::Desktop).open_panel(), Some(PanelId::Timeframe));
    }

    #[test]
    fn navigation_closes_panels_and_swaps_label() {
        let mut page = session();
        page.dispatch(UiEvent::Click {
            surface: SurfaceKind::Desktop,
            target: ClickTarget::Trigger(PanelId::Location),
        });
        page.dispatch(UiEvent::Navigate(NavTab::MyFeeds));
        assert_eq!(page.panels(SurfaceKind::Desktop).open_panel(), None);
        assert_eq!(page.affordance().label, affordance::SHARE_FEED_LABEL);
        assert!(page.affordance().button_visible);

        page.dispatch(UiEvent::GroupSizeIncrement);
        assert!(page.affordance().action_row_visible);
        assert!(!page.affordance().button_visible);
    }

    #[test]
    fn copy_feedback_reverts_after_timeout() {
        let primary = SharedClipboard::default();
        let writes = Rc::clone(&primary.writes);
        let mut page = Session::with_clipboards(
            &config(),
            &OptionCatalog::default(),
            Some(Box::new(primary)),
            Box::new(SharedClipboard::default()),
        )
        .expect("session");

        page.dispatch(UiEvent::Copy(CopyTarget::Link));
        assert_eq!(page.share().link_button.aria_label(), COPIED_LABEL);
        assert_eq!(writes.borrow().len(), 1);
        assert!(writes.borrow()[0].contains("generated_link_"));

        page.dispatch(UiEvent::Tick(1999));
        assert_eq!(page.share().link_button.aria_label(), COPIED_LABEL);
        page.dispatch(UiEvent::Tick(1));
        assert_eq!(page.share().link_button.aria_label(), COPY_LINK_LABEL);
    }

    #[test]
    fn failed_copy_uses_fallback_when_primary_missing() {
        let fallback = SharedClipboard {
            fail: true,
            ..SharedClipboard::default()
        };
        let mut page =
            Session::with_clipboards(&config(), &OptionCatalog::default(), None, Box::new(fallback))
                .expect("session");
        page.dispatch(UiEvent::Copy(CopyTarget::Message));
        assert_eq!(page.share().message_button.aria_label(), COPY_FAILED_LABEL);
    }

    #[test]
    fn mobile_accordions_need_open_overlay() {
        let mut page = session();
        let when = UiEvent::Click {
            surface: SurfaceKind::Mobile,
            target: ClickTarget::Trigger(PanelId::Timeframe),
        };
        page.dispatch(when.clone());
        assert_eq!(page.panels(SurfaceKind::Mobile).open_panel(), None);
        assert_eq!(page.render().mobile.open_panel, None);

        page.dispatch(UiEvent::Click {
            surface: SurfaceKind::Mobile,
            target: ClickTarget::Trigger(PanelId::FeedSelect),
        });
        assert_eq!(page.panels(SurfaceKind::Mobile).open_panel(), Some(PanelId::FeedSelect));

        page.dispatch(UiEvent::OpenMobileOverlay);
        page.dispatch(when);
        assert_eq!(page.panels(SurfaceKind::Mobile).open_panel(), Some(PanelId::Timeframe));

        page.dispatch(UiEvent::CloseMobileOverlay);
        assert_eq!(page.panels(SurfaceKind::Mobile).open_panel(), None);
    }

    #[test]
    fn feed_selection_ignored_on_explore() {
        let mut page = session();
        page.dispatch(UiEvent::SelectFeed("Weekend climbs".into()));
        assert_eq!(page.render().feed, affordance::ALL_FEEDS);
        assert!(!page.affordance().view_feed_visible);

        page.dispatch(UiEvent::Navigate(NavTab::MyFeeds));
        page.dispatch(UiEvent::SelectFeed("Weekend climbs".into()));
        assert_eq!(page.render().feed, "Weekend climbs");
        assert!(page.affordance().view_feed_visible);
    }

    #[test]
    fn typed_location_reveals_save_button() {
        let mut page = session();
        page.dispatch(UiEvent::DesktopSelectLocation("Park Slope".into()));
        assert!(!page.affordance().button_visible);

        page.dispatch(UiEvent::DesktopTypeLocation("Park Slope".into()));
        page.dispatch(UiEvent::DesktopTypeActivity("surfing".into()));
        assert!(page.affordance().button_visible);

        let rendered = page.render();
        assert_eq!(rendered.desktop.display.location.input, "Park Slope");
        assert_eq!(rendered.desktop.display.activity.input, "surfing");
        assert_eq!(rendered.filter.activity.len(), 1);
    }

    #[test]
    fn restore_returns_to_saved_default() {
        let mut page = session();
        page.dispatch(UiEvent::DesktopToggleTimeframe(TimeframeTag::ThisWeekend));
        page.dispatch(UiEvent::SaveAsDefault);
        page.dispatch(UiEvent::DesktopToggleActivity("kayaking".into()));
        page.dispatch(UiEvent::Restore);

        let state = page.store().snapshot();
        assert!(state.activity.is_empty());
        assert!(state.timeframe.contains(&TimeframeTag::ThisWeekend));
    }

    #[test]
    fn save_feed_flow_closes_modal_and_restores_focus() {
        let mut page = session();
        page.dispatch(UiEvent::DesktopSelectLocation("Brooklyn".into()));
        page.dispatch(UiEvent::PressFeedButton);
        assert_eq!(page.topmost_modal(), Some(SAVE_FEED_MODAL));

        page.dispatch(UiEvent::FeedNameSave);
        assert_eq!(page.topmost_modal(), Some(SAVE_FEED_MODAL));

        page.dispatch(UiEvent::FeedNameInput("Brooklyn weekends".into()));
        page.dispatch(UiEvent::FeedNameSave);
        assert!(page.topmost_modal().is_none());
        assert_eq!(page.saved_feeds(), ["Brooklyn weekends".to_string()]);
        assert_eq!(page.render().focus, FocusMove::Control(FEED_BUTTON.into()));
    }
}
