//! Desktop and mobile renderings of the one canonical filter state.
//!
//! Both surfaces are built from the same [`FilterControls`] and share the
//! summary rule in [`crate::filter::summary_text`]. They differ in when local
//! control changes reach the store: desktop commits on every change, mobile
//! only when its overlay is applied.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::OptionCatalog;
use crate::dates::DateLabelSet;
use crate::filter::{ActivityTag, FilterChange, FilterState, LocationValue, TimeframeTag, summary_text};
use crate::store::{FilterStore, StoreSubscriber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Desktop,
    Mobile,
}

/// Canonical values read back out of one surface's controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalSelection {
    pub location: Option<LocationValue>,
    pub timeframe: BTreeSet<TimeframeTag>,
    pub activity: BTreeSet<ActivityTag>,
}

impl LocalSelection {
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            location: state.location.clone(),
            timeframe: state.timeframe.clone(),
            activity: state.activity.clone(),
        }
    }
}

pub trait ViewAdapter {
    fn render(&self, snapshot: &FilterState);
    fn collect_local_selection(&self) -> LocalSelection;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Radio,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionControl {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    pub checked: bool,
    /// Free text the user typed; removed again once unchecked.
    pub typed: bool,
}

/// A radio or checkbox set addressed by option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    kind: GroupKind,
    options: Vec<OptionControl>,
}

impl OptionGroup {
    pub fn new(kind: GroupKind, options: Vec<OptionControl>) -> Self {
        Self { kind, options }
    }

    pub fn options(&self) -> &[OptionControl] {
        &self.options
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// Returns false when no control with `value` exists on this surface.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        if !self.contains(value) {
            debug!(value, "no such option control; ignoring");
            return false;
        }
        let radio = self.kind == GroupKind::Radio;
        for option in &mut self.options {
            if option.value == value {
                option.checked = checked;
            } else if radio && checked {
                option.checked = false;
            }
        }
        self.prune_typed();
        true
    }

    /// Checks `value`, adding a typed control for it when no option matches.
    pub fn check_typed(&mut self, value: &str) {
        if !self.contains(value) {
            self.options.push(OptionControl {
                value: value.to_string(),
                label: value.to_string(),
                subtext: None,
                checked: false,
                typed: true,
            });
        }
        self.set_checked(value, true);
    }

    pub fn toggle(&mut self, value: &str) -> bool {
        let checked = self
            .options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.checked);
        match checked {
            Some(current) => self.set_checked(value, !current),
            None => {
                debug!(value, "no such option control; ignoring toggle");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        for option in &mut self.options {
            option.checked = false;
        }
        self.prune_typed();
    }

    /// Clears the group, then checks every listed value that has a control.
    pub fn check_exactly<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.clear();
        for value in values {
            self.set_checked(value, true);
        }
    }

    pub fn checked(&self) -> impl Iterator<Item = &OptionControl> {
        self.options.iter().filter(|option| option.checked)
    }

    pub fn summary(&self) -> String {
        summary_text(self.checked().map(|option| option.label.as_str()))
    }

    fn prune_typed(&mut self) {
        self.options.retain(|option| !option.typed || option.checked);
    }
}

/// The three option groups every surface renders.
///
/// Location and activity also take free text. Catalog values switched off
/// for this surface are never accepted, typed or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControls {
    pub location: OptionGroup,
    pub timeframe: OptionGroup,
    pub activity: OptionGroup,
    #[serde(skip)]
    hidden_locations: BTreeSet<String>,
    #[serde(skip)]
    hidden_activities: BTreeSet<String>,
}

impl FilterControls {
    pub fn build(catalog: &OptionCatalog, labels: &DateLabelSet, surface: SurfaceKind) -> Self {
        let location = catalog
            .locations
            .iter()
            .filter(|option| option.on(surface))
            .map(|option| OptionControl {
                value: option.value.clone(),
                label: option.label.clone(),
                subtext: None,
                checked: false,
                typed: false,
            })
            .collect();
        let timeframe = catalog
            .timeframes
            .iter()
            .filter(|option| option.on(surface))
            .map(|option| OptionControl {
                value: option.tag.token().to_string(),
                label: option.tag.label().to_string(),
                subtext: Some(labels.get(option.tag).to_string()),
                checked: false,
                typed: false,
            })
            .collect();
        let activity = catalog
            .activities
            .iter()
            .filter(|option| option.on(surface))
            .map(|option| OptionControl {
                value: option.value.clone(),
                label: option.label.clone(),
                subtext: None,
                checked: false,
                typed: false,
            })
            .collect();

        Self {
            location: OptionGroup::new(GroupKind::Radio, location),
            timeframe: OptionGroup::new(GroupKind::Checkbox, timeframe),
            activity: OptionGroup::new(GroupKind::Checkbox, activity),
            hidden_locations: catalog
                .locations
                .iter()
                .filter(|option| !option.on(surface))
                .map(|option| option.value.clone())
                .collect(),
            hidden_activities: catalog
                .activities
                .iter()
                .filter(|option| !option.on(surface))
                .map(|option| option.value.clone())
                .collect(),
        }
    }

    pub fn selection(&self) -> LocalSelection {
        let location = self
            .location
            .checked()
            .next()
            .map(|option| LocationValue::new(option.value.clone()));
        let timeframe = self
            .timeframe
            .checked()
            .filter_map(|option| match option.value.parse::<TimeframeTag>() {
                Ok(tag) => Some(tag),
                Err(err) => {
                    debug!(value = %option.value, error = %err, "skipping unknown timeframe control");
                    None
                }
            })
            .collect();
        let activity = self
            .activity
            .checked()
            .map(|option| ActivityTag::new(option.value.clone()))
            .collect();

        LocalSelection {
            location,
            timeframe,
            activity,
        }
    }

    /// Mirrors `selection` onto the controls. Free-form location and activity
    /// values get typed controls; values this surface does not offer are dropped.
    pub fn apply(&mut self, selection: &LocalSelection) {
        self.apply_location(selection.location.as_ref());
        self.timeframe
            .check_exactly(selection.timeframe.iter().map(|tag| tag.token()));
        self.apply_activity(&selection.activity);
    }

    pub fn offers_location(&self, value: &str) -> bool {
        !self.hidden_locations.contains(value)
    }

    fn apply_location(&mut self, value: Option<&LocationValue>) {
        match value {
            Some(value) if !self.offers_location(value.as_str()) => {
                debug!(value = %value, "location not offered on this surface; dropping");
                self.location.clear();
            }
            Some(value) => self.location.check_typed(value.as_str()),
            None => self.location.clear(),
        }
    }

    fn apply_activity(&mut self, tags: &BTreeSet<ActivityTag>) {
        self.activity.clear();
        for tag in tags {
            if self.hidden_activities.contains(tag.as_str()) {
                debug!(tag = %tag, "activity not offered on this surface; dropping");
                continue;
            }
            self.activity.check_typed(tag.as_str());
        }
    }

    fn location_label(&self, value: &LocationValue) -> String {
        self.location
            .label_for(value.as_str())
            .unwrap_or(value.as_str())
            .to_string()
    }
}

/// What one desktop search-bar segment shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SegmentDisplay {
    pub input: String,
    pub has_value: bool,
    pub summary: String,
}

impl SegmentDisplay {
    fn new(input: String, has_value: bool, summary: String) -> Self {
        Self {
            input,
            has_value,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DesktopDisplay {
    pub location: SegmentDisplay,
    pub timeframe: SegmentDisplay,
    pub activity: SegmentDisplay,
    pub group_size: SegmentDisplay,
    pub minus_disabled: bool,
}

/// Always-visible search bar. Every control change commits straight to the store.
pub struct DesktopView {
    store: Rc<FilterStore>,
    controls: RefCell<FilterControls>,
    display: RefCell<DesktopDisplay>,
}

impl DesktopView {
    pub fn new(store: Rc<FilterStore>, catalog: &OptionCatalog, labels: &DateLabelSet) -> Rc<Self> {
        let view = Rc::new(Self {
            controls: RefCell::new(FilterControls::build(catalog, labels, SurfaceKind::Desktop)),
            display: RefCell::new(DesktopDisplay::default()),
            store: Rc::clone(&store),
        });
        let weak: Weak<dyn StoreSubscriber> = Rc::downgrade(&view) as Weak<dyn StoreSubscriber>;
        store.subscribe(weak);
        view.render(&store.snapshot());
        view
    }

    pub fn controls(&self) -> FilterControls {
        self.controls.borrow().clone()
    }

    pub fn display(&self) -> DesktopDisplay {
        self.display.borrow().clone()
    }

    /// Picking a "where" option commits immediately; the caller closes the dropdown.
    #[tracing::instrument(skip(self))]
    pub fn select_location(&self, value: &str) -> bool {
        if !self.controls.borrow_mut().location.set_checked(value, true) {
            return false;
        }
        self.store.set_location(Some(LocationValue::new(value)));
        true
    }

    pub fn clear_location(&self) {
        self.controls.borrow_mut().location.clear();
        self.store.set_location(None);
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_timeframe(&self, tag: TimeframeTag) -> bool {
        if !self.controls.borrow_mut().timeframe.toggle(tag.token()) {
            return false;
        }
        self.handle_timeframe_change();
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_activity(&self, value: &str) -> bool {
        if !self.controls.borrow_mut().activity.toggle(value) {
            return false;
        }
        self.handle_activity_change();
        true
    }

    /// Free text typed into the "where" input. Blank text clears the segment.
    #[tracing::instrument(skip(self))]
    pub fn type_location(&self, text: &str) -> bool {
        let value = text.trim();
        if value.is_empty() {
            self.clear_location();
            return true;
        }
        if !self.controls.borrow().offers_location(value) {
            debug!(value, "location not offered on desktop; ignoring typed value");
            return false;
        }
        let location = LocationValue::new(value);
        self.controls.borrow_mut().apply_location(Some(&location));
        self.store.set_location(Some(location));
        true
    }

    /// Comma-separated tags typed into the "activity" input replace the selection.
    #[tracing::instrument(skip(self))]
    pub fn type_activity(&self, text: &str) {
        let tags: BTreeSet<ActivityTag> = text
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ActivityTag::new)
            .collect();
        self.controls.borrow_mut().apply_activity(&tags);
        self.handle_activity_change();
    }

    pub fn increment_group_size(&self) {
        self.store.increment_group_size();
    }

    pub fn decrement_group_size(&self) -> bool {
        self.store.decrement_group_size()
    }

    /// Mirrors another surface's selection onto these controls without committing.
    pub fn apply_selection(&self, selection: &LocalSelection) {
        self.controls.borrow_mut().apply(selection);
    }

    /// The desktop change path: whatever the controls hold becomes canonical.
    pub fn commit_controls(&self) {
        let selection = self.collect_local_selection();
        self.store.set_location(selection.location);
        self.store.set_timeframe(selection.timeframe);
        self.store.set_activity(selection.activity);
    }

    fn handle_timeframe_change(&self) {
        let timeframe = self.collect_local_selection().timeframe;
        self.store.set_timeframe(timeframe);
    }

    fn handle_activity_change(&self) {
        let activity = self.collect_local_selection().activity;
        self.store.set_activity(activity);
    }

    fn refresh_display(&self, snapshot: &FilterState) {
        let controls = self.controls.borrow();
        let default_size = self.store.default_group_size();

        let location = match &snapshot.location {
            Some(value) => SegmentDisplay::new(
                value.as_str().to_string(),
                true,
                controls.location_label(value),
            ),
            None => SegmentDisplay::new(String::new(), false, "Any".to_string()),
        };

        let when_labels: Vec<&str> = controls
            .timeframe
            .checked()
            .map(|option| option.label.as_str())
            .collect();
        let timeframe = SegmentDisplay::new(
            when_labels.join(", "),
            !when_labels.is_empty(),
            controls.timeframe.summary(),
        );

        let activity_values: Vec<&str> = controls
            .activity
            .checked()
            .map(|option| option.value.as_str())
            .collect();
        let activity = SegmentDisplay::new(
            activity_values.join(", "),
            !activity_values.is_empty(),
            controls.activity.summary(),
        );

        let size = snapshot.group_size;
        let group_size = SegmentDisplay::new(size.to_string(), size != default_size, size.to_string());

        *self.display.borrow_mut() = DesktopDisplay {
            location,
            timeframe,
            activity,
            group_size,
            minus_disabled: size.is_min(),
        };
    }
}

impl ViewAdapter for DesktopView {
    fn render(&self, snapshot: &FilterState) {
        self.controls
            .borrow_mut()
            .apply(&LocalSelection::from_state(snapshot));
        self.refresh_display(snapshot);
        trace!("desktop rendered");
    }

    fn collect_local_selection(&self) -> LocalSelection {
        self.controls.borrow().selection()
    }
}

impl StoreSubscriber for DesktopView {
    fn on_filter_change(&self, _change: FilterChange, snapshot: &FilterState) {
        self.render(snapshot);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct MobileSummaries {
    pub location: String,
    pub timeframe: String,
    pub activity: String,
}

/// Content of the mobile search button once filters are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct AppliedFilters {
    pub location: String,
    pub activity: String,
    pub timeframe: String,
    pub group_size: String,
    pub location_activity_separator: bool,
    pub timeframe_group_separator: bool,
    pub filters_applied: bool,
}

/// Accordion overlay. Edits stay local until applied.
pub struct MobileView {
    store: Rc<FilterStore>,
    controls: RefCell<FilterControls>,
    overlay_open: Cell<bool>,
}

impl MobileView {
    pub fn new(store: Rc<FilterStore>, catalog: &OptionCatalog, labels: &DateLabelSet) -> Rc<Self> {
        let view = Rc::new(Self {
            controls: RefCell::new(FilterControls::build(catalog, labels, SurfaceKind::Mobile)),
            overlay_open: Cell::new(false),
            store: Rc::clone(&store),
        });
        let weak: Weak<dyn StoreSubscriber> = Rc::downgrade(&view) as Weak<dyn StoreSubscriber>;
        store.subscribe(weak);
        view.render(&store.snapshot());
        view
    }

    pub fn controls(&self) -> FilterControls {
        self.controls.borrow().clone()
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open.get()
    }

    pub fn open_overlay(&self) {
        self.overlay_open.set(true);
        debug!("mobile filter overlay opened");
    }

    /// Closing without applying drops the local edits.
    pub fn close_overlay(&self) {
        self.overlay_open.set(false);
        self.render(&self.store.snapshot());
        debug!("mobile filter overlay closed");
    }

    pub fn select_location(&self, value: &str) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        self.controls.borrow_mut().location.set_checked(value, true)
    }

    pub fn clear_location(&self) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        self.controls.borrow_mut().location.clear();
        true
    }

    pub fn toggle_timeframe(&self, tag: TimeframeTag) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        self.controls.borrow_mut().timeframe.toggle(tag.token())
    }

    pub fn toggle_activity(&self, value: &str) -> bool {
        if !self.accepts_edits() {
            return false;
        }
        self.controls.borrow_mut().activity.toggle(value)
    }

    pub fn apply_selection(&self, selection: &LocalSelection) {
        self.controls.borrow_mut().apply(selection);
    }

    pub fn summaries(&self) -> MobileSummaries {
        let controls = self.controls.borrow();
        MobileSummaries {
            location: controls.location.summary(),
            timeframe: controls.timeframe.summary(),
            activity: controls.activity.summary(),
        }
    }

    /// Derived from committed state, not from pending overlay edits.
    pub fn applied_filters(&self) -> AppliedFilters {
        let snapshot = self.store.snapshot();
        let controls = self.controls.borrow();

        let location = snapshot
            .location
            .as_ref()
            .map(|value| controls.location_label(value))
            .unwrap_or_default();
        let timeframe = applied_text(snapshot.timeframe.iter().map(|tag| tag.label().to_string()));
        let activity = applied_text(snapshot.activity.iter().map(|tag| {
            controls
                .activity
                .label_for(tag.as_str())
                .unwrap_or(tag.as_str())
                .to_string()
        }));
        let group_size = if snapshot.group_size != self.store.default_group_size() {
            snapshot.group_size.to_string()
        } else {
            String::new()
        };

        let filters_applied =
            !location.is_empty() || !activity.is_empty() || !timeframe.is_empty() || !group_size.is_empty();

        AppliedFilters {
            location_activity_separator: !location.is_empty() && !activity.is_empty(),
            timeframe_group_separator: !timeframe.is_empty() && !group_size.is_empty(),
            location,
            activity,
            timeframe,
            group_size,
            filters_applied,
        }
    }

    fn accepts_edits(&self) -> bool {
        if !self.overlay_open.get() {
            debug!("mobile overlay closed; ignoring control edit");
            return false;
        }
        true
    }
}

fn applied_text(labels: impl Iterator<Item = String>) -> String {
    let labels: Vec<String> = labels.collect();
    match labels.len() {
        0 => String::new(),
        1 => labels.into_iter().next().unwrap_or_default(),
        n => format!("{n} selected"),
    }
}

impl ViewAdapter for MobileView {
    fn render(&self, snapshot: &FilterState) {
        if self.overlay_open.get() {
            trace!("mobile overlay open; keeping local edits");
            return;
        }
        self.controls
            .borrow_mut()
            .apply(&LocalSelection::from_state(snapshot));
        trace!("mobile rendered");
    }

    fn collect_local_selection(&self) -> LocalSelection {
        self.controls.borrow().selection()
    }
}

impl StoreSubscriber for MobileView {
    fn on_filter_change(&self, _change: FilterChange, snapshot: &FilterState) {
        self.render(snapshot);
    }
}

/// Mobile "Apply": mobile's local choices flow onto the desktop controls,
/// then the desktop change path commits them.
#[tracing::instrument(skip_all)]
pub fn sync_from_mobile(desktop: &DesktopView, mobile: &MobileView) {
    let selection = mobile.collect_local_selection();
    debug!(
        timeframe = selection.timeframe.len(),
        activity = selection.activity.len(),
        location = selection.location.is_some(),
        "syncing mobile selection to desktop"
    );
    desktop.apply_selection(&selection);
    desktop.commit_controls();
}

/// Seeds the mobile overlay with whatever desktop currently holds.
#[tracing::instrument(skip_all)]
pub fn sync_from_desktop(desktop: &DesktopView, mobile: &MobileView) {
    let selection = desktop.collect_local_selection();
    mobile.apply_selection(&selection);
}
