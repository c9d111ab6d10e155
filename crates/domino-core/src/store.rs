use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::filter::{ActivityTag, FilterChange, FilterState, GroupSize, LocationValue, TimeframeTag};

/// Receives every store mutation synchronously, before the mutating call returns.
pub trait StoreSubscriber {
    fn on_filter_change(&self, change: FilterChange, snapshot: &FilterState);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Single owner of the canonical [`FilterState`] for a page session.
///
/// Single-threaded by construction: views hold an `Rc<FilterStore>` and the
/// store holds weak handles back to them. No borrow is held while
/// subscribers run, so they may read or even mutate the store reentrantly.
pub struct FilterStore {
    state: RefCell<FilterState>,
    default_group_size: GroupSize,
    revision: Cell<u64>,
    next_subscription: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Weak<dyn StoreSubscriber>)>>,
}

impl FilterStore {
    pub fn new(default_group_size: GroupSize) -> Rc<Self> {
        debug!(default_group_size = %default_group_size, "initialized filter store");
        Rc::new(Self {
            state: RefCell::new(FilterState::with_group_size(default_group_size)),
            default_group_size,
            revision: Cell::new(0),
            next_subscription: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        })
    }

    pub fn default_group_size(&self) -> GroupSize {
        self.default_group_size
    }

    pub fn snapshot(&self) -> FilterState {
        self.state.borrow().clone()
    }

    /// Bumped once per mutation; lets deferred work notice it is looking at old state.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn has_any_filter(&self) -> bool {
        self.state.borrow().has_any_filter(self.default_group_size)
    }

    pub fn group_size(&self) -> GroupSize {
        self.state.borrow().group_size
    }

    pub fn can_decrement_group_size(&self) -> bool {
        !self.group_size().is_min()
    }

    pub fn subscribe(&self, subscriber: Weak<dyn StoreSubscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, subscriber));
        trace!(subscription = id.0, "store subscriber registered");
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    #[tracing::instrument(skip(self))]
    pub fn set_location(&self, value: Option<LocationValue>) {
        self.mutate(FilterChange::Location, |state| state.location = value);
    }

    /// Replaces the whole set.
    #[tracing::instrument(skip(self))]
    pub fn set_timeframe(&self, tags: BTreeSet<TimeframeTag>) {
        self.mutate(FilterChange::Timeframe, |state| state.timeframe = tags);
    }

    #[tracing::instrument(skip(self))]
    pub fn set_activity(&self, tags: BTreeSet<ActivityTag>) {
        self.mutate(FilterChange::Activity, |state| state.activity = tags);
    }

    #[tracing::instrument(skip(self))]
    pub fn set_group_size(&self, n: u32) {
        let size = GroupSize::new(n);
        self.mutate(FilterChange::GroupSize, |state| state.group_size = size);
    }

    pub fn increment_group_size(&self) {
        let next = self.group_size().incremented();
        self.set_group_size(next.get());
    }

    /// Returns false, without notifying anyone, when already at the floor.
    pub fn decrement_group_size(&self) -> bool {
        let current = self.group_size();
        if current.is_min() {
            debug!("group size already at minimum; ignoring decrement");
            return false;
        }
        self.set_group_size(current.decremented().get());
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn reset(&self) {
        let fresh = FilterState::with_group_size(self.default_group_size);
        self.mutate(FilterChange::All, |state| *state = fresh);
    }

    #[tracing::instrument(skip(self, next))]
    pub fn replace(&self, next: FilterState) {
        self.mutate(FilterChange::All, |state| *state = next);
    }

    fn mutate(&self, change: FilterChange, apply: impl FnOnce(&mut FilterState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        self.revision.set(self.revision.get() + 1);
        debug!(
            ?change,
            revision = self.revision.get(),
            any_filter = snapshot.has_any_filter(self.default_group_size),
            "filter state updated"
        );
        self.notify(change, &snapshot);
    }

    fn notify(&self, change: FilterChange, snapshot: &FilterState) {
        let live: Vec<Rc<dyn StoreSubscriber>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|(_, weak)| weak.strong_count() > 0);
            subscribers.iter().filter_map(|(_, weak)| weak.upgrade()).collect()
        };
        trace!(count = live.len(), ?change, "notifying store subscribers");
        for subscriber in live {
            subscriber.on_filter_change(change, snapshot);
        }
    }
}
