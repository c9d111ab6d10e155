use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::Serialize;

pub const SAVE_FEED_LABEL: &str = "Save Feed";
pub const SHARE_FEED_LABEL: &str = "Share Feed";
pub const SAVE_FEED_ICON: &str = "img/bookmark_white.svg";
pub const SHARE_FEED_ICON: &str = "img/arrow-up-right.svg";
pub const ALL_FEEDS: &str = "All feeds";
pub const FEED_PLACEHOLDER: &str = "Select Feed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NavTab {
    #[default]
    Explore,
    MyFeeds,
}

impl fmt::Display for NavTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavTab::Explore => f.write_str("explore"),
            NavTab::MyFeeds => f.write_str("my-feeds"),
        }
    }
}

impl FromStr for NavTab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "explore" => Ok(NavTab::Explore),
            "my-feeds" | "feeds" => Ok(NavTab::MyFeeds),
            other => Err(anyhow!("unknown nav tab: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum FeedSelection {
    #[default]
    All,
    Placeholder,
    Named(String),
}

impl FeedSelection {
    /// Maps the picker's display text back to a selection.
    pub fn from_display(text: &str) -> Self {
        match text.trim() {
            ALL_FEEDS | "" => FeedSelection::All,
            FEED_PLACEHOLDER => FeedSelection::Placeholder,
            name => FeedSelection::Named(name.to_string()),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            FeedSelection::All => ALL_FEEDS,
            FeedSelection::Placeholder => FEED_PLACEHOLDER,
            FeedSelection::Named(name) => name,
        }
    }

    pub fn named(&self) -> Option<&str> {
        match self {
            FeedSelection::Named(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AffordanceInput<'a> {
    pub has_any_filter: bool,
    pub tab: NavTab,
    pub feed: &'a FeedSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub label: &'static str,
    pub icon: &'static str,
    pub button_visible: bool,
    pub action_row_visible: bool,
    pub mobile_bookmark_visible: bool,
    pub custom_filter_notice_visible: bool,
    pub active_feed_header: Option<String>,
    pub view_feed_visible: bool,
}

/// Pure: the same inputs always give the same buttons.
pub fn derive(input: AffordanceInput<'_>) -> Affordance {
    let my_feeds = input.tab == NavTab::MyFeeds;
    let named_feed = input.feed.named();

    let (label, icon, button_visible, action_row_visible) = if my_feeds {
        (
            SHARE_FEED_LABEL,
            SHARE_FEED_ICON,
            !input.has_any_filter,
            input.has_any_filter,
        )
    } else {
        (SAVE_FEED_LABEL, SAVE_FEED_ICON, input.has_any_filter, false)
    };

    Affordance {
        label,
        icon,
        button_visible,
        action_row_visible,
        mobile_bookmark_visible: input.has_any_filter && !my_feeds,
        custom_filter_notice_visible: my_feeds && named_feed.is_some() && input.has_any_filter,
        active_feed_header: named_feed.filter(|_| my_feeds).map(str::to_string),
        view_feed_visible: named_feed.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explore(has_any_filter: bool) -> Affordance {
        derive(AffordanceInput {
            has_any_filter,
            tab: NavTab::Explore,
            feed: &FeedSelection::All,
        })
    }

    #[test]
    fn explore_shows_save_only_with_filters() {
        let idle = explore(false);
        assert_eq!(idle.label, SAVE_FEED_LABEL);
        assert!(!idle.button_visible);
        assert!(!idle.mobile_bookmark_visible);

        let active = explore(true);
        assert!(active.button_visible);
        assert!(active.mobile_bookmark_visible);
        assert!(!active.action_row_visible);
    }

    #[test]
    fn my_feeds_swaps_share_for_action_row() {
        let feed = FeedSelection::Named("Weekend trips".into());
        let idle = derive(AffordanceInput {
            has_any_filter: false,
            tab: NavTab::MyFeeds,
            feed: &feed,
        });
        assert_eq!(idle.label, SHARE_FEED_LABEL);
        assert_eq!(idle.icon, SHARE_FEED_ICON);
        assert!(idle.button_visible);
        assert!(!idle.action_row_visible);
        assert!(!idle.custom_filter_notice_visible);
        assert_eq!(idle.active_feed_header.as_deref(), Some("Weekend trips"));

        let active = derive(AffordanceInput {
            has_any_filter: true,
            tab: NavTab::MyFeeds,
            feed: &feed,
        });
        assert!(!active.button_visible);
        assert!(active.action_row_visible);
        assert!(active.custom_filter_notice_visible);
        assert!(!active.mobile_bookmark_visible);
    }

    #[test]
    fn placeholder_feed_is_not_specific() {
        assert_eq!(FeedSelection::from_display("Select Feed"), FeedSelection::Placeholder);
        assert_eq!(FeedSelection::from_display("All feeds"), FeedSelection::All);
        let out = derive(AffordanceInput {
            has_any_filter: true,
            tab: NavTab::MyFeeds,
            feed: &FeedSelection::Placeholder,
        });
        assert!(!out.custom_filter_notice_visible);
        assert!(out.active_feed_header.is_none());
        assert!(!out.view_feed_visible);
    }
}
