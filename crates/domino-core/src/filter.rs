use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Fixed set of relative date windows offered by the "when" segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeframeTag {
    Today,
    Tomorrow,
    ThisWeek,
    ThisWeekend,
    NextWeek,
    NextWeekend,
    NextFewWeeks,
    NextFewWeekends,
}

impl TimeframeTag {
    pub const ALL: [TimeframeTag; 8] = [
        TimeframeTag::Today,
        TimeframeTag::Tomorrow,
        TimeframeTag::ThisWeek,
        TimeframeTag::ThisWeekend,
        TimeframeTag::NextWeek,
        TimeframeTag::NextWeekend,
        TimeframeTag::NextFewWeeks,
        TimeframeTag::NextFewWeekends,
    ];

    pub fn token(self) -> &'static str {
        match self {
            TimeframeTag::Today => "today",
            TimeframeTag::Tomorrow => "tomorrow",
            TimeframeTag::ThisWeek => "this_week",
            TimeframeTag::ThisWeekend => "this_weekend",
            TimeframeTag::NextWeek => "next_week",
            TimeframeTag::NextWeekend => "next_weekend",
            TimeframeTag::NextFewWeeks => "next_few_weeks",
            TimeframeTag::NextFewWeekends => "next_few_weekends",
        }
    }

    /// Label shown on the option itself, without the date subtext.
    pub fn label(self) -> &'static str {
        match self {
            TimeframeTag::Today => "Today",
            TimeframeTag::Tomorrow => "Tomorrow",
            TimeframeTag::ThisWeek => "This week",
            TimeframeTag::ThisWeekend => "This weekend",
            TimeframeTag::NextWeek => "Next week",
            TimeframeTag::NextWeekend => "Next weekend",
            TimeframeTag::NextFewWeeks => "Next few weeks",
            TimeframeTag::NextFewWeekends => "Next few weekends",
        }
    }
}

impl fmt::Display for TimeframeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TimeframeTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        TimeframeTag::ALL
            .into_iter()
            .find(|tag| tag.token() == wanted)
            .ok_or_else(|| anyhow!("unknown timeframe tag: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationValue(String);

impl LocationValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityTag(String);

impl ActivityTag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Party size for the "who" segment. Never below [`GroupSize::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSize(u32);

impl GroupSize {
    pub const MIN: GroupSize = GroupSize(1);
    pub const DEFAULT: GroupSize = GroupSize(2);

    pub fn new(n: u32) -> Self {
        Self(n.max(Self::MIN.0))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_min(self) -> bool {
        self == Self::MIN
    }

    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn decremented(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for GroupSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GroupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical search filter shared by every surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub location: Option<LocationValue>,
    pub timeframe: BTreeSet<TimeframeTag>,
    pub activity: BTreeSet<ActivityTag>,
    pub group_size: GroupSize,
}

impl FilterState {
    pub fn with_group_size(group_size: GroupSize) -> Self {
        Self {
            location: None,
            timeframe: BTreeSet::new(),
            activity: BTreeSet::new(),
            group_size,
        }
    }

    pub fn has_any_filter(&self, default_group_size: GroupSize) -> bool {
        self.location.is_some()
            || !self.timeframe.is_empty()
            || !self.activity.is_empty()
            || self.group_size != default_group_size
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_group_size(GroupSize::DEFAULT)
    }
}

/// Which dimension a store mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterChange {
    Location,
    Timeframe,
    Activity,
    GroupSize,
    All,
}

/// One-line summary used by both surfaces: "Any", the single label, or "N selected".
pub fn summary_text<I, S>(selected_labels: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = selected_labels.into_iter();
    let Some(first) = iter.next() else {
        return "Any".to_string();
    };
    let rest = iter.count();
    if rest == 0 {
        first.as_ref().to_string()
    } else {
        format!("{} selected", rest + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_follows_count_rule() {
        assert_eq!(summary_text(Vec::<&str>::new()), "Any");
        assert_eq!(summary_text(["May 19"]), "May 19");
        assert_eq!(summary_text(["Today", "Tomorrow"]), "2 selected");
        assert_eq!(summary_text(["a", "b", "c"]), "3 selected");
    }

    #[test]
    fn group_size_never_drops_below_one() {
        assert_eq!(GroupSize::new(0), GroupSize::MIN);
        assert_eq!(GroupSize::MIN.decremented(), GroupSize::MIN);
        assert_eq!(GroupSize::new(3).decremented().get(), 2);
        assert!(GroupSize::new(1).is_min());
    }

    #[test]
    fn timeframe_tokens_parse_both_spellings() {
        assert_eq!(
            "next-few-weekends".parse::<TimeframeTag>().expect("parse"),
            TimeframeTag::NextFewWeekends
        );
        assert_eq!("Today".parse::<TimeframeTag>().expect("parse"), TimeframeTag::Today);
        assert!("yesterday".parse::<TimeframeTag>().is_err());
    }

    #[test]
    fn default_state_has_no_filter() {
        let state = FilterState::default();
        assert!(!state.has_any_filter(GroupSize::DEFAULT));

        let mut sized = state.clone();
        sized.group_size = GroupSize::new(4);
        assert!(sized.has_any_filter(GroupSize::DEFAULT));

        let mut located = state;
        located.location = Some(LocationValue::new("Brooklyn"));
        assert!(located.has_any_filter(GroupSize::DEFAULT));
    }
}
