use std::collections::BTreeMap;

use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Datelike,
  Days,
  NaiveDate
};
use serde::Serialize;

use crate::filter::TimeframeTag;

const SHORT_MONTH_FORMAT: &str = "%b";

/// Labels for every timeframe tag, computed once from a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateLabelSet {
  reference: NaiveDate,
  labels:    BTreeMap<TimeframeTag, String>
}

impl DateLabelSet {
  pub fn reference(&self) -> NaiveDate {
    self.reference
  }

  pub fn get(
    &self,
    tag: TimeframeTag
  ) -> &str {
    self
      .labels
      .get(&tag)
      .map(String::as_str)
      .unwrap_or_default()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (TimeframeTag, &str)>
  {
    self
      .labels
      .iter()
      .map(|(tag, label)| {
        (*tag, label.as_str())
      })
  }
}

/// Accepts `YYYY-MM-DD` only.
pub fn parse_reference_date(
  raw: &str
) -> anyhow::Result<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(anyhow!(
      "reference date cannot be empty"
    ));
  }
  NaiveDate::parse_from_str(
    trimmed, "%Y-%m-%d"
  )
  .with_context(|| {
    format!(
      "invalid reference date \
       {trimmed:?}; expected \
       YYYY-MM-DD"
    )
  })
}

/// Monday on or before `date`.
#[must_use]
pub fn week_start(
  date: NaiveDate
) -> NaiveDate {
  let back = u64::from(
    date
      .weekday()
      .num_days_from_monday()
  );
  shift(date, -(back as i64))
}

#[tracing::instrument]
pub fn labels_for(
  reference: NaiveDate
) -> DateLabelSet {
  let tomorrow = shift(reference, 1);

  let this_week_start =
    week_start(reference);
  let this_week_end =
    shift(this_week_start, 6);
  let this_weekend_start =
    shift(this_week_start, 5);

  let next_week_start =
    shift(this_week_end, 1);
  let next_week_end =
    shift(next_week_start, 6);
  let next_weekend_start =
    shift(next_week_start, 5);

  let few_weeks_end =
    shift(reference, 13);
  let few_weekends_end =
    shift(next_weekend_start, 8);

  let mut labels = BTreeMap::new();
  labels.insert(
    TimeframeTag::Today,
    format_day(reference)
  );
  labels.insert(
    TimeframeTag::Tomorrow,
    format_day(tomorrow)
  );
  labels.insert(
    TimeframeTag::ThisWeek,
    format_range(
      this_week_start,
      this_week_end
    )
  );
  labels.insert(
    TimeframeTag::ThisWeekend,
    format_range(
      this_weekend_start,
      this_week_end
    )
  );
  labels.insert(
    TimeframeTag::NextWeek,
    format_range(
      next_week_start,
      next_week_end
    )
  );
  labels.insert(
    TimeframeTag::NextWeekend,
    format_range(
      next_weekend_start,
      next_week_end
    )
  );
  labels.insert(
    TimeframeTag::NextFewWeeks,
    format_range(
      reference,
      few_weeks_end
    )
  );
  labels.insert(
    TimeframeTag::NextFewWeekends,
    format_range(
      this_weekend_start,
      few_weekends_end
    )
  );

  tracing::debug!(
    reference = %reference,
    "computed date labels"
  );

  DateLabelSet {
    reference,
    labels
  }
}

#[must_use]
pub fn format_day(
  date: NaiveDate
) -> String {
  format!(
    "{} {}",
    date.format(SHORT_MONTH_FORMAT),
    date.day()
  )
}

#[must_use]
pub fn format_range(
  start: NaiveDate,
  end: NaiveDate
) -> String {
  if start.month() == end.month() {
    format!(
      "{} - {}",
      format_day(start),
      end.day()
    )
  } else {
    format!(
      "{} - {}",
      format_day(start),
      format_day(end)
    )
  }
}

fn shift(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  let moved = if days >= 0 {
    date.checked_add_days(Days::new(
      days as u64
    ))
  } else {
    date.checked_sub_days(Days::new(
      days.unsigned_abs()
    ))
  };
  moved.unwrap_or(date)
}

#[cfg(test)]
mod tests {
  use chrono::Weekday;

  use super::*;

  fn may_19() -> NaiveDate {
    NaiveDate::from_ymd_opt(
      2025, 5, 19
    )
    .expect("valid date")
  }

  #[test]
  fn labels_for_monday_reference() {
    let labels = labels_for(may_19());
    assert_eq!(
      labels.get(TimeframeTag::Today),
      "May 19"
    );
    assert_eq!(
      labels.get(TimeframeTag::Tomorrow),
      "May 20"
    );
    assert_eq!(
      labels.get(TimeframeTag::ThisWeek),
      "May 19 - 25"
    );
    assert_eq!(
      labels
        .get(TimeframeTag::ThisWeekend),
      "May 24 - 25"
    );
    assert_eq!(
      labels.get(TimeframeTag::NextWeek),
      "May 26 - Jun 1"
    );
    assert_eq!(
      labels
        .get(TimeframeTag::NextWeekend),
      "May 31 - Jun 1"
    );
    assert_eq!(
      labels
        .get(TimeframeTag::NextFewWeeks),
      "May 19 - Jun 1"
    );
    assert_eq!(
      labels.get(
        TimeframeTag::NextFewWeekends
      ),
      "May 24 - Jun 8"
    );
  }

  #[test]
  fn sunday_belongs_to_previous_week() {
    let sunday =
      NaiveDate::from_ymd_opt(
        2025, 5, 25
      )
      .expect("valid date");
    assert_eq!(
      week_start(sunday),
      may_19()
    );
    let labels = labels_for(sunday);
    assert_eq!(
      labels.get(TimeframeTag::ThisWeek),
      "May 19 - 25"
    );
    assert_eq!(
      labels.get(TimeframeTag::Today),
      "May 25"
    );
  }

  #[test]
  fn this_week_always_contains_reference()
  {
    let mut day =
      NaiveDate::from_ymd_opt(
        2024, 12, 20
      )
      .expect("valid date");
    for _ in 0..60 {
      let start = week_start(day);
      assert_eq!(
        start.weekday(),
        Weekday::Mon
      );
      assert!(start <= day);
      assert!(shift(start, 6) >= day);
      assert_eq!(
        labels_for(day)
          .get(TimeframeTag::Today),
        format_day(day)
      );
      day = shift(day, 1);
    }
  }

  #[test]
  fn range_across_year_uses_both_months()
  {
    let start =
      NaiveDate::from_ymd_opt(
        2025, 12, 29
      )
      .expect("valid date");
    assert_eq!(
      format_range(
        start,
        shift(start, 6)
      ),
      "Dec 29 - Jan 4"
    );
  }

  #[test]
  fn rejects_malformed_reference() {
    assert!(
      parse_reference_date("2025-02-30")
        .is_err()
    );
    assert!(
      parse_reference_date("").is_err()
    );
    assert_eq!(
      parse_reference_date(
        " 2025-05-19 "
      )
      .expect("parse"),
      may_19()
    );
  }
}
