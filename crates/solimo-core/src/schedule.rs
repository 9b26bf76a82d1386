//! Day-of-week activity schedule.
//!
//! Each weekday maps to exactly one activity:
//!
//! | day       | activity |
//! |-----------|----------|
//! | Sunday    | logic    |
//! | Monday    | colors   |
//! | Tuesday   | shapes   |
//! | Wednesday | numbers  |
//! | Thursday  | patterns |
//! | Friday    | memory   |
//! | Saturday  | sorting  |

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::activity::ActivityId;
use crate::clock::Clock;

/// Indexed by days from Sunday.
const ACTIVITY_SCHEDULE: [ActivityId; 7] = [
    ActivityId::Logic,
    ActivityId::Colors,
    ActivityId::Shapes,
    ActivityId::Numbers,
    ActivityId::Patterns,
    ActivityId::Memory,
    ActivityId::Sorting,
];

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Returned by [`day_name_for_activity`] when no day maps to the activity.
pub const UNKNOWN_DAY: &str = "Unknown";

pub fn activity_for_day_of_week(day: Weekday) -> ActivityId {
    ACTIVITY_SCHEDULE[day.num_days_from_sunday() as usize]
}

/// Same lookup by raw index, 0 = Sunday. `None` outside 0..=6.
pub fn activity_for_day_index(day: u8) -> Option<ActivityId> {
    ACTIVITY_SCHEDULE.get(usize::from(day)).copied()
}

pub fn activity_for_date(date: NaiveDate) -> ActivityId {
    activity_for_day_of_week(date.weekday())
}

pub fn activity_name_for(activity: ActivityId) -> &'static str {
    activity.display_name()
}

/// Name of the weekday that plays `activity`.
pub fn day_name_for_activity(activity: ActivityId) -> &'static str {
    ACTIVITY_SCHEDULE
        .iter()
        .position(|id| *id == activity)
        .map(|idx| DAY_NAMES[idx])
        .unwrap_or(UNKNOWN_DAY)
}

/// A single upcoming day in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedDay {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub activity: ActivityId,
}

/// Resolves the daily activity against a local clock.
pub struct ActivityScheduler<C: Clock> {
    clock: C,
}

impl<C: Clock> ActivityScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn todays_activity_id(&self) -> ActivityId {
        activity_for_date(self.clock.today())
    }

    pub fn todays_activity_name(&self) -> &'static str {
        activity_name_for(self.todays_activity_id())
    }

    /// The next `days` days, starting today. Stops early at the end of the
    /// representable calendar.
    pub fn week_ahead(&self, days: u64) -> Vec<PlannedDay> {
        let today = self.clock.today();
        (0..days)
            .map_while(|offset| today.checked_add_days(Days::new(offset)))
            .map(|date| PlannedDay {
                date,
                day_name: DAY_NAMES[date.weekday().num_days_from_sunday() as usize],
                activity: activity_for_date(date),
            })
            .collect()
    }
}
