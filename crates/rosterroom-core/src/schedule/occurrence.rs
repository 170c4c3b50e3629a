//! Next-occurrence engine for recurring weekly schedules.
//!
//! The engine is a pure function of its inputs: the caller supplies `now`
//! (it is never read internally), which keeps every computation
//! deterministic and testable. All arithmetic happens in one implicit local
//! timezone; no UTC conversion takes place here.

use std::cmp::Ordering;

use chrono::{Datelike, Duration, NaiveDateTime};
use serde::Serialize;

use super::{ClassTime, Weekday};

/// Nearest future instant at which a weekly schedule fires, relative to
/// `now`.
///
/// Returns `None` when `days` is empty -- the "never" sentinel. Callers must
/// sort `None` after every defined instant (see [`cmp_occurrences`]) and
/// suppress countdown display for it.
///
/// For each candidate day the target instant is today's date at the class
/// time (seconds zeroed), advanced by the Sunday-indexed day delta; a
/// same-day target that is strictly before `now` rolls a full week. The
/// boundary instant itself is still "today, happening now"; one tick later
/// it flips to next week, which is accepted jitter rather than a bug.
pub fn next_occurrence(
    time: &ClassTime,
    days: &[Weekday],
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let hour = time.hour24();
    let minute = time.minute;
    let now_weekday = now.weekday().num_days_from_sunday() as i64;

    days.iter()
        .filter_map(|day| {
            let today_at = now.date().and_hms_opt(hour, minute, 0)?;
            let mut day_delta =
                (day.calendar_offset() as i64 - now_weekday + 7) % 7;
            if day_delta == 0 && today_at < now {
                day_delta = 7;
            }
            today_at.checked_add_signed(Duration::days(day_delta))
        })
        .min()
}

/// Ascending order over next occurrences with "never" sinking to the bottom.
pub fn cmp_occurrences(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Remaining time until a target instant, decomposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Decompose the millisecond difference `target - now` by integer
    /// division, each unit modulo the next larger one.
    pub fn between(now: NaiveDateTime, target: NaiveDateTime) -> Self {
        let ms = (target - now).num_milliseconds();
        Self {
            days: ms / 86_400_000,
            hours: (ms / 3_600_000) % 24,
            minutes: (ms / 60_000) % 60,
            seconds: (ms / 1_000) % 60,
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::schedule::{Meridiem, ScheduleDraft};
    use chrono::{NaiveDate, Timelike};
    use proptest::prelude::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn time(s: &str) -> ClassTime {
        s.parse().unwrap()
    }

    // 2024-01-01 is a Monday.

    #[test]
    fn wednesday_morning_to_monday_evening() {
        let now = dt(2024, 1, 3, 10, 0, 0); // Wednesday
        let next = next_occurrence(&time("08:30 PM"), &[Weekday::Monday], now).unwrap();
        assert_eq!(next, dt(2024, 1, 8, 20, 30, 0));
        let countdown = Countdown::between(now, next);
        assert_eq!(
            countdown,
            Countdown {
                days: 5,
                hours: 10,
                minutes: 30,
                seconds: 0
            }
        );
    }

    #[test]
    fn same_day_still_ahead_stays_today() {
        let now = dt(2024, 1, 1, 8, 0, 0); // Monday 08:00
        let next = next_occurrence(&time("09:00 AM"), &[Weekday::Monday], now).unwrap();
        assert_eq!(next, dt(2024, 1, 1, 9, 0, 0));
    }

    #[test]
    fn same_day_already_passed_rolls_seven_days() {
        let now = dt(2024, 1, 1, 10, 0, 0); // Monday 10:00
        let next = next_occurrence(&time("09:00 AM"), &[Weekday::Monday], now).unwrap();
        assert_eq!(next, dt(2024, 1, 8, 9, 0, 0));
    }

    #[test]
    fn exact_target_instant_is_not_bumped() {
        let now = dt(2024, 1, 1, 9, 0, 0);
        let next = next_occurrence(&time("09:00 AM"), &[Weekday::Monday], now).unwrap();
        assert_eq!(next, now);
    }

    #[test]
    fn one_second_past_target_rolls_to_next_week() {
        let now = dt(2024, 1, 1, 9, 0, 1);
        let next = next_occurrence(&time("09:00 AM"), &[Weekday::Monday], now).unwrap();
        assert_eq!(next, dt(2024, 1, 8, 9, 0, 0));
    }

    #[test]
    fn multi_day_set_picks_nearest_session() {
        let now = dt(2024, 1, 2, 12, 0, 0); // Tuesday
        let next = next_occurrence(
            &time("09:00 AM"),
            &[Weekday::Monday, Weekday::Friday],
            now,
        )
        .unwrap();
        // Friday of this week beats Monday of next week.
        assert_eq!(next, dt(2024, 1, 5, 9, 0, 0));
    }

    #[test]
    fn multi_day_equals_minimum_of_singletons() {
        let now = dt(2024, 1, 4, 18, 45, 30); // Thursday
        let t = time("07:15 PM");
        let days = [Weekday::Monday, Weekday::Thursday, Weekday::Sunday];
        let combined = next_occurrence(&t, &days, now);
        let singleton_min = days
            .iter()
            .filter_map(|d| next_occurrence(&t, &[*d], now))
            .min();
        assert_eq!(combined, singleton_min);
    }

    #[test]
    fn empty_day_set_yields_never() {
        let now = dt(2024, 1, 3, 10, 0, 0);
        assert_eq!(next_occurrence(&time("08:30 PM"), &[], now), None);
    }

    #[test]
    fn midnight_class_normalizes_to_hour_zero() {
        let now = dt(2024, 1, 1, 1, 0, 0); // Monday 01:00
        let next = next_occurrence(&time("12:30 AM"), &[Weekday::Monday], now).unwrap();
        // 00:30 has already passed today.
        assert_eq!(next, dt(2024, 1, 8, 0, 30, 0));
    }

    #[test]
    fn day_advance_rolls_over_month_boundary() {
        let now = dt(2024, 1, 31, 12, 0, 0); // Wednesday, last day of January
        let next = next_occurrence(&time("09:00 AM"), &[Weekday::Tuesday], now).unwrap();
        assert_eq!(next, dt(2024, 2, 6, 9, 0, 0));
    }

    #[test]
    fn day_advance_rolls_over_year_boundary() {
        let now = dt(2024, 12, 31, 12, 0, 0); // Tuesday, last day of 2024
        let next = next_occurrence(&time("09:00 AM"), &[Weekday::Friday], now).unwrap();
        assert_eq!(next, dt(2025, 1, 3, 9, 0, 0));
    }

    #[test]
    fn calling_twice_yields_identical_output() {
        let now = dt(2024, 6, 15, 23, 59, 59);
        let days = [Weekday::Saturday, Weekday::Sunday];
        let t = time("11:45 PM");
        assert_eq!(
            next_occurrence(&t, &days, now),
            next_occurrence(&t, &days, now)
        );
    }

    #[test]
    fn never_sorts_after_every_defined_instant() {
        let some = Some(dt(2024, 1, 1, 0, 0, 0));
        assert_eq!(cmp_occurrences(some, None), Ordering::Less);
        assert_eq!(cmp_occurrences(None, some), Ordering::Greater);
        assert_eq!(cmp_occurrences(None, None), Ordering::Equal);

        let mut items = vec![None, Some(dt(2024, 1, 2, 9, 0, 0)), Some(dt(2024, 1, 1, 9, 0, 0))];
        items.sort_by(|a, b| cmp_occurrences(*a, *b));
        assert_eq!(
            items,
            vec![
                Some(dt(2024, 1, 1, 9, 0, 0)),
                Some(dt(2024, 1, 2, 9, 0, 0)),
                None
            ]
        );
    }

    #[test]
    fn degenerate_stored_hour_degrades_to_never() {
        // A stored time that never went through the entry form; the draft
        // would have rejected it, the engine just has no candidate for it.
        let weird = ClassTime::new(25, 0, Meridiem::Pm);
        let now = dt(2024, 1, 1, 8, 0, 0);
        assert_eq!(next_occurrence(&weird, &[Weekday::Monday], now), None);
    }

    #[test]
    fn countdown_display_hides_zero_days() {
        let now = dt(2024, 1, 1, 8, 0, 0);
        let soon = Countdown::between(now, dt(2024, 1, 1, 10, 5, 9));
        assert_eq!(soon.to_string(), "2h 5m 9s");
        let far = Countdown::between(now, dt(2024, 1, 3, 9, 0, 0));
        assert_eq!(far.to_string(), "2d 1h 0m 0s");
    }

    #[test]
    fn draft_and_engine_agree_on_empty_days() {
        // The draft refuses to produce an entry the engine would treat as
        // "never".
        let draft = ScheduleDraft {
            course_name: Some("IELTS".into()),
            class_type: Some("Live".into()),
            batch_number: Some("3".into()),
            class_time: Some(time("08:30 PM")),
            days: vec![],
        };
        assert_eq!(draft.finalize().unwrap_err(), ValidationError::NoDaysSelected);
    }

    fn class_time_strategy() -> impl Strategy<Value = ClassTime> {
        (
            1u32..=12,
            prop::sample::select(vec![0u32, 15, 30, 45]),
            prop::bool::ANY,
        )
            .prop_map(|(hour, minute, pm)| {
                ClassTime::new(hour, minute, if pm { Meridiem::Pm } else { Meridiem::Am })
            })
    }

    fn day_set_strategy() -> impl Strategy<Value = Vec<Weekday>> {
        prop::collection::vec(0usize..7, 1..=7).prop_map(|indices| {
            let mut days = Vec::new();
            for i in indices {
                let day = Weekday::ALL[i];
                if !days.contains(&day) {
                    days.push(day);
                }
            }
            days
        })
    }

    fn now_strategy() -> impl Strategy<Value = NaiveDateTime> {
        (0i64..730, 0i64..86_400).prop_map(|(day, second)| {
            dt(2024, 1, 1, 0, 0, 0) + Duration::days(day) + Duration::seconds(second)
        })
    }

    proptest! {
        #[test]
        fn result_is_never_in_the_past(
            t in class_time_strategy(),
            days in day_set_strategy(),
            now in now_strategy(),
        ) {
            let next = next_occurrence(&t, &days, now).unwrap();
            prop_assert!(next >= now);
            // And never more than a week out.
            prop_assert!(next < now + Duration::days(8));
        }

        #[test]
        fn result_weekday_is_in_the_requested_set(
            t in class_time_strategy(),
            days in day_set_strategy(),
            now in now_strategy(),
        ) {
            let next = next_occurrence(&t, &days, now).unwrap();
            let hit = next.weekday().num_days_from_sunday();
            prop_assert!(days.iter().any(|d| d.calendar_offset() == hit));
            prop_assert_eq!(next.time().hour(), t.hour24());
            prop_assert_eq!(next.time().minute(), t.minute);
            prop_assert_eq!(next.time().second(), 0);
        }

        #[test]
        fn combined_set_matches_per_day_minimum(
            t in class_time_strategy(),
            days in day_set_strategy(),
            now in now_strategy(),
        ) {
            let combined = next_occurrence(&t, &days, now);
            let singleton_min = days
                .iter()
                .filter_map(|d| next_occurrence(&t, &[*d], now))
                .min();
            prop_assert_eq!(combined, singleton_min);
        }
    }
}
