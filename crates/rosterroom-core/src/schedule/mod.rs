//! Recurring class schedule types.
//!
//! A [`ScheduleEntry`] is a weekly class slot: a course label, a 12-hour
//! wall-clock time and the set of weekdays it recurs on. Entries are created
//! through [`ScheduleDraft::finalize`] and deleted; there is no in-place edit.

pub mod occurrence;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{TimeParseError, ValidationError};

/// Calendar weekday, declared in the canonical Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based offset within a Monday-first week (Monday=0 .. Sunday=6).
    pub fn monday_offset(self) -> u32 {
        self as u32
    }

    /// Offset under Sunday-first calendar indexing (Sunday=0 .. Saturday=6).
    pub fn calendar_offset(self) -> u32 {
        (self.monday_offset() + 1) % 7
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Three-letter abbreviation for compact list rendering.
    pub fn short(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Weekday::ALL
            .iter()
            .copied()
            .find(|d| token.eq_ignore_ascii_case(d.name()) || token.eq_ignore_ascii_case(d.short()))
            .ok_or_else(|| ValidationError::UnknownWeekday(s.to_string()))
    }
}

/// Meridiem indicator of a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        })
    }
}

impl FromStr for Meridiem {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("AM") {
            Ok(Meridiem::Am)
        } else if s.eq_ignore_ascii_case("PM") {
            Ok(Meridiem::Pm)
        } else {
            Err(TimeParseError::BadMeridiem(s.to_string()))
        }
    }
}

/// Wall-clock time-of-day in 12-hour form, e.g. `08:30 PM`.
///
/// The entry form restricts hour to 1..=12 and minute to the quarter-hour
/// grid; stored values are not re-validated on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassTime {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl ClassTime {
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Self {
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    /// Normalized 24-hour hour value: PM adds 12 to hours below 12, and
    /// 12 AM is midnight.
    pub fn hour24(&self) -> u32 {
        match self.meridiem {
            Meridiem::Pm if self.hour < 12 => self.hour + 12,
            Meridiem::Am if self.hour == 12 => 0,
            _ => self.hour,
        }
    }
}

impl fmt::Display for ClassTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

impl FromStr for ClassTime {
    type Err = TimeParseError;

    /// Splits on the first space into time and meridiem, then on `:` into
    /// hour and minute. Anything else fails loudly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (time, meridiem) = s
            .split_once(' ')
            .ok_or_else(|| TimeParseError::MissingMeridiem(s.to_string()))?;
        let (hour, minute) = time
            .split_once(':')
            .ok_or_else(|| TimeParseError::MissingMinute(s.to_string()))?;
        let hour: u32 = hour
            .trim()
            .parse()
            .map_err(|_| TimeParseError::NotNumeric(s.to_string()))?;
        let minute: u32 = minute
            .trim()
            .parse()
            .map_err(|_| TimeParseError::NotNumeric(s.to_string()))?;
        let meridiem = meridiem.trim().parse()?;
        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }
}

// Serialized as its display string so the document keeps the `"08:30 PM"`
// form on disk.
impl Serialize for ClassTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClassTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A recurring weekly class slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: String,
    pub course_name: String,
    pub class_type: String,
    pub batch_number: String,
    pub class_time: ClassTime,
    /// Weekday set, insertion order preserved.
    pub days: Vec<Weekday>,
}

/// Partially filled schedule entry, finalized once all required fields are
/// present and the entry-form policy holds.
#[derive(Debug, Clone, Default)]
pub struct ScheduleDraft {
    pub course_name: Option<String>,
    pub class_type: Option<String>,
    pub batch_number: Option<String>,
    pub class_time: Option<ClassTime>,
    pub days: Vec<Weekday>,
}

impl ScheduleDraft {
    /// Enforce required-field presence and the entry-form policy
    /// (hour 1..=12, minute on the quarter-hour grid, at least one day),
    /// then construct the immutable entry.
    pub fn finalize(self) -> Result<ScheduleEntry, ValidationError> {
        let course_name = self
            .course_name
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("course_name"))?;
        let class_type = self
            .class_type
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("class_type"))?;
        let batch_number = self
            .batch_number
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("batch_number"))?;
        let class_time = self
            .class_time
            .ok_or(ValidationError::MissingField("class_time"))?;

        if !(1..=12).contains(&class_time.hour) {
            return Err(ValidationError::HourOutOfRange(class_time.hour));
        }
        if !matches!(class_time.minute, 0 | 15 | 30 | 45) {
            return Err(ValidationError::MinuteNotOnGrid(class_time.minute));
        }

        // Dedupe while keeping insertion order.
        let mut days: Vec<Weekday> = Vec::with_capacity(self.days.len());
        for day in self.days {
            if !days.contains(&day) {
                days.push(day);
            }
        }
        if days.is_empty() {
            return Err(ValidationError::NoDaysSelected);
        }

        Ok(ScheduleEntry {
            id: Uuid::new_v4().to_string(),
            course_name,
            class_type,
            batch_number,
            class_time,
            days,
        })
    }
}
