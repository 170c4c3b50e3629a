//! Roster records for trainees and staff.
//!
//! An [`Admin`] carries contact details, verification document images
//! (stored base64-encoded), a star rating and an active/inactive flag.
//! New records are built through [`AdminDraft::finalize`], which enforces
//! required-field presence and nothing more.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminStatus {
    Active,
    Inactive,
}

impl AdminStatus {
    pub fn toggled(self) -> Self {
        match self {
            AdminStatus::Active => AdminStatus::Inactive,
            AdminStatus::Inactive => AdminStatus::Active,
        }
    }
}

impl fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdminStatus::Active => "Active",
            AdminStatus::Inactive => "Inactive",
        })
    }
}

/// A tracked person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    /// Free-text, as entered on the form.
    pub age: String,
    pub gender: String,
    pub address: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    pub batch: String,
    /// `YYYY-MM-DD`.
    pub join_date: String,
    #[serde(default)]
    pub current_trainer: String,
    #[serde(default)]
    pub latest_trainer: String,
    #[serde(default)]
    pub facebook_link: String,
    /// Base64-encoded images.
    #[serde(default)]
    pub documents: Vec<String>,
    /// 0 = unrated, otherwise 1-5 stars.
    #[serde(default)]
    pub rating: u8,
    pub status: AdminStatus,
}

impl Admin {
    /// Set the star rating. Valid ratings are 1..=5; 0 only ever means
    /// "not yet rated" and cannot be assigned explicitly.
    pub fn set_rating(&mut self, stars: u8) -> Result<(), ValidationError> {
        if !(1..=5).contains(&stars) {
            return Err(ValidationError::RatingOutOfRange(stars));
        }
        self.rating = stars;
        Ok(())
    }

    /// Time on the roster as of `today`, or `None` when the join date does
    /// not parse or lies in the future.
    pub fn tenure(&self, today: NaiveDate) -> Option<Tenure> {
        let start = NaiveDate::parse_from_str(&self.join_date, "%Y-%m-%d").ok()?;
        Tenure::between(start, today)
    }
}

/// Whole years and months elapsed between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tenure {
    pub years: u32,
    pub months: u32,
}

impl Tenure {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if end < start {
            return None;
        }
        let mut years = end.year() - start.year();
        let mut months = end.month() as i32 - start.month() as i32;
        // Borrow a year rather than report a negative month count, and
        // don't call it a full year until the day of month comes around.
        if months < 0 || (months == 0 && end.day() < start.day()) {
            years -= 1;
            months += 12;
        }
        Some(Self {
            years: years as u32,
            months: months as u32,
        })
    }
}

impl fmt::Display for Tenure {
    /// `2y 6m`, or `Newly Joined` under one month.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, 0) => f.write_str("Newly Joined"),
            (0, m) => write!(f, "{m}m"),
            (y, 0) => write!(f, "{y}y"),
            (y, m) => write!(f, "{y}y {m}m"),
        }
    }
}

/// Partially filled roster record, finalized once the required fields are
/// present.
#[derive(Debug, Clone, Default)]
pub struct AdminDraft {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub whatsapp: Option<String>,
    pub batch: Option<String>,
    pub join_date: Option<String>,
    pub current_trainer: String,
    pub latest_trainer: String,
    pub facebook_link: String,
}

impl AdminDraft {
    /// Presence validation only; a fresh record starts active, unrated and
    /// without documents.
    pub fn finalize(self) -> Result<Admin, ValidationError> {
        fn required(
            value: Option<String>,
            field: &'static str,
        ) -> Result<String, ValidationError> {
            value
                .filter(|s| !s.trim().is_empty())
                .ok_or(ValidationError::MissingField(field))
        }

        Ok(Admin {
            id: Uuid::new_v4().to_string(),
            name: required(self.name, "name")?,
            age: required(self.age, "age")?,
            gender: required(self.gender, "gender")?,
            address: required(self.address, "address")?,
            mobile: required(self.mobile, "mobile")?,
            whatsapp: self.whatsapp.filter(|s| !s.trim().is_empty()),
            batch: required(self.batch, "batch")?,
            join_date: required(self.join_date, "join_date")?,
            current_trainer: self.current_trainer,
            latest_trainer: self.latest_trainer,
            facebook_link: self.facebook_link,
            documents: Vec::new(),
            rating: 0,
            status: AdminStatus::Active,
        })
    }
}
