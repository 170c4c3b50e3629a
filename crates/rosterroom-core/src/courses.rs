//! Courses and their batches.
//!
//! A two-level tree keyed by id at each level: every [`Course`] owns its
//! [`Batch`] cohorts. Updates locate a node by id and replace it with a
//! copy, leaving siblings untouched; deleting a course cascades to its
//! batches by construction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Lifecycle of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    #[serde(rename = "Coming Soon")]
    ComingSoon,
    Ongoing,
    Ended,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BatchStatus::ComingSoon => "Coming Soon",
            BatchStatus::Ongoing => "Ongoing",
            BatchStatus::Ended => "Ended",
        })
    }
}

impl FromStr for BatchStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coming-soon" | "coming soon" => Ok(BatchStatus::ComingSoon),
            "ongoing" => Ok(BatchStatus::Ongoing),
            "ended" => Ok(BatchStatus::Ended),
            _ => Err(ValidationError::UnknownBatchStatus(s.to_string())),
        }
    }
}

/// A cohort instance of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub batch_number: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub admission_date: String,
    #[serde(default)]
    pub head_teacher: String,
    pub status: BatchStatus,
    /// Ids of roster records assigned to this batch.
    #[serde(default)]
    pub admin_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// Copy with a patch applied; untouched fields carry over.
    pub fn applied(&self, patch: BatchPatch) -> Batch {
        Batch {
            id: self.id.clone(),
            batch_number: patch.batch_number.unwrap_or_else(|| self.batch_number.clone()),
            start_date: patch.start_date.unwrap_or_else(|| self.start_date.clone()),
            admission_date: patch
                .admission_date
                .unwrap_or_else(|| self.admission_date.clone()),
            head_teacher: patch
                .head_teacher
                .unwrap_or_else(|| self.head_teacher.clone()),
            status: patch.status.unwrap_or(self.status),
            admin_ids: patch.admin_ids.unwrap_or_else(|| self.admin_ids.clone()),
            created_at: self.created_at,
        }
    }
}

/// Field-wise update for a batch; `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct BatchPatch {
    pub batch_number: Option<String>,
    pub start_date: Option<String>,
    pub admission_date: Option<String>,
    pub head_teacher: Option<String>,
    pub status: Option<BatchStatus>,
    pub admin_ids: Option<Vec<String>>,
}

/// Partially filled batch; only the batch number is required.
#[derive(Debug, Clone, Default)]
pub struct BatchDraft {
    pub batch_number: Option<String>,
    pub start_date: String,
    pub admission_date: String,
    pub head_teacher: String,
    pub status: Option<BatchStatus>,
    pub admin_ids: Vec<String>,
}

impl BatchDraft {
    pub fn finalize(self, created_at: DateTime<Utc>) -> Result<Batch, ValidationError> {
        let batch_number = self
            .batch_number
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("batch_number"))?;
        Ok(Batch {
            id: Uuid::new_v4().to_string(),
            batch_number,
            start_date: self.start_date,
            admission_date: self.admission_date,
            head_teacher: self.head_teacher,
            status: self.status.unwrap_or(BatchStatus::ComingSoon),
            admin_ids: self.admin_ids,
            created_at,
        })
    }
}

/// A course with its batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub course_name: String,
    #[serde(default)]
    pub batches: Vec<Batch>,
}

impl Course {
    pub fn new(course_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            course_name: course_name.into(),
            batches: Vec::new(),
        }
    }

    pub fn batch(&self, batch_id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == batch_id)
    }

    /// Copy with the batch appended.
    pub fn with_batch_added(&self, batch: Batch) -> Course {
        let mut batches = self.batches.clone();
        batches.push(batch);
        Course {
            id: self.id.clone(),
            course_name: self.course_name.clone(),
            batches,
        }
    }

    /// Copy with the batch of the same id replaced, siblings untouched.
    pub fn with_batch_replaced(&self, updated: Batch) -> Course {
        Course {
            id: self.id.clone(),
            course_name: self.course_name.clone(),
            batches: self
                .batches
                .iter()
                .map(|b| {
                    if b.id == updated.id {
                        updated.clone()
                    } else {
                        b.clone()
                    }
                })
                .collect(),
        }
    }

    /// Copy without the named batch.
    pub fn without_batch(&self, batch_id: &str) -> Course {
        Course {
            id: self.id.clone(),
            course_name: self.course_name.clone(),
            batches: self
                .batches
                .iter()
                .filter(|b| b.id != batch_id)
                .cloned()
                .collect(),
        }
    }

    /// Batches in descending batch-number order, the display order.
    pub fn batches_by_number_desc(&self) -> Vec<&Batch> {
        let mut batches: Vec<&Batch> = self.batches.iter().collect();
        batches.sort_by(|a, b| b.batch_number.cmp(&a.batch_number));
        batches
    }
}
