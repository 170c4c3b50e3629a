//! Application state container.
//!
//! [`Store`] owns the live [`Document`] and a persistence backend. It loads
//! once on open and writes the whole document back after every mutation,
//! so the on-disk state is never more than one operation behind. Queries
//! never touch the backend.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use tracing::{info, warn};

use super::backend::StorageBackend;
use super::document::Document;
use crate::courses::{Batch, BatchDraft, BatchPatch, Course};
use crate::error::{CoreError, StoreError};
use crate::roster::{Admin, AdminDraft, AdminStatus};
use crate::schedule::occurrence::{cmp_occurrences, next_occurrence};
use crate::schedule::{ScheduleDraft, ScheduleEntry};

pub struct Store<B: StorageBackend> {
    document: Document,
    backend: B,
}

impl<B: StorageBackend> Store<B> {
    /// Load the persisted document, or start from an empty one when nothing
    /// has been saved yet. A corrupt payload also falls back to an empty
    /// document rather than refusing to start.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let document = match backend.load() {
            Ok(Some(document)) => document,
            Ok(None) => Document::default(),
            Err(StoreError::Corrupt(err)) => {
                warn!("stored document is corrupt, starting fresh: {err}");
                Document::default()
            }
            Err(err) => return Err(err),
        };
        Ok(Self { document, backend })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.backend.save(&self.document)
    }

    // ── Roster ───────────────────────────────────────────────────────

    pub fn admins(&self) -> &[Admin] {
        &self.document.admins
    }

    pub fn admin(&self, id: &str) -> Option<&Admin> {
        self.document.admins.iter().find(|a| a.id == id)
    }

    /// Case-insensitive name search, best-rated first (the roster display
    /// order).
    pub fn search_admins(&self, term: &str) -> Vec<&Admin> {
        let needle = term.to_lowercase();
        let mut hits: Vec<&Admin> = self
            .document
            .admins
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| b.rating.cmp(&a.rating));
        hits
    }

    pub fn active_admin_count(&self) -> usize {
        self.document
            .admins
            .iter()
            .filter(|a| a.status == AdminStatus::Active)
            .count()
    }

    pub fn inactive_admin_count(&self) -> usize {
        self.document.admins.len() - self.active_admin_count()
    }

    pub fn add_admin(&mut self, draft: AdminDraft) -> Result<Admin, CoreError> {
        let admin = draft.finalize()?;
        self.document.admins.push(admin.clone());
        self.persist()?;
        Ok(admin)
    }

    /// Replace the record with the same id.
    pub fn update_admin(&mut self, updated: Admin) -> Result<(), CoreError> {
        let slot = self
            .document
            .admins
            .iter_mut()
            .find(|a| a.id == updated.id)
            .ok_or_else(|| StoreError::AdminNotFound(updated.id.clone()))?;
        *slot = updated;
        self.persist()?;
        Ok(())
    }

    pub fn remove_admin(&mut self, id: &str) -> Result<(), CoreError> {
        let before = self.document.admins.len();
        self.document.admins.retain(|a| a.id != id);
        if self.document.admins.len() == before {
            return Err(StoreError::AdminNotFound(id.to_string()).into());
        }
        self.persist()?;
        Ok(())
    }

    pub fn set_admin_status(
        &mut self,
        id: &str,
        status: AdminStatus,
    ) -> Result<AdminStatus, CoreError> {
        let admin = self
            .document
            .admins
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::AdminNotFound(id.to_string()))?;
        admin.status = status;
        self.persist()?;
        Ok(status)
    }

    pub fn toggle_admin_status(&mut self, id: &str) -> Result<AdminStatus, CoreError> {
        let current = self
            .admin(id)
            .ok_or_else(|| StoreError::AdminNotFound(id.to_string()))?
            .status;
        self.set_admin_status(id, current.toggled())
    }

    pub fn rate_admin(&mut self, id: &str, stars: u8) -> Result<(), CoreError> {
        let admin = self
            .document
            .admins
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::AdminNotFound(id.to_string()))?;
        admin.set_rating(stars)?;
        self.persist()?;
        Ok(())
    }

    /// Attach a document image; stored base64-encoded. Returns the new
    /// document count for the record.
    pub fn attach_admin_document(&mut self, id: &str, bytes: &[u8]) -> Result<usize, CoreError> {
        let admin = self
            .document
            .admins
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::AdminNotFound(id.to_string()))?;
        admin.documents.push(BASE64.encode(bytes));
        let count = admin.documents.len();
        self.persist()?;
        Ok(count)
    }

    /// Decode a record's document images back to raw bytes.
    pub fn admin_documents(&self, id: &str) -> Result<Vec<Vec<u8>>, CoreError> {
        let admin = self
            .admin(id)
            .ok_or_else(|| StoreError::AdminNotFound(id.to_string()))?;
        let mut decoded = Vec::with_capacity(admin.documents.len());
        for doc in &admin.documents {
            decoded.push(BASE64.decode(doc)?);
        }
        Ok(decoded)
    }

    // ── Courses & batches ────────────────────────────────────────────

    pub fn courses(&self) -> &[Course] {
        &self.document.courses
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.document.courses.iter().find(|c| c.id == id)
    }

    pub fn search_courses(&self, term: &str) -> Vec<&Course> {
        let needle = term.to_lowercase();
        self.document
            .courses
            .iter()
            .filter(|c| c.course_name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn add_course(&mut self, course_name: &str) -> Result<Course, CoreError> {
        if course_name.trim().is_empty() {
            return Err(crate::error::ValidationError::MissingField("course_name").into());
        }
        let course = Course::new(course_name.trim());
        self.document.courses.push(course.clone());
        self.persist()?;
        Ok(course)
    }

    /// Deleting a course drops all of its batches with it.
    pub fn remove_course(&mut self, id: &str) -> Result<(), CoreError> {
        let before = self.document.courses.len();
        self.document.courses.retain(|c| c.id != id);
        if self.document.courses.len() == before {
            return Err(StoreError::CourseNotFound(id.to_string()).into());
        }
        self.persist()?;
        Ok(())
    }

    /// Replace a course with an updated copy, siblings untouched.
    fn replace_course(&mut self, updated: Course) {
        self.document.courses = self
            .document
            .courses
            .iter()
            .map(|c| if c.id == updated.id { updated.clone() } else { c.clone() })
            .collect();
    }

    pub fn add_batch(&mut self, course_id: &str, draft: BatchDraft) -> Result<Batch, CoreError> {
        let batch = draft.finalize(Utc::now())?;
        let course = self
            .course(course_id)
            .ok_or_else(|| StoreError::CourseNotFound(course_id.to_string()))?;
        let updated = course.with_batch_added(batch.clone());
        self.replace_course(updated);
        self.persist()?;
        Ok(batch)
    }

    pub fn update_batch(
        &mut self,
        course_id: &str,
        batch_id: &str,
        patch: BatchPatch,
    ) -> Result<Batch, CoreError> {
        let course = self
            .course(course_id)
            .ok_or_else(|| StoreError::CourseNotFound(course_id.to_string()))?;
        let batch = course
            .batch(batch_id)
            .ok_or_else(|| StoreError::BatchNotFound(batch_id.to_string()))?;
        let updated_batch = batch.applied(patch);
        let updated = course.with_batch_replaced(updated_batch.clone());
        self.replace_course(updated);
        self.persist()?;
        Ok(updated_batch)
    }

    pub fn remove_batch(&mut self, course_id: &str, batch_id: &str) -> Result<(), CoreError> {
        let course = self
            .course(course_id)
            .ok_or_else(|| StoreError::CourseNotFound(course_id.to_string()))?;
        if course.batch(batch_id).is_none() {
            return Err(StoreError::BatchNotFound(batch_id.to_string()).into());
        }
        let updated = course.without_batch(batch_id);
        self.replace_course(updated);
        self.persist()?;
        Ok(())
    }

    /// Roster records assigned to a batch. Dangling ids (records deleted
    /// after assignment) are skipped, not errors.
    pub fn batch_roster(&self, course_id: &str, batch_id: &str) -> Result<Vec<&Admin>, CoreError> {
        let course = self
            .course(course_id)
            .ok_or_else(|| StoreError::CourseNotFound(course_id.to_string()))?;
        let batch = course
            .batch(batch_id)
            .ok_or_else(|| StoreError::BatchNotFound(batch_id.to_string()))?;
        Ok(batch
            .admin_ids
            .iter()
            .filter_map(|id| self.admin(id))
            .collect())
    }

    // ── Schedules ────────────────────────────────────────────────────

    pub fn schedules(&self) -> &[ScheduleEntry] {
        &self.document.schedules
    }

    pub fn add_schedule(&mut self, draft: ScheduleDraft) -> Result<ScheduleEntry, CoreError> {
        let entry = draft.finalize()?;
        self.document.schedules.push(entry.clone());
        self.persist()?;
        Ok(entry)
    }

    pub fn remove_schedule(&mut self, id: &str) -> Result<(), CoreError> {
        let before = self.document.schedules.len();
        self.document.schedules.retain(|s| s.id != id);
        if self.document.schedules.len() == before {
            return Err(StoreError::ScheduleNotFound(id.to_string()).into());
        }
        self.persist()?;
        Ok(())
    }

    /// Entries matching `term` (course name or batch number, case-insensitive;
    /// `None` matches all), paired with their next occurrence relative to
    /// `now` and sorted soonest-first. Entries with no upcoming occurrence
    /// sink to the bottom.
    pub fn schedules_by_next_occurrence(
        &self,
        term: Option<&str>,
        now: NaiveDateTime,
    ) -> Vec<(&ScheduleEntry, Option<NaiveDateTime>)> {
        let needle = term.map(str::to_lowercase);
        let mut rows: Vec<(&ScheduleEntry, Option<NaiveDateTime>)> = self
            .document
            .schedules
            .iter()
            .filter(|s| match &needle {
                Some(needle) => {
                    s.course_name.to_lowercase().contains(needle)
                        || s.batch_number.to_lowercase().contains(needle)
                }
                None => true,
            })
            .map(|s| (s, next_occurrence(&s.class_time, &s.days, now)))
            .collect();
        rows.sort_by(|a, b| cmp_occurrences(a.1, b.1));
        rows
    }

    // ── Backup & restore ─────────────────────────────────────────────

    /// Write a pretty-printed snapshot of the document to
    /// `<dir>/rosterroom_backup_<date>.json` and return the path.
    pub fn backup_to(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, CoreError> {
        let path = dir.join(format!("rosterroom_backup_{}.json", date.format("%Y-%m-%d")));
        let json = serde_json::to_string_pretty(&self.document)?;
        std::fs::write(&path, json)?;
        info!(path = %path.display(), "document backed up");
        Ok(path)
    }

    /// Replace the whole document with the contents of a backup file.
    /// An unreadable or invalid file leaves the current document untouched.
    pub fn restore_from(&mut self, path: &Path) -> Result<(), CoreError> {
        let content = std::fs::read_to_string(path)?;
        let document: Document =
            serde_json::from_str(&content).map_err(StoreError::Corrupt)?;
        self.document = document;
        self.persist()?;
        info!(path = %path.display(), "document restored");
        Ok(())
    }
}
