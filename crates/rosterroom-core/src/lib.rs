//! # Rosterroom Core Library
//!
//! This library provides the core business logic for Rosterroom, a roster
//! and class-schedule manager for a small training organization. It
//! implements a CLI-first philosophy: every operation is available through
//! the standalone CLI binary, which is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Roster**: trainee/staff records with contact info, document images,
//!   ratings and an active flag
//! - **Courses**: courses with nested batch cohorts, updated by
//!   locate-and-replace on id
//! - **Schedule**: recurring weekly class slots and the next-occurrence
//!   engine; the caller injects "now", nothing here reads the clock
//! - **Storage**: a single JSON document behind a pluggable backend,
//!   persisted after every change, plus TOML configuration
//!
//! ## Key Components
//!
//! - [`Store`]: state container over the persisted document
//! - [`next_occurrence`]: nearest future instant a weekly schedule fires
//! - [`Countdown`]: remaining-time breakdown for display
//! - [`Config`]: application configuration management

pub mod courses;
pub mod error;
pub mod roster;
pub mod schedule;
pub mod storage;

pub use courses::{Batch, BatchDraft, BatchPatch, BatchStatus, Course};
pub use error::{ConfigError, CoreError, StoreError, TimeParseError, ValidationError};
pub use roster::{Admin, AdminDraft, AdminStatus, Tenure};
pub use schedule::occurrence::{cmp_occurrences, next_occurrence, Countdown};
pub use schedule::{ClassTime, Meridiem, ScheduleDraft, ScheduleEntry, Weekday};
pub use storage::{Config, Document, JsonFileBackend, MemoryBackend, StorageBackend, Store};
