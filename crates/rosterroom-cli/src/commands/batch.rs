//! Batch management commands for CLI.
//!
//! Batches live inside a course, so every action names the course first.

use clap::Subcommand;
use rosterroom_core::{BatchDraft, BatchPatch, BatchStatus};

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum BatchAction {
    /// Add a batch to a course
    Add {
        /// Course id
        course_id: String,
        /// Batch number label, e.g. 20
        #[arg(long)]
        number: String,
        /// Start date, YYYY-MM-DD
        #[arg(long, default_value = "")]
        start_date: String,
        /// Admission date, YYYY-MM-DD
        #[arg(long, default_value = "")]
        admission_date: String,
        #[arg(long, default_value = "")]
        head_teacher: String,
        /// coming-soon, ongoing or ended (default: coming-soon)
        #[arg(long)]
        status: Option<String>,
        /// Comma-separated admin ids to assign
        #[arg(long)]
        admins: Option<String>,
    },
    /// Update a batch
    Update {
        /// Course id
        course_id: String,
        /// Batch id
        batch_id: String,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        admission_date: Option<String>,
        #[arg(long)]
        head_teacher: Option<String>,
        /// coming-soon, ongoing or ended
        #[arg(long)]
        status: Option<String>,
        /// Comma-separated admin ids (replaces the assignment)
        #[arg(long)]
        admins: Option<String>,
    },
    /// Delete a batch from its course
    Delete {
        /// Course id
        course_id: String,
        /// Batch id
        batch_id: String,
    },
    /// Show the roster records assigned to a batch
    Roster {
        /// Course id
        course_id: String,
        /// Batch id
        batch_id: String,
    },
}

fn parse_admin_ids(admins: Option<String>) -> Vec<String> {
    admins
        .map(|list| {
            list.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub fn run(action: BatchAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        BatchAction::Add {
            course_id,
            number,
            start_date,
            admission_date,
            head_teacher,
            status,
            admins,
        } => {
            let status = status.map(|s| s.parse::<BatchStatus>()).transpose()?;
            let draft = BatchDraft {
                batch_number: Some(number),
                start_date,
                admission_date,
                head_teacher,
                status,
                admin_ids: parse_admin_ids(admins),
            };
            let batch = store.add_batch(&course_id, draft)?;
            println!("Batch created: {}", batch.id);
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        BatchAction::Update {
            course_id,
            batch_id,
            number,
            start_date,
            admission_date,
            head_teacher,
            status,
            admins,
        } => {
            let status = status.map(|s| s.parse::<BatchStatus>()).transpose()?;
            let patch = BatchPatch {
                batch_number: number,
                start_date,
                admission_date,
                head_teacher,
                status,
                admin_ids: admins.map(|list| parse_admin_ids(Some(list))),
            };
            let batch = store.update_batch(&course_id, &batch_id, patch)?;
            println!("Batch updated:");
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        BatchAction::Delete {
            course_id,
            batch_id,
        } => {
            store.remove_batch(&course_id, &batch_id)?;
            println!("Batch deleted: {batch_id}");
        }
        BatchAction::Roster {
            course_id,
            batch_id,
        } => {
            let roster = store.batch_roster(&course_id, &batch_id)?;
            if roster.is_empty() {
                println!("No admins assigned");
            }
            for admin in roster {
                println!("{}  {} ({})", admin.id, admin.name, admin.mobile);
            }
        }
    }
    Ok(())
}
