//! Course management commands for CLI.

use clap::Subcommand;

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum CourseAction {
    /// Create a new course
    Create {
        /// Course name
        name: String,
    },
    /// List courses with their batches
    List {
        /// Filter by course name substring
        #[arg(long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get course details
    Get {
        /// Course id
        id: String,
    },
    /// Delete a course and all of its batches
    Delete {
        /// Course id
        id: String,
    },
}

pub fn run(action: CourseAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        CourseAction::Create { name } => {
            let course = store.add_course(&name)?;
            println!("Course created: {}", course.id);
            println!("{}", serde_json::to_string_pretty(&course)?);
        }
        CourseAction::List { search, json } => {
            let term = search.unwrap_or_default();
            let hits = store.search_courses(&term);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for course in hits {
                    println!("{}  {}", course.id, course.course_name);
                    let batches = course.batches_by_number_desc();
                    if batches.is_empty() {
                        println!("    (no batches)");
                    }
                    for batch in batches {
                        println!(
                            "    {}  batch {:<4} {} ({} admins)",
                            batch.id,
                            batch.batch_number,
                            batch.status,
                            batch.admin_ids.len()
                        );
                    }
                }
            }
        }
        CourseAction::Get { id } => match store.course(&id) {
            Some(course) => println!("{}", serde_json::to_string_pretty(course)?),
            None => println!("Course not found: {id}"),
        },
        CourseAction::Delete { id } => {
            store.remove_course(&id)?;
            println!("Course deleted (with its batches): {id}");
        }
    }
    Ok(())
}
