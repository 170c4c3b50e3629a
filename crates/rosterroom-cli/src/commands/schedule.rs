//! Class schedule commands for CLI.
//!
//! `list` renders entries sorted by next occurrence against a freshly read
//! local clock; `watch` repeats that once per second. Ticks only re-read
//! the clock and re-render -- they never mutate stored state.

use chrono::{Duration, Local, NaiveDateTime};
use clap::Subcommand;
use rosterroom_core::{
    ClassTime, Config, Countdown, JsonFileBackend, Meridiem, ScheduleDraft, ScheduleEntry, Store,
    Weekday,
};

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a recurring weekly class slot
    Add {
        /// Course name
        #[arg(long)]
        course: String,
        /// Class type, e.g. "Live Zoom"
        #[arg(long)]
        class_type: String,
        /// Batch number label
        #[arg(long)]
        batch: String,
        /// Hour on the 12-hour clock, 1-12
        #[arg(long)]
        hour: u32,
        /// Minute: 00, 15, 30 or 45
        #[arg(long)]
        minute: u32,
        /// AM or PM
        #[arg(long)]
        meridiem: String,
        /// Comma-separated weekdays, e.g. "Monday,Wednesday"
        #[arg(long)]
        days: String,
    },
    /// List schedules with live countdowns, soonest first
    List {
        /// Filter by course name or batch number
        #[arg(long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a schedule
    Delete {
        /// Schedule id
        id: String,
    },
    /// Re-render the schedule list every second
    Watch {
        /// Filter by course name or batch number
        #[arg(long)]
        search: Option<String>,
        /// Stop after this many ticks (default: run until interrupted)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

pub fn run(action: ScheduleAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        ScheduleAction::Add {
            course,
            class_type,
            batch,
            hour,
            minute,
            meridiem,
            days,
        } => {
            let meridiem: Meridiem = meridiem.parse()?;
            let mut day_set: Vec<Weekday> = Vec::new();
            for token in days.split(',') {
                day_set.push(token.parse()?);
            }
            let draft = ScheduleDraft {
                course_name: Some(course),
                class_type: Some(class_type),
                batch_number: Some(batch),
                class_time: Some(ClassTime::new(hour, minute, meridiem)),
                days: day_set,
            };
            let entry = store.add_schedule(draft)?;
            println!("Schedule created: {}", entry.id);
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        ScheduleAction::List { search, json } => {
            let now = Local::now().naive_local();
            if json {
                let rows = store.schedules_by_next_occurrence(search.as_deref(), now);
                let entries: Vec<&ScheduleEntry> = rows.iter().map(|(entry, _)| *entry).collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                render_list(&store, search.as_deref(), now, urgent_threshold());
            }
        }
        ScheduleAction::Delete { id } => {
            store.remove_schedule(&id)?;
            println!("Schedule deleted: {id}");
        }
        ScheduleAction::Watch { search, ticks } => {
            let urgent_after = urgent_threshold();
            let mut remaining = ticks;
            loop {
                // Clear screen and re-render against a fresh clock.
                print!("\x1b[2J\x1b[1;1H");
                render_list(&store, search.as_deref(), Local::now().naive_local(), urgent_after);
                if let Some(n) = remaining.as_mut() {
                    if *n <= 1 {
                        break;
                    }
                    *n -= 1;
                }
                std::thread::sleep(std::time::Duration::from_secs(1));
            }
        }
    }
    Ok(())
}

fn urgent_threshold() -> Duration {
    Duration::minutes(Config::load_or_default().schedule.urgent_threshold_minutes as i64)
}

fn render_list(
    store: &Store<JsonFileBackend>,
    search: Option<&str>,
    now: NaiveDateTime,
    urgent_after: Duration,
) {
    let rows = store.schedules_by_next_occurrence(search, now);
    println!("Total schedules: {}", rows.len());
    for (entry, next) in rows {
        let days: Vec<&str> = entry.days.iter().map(|d| d.short()).collect();
        let line = format!(
            "{}  {} [{}] batch {} - {} on {}",
            entry.id,
            entry.course_name,
            entry.class_type,
            entry.batch_number,
            entry.class_time,
            days.join(",")
        );
        match next {
            Some(at) => {
                let countdown = Countdown::between(now, at);
                let marker = if at - now < urgent_after { "  (!)" } else { "" };
                println!("{line} - in {countdown}{marker}");
            }
            // No days selected: nothing upcoming to count down to.
            None => println!("{line} - no upcoming class"),
        }
    }
}
