//! Roster management commands for CLI.

use clap::Subcommand;
use rosterroom_core::{Admin, AdminDraft, AdminStatus};

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Create a new roster record
    Create {
        /// Full name
        name: String,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
        /// Batch label the person belongs to
        #[arg(long)]
        batch: Option<String>,
        /// Join date, YYYY-MM-DD
        #[arg(long)]
        join_date: Option<String>,
        #[arg(long, default_value = "")]
        current_trainer: String,
        #[arg(long, default_value = "")]
        latest_trainer: String,
        #[arg(long, default_value = "")]
        facebook: String,
    },
    /// List records, best-rated first
    List {
        /// Filter by name substring
        #[arg(long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get record details
    Get {
        /// Record id
        id: String,
    },
    /// Update fields of a record
    Update {
        /// Record id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
        #[arg(long)]
        batch: Option<String>,
        #[arg(long)]
        join_date: Option<String>,
        #[arg(long)]
        current_trainer: Option<String>,
        #[arg(long)]
        latest_trainer: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
    },
    /// Delete a record
    Delete {
        /// Record id
        id: String,
    },
    /// Toggle or set the active status
    Status {
        /// Record id
        id: String,
        /// Set explicitly instead of toggling: active or inactive
        #[arg(long)]
        set: Option<String>,
    },
    /// Rate a record, 1-5 stars
    Rate {
        /// Record id
        id: String,
        /// Stars
        stars: u8,
    },
    /// Attach a document image to a record
    Attach {
        /// Record id
        id: String,
        /// Image file to attach
        file: std::path::PathBuf,
    },
    /// Export a record's document images to a directory
    ExportDocs {
        /// Record id
        id: String,
        /// Output directory (default: current directory)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

pub fn run(action: AdminAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        AdminAction::Create {
            name,
            age,
            gender,
            address,
            mobile,
            whatsapp,
            batch,
            join_date,
            current_trainer,
            latest_trainer,
            facebook,
        } => {
            let draft = AdminDraft {
                name: Some(name),
                age,
                gender,
                address,
                mobile,
                whatsapp,
                batch,
                join_date,
                current_trainer,
                latest_trainer,
                facebook_link: facebook,
            };
            let admin = store.add_admin(draft)?;
            println!("Admin created: {}", admin.id);
            println!("{}", serde_json::to_string_pretty(&admin)?);
        }
        AdminAction::List { search, json } => {
            let term = search.unwrap_or_default();
            let hits = store.search_admins(&term);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                println!(
                    "{} admins ({} active, {} inactive)",
                    store.admins().len(),
                    store.active_admin_count(),
                    store.inactive_admin_count()
                );
                let today = chrono::Local::now().date_naive();
                for admin in hits {
                    println!("{}", summary_line(admin, today));
                }
            }
        }
        AdminAction::Get { id } => match store.admin(&id) {
            Some(admin) => println!("{}", serde_json::to_string_pretty(admin)?),
            None => println!("Admin not found: {id}"),
        },
        AdminAction::Update {
            id,
            name,
            age,
            gender,
            address,
            mobile,
            whatsapp,
            batch,
            join_date,
            current_trainer,
            latest_trainer,
            facebook,
        } => {
            let mut admin = store
                .admin(&id)
                .cloned()
                .ok_or(format!("Admin not found: {id}"))?;

            if let Some(v) = name {
                admin.name = v;
            }
            if let Some(v) = age {
                admin.age = v;
            }
            if let Some(v) = gender {
                admin.gender = v;
            }
            if let Some(v) = address {
                admin.address = v;
            }
            if let Some(v) = mobile {
                admin.mobile = v;
            }
            if let Some(v) = whatsapp {
                admin.whatsapp = Some(v);
            }
            if let Some(v) = batch {
                admin.batch = v;
            }
            if let Some(v) = join_date {
                admin.join_date = v;
            }
            if let Some(v) = current_trainer {
                admin.current_trainer = v;
            }
            if let Some(v) = latest_trainer {
                admin.latest_trainer = v;
            }
            if let Some(v) = facebook {
                admin.facebook_link = v;
            }

            store.update_admin(admin.clone())?;
            println!("Admin updated:");
            println!("{}", serde_json::to_string_pretty(&admin)?);
        }
        AdminAction::Delete { id } => {
            store.remove_admin(&id)?;
            println!("Admin deleted: {id}");
        }
        AdminAction::Status { id, set } => {
            let status = match set.as_deref() {
                Some("active") => store.set_admin_status(&id, AdminStatus::Active)?,
                Some("inactive") => store.set_admin_status(&id, AdminStatus::Inactive)?,
                Some(other) => return Err(format!("unknown status: {other}").into()),
                None => store.toggle_admin_status(&id)?,
            };
            println!("Admin {id} is now {status}");
        }
        AdminAction::Rate { id, stars } => {
            store.rate_admin(&id, stars)?;
            println!("Admin {id} rated {stars}/5");
        }
        AdminAction::Attach { id, file } => {
            let bytes = std::fs::read(&file)?;
            let count = store.attach_admin_document(&id, &bytes)?;
            println!("Attached {} ({count} documents total)", file.display());
        }
        AdminAction::ExportDocs { id, out } => {
            let admin = store
                .admin(&id)
                .cloned()
                .ok_or(format!("Admin not found: {id}"))?;
            let dir = out.unwrap_or_else(|| std::path::PathBuf::from("."));
            let documents = store.admin_documents(&id)?;
            if documents.is_empty() {
                println!("No documents for {}", admin.name);
                return Ok(());
            }
            let stem = admin.name.replace(char::is_whitespace, "_");
            for (index, bytes) in documents.iter().enumerate() {
                let path = dir.join(format!("{}_doc_{}.img", stem, index + 1));
                std::fs::write(&path, bytes)?;
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

fn summary_line(admin: &Admin, today: chrono::NaiveDate) -> String {
    let stars = "*".repeat(admin.rating as usize);
    let tenure = admin
        .tenure(today)
        .map(|t| t.to_string())
        .unwrap_or_else(|| "N/A".into());
    format!(
        "{}  {:<24} [{:<5}] batch {:<4} {:<9} joined {} ({})",
        admin.id,
        admin.name,
        stars,
        admin.batch,
        admin.status.to_string(),
        admin.join_date,
        tenure
    )
}
