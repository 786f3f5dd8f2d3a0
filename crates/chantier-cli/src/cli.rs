use chantier_core::assignment::ReassignPolicy;
use chantier_core::config::StorageKind;
use chantier_core::models::{Coordinate, WorksiteStatus};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Chantier - worksite reporting and dispatch
#[derive(Parser, Debug)]
#[command(name = "chantier")]
#[command(about = "Worksite reporting and dispatch", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory holding the collection files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend to use
    #[arg(long, global = true)]
    pub storage: Option<StorageBackend>,

    /// Config file (defaults to ./chantier.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do when assigning an already assigned worksite
    #[arg(long, global = true)]
    pub reassign: Option<ReassignMode>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StorageBackend {
    /// In-memory storage, discarded on exit
    Memory,
    /// JSON files in the data directory
    Json,
}

impl From<StorageBackend> for StorageKind {
    fn from(backend: StorageBackend) -> Self {
        match backend {
            StorageBackend::Memory => StorageKind::Memory,
            StorageBackend::Json => StorageKind::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReassignMode {
    /// Replace the previous assignee
    Overwrite,
    /// Refuse to reassign
    Reject,
}

impl From<ReassignMode> for ReassignPolicy {
    fn from(mode: ReassignMode) -> Self {
        match mode {
            ReassignMode::Overwrite => ReassignPolicy::Overwrite,
            ReassignMode::Reject => ReassignPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    New,
    Assigned,
}

impl From<StatusFilter> for WorksiteStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::New => WorksiteStatus::New,
            StatusFilter::Assigned => WorksiteStatus::Assigned,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a data directory with empty collection files
    Init(InitArgs),

    /// Report a new worksite
    Report(ReportArgs),

    /// Check whether a worksite already exists near a position
    Check(CheckArgs),

    /// Assign a worksite to a field technician
    Assign(AssignArgs),

    /// List worksites
    Worksites(WorksitesArgs),

    /// List agencies
    Agencies(AgenciesArgs),

    /// List the field staff of an agency
    Staff(StaffArgs),

    /// List a user's notifications, most recent first
    Notifications(NotificationsArgs),

    /// Mark a notification as read
    Read(ReadArgs),

    /// Show store and configuration status
    Status(StatusArgs),

    /// Print a bcrypt hash for a user record's password field
    HashPassword(HashPasswordArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Data directory to create (defaults to the configured data directory)
    pub path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Position as "lat,lon"
    #[arg(allow_hyphen_values = true)]
    pub position: Coordinate,

    /// Free-text description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Reference to an uploaded photo
    #[arg(long)]
    pub photo: Option<String>,

    /// Id of the reporting user
    #[arg(long)]
    pub reporter: String,

    /// Display name of the reporter (looked up when omitted)
    #[arg(long)]
    pub reporter_name: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Position as "lat,lon"
    #[arg(allow_hyphen_values = true)]
    pub position: Coordinate,
}

#[derive(Parser, Debug)]
pub struct AssignArgs {
    /// Worksite id
    pub id: String,

    /// Id of the assignee
    #[arg(long)]
    pub to: String,

    /// Display name of the assignee (looked up when omitted)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Parser, Debug)]
pub struct WorksitesArgs {
    /// Only worksites near "lat,lon", closest first
    #[arg(long, allow_hyphen_values = true, value_name = "LAT,LON", conflicts_with = "agency")]
    pub near: Option<Coordinate>,

    /// Search radius in kilometres for --near
    #[arg(long, requires = "near")]
    pub radius: Option<f64>,

    /// Only worksites routed to this agency
    #[arg(long)]
    pub agency: Option<String>,

    /// Only worksites with this status
    #[arg(long)]
    pub status: Option<StatusFilter>,
}

#[derive(Parser, Debug)]
pub struct AgenciesArgs {
    /// Only agencies near "lat,lon", closest first
    #[arg(long, allow_hyphen_values = true, value_name = "LAT,LON")]
    pub near: Option<Coordinate>,

    /// Search radius in kilometres for --near
    #[arg(long, requires = "near")]
    pub radius: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct StaffArgs {
    /// Agency id
    pub agency: String,
}

#[derive(Parser, Debug)]
pub struct NotificationsArgs {
    /// Recipient user id
    pub user: String,

    /// Only unread notifications
    #[arg(long)]
    pub unread: bool,
}

#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Notification id
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Also show where each configuration value comes from
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Parser, Debug)]
pub struct HashPasswordArgs {
    /// Plain-text password to hash
    pub password: String,
}
