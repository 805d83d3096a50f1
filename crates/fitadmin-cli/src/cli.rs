//! Command-line surface.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fitadmin", version, about = "Admin console for the fitness-matching platform")]
pub struct Cli {
    /// Backend base URL (overrides config and FITADMIN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with a staff account
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored credential
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Platform counters
    Dashboard,
    /// Dashboard plus everything waiting for verification
    Overview,
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Instructors(ProviderCommand),
    #[command(subcommand)]
    Gyms(ProviderCommand),
    #[command(subcommand)]
    Consultations(ConsultationsCommand),
    #[command(subcommand)]
    Matches(MatchesCommand),
    #[command(subcommand)]
    Workouts(WorkoutsCommand),
    #[command(subcommand)]
    Password(PasswordCommand),
    /// Show or toggle the UI theme preference
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List(ListArgs),
    Show { id: String },
    Suspend { id: String },
    Activate { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ProviderCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only entries waiting for verification
        #[arg(long)]
        pending: bool,
    },
    Show { id: String },
    Verify { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ConsultationsCommand {
    List(ListArgs),
    Show { id: String },
    SetStatus { id: String, status: String },
}

#[derive(Debug, Subcommand)]
pub enum MatchesCommand {
    List(ListArgs),
    Show { id: String },
}

#[derive(Debug, Subcommand)]
pub enum WorkoutsCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Workout type filter
        #[arg(long = "type")]
        kind: Option<String>,
    },
    Show { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Change the signed-in account's password
    Change,
    /// Request a reset email
    Forgot { email: String },
    /// Complete a reset with the emailed token
    Reset { token: String },
}
