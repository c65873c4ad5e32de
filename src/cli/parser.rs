use clap::{Parser, Subcommand};

/// Command-line interface definition for TimeDesk
/// Multi-user time tracking with period statistics and account security, on SQLite
#[derive(Parser)]
#[command(
    name = "timedesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work, break and course time per user and audit account security using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or validate the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Validate configuration values")]
        check: bool,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Record a time entry
    Add {
        /// Owner of the entry
        #[arg(long = "user")]
        user: String,

        /// Date of the entry (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        start: String,

        /// End time (HH:MM); earlier than start means past midnight
        end: String,

        #[arg(long = "type", default_value = "work", help = "Entry type: work, break or course")]
        kind: String,

        #[arg(long = "desc", default_value = "", help = "Free-text description")]
        description: String,

        #[arg(long = "edit", help = "Replace entry <ID> instead of adding a new one")]
        edit: Option<i64>,
    },

    /// Delete a time entry by id
    Del {
        /// Entry id
        id: i64,

        /// Acting user (owner or administrator)
        #[arg(long = "user")]
        user: String,
    },

    /// List time entries
    List {
        #[arg(long = "user", help = "Only entries of this user")]
        user: Option<String>,

        #[arg(long = "from", help = "First date (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last date (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(long = "type", help = "Only entries of this type")]
        kind: Option<String>,
    },

    /// Period statistics with target, delta and completion
    Stats {
        #[arg(long = "period", default_value = "week", help = "day, week, month or year")]
        period: String,

        #[arg(long = "date", help = "Reference date (default: today)")]
        date: Option<String>,

        #[arg(long = "user", help = "Restrict to one user")]
        user: Option<String>,

        #[arg(long = "json", help = "Emit the statistics as JSON")]
        json: bool,
    },

    /// Sign in and open a session
    Login {
        #[arg(long = "user")]
        user: String,

        #[arg(long = "password")]
        password: String,

        #[arg(long = "ip", default_value = "127.0.0.1")]
        ip: String,

        #[arg(long = "replace", help = "Session id to discard on success")]
        replace: Option<String>,
    },

    /// Check or close a session
    Session {
        /// Session id
        id: String,

        #[arg(long = "ip", default_value = "127.0.0.1")]
        ip: String,

        #[arg(long = "logout", help = "Close the session instead of checking it")]
        logout: bool,
    },

    /// Password reset tokens
    Reset {
        #[command(subcommand)]
        action: ResetAction,
    },

    /// Security audit views
    Security {
        #[arg(long = "attempts", help = "Show recent login attempts")]
        attempts: bool,

        #[arg(long = "resets", help = "Show recent password reset requests")]
        resets: bool,

        #[arg(long = "limit", default_value_t = 20)]
        limit: i64,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create an account
    Add {
        username: String,

        #[arg(long = "password")]
        password: String,

        #[arg(long = "email")]
        email: Option<String>,

        #[arg(long = "role", default_value = "user", help = "admin or user")]
        role: String,

        #[arg(long = "inactive", help = "Create the account disabled")]
        inactive: bool,
    },

    /// List accounts
    List,

    /// Set a new password
    Passwd {
        username: String,

        #[arg(long = "password")]
        password: String,
    },

    /// Enable or disable an account
    Activate {
        username: String,

        #[arg(long = "off", help = "Disable instead of enable")]
        off: bool,
    },

    /// Delete an account with all its entries
    Del { username: String },
}

#[derive(Subcommand)]
pub enum ResetAction {
    /// Mail a reset link to the account with this address
    Request {
        #[arg(long = "email")]
        email: String,
    },

    /// Issue a token for a user and print the raw secret
    Issue { username: String },

    /// Redeem a token and set a new password
    Redeem {
        #[arg(long = "token")]
        token: String,

        #[arg(long = "password")]
        password: String,
    },
}
