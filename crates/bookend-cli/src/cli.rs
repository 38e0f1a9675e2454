//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Ranking board selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Board {
    /// Recent-activity weighted board
    Hot,
    /// Boards ordered by number of logged reads
    MostRead,
    /// Bayesian-adjusted average rating board
    TopRated,
}

#[derive(Parser)]
#[command(name = "bookend")]
#[command(author, version, about = "Personal reading log with community rankings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Record store base URL (overrides config)
    #[arg(long, global = true, env = "BOOKEND_STORE_URL")]
    pub store_url: Option<String>,

    /// Bookend service URL for search (overrides config)
    #[arg(long, global = true, env = "BOOKEND_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Session file path (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new account
    Register {
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in and store a session
    Login {
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and remove the stored session
    Logout,

    /// Show the currently logged-in user
    Whoami {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Record a finished book
    Add {
        /// Book title (required unless --query is used)
        #[arg(short, long)]
        title: Option<String>,

        /// Book author (required unless --query is used)
        #[arg(short, long)]
        author: Option<String>,

        /// Look the book up via the search service and pick a result
        #[arg(long, conflicts_with_all = ["title", "author"])]
        query: Option<String>,

        /// Star rating, 1-5
        #[arg(short, long)]
        rating: u8,

        /// Notes about the book
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Date reading started (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        start_date: String,

        /// Date reading finished (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        end_date: String,

        /// Share the record in the community feed
        #[arg(long)]
        public: bool,
    },

    /// List your reading records
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one record in full
    Show {
        /// Record id
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit an existing record
    Edit {
        /// Record id
        id: String,

        /// New star rating, 1-5
        #[arg(short, long)]
        rating: Option<u8>,

        /// New notes
        #[arg(short, long)]
        notes: Option<String>,

        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// New end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// Make the record public
        #[arg(long, conflicts_with = "private")]
        public: bool,

        /// Make the record private
        #[arg(long, conflicts_with = "public")]
        private: bool,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Browse the public community feed
    Community {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the community ranking boards
    Rankings {
        /// Show a single board instead of all three
        #[arg(short, long, value_enum)]
        board: Option<Board>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Search for books via the search service
    Search {
        /// Title or author to search for
        query: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update account settings
    Settings {
        /// Set the profile image URL (fans out to your records)
        #[arg(long)]
        profile_image_url: Option<String>,
    },

    /// Populate the store with demo users and records
    Seed,

    /// Show or update CLI configuration
    Config {
        /// Set the record store base URL
        #[arg(long)]
        store_url: Option<String>,

        /// Set the Bookend service URL (used for search)
        #[arg(long)]
        service_url: Option<String>,
    },
}
