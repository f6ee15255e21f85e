//! Clap derive structures for the `agency` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.
//! Only depends on clap so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// agency -- browse and administer the agency website from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "agency",
    version,
    about = "Browse and administer the agency website backend",
    long_about = "Lists the public blog, portfolio and services collections with the\n\
        same filtering and paging the website uses, reviews contact messages and\n\
        job applications, and submits the public contact and careers forms.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Site profile to use
    #[arg(long, short = 'p', env = "AGENCY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'b', env = "AGENCY_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Admin bearer token (overrides profile)
    #[arg(long, env = "AGENCY_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AGENCY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates (local development backends)
    #[arg(long, short = 'k', env = "AGENCY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "AGENCY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Blog posts: list by category and page, share links, manage posts
    #[command(alias = "b")]
    Blog(BlogArgs),

    /// Portfolio projects (incremental "load more" listing)
    #[command(alias = "pf")]
    Portfolio(PortfolioArgs),

    /// Service offerings
    #[command(alias = "svc")]
    Services(ServicesArgs),

    /// Review contact messages (admin)
    #[command(alias = "inbox")]
    Contacts(ContactsArgs),

    /// Review job applications (admin)
    #[command(alias = "apps")]
    Applications(ApplicationsArgs),

    /// Send the public contact form
    Contact(ContactFormArgs),

    /// Apply for an open position (public careers form)
    Apply(ApplyArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Filter, search and page selection shared by paged list commands.
#[derive(Debug, Args)]
pub struct PagedListArgs {
    /// Page to show (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Case-insensitive text search, applied after the filter
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BLOG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub command: BlogCommand,
}

#[derive(Debug, Subcommand)]
pub enum BlogCommand {
    /// List posts, one fixed-size page at a time
    #[command(alias = "ls")]
    List {
        /// Category label ("All Posts" for every category)
        #[arg(long, short = 'c')]
        category: Option<String>,

        #[command(flatten)]
        list: PagedListArgs,
    },

    /// Print the shareable address of a filtered blog page
    Url {
        #[arg(long, short = 'c')]
        category: Option<String>,

        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Parse a blog address and list the page it points at
    Open {
        /// Address or query string (e.g. "/blog?category=Branding&page=2")
        address: String,
    },

    /// Show one post by slug or id
    Show {
        /// Post slug or id
        key: String,
    },

    /// Publish a new post (admin)
    Create(BlogPostArgs),

    /// Replace an existing post (admin)
    Update {
        /// Post id
        id: String,

        #[command(flatten)]
        post: BlogPostArgs,
    },

    /// Delete a post (admin)
    #[command(alias = "rm")]
    Delete {
        /// Post id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct BlogPostArgs {
    #[arg(long)]
    pub title: String,

    /// Post body (HTML or plain text)
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the post body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    #[arg(long, short = 'c')]
    pub category: String,

    #[arg(long)]
    pub excerpt: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// Tags (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Reading time in minutes (estimated from the body when omitted)
    #[arg(long)]
    pub read_time: Option<u32>,

    /// Featured image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PORTFOLIO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PortfolioArgs {
    #[command(subcommand)]
    pub command: PortfolioCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortfolioCommand {
    /// List projects; the first batch plus `--more` extra batches
    #[command(alias = "ls")]
    List {
        /// Category label ("All" for every category)
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Number of "load more" steps to apply
        #[arg(long, short = 'm', default_value = "0")]
        more: usize,

        /// Reveal every matching project
        #[arg(long, short = 'a', conflicts_with = "more")]
        all: bool,

        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Print the category options offered by the filter bar
    Categories,

    /// Add a project (admin)
    Create(PortfolioItemArgs),

    /// Replace a project (admin)
    Update {
        /// Project id
        id: String,

        #[command(flatten)]
        item: PortfolioItemArgs,
    },

    /// Delete a project (admin)
    #[command(alias = "rm")]
    Delete {
        /// Project id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct PortfolioItemArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, short = 'c')]
    pub category: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    /// Technologies (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub technologies: Vec<String>,

    /// Live project or case study URL
    #[arg(long)]
    pub link: Option<String>,

    /// Cover image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'c')]
        category: Option<String>,

        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Add a service (admin)
    Create(ServiceArgs),

    /// Replace a service (admin)
    Update {
        /// Service id
        id: String,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Delete a service (admin)
    #[command(alias = "rm")]
    Delete {
        /// Service id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ServiceArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Icon name shown on the services page
    #[arg(long)]
    pub icon: Option<String>,

    /// Feature bullet points (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    #[arg(long)]
    pub image: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTACTS (admin)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContactsArgs {
    #[command(subcommand)]
    pub command: ContactsCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReadStateArg {
    Unread,
    Read,
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List messages, one page at a time
    #[command(alias = "ls")]
    List {
        /// Only messages in this state
        #[arg(long)]
        status: Option<ReadStateArg>,

        #[command(flatten)]
        list: PagedListArgs,
    },

    /// Show one message
    Show {
        /// Message id
        id: String,
    },

    /// Mark a message read (or unread with --unread)
    Mark {
        /// Message id
        id: String,

        #[arg(long)]
        unread: bool,
    },

    /// Delete a message
    #[command(alias = "rm")]
    Delete {
        /// Message id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPLICATIONS (admin)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApplicationsArgs {
    #[command(subcommand)]
    pub command: ApplicationsCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StageArg {
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

#[derive(Debug, Subcommand)]
pub enum ApplicationsCommand {
    /// List applications, one page at a time
    #[command(alias = "ls")]
    List {
        /// Only applications at this stage
        #[arg(long)]
        status: Option<StageArg>,

        #[command(flatten)]
        list: PagedListArgs,
    },

    /// Show one application
    Show {
        /// Application id
        id: String,
    },

    /// Move an application to another stage
    Status {
        /// Application id
        id: String,

        /// New stage
        status: StageArg,
    },

    /// Delete an application
    #[command(alias = "rm")]
    Delete {
        /// Application id
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PUBLIC FORMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ContactFormArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long, short = 'm')]
    pub message: String,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    /// Position applied for
    #[arg(long)]
    pub position: String,

    #[arg(long)]
    pub cover_letter: Option<String>,

    /// Resume file (PDF, DOC, DOCX)
    #[arg(long)]
    pub resume: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (token redacted)
    Show,

    /// Print the config file path
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key (e.g. "backend", "public_url", "blog_page_size")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
