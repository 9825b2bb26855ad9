use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum PolicyKind {
    Exponential,
    Ladder,
}

#[derive(Debug, Parser, Clone)]
#[command(name = "memodeck", version, about = "MemoDeck CLI/API")]
pub struct Cli {
    /// Store file (defaults to app data dir)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Scheduling policy applied when recording reviews
    #[arg(long, value_enum, default_value_t = PolicyKind::Exponential)]
    pub policy: PolicyKind,

    /// Interval cap in days (exponential policy)
    #[arg(long, default_value_t = 90)]
    pub max_days: u32,

    /// Ladder intervals in days (ladder policy)
    #[arg(long, value_delimiter = ',', default_values_t = [1u32, 3, 7, 14, 30])]
    pub ladder: Vec<u32>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Card operations (CLI)
    #[command(subcommand)]
    Card(CardCmd),
    /// Review loop (CLI)
    Review(ReviewCmd),
    /// Collection dashboard
    Stats,
    /// Level and XP profile
    Profile,
    /// Export data (CLI)
    #[command(subcommand)]
    Export(ExportCmd),
    /// Import data (CLI)
    #[command(subcommand)]
    Import(ImportCmd),
    /// Launch Axum HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    List {
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    Show {
        card_id: String,
    },
    Rm {
        card_id: String,
    },
    Edit(CardEdit),
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub question: String,
    #[arg(long)]
    pub answer: String,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CardEdit {
    pub card_id: String,
    #[arg(long)]
    pub question: Option<String>,
    #[arg(long)]
    pub answer: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub clear_source: bool,
    #[arg(long = "add-tag")]
    pub add_tags: Vec<String>,
    #[arg(long = "rm-tag")]
    pub rm_tags: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    /// Type your answer before revealing; it is stored with the review
    #[arg(long)]
    pub typed: bool,
    #[arg(long, default_value_t = 50)]
    pub max: usize,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ExportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf },
}

#[derive(Debug, Subcommand, Clone)]
pub enum ImportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf },
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
