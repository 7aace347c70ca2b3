use clap::{Args, Parser, Subcommand};

use guardtool_dashboard::config::DashboardConfig;

#[derive(Parser)]
#[command(name = "guardtool-dashboard", version, about = "Read-only dashboard for GuardTool scan reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP dashboard server
    Serve(ServeArgs),
    /// Print the report index, newest first
    List(ListArgs),
    /// Build a zip of the most recent reports
    Bundle(BundleArgs),
    /// Validate a configuration file and show the resolved directory
    Validate(ValidateArgs),
}

/// Where reports live. Flags override `GUARDTOOL_ROOT` / `GUARDTOOL_OUTDIR`,
/// which override the config file.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base directory (defaults to the working directory)
    #[arg(long)]
    pub root: Option<String>,

    /// Reports directory, absolute or relative to the root
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Scratch directory for archives (defaults to the system temp dir)
    #[arg(long)]
    pub archive_dir: Option<String>,
}

impl SourceArgs {
    pub fn config_path(&self) -> Option<&std::path::Path> {
        self.config.as_deref().map(std::path::Path::new)
    }

    pub fn layer(&self) -> DashboardConfig {
        DashboardConfig {
            root: self.root.clone(),
            out_dir: self.out_dir.clone(),
            archive_dir: self.archive_dir.clone(),
            ..Default::default()
        }
    }
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Seconds allowed for building one archive
    #[arg(long)]
    pub bundle_timeout: Option<u64>,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum number of reports to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct BundleArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of most recent reports to include (clamped to 1..=2000)
    #[arg(short, long, allow_negative_numbers = true)]
    pub take: Option<i64>,

    /// Copy the archive here instead of leaving it in the temp directory
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
