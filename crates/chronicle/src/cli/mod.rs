//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use chronicle_changelog::HistoryOptions;
use chronicle_core::config::{load_config_or_default, Config};
use chronicle_git::GitRepo;

use commands::{
    AddCommand, ChangelogCommand, CompletionsCommand, InitCommand, ReleaseCommand,
    StatusCommand, VersionCommand,
};

/// Chronicle - changeset-driven version history and releases
#[derive(Debug, Parser)]
#[command(name = "chronicle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Keep malformed changesets instead of failing
    #[arg(long, global = true, env = "CHRONICLE_IGNORE_ERRORS")]
    pub ignore_errors: bool,

    /// Maximum number of versions in the history
    #[arg(long, global = true, value_name = "N")]
    pub max_versions: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Set up the changeset directory and configuration
    Init(InitCommand),

    /// Record a new changeset
    Add(AddCommand),

    /// Show the pending release and repository state
    Status(StatusCommand),

    /// Show the current or upcoming version
    Version(VersionCommand),

    /// Render the version history
    Changelog(ChangelogCommand),

    /// Tag the upcoming version
    Release(ReleaseCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Add(ref cmd) => cmd.execute(&self),
            Commands::Status(ref cmd) => cmd.execute(&self),
            Commands::Version(ref cmd) => cmd.execute(&self),
            Commands::Changelog(ref cmd) => cmd.execute(&self),
            Commands::Release(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load configuration from `dir` upward and apply flag overrides
    pub fn load_config(&self, dir: &Path) -> anyhow::Result<(Config, Option<PathBuf>)> {
        let (mut config, path) = load_config_or_default(dir)?;
        self.apply_overrides(&mut config);
        Ok((config, path))
    }

    fn apply_overrides(&self, config: &mut Config) {
        if self.ignore_errors {
            config.changeset.ignore_errors = true;
        }
        if let Some(max) = self.max_versions {
            config.changelog.max_versions = max;
        }
        debug!(
            ignore_errors = config.changeset.ignore_errors,
            max_versions = config.changelog.max_versions,
            "effective changeset settings"
        );
    }

    /// Open the repository around the current directory with its configuration
    pub fn workspace(&self) -> anyhow::Result<Workspace> {
        let cwd = std::env::current_dir()?;
        let repo = GitRepo::discover(&cwd)?;
        let root = repo.root()?;
        let (config, config_path) = self.load_config(&cwd)?;
        Ok(Workspace {
            repo,
            root,
            config,
            config_path,
        })
    }
}

/// A repository together with the configuration that applies to it
pub struct Workspace {
    pub repo: GitRepo,
    /// Working tree root; record and output paths are relative to it
    pub root: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl Workspace {
    /// History options for this workspace
    pub fn history_options(&self) -> HistoryOptions {
        HistoryOptions::from_config(&self.config).with_manifest_root(self.root.clone())
    }

    /// Absolute path of the records directory
    pub fn records_dir(&self) -> PathBuf {
        self.root.join(&self.config.changeset.directory)
    }
}
