//! Changelog command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use chronicle_changelog::{write_changelog, FormatterRegistry, HistoryAssembler};
use chronicle_core::error::ConfigError;

use crate::cli::{output, Cli};

/// Render the version history
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Write one file per version plus an index instead of printing
    #[arg(short, long)]
    pub write: bool,

    /// Rendering format (markdown, md or json); defaults to the configured one
    #[arg(long = "as", value_name = "FORMAT")]
    pub render_as: Option<String>,

    /// Output directory (defaults to the configured one)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(write = self.write, render_as = ?self.render_as, "executing changelog command");
        let ws = cli.workspace()?;

        let format = self
            .render_as
            .as_deref()
            .unwrap_or(&ws.config.changelog.format);
        let registry = FormatterRegistry::new();
        let formatter = registry
            .for_format(format)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "changelog.format".to_string(),
                message: format!("unknown format '{}'", format),
            })?;

        let history = HistoryAssembler::new(&ws.repo, ws.history_options()).assemble()?;

        if !self.write {
            if history.is_empty() {
                if !cli.quiet {
                    output::info("No versions to show");
                }
                return Ok(());
            }
            println!(
                "{}",
                formatter.format_history(&history, &ws.config.changelog)?
            );
            return Ok(());
        }

        let dir = ws.root.join(
            self.output
                .as_ref()
                .unwrap_or(&ws.config.changelog.output_dir),
        );
        let written = write_changelog(&dir, &history, formatter.as_ref(), &ws.config.changelog)?;

        if !cli.quiet {
            if cli.verbose {
                for path in &written {
                    output::info(&path.display().to_string());
                }
            }
            output::success(&format!(
                "Wrote {} versions to {}",
                history.entries.len(),
                output::path_style().apply_to(dir.display())
            ));
        }

        Ok(())
    }
}
