//! Version command

use clap::Args;
use console::style;
use tracing::info;

use chronicle_changelog::{HistoryAssembler, UpcomingRelease};
use chronicle_git::SnapshotSource;

use crate::cli::{output, Cli, OutputFormat};

/// Show the current or upcoming version
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Show the version the next bump applies to
    #[arg(long)]
    pub current: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(current = self.current, "executing version command");
        let ws = cli.workspace()?;
        let assembler = HistoryAssembler::new(&ws.repo, ws.history_options());

        if self.current {
            let latest = ws.repo.latest_tag()?;
            let version = assembler.base_version(latest.as_ref());
            return output_current(&version, cli);
        }

        let upcoming = assembler.upcoming()?;
        output_upcoming(upcoming.as_ref(), cli)
    }
}

fn output_current(version: &str, cli: &Cli) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "current": version });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => println!("{}", version),
    }
    Ok(())
}

fn output_upcoming(upcoming: Option<&UpcomingRelease>, cli: &Cli) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let out = match upcoming {
                Some(u) => serde_json::json!({
                    "current": u.base_version,
                    "next": u.version,
                    "type": u.severity,
                    "changesets": u.records.len(),
                }),
                None => serde_json::json!({ "next": null }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => match upcoming {
            None => {
                if !cli.quiet {
                    println!("{}", style("No release pending").yellow());
                }
            }
            Some(u) if cli.quiet => println!("{}", u.version),
            Some(u) => {
                println!("{}", output::header("Next Version"));
                println!();
                println!(
                    "{}",
                    output::key_value("Current", &style(&u.base_version).cyan().to_string())
                );
                println!(
                    "{}",
                    output::key_value(
                        "Next",
                        &output::version_style().apply_to(&u.version).to_string()
                    )
                );
                println!(
                    "{}",
                    output::key_value(
                        "Type",
                        &output::severity_style().apply_to(u.severity).to_string()
                    )
                );
                println!(
                    "{}",
                    output::key_value("Changesets", &u.records.len().to_string())
                );
            }
        },
    }
    Ok(())
}
