//! Status command

use clap::Args;
use console::style;
use tracing::info;

use chronicle_changelog::{HistoryAssembler, UpcomingRelease};
use chronicle_git::SnapshotSource;

use crate::cli::{output, Cli, OutputFormat};

/// Show the pending release and repository state
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    /// Execute the status command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing status command");
        let ws = cli.workspace()?;

        let is_clean = ws.repo.is_clean()?;
        let current_branch = ws.repo.current_branch()?;
        let latest_tag = ws.repo.latest_tag()?;

        let records_present = ws.records_dir().is_dir();
        let assembler = HistoryAssembler::new(&ws.repo, ws.history_options());
        let upcoming = if records_present {
            assembler.upcoming()?
        } else {
            None
        };
        let base_version = assembler.base_version(latest_tag.as_ref());

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "config_path": ws.config_path.as_ref().map(|p| p.display().to_string()),
                    "records_dir": ws.config.changeset.directory.display().to_string(),
                    "records_dir_exists": records_present,
                    "git": {
                        "clean": is_clean,
                        "branch": current_branch,
                        "latest_tag": latest_tag.as_ref().map(|t| &t.name),
                    },
                    "current_version": base_version,
                    "pending": upcoming.as_ref().map(|u| serde_json::json!({
                        "records": u.records.len(),
                        "type": u.severity,
                        "next_version": u.version,
                    })),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                println!("{}", output::header("Chronicle Status"));
                println!();

                println!("{}", style("Configuration").underlined());
                match &ws.config_path {
                    Some(path) => println!(
                        "{}",
                        output::key_value(
                            "Config file",
                            &output::path_style().apply_to(path.display()).to_string()
                        )
                    ),
                    None => println!(
                        "{}",
                        output::key_value(
                            "Config file",
                            &format!("{} (using defaults)", style("not found").yellow())
                        )
                    ),
                }
                let records_dir = ws.config.changeset.directory.display().to_string();
                let records_state = if records_present {
                    output::path_style().apply_to(records_dir).to_string()
                } else {
                    format!(
                        "{} (run {})",
                        style(records_dir).red(),
                        style("chronicle init").cyan()
                    )
                };
                println!("{}", output::key_value("Changesets", &records_state));
                println!();

                println!("{}", style("Git").underlined());
                if let Some(branch) = &current_branch {
                    println!("{}", output::key_value("Branch", branch));
                }
                let clean_status = if is_clean {
                    style("clean").green()
                } else {
                    style("dirty").red()
                };
                println!("{}", output::key_value("Status", &clean_status.to_string()));
                let tag = match &latest_tag {
                    Some(tag) => output::tag_style().apply_to(&tag.name).to_string(),
                    None => style("none").dim().to_string(),
                };
                println!("{}", output::key_value("Latest tag", &tag));
                println!(
                    "{}",
                    output::key_value(
                        "Version",
                        &output::version_style().apply_to(&base_version).to_string()
                    )
                );
                println!();

                println!("{}", style("Pending").underlined());
                print_pending(upcoming.as_ref(), cli.verbose);
            }
        }

        Ok(())
    }
}

fn print_pending(upcoming: Option<&UpcomingRelease>, verbose: bool) {
    let Some(upcoming) = upcoming else {
        println!("  {}", style("No release pending").dim());
        return;
    };

    println!(
        "{}",
        output::key_value("Changesets", &upcoming.records.len().to_string())
    );
    println!(
        "{}",
        output::key_value(
            "Type",
            &output::severity_style().apply_to(upcoming.severity).to_string()
        )
    );
    println!(
        "{}",
        output::key_value(
            "Next version",
            &output::version_style().apply_to(&upcoming.version).to_string()
        )
    );

    if verbose {
        for record in &upcoming.records {
            let severity = record
                .severity
                .map(|s| s.to_string())
                .unwrap_or_else(|| "untyped".to_string());
            println!("    {} {} ({})", style("-").dim(), record.headline(), severity);
        }
    }
}
