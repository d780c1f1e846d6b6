//! Release command

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::{info, warn};

use chronicle_changelog::HistoryAssembler;
use chronicle_core::error::{GitError, WorkflowError};
use chronicle_core::workflow::{format_tag, tag_message, validate_release};
use chronicle_git::git_push_tag;

use crate::cli::{output, Cli, OutputFormat, Workspace};

/// Tag the upcoming version
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Dry run - don't make any changes
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Don't push the tag even when `git.push_tags` is set
    #[arg(long)]
    pub no_push: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            dry_run = self.dry_run,
            yes = self.yes,
            no_push = self.no_push,
            "executing release command"
        );
        let ws = cli.workspace()?;

        if ws.config_path.is_none() && !cli.quiet && cli.format == OutputFormat::Text {
            output::warning(&format!(
                "No configuration found, using defaults. Run {} to create one.",
                style("chronicle init").cyan()
            ));
        }

        let Some(upcoming) = HistoryAssembler::new(&ws.repo, ws.history_options()).upcoming()?
        else {
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "released": null })),
                OutputFormat::Text => {
                    if !cli.quiet {
                        println!("{}", style("No release pending - no new changesets.").yellow());
                    }
                }
            }
            return Ok(());
        };

        let tag = format_tag(&ws.config, &upcoming.version);

        if !self.dry_run {
            let is_clean = ws.repo.is_clean()?;
            let tag_exists = ws.repo.find_tag(&tag)?.is_some();
            let validation = validate_release(&ws.config, is_clean, tag_exists)?;
            for warning in &validation.warnings {
                output::warning(warning);
            }
        }

        if !cli.quiet && cli.format == OutputFormat::Text {
            println!("{}", output::header("Release Preview"));
            println!();
            println!(
                "{}",
                output::key_value("Current", &style(&upcoming.base_version).cyan().to_string())
            );
            println!(
                "{}",
                output::key_value(
                    "Next",
                    &output::version_style().apply_to(&upcoming.version).to_string()
                )
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
                output::key_value("Tag", &output::tag_style().apply_to(&tag).to_string())
            );
            println!();
            for record in &upcoming.records {
                println!("  {} {}", style("-").dim(), record.headline());
            }
            println!();

            if self.dry_run {
                println!("  {}", style("[DRY RUN - no changes will be made]").yellow().bold());
                println!();
            }
        }

        if !self.yes && !self.dry_run {
            let confirmed = Confirm::new()
                .with_prompt("Proceed with release?")
                .default(true)
                .interact()?;

            if !confirmed {
                return Err(WorkflowError::Cancelled.into());
            }
        }

        let mut pushed = false;
        if !self.dry_run {
            ws.repo
                .create_tag(&tag, Some(&tag_message(&upcoming.version)))?;
            if !cli.quiet && cli.format == OutputFormat::Text {
                output::success(&format!(
                    "Created tag {}",
                    output::tag_style().apply_to(&tag)
                ));
            }

            if ws.config.git.push_tags && !self.no_push {
                pushed = push_tag(&ws, &tag, cli);
            }
        }

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "released": upcoming.version,
                    "previous": upcoming.base_version,
                    "type": upcoming.severity,
                    "tag": tag,
                    "changesets": upcoming.records.len(),
                    "dry_run": self.dry_run,
                    "pushed": pushed,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!();
                    if self.dry_run {
                        output::success(&format!(
                            "Dry run complete. Version {} would be released.",
                            output::version_style().apply_to(&upcoming.version)
                        ));
                    } else {
                        output::success(&format!(
                            "Released version {}",
                            output::version_style().apply_to(&upcoming.version)
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Push `tag` to the configured remote; failures only warn since the tag exists locally
fn push_tag(ws: &Workspace, tag: &str, cli: &Cli) -> bool {
    let remote = &ws.config.git.remote;
    let failure = match ws.repo.has_remote(remote) {
        Ok(true) => push_failure(ws, remote, tag),
        Ok(false) => Some(GitError::PushFailed(format!("no remote named '{}'", remote))),
        Err(e) => Some(e),
    };

    match failure {
        None => {
            if !cli.quiet && cli.format == OutputFormat::Text {
                output::success(&format!("Pushed {} to {}", tag, remote));
            }
            true
        }
        Some(err) => {
            warn!(remote = %remote, tag, error = %err, "tag push failed");
            output::warning(&format!(
                "{}. To retry, run: {}",
                err,
                style(format!("git push {} {}", remote, tag)).cyan()
            ));
            false
        }
    }
}

fn push_failure(ws: &Workspace, remote: &str, tag: &str) -> Option<GitError> {
    match git_push_tag(&ws.root, remote, tag) {
        Ok(out) if out.status.success() => None,
        Ok(out) => Some(GitError::PushFailed(
            String::from_utf8_lossy(&out.stderr).trim().to_string(),
        )),
        Err(e) => Some(GitError::PushFailed(e.to_string())),
    }
}
