//! Add command

use std::io::IsTerminal;

use chrono::Utc;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Args;
use dialoguer::{Input, Select};
use tracing::info;

use chronicle_changelog::authoring::write_record;
use chronicle_core::error::WorkflowError;
use chronicle_core::Severity;

use crate::cli::{output, Cli, OutputFormat};

/// Record a new changeset
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Version impact of the change
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_parser = PossibleValuesParser::new(["major", "minor", "patch"])
            .try_map(|s| s.parse::<Severity>())
    )]
    pub severity: Option<Severity>,

    /// Description of the change; the first line becomes the file name
    #[arg(short, long)]
    pub summary: Option<String>,

    /// Never prompt; fail when a value is missing
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl AddCommand {
    /// Execute the add command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(severity = ?self.severity, yes = self.yes, "executing add command");
        let ws = cli.workspace()?;

        let interactive = !self.yes && std::io::stdin().is_terminal();
        let severity = match self.severity {
            Some(severity) => severity,
            None if interactive => prompt_severity()?,
            None => return Err(missing("--type").into()),
        };
        let summary = match &self.summary {
            Some(summary) => summary.clone(),
            None if interactive => prompt_summary()?,
            None => return Err(missing("--summary").into()),
        };

        let path = write_record(&ws.records_dir(), severity, &summary, Utc::now())?;

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "path": path.display().to_string(),
                    "type": severity,
                    "summary": summary.trim(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    let shown = path.strip_prefix(&ws.root).unwrap_or(&path);
                    output::success(&format!(
                        "Added {} changeset {}",
                        output::severity_style().apply_to(severity),
                        output::path_style().apply_to(shown.display())
                    ));
                }
            }
        }

        Ok(())
    }
}

fn missing(flag: &str) -> WorkflowError {
    WorkflowError::PreConditionFailed(format!("{} is required when prompting is disabled", flag))
}

fn prompt_severity() -> anyhow::Result<Severity> {
    let choices = [
        (Severity::Patch, "patch - bug fixes"),
        (Severity::Minor, "minor - new features"),
        (Severity::Major, "major - breaking changes"),
    ];
    let labels: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();
    let selection = Select::new()
        .with_prompt("Type of change")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(choices[selection].0)
}

fn prompt_summary() -> anyhow::Result<String> {
    let summary: String = Input::new()
        .with_prompt("Summary")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("summary must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;

    fn parse(args: &[&str]) -> AddCommand {
        match Cli::parse_from(args).command {
            Commands::Add(cmd) => cmd,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_flags() {
        let cmd = parse(&["chronicle", "add", "--type", "minor", "-s", "Add export", "-y"]);
        assert_eq!(cmd.severity, Some(Severity::Minor));
        assert_eq!(cmd.summary.as_deref(), Some("Add export"));
        assert!(cmd.yes);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(Cli::try_parse_from(["chronicle", "add", "--type", "huge"]).is_err());
        assert!(Cli::try_parse_from(["chronicle", "add", "--type", "Major"]).is_err());
    }

    #[test]
    fn test_missing_value_is_a_precondition_failure() {
        let err = missing("--type");
        assert!(err.to_string().contains("--type"));
        assert!(matches!(err, WorkflowError::PreConditionFailed(_)));
    }
}
