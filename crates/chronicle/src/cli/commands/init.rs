//! Init command

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::style;
use dialoguer::{Confirm, Select};
use tracing::{debug, info};

use chronicle_core::config::{
    default_config_toml, load_config, Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML,
    DEFAULT_CONFIG_YAML,
};
use chronicle_core::workflow::scaffold_changeset_dir;
use chronicle_git::GitRepo;

use crate::cli::{output, Cli, OutputFormat};

/// Set up the changeset directory and a configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Overwrite an existing configuration and changeset README
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Configuration file format
    #[arg(long, value_enum)]
    pub config_format: Option<ConfigFormat>,

    /// Configuration file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Yaml => DEFAULT_CONFIG_YAML,
            Self::Toml => DEFAULT_CONFIG_TOML,
        }
    }

    fn default_content(self) -> String {
        match self {
            Self::Yaml => DEFAULT_CONFIG_TEMPLATE.to_string(),
            Self::Toml => default_config_toml(),
        }
    }
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let root = project_root(&cwd);

        let format = self.choose_format()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| root.join(format.file_name()));

        let config = if self.should_write_config(&config_path)? {
            std::fs::write(&config_path, format.default_content())?;
            info!(path = %config_path.display(), "wrote configuration");
            if !cli.quiet && cli.format == OutputFormat::Text {
                output::success(&format!(
                    "Created configuration at {}",
                    output::path_style().apply_to(config_path.display())
                ));
            }
            Config::default()
        } else {
            debug!(path = %config_path.display(), "keeping existing configuration");
            load_config(&config_path)?
        };

        let scaffold = scaffold_changeset_dir(&root, &config, self.force)?;

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "config": config_path.display().to_string(),
                    "created": scaffold.created.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                    "skipped": scaffold.skipped.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    for path in &scaffold.created {
                        output::success(&format!(
                            "Created {}",
                            output::path_style().apply_to(path.display())
                        ));
                    }
                    for path in &scaffold.skipped {
                        output::info(&format!("Kept existing {}", path.display()));
                    }
                    println!();
                    println!("Next steps:");
                    println!("  1. Run {} to record a change", style("chronicle add").cyan());
                    println!(
                        "  2. Run {} to preview the next version",
                        style("chronicle version").cyan()
                    );
                    println!(
                        "  3. Run {} to tag it",
                        style("chronicle release").cyan()
                    );
                }
            }
        }

        Ok(())
    }

    fn choose_format(&self) -> anyhow::Result<ConfigFormat> {
        if let Some(format) = self.config_format {
            return Ok(format);
        }
        if let Some(ext) = self.output.as_deref().and_then(Path::extension) {
            if ext == "toml" {
                return Ok(ConfigFormat::Toml);
            }
            return Ok(ConfigFormat::Yaml);
        }
        if self.yes {
            return Ok(ConfigFormat::Yaml);
        }

        let formats = [ConfigFormat::Yaml, ConfigFormat::Toml];
        let selection = Select::new()
            .with_prompt("Configuration format")
            .items(&["yaml", "toml"])
            .default(0)
            .interact()?;
        Ok(formats[selection])
    }

    /// Whether to (over)write the configuration file
    fn should_write_config(&self, path: &Path) -> anyhow::Result<bool> {
        if !path.exists() || self.force {
            return Ok(true);
        }
        if self.yes {
            return Ok(false);
        }
        Ok(Confirm::new()
            .with_prompt(format!(
                "Configuration file already exists at {}. Overwrite?",
                path.display()
            ))
            .default(false)
            .interact()?)
    }
}

/// Repository working tree containing `dir`, or `dir` itself outside a repository
fn project_root(dir: &Path) -> PathBuf {
    GitRepo::discover(dir)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| dir.to_path_buf())
}
