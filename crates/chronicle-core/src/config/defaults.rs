//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "chronicle.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "chronicle.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".chronicle.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".chronicle.toml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_default()
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Chronicle Configuration

changeset:
  directory: .changeset
  ignore_errors: false

changelog:
  output_dir: changelog
  max_versions: 10
  format: markdown
  include_dates: true

versioning:
  tag_format: "v{version}"

git:
  remote: origin
  require_clean: true
  push_tags: false
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(config.changeset.directory, defaults.changeset.directory);
        assert_eq!(config.changelog.max_versions, defaults.changelog.max_versions);
        assert_eq!(config.versioning.tag_format, defaults.versioning.tag_format);
    }

    #[test]
    fn test_default_toml_is_not_empty() {
        assert!(default_config_toml().contains("max_versions"));
    }
}
