//! Version tag helpers

use tracing::debug;

use crate::config::Config;

/// Format a version tag based on the configuration
pub fn format_tag(config: &Config, version: &str) -> String {
    let tag = config.versioning.tag_format.replace("{version}", version);
    debug!(version, tag = %tag, "formatted tag");
    tag
}

/// Message used for annotated release tags
pub fn tag_message(version: &str) -> String {
    format!("Release {}", version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag() {
        let config = Config::default();
        let tag = format_tag(&config, "1.0.0");
        assert_eq!(tag, "v1.0.0");
    }

    #[test]
    fn test_format_tag_custom() {
        let mut config = Config::default();
        config.versioning.tag_format = "{version}".to_string();
        assert_eq!(format_tag(&config, "2.1.0-beta.1"), "2.1.0-beta.1");
    }

    #[test]
    fn test_tag_message() {
        assert_eq!(tag_message("1.2.3"), "Release 1.2.3");
    }
}
