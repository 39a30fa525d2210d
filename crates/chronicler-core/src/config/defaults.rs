//! Default configuration values

use super::types::Config;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "chronicler.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "chronicler.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".chronicler.toml",
        ".chronicler.yaml",
    ]
}

/// Render the default configuration as TOML
pub fn default_config_toml() -> String {
    toml::to_string_pretty(&Config::default())
        .unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r###"# Chronicler configuration

[changelog]
file = "./CHANGES.md"
unreleased_header = "## Unreleased"
version_header = "## [{version}] - {date}"
title = "# Changelog"

[git]
remote = "origin"
branch = "main"
commit_message = "docs: update changelog [skip ci]"
push = true

[github]
api_url = "https://api.github.com"
resolve_pull_requests = true
"###;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(config.changelog.file, defaults.changelog.file);
        assert_eq!(config.changelog.version_header, defaults.changelog.version_header);
        assert_eq!(config.git.commit_message, defaults.git.commit_message);
    }

    #[test]
    fn test_rendered_defaults_round_trip() {
        let rendered = default_config_toml();
        let config: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(config.changelog.unreleased_header, "## Unreleased");
    }
}
