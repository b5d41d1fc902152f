//! Cleaning options from an optional TOML file plus command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use contract_model::{CleaningOptions, ResolutionPolicy};
use tracing::debug;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub policy: Option<ResolutionPolicy>,
    /// Skip overlap resolution regardless of the file setting.
    pub skip_overlaps: bool,
}

impl OptionOverrides {
    #[must_use]
    pub fn apply(self, mut options: CleaningOptions) -> CleaningOptions {
        if let Some(policy) = self.policy {
            options.policy = policy;
        }
        if self.skip_overlaps {
            options.resolve_overlaps = false;
        }
        options
    }
}

/// Parse options from TOML text. Missing keys take their defaults.
pub fn parse_options(text: &str) -> Result<CleaningOptions> {
    let options: CleaningOptions = toml::from_str(text).context("parse cleaning options")?;
    options.columns.validate().context("validate column names")?;
    Ok(options)
}

/// Load options from `path`, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<CleaningOptions> {
    let Some(path) = path else {
        return Ok(CleaningOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options =
        parse_options(&text).with_context(|| format!("load config {}", path.display()))?;
    debug!(path = %path.display(), policy = ?options.policy, "loaded config");
    Ok(options)
}

/// Resolve the effective options for a run.
pub fn resolve_options(path: Option<&Path>, overrides: OptionOverrides) -> Result<CleaningOptions> {
    Ok(overrides.apply(load_options(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let file = CleaningOptions::default().with_policy(ResolutionPolicy::ExtendAndDrop);
        let overrides = OptionOverrides {
            policy: Some(ResolutionPolicy::ExtendPerGroup),
            skip_overlaps: true,
        };

        let options = overrides.apply(file);

        assert_eq!(options.policy, ResolutionPolicy::ExtendPerGroup);
        assert!(!options.resolve_overlaps);
    }

    #[test]
    fn empty_overrides_keep_file_values() {
        let file = CleaningOptions::default()
            .with_policy(ResolutionPolicy::ExtendAndDrop)
            .with_resolve_overlaps(false);
        assert_eq!(OptionOverrides::default().apply(file.clone()), file);
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let text = "[columns]\nstart_date = \"when\"\nend_date = \"when\"\n";
        let error = parse_options(text).unwrap_err();
        assert!(format!("{error:#}").contains("assigned to both"));
    }

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(load_options(None).unwrap(), CleaningOptions::default());
    }
}
