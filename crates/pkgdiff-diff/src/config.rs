use serde::{Deserialize, Serialize};

/// Lines of unchanged context kept around each change.
pub const DEFAULT_CONTEXT_SIZE: usize = 3;

/// What to do with a container that only exists in the before version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovedContainerPolicy {
    /// Diff every member of the container as an all-deletion change.
    #[default]
    Diff,
    /// Leave the container out of the report.
    Skip,
}

/// Configuration for a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Context lines kept before and after each change in a hunk.
    pub context_size: usize,
    /// Handling of containers removed between versions.
    pub removed_containers: RemovedContainerPolicy,
    /// Compare lines with leading and trailing whitespace trimmed.
    pub ignore_whitespace: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_size: DEFAULT_CONTEXT_SIZE,
            removed_containers: RemovedContainerPolicy::Diff,
            ignore_whitespace: true,
        }
    }
}

impl DiffConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.context_size, 3);
        assert_eq!(c.removed_containers, RemovedContainerPolicy::Diff);
        assert!(c.ignore_whitespace);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = DiffConfig::from_toml("removed_containers = \"skip\"").unwrap();
        assert_eq!(c.removed_containers, RemovedContainerPolicy::Skip);
        assert_eq!(c.context_size, DEFAULT_CONTEXT_SIZE);
    }

    #[test]
    fn full_toml() {
        let c = DiffConfig::from_toml(
            "context_size = 1\nremoved_containers = \"diff\"\nignore_whitespace = false\n",
        )
        .unwrap();
        assert_eq!(c.context_size, 1);
        assert!(!c.ignore_whitespace);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(DiffConfig::from_toml("removed_containers = \"drop\"").is_err());
    }
}
