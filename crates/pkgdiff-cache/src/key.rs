use std::fmt;

use serde::{Deserialize, Serialize};

use pkgdiff_diff::DiffConfig;

/// Identity of one comparison: artifact, both versions, target, and the
/// diff settings the report was computed with.
///
/// The artifact id and target are matched case-insensitively, so both are
/// stored trimmed and lower-cased. Versions are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonKey {
    pub artifact: String,
    pub version: String,
    pub other_version: String,
    pub target: String,
    pub config: DiffConfig,
}

impl ComparisonKey {
    pub fn new(
        artifact: impl AsRef<str>,
        version: impl Into<String>,
        other_version: impl Into<String>,
        target: impl AsRef<str>,
    ) -> Self {
        Self {
            artifact: normalize(artifact.as_ref()),
            version: version.into(),
            other_version: other_version.into(),
            target: normalize(target.as_ref()),
            config: DiffConfig::default(),
        }
    }

    /// Key the comparison to `config` instead of the default settings.
    pub fn with_config(mut self, config: &DiffConfig) -> Self {
        self.config = config.clone();
        self
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

impl fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..{} [{}]",
            self.artifact, self.other_version, self.version, self.target
        )
    }
}
