//! Package snapshots: targets, assemblies, and types.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pkgdiff_types::{Container, Member};

use crate::error::{SdkError, SdkResult};

/// One version of a library package.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub targets: Vec<PackageTarget>,
}

/// The build of a package for one target framework.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTarget {
    /// Framework moniker, e.g. `netstandard2.0`.
    pub moniker: String,
    #[serde(default)]
    pub assemblies: Vec<Assembly>,
}

/// A compiled module; the container level of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub name: String,
    /// Public types in declaration order.
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// A public type; the member level of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub full_name: String,
    /// Explicit namespace. Derived from `full_name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Rendered source. `None` when no rendering is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Package {
    pub fn from_json_str(json: &str) -> SdkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a package snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SdkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Find the target that best matches `moniker`.
    ///
    /// Matching is case-insensitive. An exact moniker wins; otherwise the
    /// same framework family (`netstandard`, `net`, ...) with the highest
    /// version is chosen, comparing dotted version parts numerically. An
    /// empty request selects the first target.
    pub fn find_closest_target(&self, moniker: &str) -> Option<&PackageTarget> {
        let wanted = moniker.trim().to_lowercase();
        if wanted.is_empty() {
            return self.targets.first();
        }

        if let Some(exact) = self
            .targets
            .iter()
            .find(|t| t.moniker.to_lowercase() == wanted)
        {
            return Some(exact);
        }

        let family = framework_family(&wanted);
        self.targets
            .iter()
            .filter(|t| framework_family(&t.moniker) == family)
            .max_by(|a, b| {
                framework_version(&a.moniker)
                    .cmp(&framework_version(&b.moniker))
                    .then_with(|| a.moniker.to_lowercase().cmp(&b.moniker.to_lowercase()))
            })
    }
}

/// Leading alphabetic part of a moniker, lower-cased.
fn framework_family(moniker: &str) -> String {
    moniker
        .trim()
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_lowercase()
}

/// Dotted version after the family prefix, e.g. `[10, 0]` for `net10.0`.
///
/// Each part contributes its leading digits; a part without any counts as 0.
fn framework_version(moniker: &str) -> Vec<u64> {
    let rest = moniker.trim().trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

impl TypeDef {
    pub fn new(full_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            namespace: None,
            source: Some(source.into()),
        }
    }
}

impl Member for TypeDef {
    fn qualified_name(&self) -> &str {
        &self.full_name
    }

    fn namespace(&self) -> &str {
        match &self.namespace {
            Some(ns) => ns,
            None => self
                .full_name
                .rsplit_once('.')
                .map_or("", |(ns, _)| ns),
        }
    }
}

impl Container for Assembly {
    type Member = TypeDef;

    fn name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> &[TypeDef] {
        &self.types
    }
}
