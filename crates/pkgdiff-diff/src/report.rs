//! The comparison report and its aggregation from member diffs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pkgdiff_types::{ActionKind, Member, Side};

use crate::chunk::Hunk;
use crate::error::DiffError;

/// One changed member and its hunks. Never holds zero hunks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MemberDiffData")]
pub struct MemberDiff {
    action: ActionKind,
    name: String,
    namespace: String,
    side: Side,
    hunks: Vec<Hunk>,
}

impl MemberDiff {
    /// Build a record for `member`, or `None` when `hunks` is empty.
    pub fn new<M: Member + ?Sized>(
        action: ActionKind,
        member: &M,
        side: Side,
        hunks: Vec<Hunk>,
    ) -> Option<Self> {
        if hunks.is_empty() {
            return None;
        }
        Some(Self {
            action,
            name: member.qualified_name().to_owned(),
            namespace: member.namespace().to_owned(),
            side,
            hunks,
        })
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// Qualified member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Version the member was read from: `Before` only for removals.
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    pub fn insertions(&self) -> usize {
        self.hunks.iter().map(Hunk::insertions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.hunks.iter().map(Hunk::deletions).sum()
    }
}

/// Wire form of [`MemberDiff`], checked on the way in.
#[derive(Deserialize)]
struct MemberDiffData {
    action: ActionKind,
    name: String,
    namespace: String,
    side: Side,
    hunks: Vec<Hunk>,
}

impl TryFrom<MemberDiffData> for MemberDiff {
    type Error = DiffError;

    fn try_from(data: MemberDiffData) -> Result<Self, DiffError> {
        if data.hunks.is_empty() {
            return Err(DiffError::InvalidReport(format!(
                "member {} has no hunks",
                data.name
            )));
        }
        Ok(Self {
            action: data.action,
            name: data.name,
            namespace: data.namespace,
            side: data.side,
            hunks: data.hunks,
        })
    }
}

/// All changed members of one namespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceGroup {
    pub namespace: String,
    /// Always `Update`: namespaces are never added or removed as a unit.
    pub action: ActionKind,
    /// Members in traversal order.
    pub members: Vec<MemberDiff>,
}

/// The outcome of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    /// The comparison could not be set up; no groups are produced.
    Failed { message: String },
    /// Namespace groups in ordinal order of their names.
    Compared { namespaces: Vec<NamespaceGroup> },
}

impl Report {
    /// Error report for a target that has no counterpart in the compared
    /// artifact version.
    pub fn unresolved_target(target: &str, artifact: &str, version: &str) -> Self {
        Self::Failed {
            message: format!("Could not find target matching \"{target}\" in {artifact} {version}."),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            Self::Compared { .. } => None,
        }
    }

    /// Namespace groups; empty for an error report.
    pub fn namespaces(&self) -> &[NamespaceGroup] {
        match self {
            Self::Failed { .. } => &[],
            Self::Compared { namespaces } => namespaces,
        }
    }

    /// Total number of changed members across all namespaces.
    pub fn member_count(&self) -> usize {
        self.namespaces().iter().map(|g| g.members.len()).sum()
    }
}

/// Group member diffs by namespace into a report.
///
/// Groups are ordered by byte-wise comparison of the namespace name; members
/// keep their relative input order within a group.
pub fn aggregate(members: Vec<MemberDiff>) -> Report {
    let mut groups: BTreeMap<String, Vec<MemberDiff>> = BTreeMap::new();
    for member in members {
        groups.entry(member.namespace.clone()).or_default().push(member);
    }

    let namespaces = groups
        .into_iter()
        .map(|(namespace, members)| NamespaceGroup {
            namespace,
            action: ActionKind::Update,
            members,
        })
        .collect();

    Report::Compared { namespaces }
}
