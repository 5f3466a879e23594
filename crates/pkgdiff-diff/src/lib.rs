//! Diff engine for pkgdiff.
//!
//! Compares two versions of an artifact that decomposes into containers and
//! members. Containers are matched by name, then the members of every
//! matched, added, or removed container are matched by qualified name and
//! their rendered texts compared line by line. Each member's line diff is
//! compressed into context-bounded hunks, members without hunks are dropped,
//! and the survivors are grouped by namespace into a [`Report`].
//!
//! The engine is synchronous and pure: given the same inputs and
//! collaborators it always produces the same report, so callers may memoise
//! whole reports.
//!
//! # Key Types
//!
//! - [`chunk`] / [`Hunk`] -- Context-bounded hunks from a tagged line stream
//! - [`LineDiffer`] / [`MyersLineDiffer`] -- Line-level text comparison
//! - [`ListMatcher`] / [`MyersListMatcher`] -- Ordered list matching by key
//! - [`TextProvider`] -- Renders a member's body
//! - [`Report`] / [`NamespaceGroup`] / [`MemberDiff`] -- The comparison result

pub mod chunk;
pub mod config;
pub mod error;
pub mod line_diff;
pub mod list_match;
pub mod orchestrator;
pub mod report;
pub mod resolver;

pub use chunk::{chunk, Hunk, Hunks};
pub use config::{DiffConfig, RemovedContainerPolicy, DEFAULT_CONTEXT_SIZE};
pub use error::{DiffError, DiffResult};
pub use line_diff::{LineDiffer, MyersLineDiffer};
pub use list_match::{ListMatcher, MyersListMatcher};
pub use orchestrator::diff_containers;
pub use report::{aggregate, MemberDiff, NamespaceGroup, Report};
pub use resolver::{MemberResolver, TextProvider};

use pkgdiff_types::Container;
use tracing::info;

/// Compare two container collections and build the grouped report.
///
/// Errors raised by `matcher` or `text` are returned unchanged.
pub fn compute_report<C, M, T, D>(
    before: &[C],
    after: &[C],
    config: &DiffConfig,
    matcher: &M,
    text: &T,
    differ: &D,
) -> DiffResult<Report>
where
    C: Container,
    M: ListMatcher,
    T: TextProvider<C>,
    D: LineDiffer,
{
    let resolver = MemberResolver::new(matcher, text, differ, config.context_size);
    let members = diff_containers(before, after, config.removed_containers, &resolver)?;
    let report = aggregate(members);
    info!(
        namespaces = report.namespaces().len(),
        members = report.member_count(),
        "report computed"
    );
    Ok(report)
}
