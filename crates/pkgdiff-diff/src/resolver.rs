//! Member-level diffing for one matched container pair.

use tracing::debug;

use pkgdiff_types::{Container, ListAction, Member};

use crate::chunk::{chunk, Hunk};
use crate::error::DiffResult;
use crate::line_diff::LineDiffer;
use crate::list_match::ListMatcher;
use crate::report::MemberDiff;

/// Renders the canonical textual body of a member.
///
/// The container is passed alongside the member because rendering usually
/// needs container-wide context (for example the module a type is read from).
/// Rendering may be expensive; memoising it is the implementor's concern.
pub trait TextProvider<C: Container> {
    fn text_of(&self, container: &C, member: &C::Member) -> DiffResult<String>;
}

impl<C, F> TextProvider<C> for F
where
    C: Container,
    F: Fn(&C, &C::Member) -> DiffResult<String>,
{
    fn text_of(&self, container: &C, member: &C::Member) -> DiffResult<String> {
        self(container, member)
    }
}

/// Diffs the members of one container pair.
#[derive(Debug)]
pub struct MemberResolver<'a, M, T, D> {
    matcher: &'a M,
    text: &'a T,
    differ: &'a D,
    context_size: usize,
}

impl<'a, M, T, D> MemberResolver<'a, M, T, D>
where
    M: ListMatcher,
    D: LineDiffer,
{
    pub fn new(matcher: &'a M, text: &'a T, differ: &'a D, context_size: usize) -> Self {
        Self {
            matcher,
            text,
            differ,
            context_size,
        }
    }

    pub fn matcher(&self) -> &'a M {
        self.matcher
    }

    /// Produce the member diffs for one container-level action.
    ///
    /// A missing container contributes no members, so every member of an
    /// added container is an `Add` and every member of a removed one a
    /// `Remove`. Members whose texts produce no hunks are dropped.
    pub fn resolve<C>(&self, containers: ListAction<&C>) -> DiffResult<Vec<MemberDiff>>
    where
        C: Container,
        T: TextProvider<C>,
    {
        let before_container = containers.before().copied();
        let after_container = containers.after().copied();
        let before_members = before_container.map_or(&[][..], Container::members);
        let after_members = after_container.map_or(&[][..], Container::members);

        let actions = self
            .matcher
            .match_by_key(before_members, after_members, Member::qualified_name)?;

        let mut records = Vec::new();
        for action in actions {
            let before_text = self.text_for(before_container, action.before().copied())?;
            let after_text = self.text_for(after_container, action.after().copied())?;

            let lines = self.differ.diff_lines(&before_text, &after_text);
            let hunks: Vec<Hunk> = chunk(lines, self.context_size).collect();

            let member = *action.primary();
            match MemberDiff::new(action.kind(), member, action.side(), hunks) {
                Some(record) => records.push(record),
                None => debug!(member = member.qualified_name(), "no textual change, dropped"),
            }
        }
        Ok(records)
    }

    fn text_for<C>(&self, container: Option<&C>, member: Option<&C::Member>) -> DiffResult<String>
    where
        C: Container,
        T: TextProvider<C>,
    {
        match (container, member) {
            (Some(container), Some(member)) => self.text.text_of(container, member),
            _ => Ok(String::new()),
        }
    }
}
