//! Container-level cascade: match containers, then diff their members.

use tracing::debug;

use pkgdiff_types::{Container, ListAction};

use crate::config::RemovedContainerPolicy;
use crate::error::DiffResult;
use crate::line_diff::LineDiffer;
use crate::list_match::ListMatcher;
use crate::report::MemberDiff;
use crate::resolver::{MemberResolver, TextProvider};

/// Match `before` against `after` by container name and collect the member
/// diffs of every matched, added, and (unless skipped) removed container.
///
/// Records are returned in container traversal order, then member order.
pub fn diff_containers<C, M, T, D>(
    before: &[C],
    after: &[C],
    removed: RemovedContainerPolicy,
    resolver: &MemberResolver<'_, M, T, D>,
) -> DiffResult<Vec<MemberDiff>>
where
    C: Container,
    M: ListMatcher,
    T: TextProvider<C>,
    D: LineDiffer,
{
    let actions = resolver
        .matcher()
        .match_by_key(before, after, Container::name)?;

    let mut records = Vec::new();
    for action in actions {
        let name = action.primary().name();
        if matches!(action, ListAction::Remove { .. }) && removed == RemovedContainerPolicy::Skip {
            debug!(container = name, "removed container skipped");
            continue;
        }

        let members = resolver.resolve(action)?;
        debug!(
            container = name,
            action = %action.kind(),
            changed = members.len(),
            "container diffed"
        );
        records.extend(members);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_diff::MyersLineDiffer;
    use crate::list_match::MyersListMatcher;
    use crate::testing::{module, ty, Module, Ty};
    use pkgdiff_types::ActionKind;

    fn body(_: &Module, t: &Ty) -> DiffResult<String> {
        Ok(t.body.clone())
    }

    fn run(before: &[Module], after: &[Module], removed: RemovedContainerPolicy) -> Vec<MemberDiff> {
        let differ = MyersLineDiffer::default();
        let text = body;
        let resolver = MemberResolver::new(&MyersListMatcher, &text, &differ, 3);
        diff_containers(before, after, removed, &resolver).unwrap()
    }

    fn summary(records: &[MemberDiff]) -> Vec<(ActionKind, &str)> {
        records.iter().map(|r| (r.action(), r.name())).collect()
    }

    fn fixture() -> (Vec<Module>, Vec<Module>) {
        let before = vec![
            module("Core", vec![ty("A.Foo", "a"), ty("A.Same", "s")]),
            module("Legacy", vec![ty("L.Old", "old\nstuff")]),
        ];
        let after = vec![
            module("Core", vec![ty("A.Foo", "b"), ty("A.Same", "s")]),
            module("Extras", vec![ty("X.New", "new")]),
        ];
        (before, after)
    }

    #[test]
    fn removed_containers_diffed_as_deletions() {
        let (before, after) = fixture();
        let records = run(&before, &after, RemovedContainerPolicy::Diff);
        assert_eq!(
            summary(&records),
            vec![
                (ActionKind::Update, "A.Foo"),
                (ActionKind::Remove, "L.Old"),
                (ActionKind::Add, "X.New"),
            ]
        );
        let removed = &records[1];
        assert_eq!(removed.deletions(), 2);
        assert_eq!(removed.insertions(), 0);
    }

    #[test]
    fn removed_containers_skipped() {
        let (before, after) = fixture();
        let records = run(&before, &after, RemovedContainerPolicy::Skip);
        assert_eq!(
            summary(&records),
            vec![(ActionKind::Update, "A.Foo"), (ActionKind::Add, "X.New")]
        );
    }

    #[test]
    fn skip_policy_keeps_member_removals_in_surviving_containers() {
        let before = vec![module("Core", vec![ty("A.Gone", "g")])];
        let after = vec![module("Core", Vec::new())];
        let records = run(&before, &after, RemovedContainerPolicy::Skip);
        assert_eq!(summary(&records), vec![(ActionKind::Remove, "A.Gone")]);
    }

    #[test]
    fn identical_inputs_produce_nothing() {
        let (before, _) = fixture();
        assert!(run(&before, &before, RemovedContainerPolicy::Diff).is_empty());
    }
}
