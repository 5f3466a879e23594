//! Ordered-list matching: pair two lists by a key and classify every item.
//!
//! Polarity is fixed here for the whole crate: `Add` means the item exists
//! only in `after`, `Remove` means it exists only in `before`.

use std::hash::Hash;

use similar::{capture_diff_slices, Algorithm, DiffTag};

use pkgdiff_types::ListAction;

use crate::error::DiffResult;

/// Matches two ordered lists of items by a caller-supplied key.
pub trait ListMatcher {
    /// Pair `before` with `after`, producing one action per item.
    ///
    /// Items with equal keys in both lists become `Update`, items only in
    /// `after` become `Add`, items only in `before` become `Remove`.
    fn match_by_key<'a, T, K, F>(
        &self,
        before: &'a [T],
        after: &'a [T],
        key: F,
    ) -> DiffResult<Vec<ListAction<&'a T>>>
    where
        K: Eq + Hash + Ord,
        F: Fn(&'a T) -> K;
}

/// Longest-common-subsequence matcher over the item keys (Myers).
///
/// Actions come out in sequence order. Within a replaced run the removals
/// precede the additions.
#[derive(Clone, Copy, Debug, Default)]
pub struct MyersListMatcher;

impl ListMatcher for MyersListMatcher {
    fn match_by_key<'a, T, K, F>(
        &self,
        before: &'a [T],
        after: &'a [T],
        key: F,
    ) -> DiffResult<Vec<ListAction<&'a T>>>
    where
        K: Eq + Hash + Ord,
        F: Fn(&'a T) -> K,
    {
        let before_keys: Vec<K> = before.iter().map(&key).collect();
        let after_keys: Vec<K> = after.iter().map(&key).collect();

        let mut actions = Vec::with_capacity(before.len().max(after.len()));
        for op in capture_diff_slices(Algorithm::Myers, &before_keys, &after_keys) {
            let (tag, old, new) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => {
                    actions.extend(
                        before[old]
                            .iter()
                            .zip(&after[new])
                            .map(|(before, after)| ListAction::Update { before, after }),
                    );
                }
                DiffTag::Delete => {
                    actions.extend(before[old].iter().map(|before| ListAction::Remove { before }));
                }
                DiffTag::Insert => {
                    actions.extend(after[new].iter().map(|after| ListAction::Add { after }));
                }
                DiffTag::Replace => {
                    actions.extend(before[old].iter().map(|before| ListAction::Remove { before }));
                    actions.extend(after[new].iter().map(|after| ListAction::Add { after }));
                }
            }
        }
        Ok(actions)
    }
}
