//! Hunk chunking: compress a tagged line stream into context-bounded hunks.
//!
//! [`chunk`] walks the stream once, keeping only a small FIFO of pending
//! lines. Before any change is seen the FIFO holds at most `context` lines
//! (the leading context of the next hunk). Once a change is buffered, a run of
//! `2 * context` unchanged lines closes the hunk: the first `context` of them
//! become its trailing context and the last `context` stay buffered as the
//! leading context of the following hunk.
//!
//! With `context == 0` every unchanged line ends the current hunk and is
//! itself discarded, so each hunk is exactly one run of changed lines.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use pkgdiff_types::{DiffLine, LineKind};

use crate::error::DiffError;

/// Upper bound on the capacity reserved up front for the pending-line buffer.
const INITIAL_BUFFER_CAPACITY: usize = 64;

/// A contiguous, context-bounded block of a line-level diff.
///
/// A hunk is never empty and always contains at least one inserted or
/// deleted line. The chunker upholds this by construction; deserialisation
/// checks it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DiffLine>", into = "Vec<DiffLine>")]
pub struct Hunk {
    lines: Vec<DiffLine>,
}

impl Hunk {
    fn new(lines: Vec<DiffLine>) -> Self {
        debug_assert!(lines.iter().any(DiffLine::is_change));
        Self { lines }
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`; present for symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of inserted lines in this hunk.
    pub fn insertions(&self) -> usize {
        self.count(LineKind::Inserted)
    }

    /// Number of deleted lines in this hunk.
    pub fn deletions(&self) -> usize {
        self.count(LineKind::Deleted)
    }

    pub fn into_lines(self) -> Vec<DiffLine> {
        self.lines
    }

    fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

impl TryFrom<Vec<DiffLine>> for Hunk {
    type Error = DiffError;

    fn try_from(lines: Vec<DiffLine>) -> Result<Self, DiffError> {
        if lines.is_empty() {
            return Err(DiffError::InvalidReport("hunk has no lines".into()));
        }
        if !lines.iter().any(DiffLine::is_change) {
            return Err(DiffError::InvalidReport(
                "hunk has no inserted or deleted line".into(),
            ));
        }
        Ok(Self::new(lines))
    }
}

impl From<Hunk> for Vec<DiffLine> {
    fn from(hunk: Hunk) -> Self {
        hunk.lines
    }
}

/// Split `lines` into hunks keeping `context` unchanged lines around changes.
///
/// The result is lazy and single-pass: hunks are produced as the input is
/// consumed, and restarting requires calling `chunk` again with the same
/// input. A stream without inserted or deleted lines yields no hunks.
pub fn chunk<I>(lines: I, context: usize) -> Hunks<I::IntoIter>
where
    I: IntoIterator<Item = DiffLine>,
{
    let capacity = context
        .saturating_mul(2)
        .saturating_add(1)
        .min(INITIAL_BUFFER_CAPACITY);
    Hunks {
        lines: lines.into_iter(),
        context,
        buffer: VecDeque::with_capacity(capacity),
        change_seen: false,
        trailing: 0,
        finished: false,
    }
}

/// Iterator returned by [`chunk`].
#[derive(Debug)]
pub struct Hunks<I> {
    lines: I,
    context: usize,
    /// Pending lines not yet emitted.
    buffer: VecDeque<DiffLine>,
    /// Whether `buffer` holds a change that has not been emitted.
    change_seen: bool,
    /// Unchanged lines at the tail of `buffer` since the last change.
    trailing: usize,
    finished: bool,
}

impl<I> Hunks<I> {
    fn push(&mut self, line: DiffLine) -> Option<Hunk> {
        if line.is_change() {
            self.change_seen = true;
            self.trailing = 0;
        } else {
            self.trailing += 1;
        }
        self.buffer.push_back(line);

        if !self.change_seen {
            self.trim_leading();
            return None;
        }
        if self.trailing != self.split_threshold() {
            return None;
        }

        let carried = self.trailing - self.context;
        let emit = self.buffer.len() - carried;
        let hunk = Hunk::new(self.buffer.drain(..emit).collect());
        self.change_seen = false;
        self.trim_leading();
        self.trailing = self.buffer.len();
        Some(hunk)
    }

    fn finish(&mut self) -> Option<Hunk> {
        if !self.change_seen {
            self.buffer.clear();
            return None;
        }
        let excess = self.trailing.saturating_sub(self.context);
        self.buffer.truncate(self.buffer.len() - excess);
        self.change_seen = false;
        Some(Hunk::new(self.buffer.drain(..).collect()))
    }

    /// Unchanged lines needed after a change to close the current hunk.
    fn split_threshold(&self) -> usize {
        self.context.saturating_mul(2).max(1)
    }

    fn trim_leading(&mut self) {
        while self.buffer.len() > self.context {
            self.buffer.pop_front();
        }
    }
}

impl<I> Iterator for Hunks<I>
where
    I: Iterator<Item = DiffLine>,
{
    type Item = Hunk;

    fn next(&mut self) -> Option<Hunk> {
        if self.finished {
            return None;
        }
        while let Some(line) = self.lines.next() {
            if let Some(hunk) = self.push(line) {
                return Some(hunk);
            }
        }
        self.finished = true;
        self.finish()
    }
}

impl<I> FusedIterator for Hunks<I> where I: Iterator<Item = DiffLine> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(text: &str) -> DiffLine {
        DiffLine::context(text)
    }

    fn ins(text: &str) -> DiffLine {
        DiffLine::inserted(text)
    }

    fn del(text: &str) -> DiffLine {
        DiffLine::deleted(text)
    }

    fn rendered(hunks: &[Hunk]) -> Vec<Vec<String>> {
        hunks
            .iter()
            .map(|h| h.lines().iter().map(ToString::to_string).collect())
            .collect()
    }

    fn contexts(range: std::ops::Range<usize>) -> Vec<DiffLine> {
        range.map(|i| ctx(&format!("c{i}"))).collect()
    }

    #[test]
    fn single_modification_with_short_context() {
        let lines = vec![ctx("x=1"), del("y=2"), ins("y=3")];
        let hunks: Vec<_> = chunk(lines, 3).collect();
        assert_eq!(rendered(&hunks), vec![vec!["  x=1", "- y=2", "+ y=3"]]);
    }

    #[test]
    fn no_changes_no_hunks() {
        let hunks: Vec<_> = chunk(contexts(0..20), 3).collect();
        assert!(hunks.is_empty());
    }

    #[test]
    fn empty_input_no_hunks() {
        assert_eq!(chunk(Vec::new(), 3).count(), 0);
    }

    #[test]
    fn all_inserted_is_one_hunk() {
        let hunks: Vec<_> = chunk(vec![ins("void M()"), ins("{"), ins("}")], 3).collect();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].insertions(), 3);
        assert_eq!(hunks[0].deletions(), 0);
    }

    #[test]
    fn leading_and_trailing_context_are_bounded() {
        let mut lines = contexts(0..10);
        lines.push(del("old"));
        lines.extend(contexts(10..15));
        let hunks: Vec<_> = chunk(lines, 3).collect();
        assert_eq!(
            rendered(&hunks),
            vec![vec!["  c7", "  c8", "  c9", "- old", "  c10", "  c11", "  c12"]]
        );
    }

    #[test]
    fn close_changes_share_a_hunk() {
        // Five unchanged lines between changes is fewer than 2 * 3.
        let mut lines = vec![del("a")];
        lines.extend(contexts(0..5));
        lines.push(ins("b"));
        let hunks: Vec<_> = chunk(lines, 3).collect();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].len(), 7);
    }

    #[test]
    fn distant_changes_split_into_two_hunks() {
        let mut lines = vec![del("a")];
        lines.extend(contexts(0..6));
        lines.push(ins("b"));
        let hunks: Vec<_> = chunk(lines, 3).collect();
        assert_eq!(
            rendered(&hunks),
            vec![
                vec!["- a", "  c0", "  c1", "  c2"],
                vec!["  c3", "  c4", "  c5", "+ b"],
            ]
        );
    }

    #[test]
    fn zero_context_keeps_only_changed_runs() {
        let lines = vec![
            ctx("c0"),
            del("a"),
            ins("b"),
            ctx("c1"),
            ins("c"),
            ctx("c2"),
            ctx("c3"),
        ];
        let hunks: Vec<_> = chunk(lines, 0).collect();
        assert_eq!(rendered(&hunks), vec![vec!["- a", "+ b"], vec!["+ c"]]);
    }

    #[test]
    fn hunks_are_produced_lazily() {
        let mut lines = vec![del("a")];
        lines.extend(contexts(0..6));
        let mut source = lines.into_iter().chain(std::iter::once(ins("b")));
        let mut hunks = chunk(source.by_ref(), 3);
        let first = hunks.next().unwrap();
        assert_eq!(first.len(), 4);
        drop(hunks);
        // The first hunk closes before the trailing insertion is read.
        assert_eq!(source.next(), Some(ins("b")));
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut hunks = chunk(vec![ins("a")], 3);
        assert!(hunks.next().is_some());
        assert!(hunks.next().is_none());
        assert!(hunks.next().is_none());
    }

    #[test]
    fn serializes_as_line_list() {
        let hunk = chunk(vec![ins("a")], 3).next().unwrap();
        let json = serde_json::to_value(&hunk).unwrap();
        assert_eq!(json[0]["kind"], "inserted");
        assert_eq!(json[0]["text"], "a");
    }

    #[test]
    fn huge_context_keeps_whole_stream() {
        let lines = vec![ctx("a"), ins("b"), ctx("c")];
        let hunks: Vec<_> = chunk(lines, 1 << 40).collect();
        assert_eq!(rendered(&hunks), vec![vec!["  a", "+ b", "  c"]]);
    }

    #[test]
    fn max_context_does_not_overflow() {
        let mut lines = contexts(0..4);
        lines.push(del("x"));
        lines.extend(contexts(4..8));
        let hunks: Vec<_> = chunk(lines, usize::MAX).collect();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].len(), 9);
    }

    #[test]
    fn deserialize_round_trips_chunker_output() {
        let hunk = chunk(vec![ctx("a"), del("b")], 3).next().unwrap();
        let json = serde_json::to_string(&hunk).unwrap();
        let back: Hunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hunk);
    }

    #[test]
    fn deserialize_rejects_invalid_hunks() {
        assert!(serde_json::from_str::<Hunk>("[]").is_err());
        let unchanged = r#"[{"kind":"context","text":"a"}]"#;
        let err = serde_json::from_str::<Hunk>(unchanged).unwrap_err();
        assert!(err.to_string().contains("no inserted or deleted line"));
    }

    fn line_stream() -> impl Strategy<Value = Vec<DiffLine>> {
        prop::collection::vec(0u8..4, 0..120).prop_map(|kinds| {
            kinds
                .into_iter()
                .enumerate()
                .map(|(i, k)| {
                    let kind = match k {
                        0 => LineKind::Inserted,
                        1 => LineKind::Deleted,
                        _ => LineKind::Context,
                    };
                    DiffLine::new(kind, i.to_string())
                })
                .collect()
        })
    }

    fn index(line: &DiffLine) -> usize {
        line.text.parse().unwrap()
    }

    proptest! {
        #[test]
        fn hunks_are_nonempty_and_contain_a_change(lines in line_stream(), context in 0usize..6) {
            for hunk in chunk(lines, context) {
                prop_assert!(!hunk.is_empty());
                prop_assert!(hunk.lines().iter().any(DiffLine::is_change));
            }
        }

        #[test]
        fn unchanged_input_yields_nothing(len in 0usize..60, context in 0usize..6) {
            prop_assert_eq!(chunk(contexts(0..len), context).count(), 0);
        }

        #[test]
        fn output_is_ordered_subsequence_without_duplicates(lines in line_stream(), context in 0usize..6) {
            let emitted: Vec<usize> = chunk(lines, context)
                .flat_map(Hunk::into_lines)
                .map(|l| index(&l))
                .collect();
            prop_assert!(emitted.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn every_change_is_kept(lines in line_stream(), context in 0usize..6) {
            let changes: Vec<usize> = lines.iter().filter(|l| l.is_change()).map(index).collect();
            let emitted: Vec<usize> = chunk(lines, context)
                .flat_map(Hunk::into_lines)
                .filter(DiffLine::is_change)
                .map(|l| index(&l))
                .collect();
            prop_assert_eq!(changes, emitted);
        }

        #[test]
        fn edge_context_is_bounded(lines in line_stream(), context in 0usize..6) {
            for hunk in chunk(lines, context) {
                let lead = hunk.lines().iter().take_while(|l| !l.is_change()).count();
                let tail = hunk.lines().iter().rev().take_while(|l| !l.is_change()).count();
                prop_assert!(lead <= context);
                prop_assert!(tail <= context);
            }
        }

        #[test]
        fn chunking_is_deterministic(lines in line_stream(), context in 0usize..6) {
            let first: Vec<Hunk> = chunk(lines.clone(), context).collect();
            let second: Vec<Hunk> = chunk(lines, context).collect();
            prop_assert_eq!(first, second);
        }
    }
}
