//! Line-level text comparison.
//!
//! Uses the `similar` crate (Myers diff algorithm) to tag every line of two
//! texts as unchanged, inserted, or deleted.

use similar::{capture_diff_slices, Algorithm, DiffTag};

use pkgdiff_types::DiffLine;

/// Compares two texts line by line.
pub trait LineDiffer {
    /// Produce the full tagged line stream turning `before` into `after`.
    fn diff_lines(&self, before: &str, after: &str) -> Vec<DiffLine>;
}

impl<F> LineDiffer for F
where
    F: Fn(&str, &str) -> Vec<DiffLine>,
{
    fn diff_lines(&self, before: &str, after: &str) -> Vec<DiffLine> {
        self(before, after)
    }
}

/// Myers line differ.
///
/// When `ignore_whitespace` is set, lines are matched with surrounding
/// whitespace trimmed; unchanged lines are reported with the after text.
/// The default ignores whitespace, matching [`DiffConfig`](crate::DiffConfig).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MyersLineDiffer {
    pub ignore_whitespace: bool,
}

impl MyersLineDiffer {
    pub fn new(ignore_whitespace: bool) -> Self {
        Self { ignore_whitespace }
    }
}

impl Default for MyersLineDiffer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LineDiffer for MyersLineDiffer {
    fn diff_lines(&self, before: &str, after: &str) -> Vec<DiffLine> {
        let old: Vec<&str> = before.lines().collect();
        let new: Vec<&str> = after.lines().collect();

        let ops = if self.ignore_whitespace {
            let old_keys: Vec<&str> = old.iter().map(|l| l.trim()).collect();
            let new_keys: Vec<&str> = new.iter().map(|l| l.trim()).collect();
            capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys)
        } else {
            capture_diff_slices(Algorithm::Myers, &old, &new)
        };

        let mut lines = Vec::with_capacity(old.len().max(new.len()));
        for op in ops {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => {
                    lines.extend(new[new_range].iter().map(|l| DiffLine::context(*l)));
                }
                DiffTag::Delete => {
                    lines.extend(old[old_range].iter().map(|l| DiffLine::deleted(*l)));
                }
                DiffTag::Insert => {
                    lines.extend(new[new_range].iter().map(|l| DiffLine::inserted(*l)));
                }
                DiffTag::Replace => {
                    lines.extend(old[old_range].iter().map(|l| DiffLine::deleted(*l)));
                    lines.extend(new[new_range].iter().map(|l| DiffLine::inserted(*l)));
                }
            }
        }
        lines
    }
}
