use std::sync::Arc;

use pkgdiff_diff::Report;

use crate::key::ComparisonKey;

/// Memoises comparison reports.
///
/// Implementations must satisfy these invariants:
/// - A cached report is returned unchanged until it expires.
/// - `compute` runs only when no live entry exists for the key.
/// - A failed `compute` stores nothing; the error is handed back to the caller.
/// - Error-state reports are ordinary reports and are cached like any other.
pub trait ReportCache: Send + Sync {
    /// Return the live report for `key`, computing and storing it if absent.
    fn get_or_compute<E, F>(&self, key: &ComparisonKey, compute: F) -> Result<Report, E>
    where
        F: FnOnce() -> Result<Report, E>;

    /// Drop the entry for `key`. Returns `true` if one existed.
    fn invalidate(&self, key: &ComparisonKey) -> bool;
}

impl<C: ReportCache> ReportCache for Arc<C> {
    fn get_or_compute<E, F>(&self, key: &ComparisonKey, compute: F) -> Result<Report, E>
    where
        F: FnOnce() -> Result<Report, E>,
    {
        (**self).get_or_compute(key, compute)
    }

    fn invalidate(&self, key: &ComparisonKey) -> bool {
        (**self).invalidate(key)
    }
}
