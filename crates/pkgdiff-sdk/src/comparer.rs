use tracing::{info, warn};

use pkgdiff_cache::{ComparisonKey, InMemoryReportCache, ReportCache};
use pkgdiff_diff::{
    compute_report, DiffConfig, DiffError, DiffResult, MyersLineDiffer, MyersListMatcher, Report,
    TextProvider,
};
use pkgdiff_types::Member;

use crate::error::SdkResult;
use crate::package::{Assembly, Package, TypeDef};

/// Reads a type's body from its snapshot source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceText;

impl TextProvider<Assembly> for SourceText {
    fn text_of(&self, assembly: &Assembly, ty: &TypeDef) -> DiffResult<String> {
        ty.source.clone().ok_or_else(|| DiffError::TextUnavailable {
            member: ty.qualified_name().to_owned(),
            reason: format!("no source available in assembly {}", assembly.name),
        })
    }
}

/// Compares package versions target by target, memoising the reports.
#[derive(Debug)]
pub struct PackageComparer<C = InMemoryReportCache> {
    cache: C,
    config: DiffConfig,
}

impl PackageComparer<InMemoryReportCache> {
    /// A comparer with a default in-memory cache.
    pub fn new(config: DiffConfig) -> Self {
        Self::with_cache(InMemoryReportCache::default(), config)
    }
}

impl<C: ReportCache> PackageComparer<C> {
    pub fn with_cache(cache: C, config: DiffConfig) -> Self {
        Self { cache, config }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare `package` (the requested version) against `other`.
    ///
    /// Changes read from `other` to `package`: a type only in `package` is
    /// added. When either side has no target close to `target`, the result
    /// is an error report rather than an `Err`.
    pub fn compare(&self, package: &Package, other: &Package, target: &str) -> SdkResult<Report> {
        let key = ComparisonKey::new(&package.id, &package.version, &other.version, target)
            .with_config(&self.config);
        self.cache
            .get_or_compute(&key, || self.compute(package, other, target))
    }

    fn compute(&self, package: &Package, other: &Package, target: &str) -> SdkResult<Report> {
        let Some(after) = package.find_closest_target(target) else {
            warn!(package = %package.id, version = %package.version, requested = target, "no matching target");
            return Ok(Report::unresolved_target(target, &package.id, &package.version));
        };
        let Some(before) = other.find_closest_target(&after.moniker) else {
            warn!(package = %other.id, version = %other.version, requested = %after.moniker, "no matching target");
            return Ok(Report::unresolved_target(&after.moniker, &other.id, &other.version));
        };

        info!(
            package = %package.id,
            from = %other.version,
            to = %package.version,
            before_target = %before.moniker,
            after_target = %after.moniker,
            "comparing package versions"
        );

        let differ = MyersLineDiffer::new(self.config.ignore_whitespace);
        let report = compute_report(
            &before.assemblies,
            &after.assemblies,
            &self.config,
            &MyersListMatcher,
            &SourceText,
            &differ,
        )?;
        Ok(report)
    }
}
