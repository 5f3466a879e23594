//! High-level API for comparing two builds of a library package.
//!
//! A [`Package`] snapshot lists its targets (one per framework it was built
//! for); each target holds assemblies and each assembly its public types with
//! their rendered source. [`PackageComparer`] picks the closest matching
//! target on both sides and runs the diff engine across assemblies and types,
//! memoising reports through a [`ReportCache`](pkgdiff_cache::ReportCache).

pub mod comparer;
pub mod error;
pub mod package;

pub use comparer::{PackageComparer, SourceText};
pub use error::{SdkError, SdkResult};
pub use package::{Assembly, Package, PackageTarget, TypeDef};
