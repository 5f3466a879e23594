//! Report cache for pkgdiff.
//!
//! A comparison report is a deterministic function of the two artifact
//! versions and the target compared, so whole reports can be memoised by
//! [`ComparisonKey`]. The cache wraps the engine from the outside; the engine
//! itself never consults it.
//!
//! # Key Types
//!
//! - [`ReportCache`] -- Get-or-compute cache abstraction
//! - [`InMemoryReportCache`] -- `HashMap`-backed cache with a time-to-live
//! - [`ComparisonKey`] -- Normalised identity of one comparison

pub mod key;
pub mod memory;
pub mod traits;

pub use key::ComparisonKey;
pub use memory::{InMemoryReportCache, DEFAULT_TTL};
pub use traits::ReportCache;
