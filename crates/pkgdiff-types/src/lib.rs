//! Foundation types for pkgdiff.
//!
//! This crate provides the vocabulary shared by every other pkgdiff crate:
//! the result of matching two ordered lists, the line-level diff model, and
//! the traits an artifact implements to be compared container by container.
//!
//! # Key Types
//!
//! - [`ActionKind`] / [`ListAction`] -- Add/Remove/Update outcome of list matching
//! - [`Side`] -- Which version (before or after) a record belongs to
//! - [`LineKind`] / [`DiffLine`] -- One tagged line of a line-level diff
//! - [`Container`] / [`Member`] -- The two-level artifact hierarchy

pub mod action;
pub mod artifact;
pub mod error;
pub mod line;

pub use action::{ActionKind, ListAction, Side};
pub use artifact::{Container, Member};
pub use error::TypeError;
pub use line::{DiffLine, LineKind};
