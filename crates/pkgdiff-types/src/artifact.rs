//! The two-level hierarchy an artifact exposes for comparison.
//!
//! An artifact version is a list of containers (for example the assemblies of
//! one build), each owning a list of members (the types in that assembly).
//! Containers are matched between versions by [`Container::name`], members by
//! [`Member::qualified_name`].

/// A named unit within a container whose textual body is compared.
pub trait Member {
    /// Fully qualified name; the key members are matched on.
    fn qualified_name(&self) -> &str;

    /// Namespace the member is reported under.
    fn namespace(&self) -> &str;
}

/// A top-level grouping unit that owns a set of members.
pub trait Container {
    type Member: Member;

    /// Name; the key containers are matched on.
    fn name(&self) -> &str;

    /// Members in declaration order.
    fn members(&self) -> &[Self::Member];
}
