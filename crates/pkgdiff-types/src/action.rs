use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// What happened to an item between the before and after lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// The item exists only in the after list.
    Add,
    /// The item exists only in the before list.
    Remove,
    /// The item exists in both lists under the same key.
    Update,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Which version of the artifact a record is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Before,
    After,
}

/// One entry produced by matching two ordered lists by key.
///
/// `Add` only carries the after item and `Remove` only the before item, so
/// an entry with neither side cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ListAction<T> {
    Add { after: T },
    Remove { before: T },
    Update { before: T, after: T },
}

impl<T> ListAction<T> {
    /// Build an action from two optional sides.
    ///
    /// Fails with [`TypeError::EmptyAction`] when both sides are absent.
    pub fn from_parts(before: Option<T>, after: Option<T>) -> Result<Self, TypeError> {
        match (before, after) {
            (None, Some(after)) => Ok(Self::Add { after }),
            (Some(before), None) => Ok(Self::Remove { before }),
            (Some(before), Some(after)) => Ok(Self::Update { before, after }),
            (None, None) => Err(TypeError::EmptyAction),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Add { .. } => ActionKind::Add,
            Self::Remove { .. } => ActionKind::Remove,
            Self::Update { .. } => ActionKind::Update,
        }
    }

    pub fn before(&self) -> Option<&T> {
        match self {
            Self::Add { .. } => None,
            Self::Remove { before } | Self::Update { before, .. } => Some(before),
        }
    }

    pub fn after(&self) -> Option<&T> {
        match self {
            Self::Remove { .. } => None,
            Self::Add { after } | Self::Update { after, .. } => Some(after),
        }
    }

    /// The item that identifies this entry: the after item when present,
    /// otherwise the before item.
    pub fn primary(&self) -> &T {
        match self {
            Self::Add { after } | Self::Update { after, .. } => after,
            Self::Remove { before } => before,
        }
    }

    /// The version [`primary`](Self::primary) is taken from.
    pub fn side(&self) -> Side {
        match self {
            Self::Remove { .. } => Side::Before,
            Self::Add { .. } | Self::Update { .. } => Side::After,
        }
    }

    /// Borrow both sides.
    pub fn as_ref(&self) -> ListAction<&T> {
        match self {
            Self::Add { after } => ListAction::Add { after },
            Self::Remove { before } => ListAction::Remove { before },
            Self::Update { before, after } => ListAction::Update { before, after },
        }
    }

    /// Apply `f` to every item present.
    pub fn map<U, F>(self, mut f: F) -> ListAction<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Self::Add { after } => ListAction::Add { after: f(after) },
            Self::Remove { before } => ListAction::Remove { before: f(before) },
            Self::Update { before, after } => ListAction::Update {
                before: f(before),
                after: f(after),
            },
        }
    }
}
