//! Sort direction.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a sort comparator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Apply the direction to an ascending key ordering.
    ///
    /// Reverses the key comparison rather than the output, so a stable sort
    /// keeps equal keys in input order either way.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Suffix used in sort names, e.g. `title-asc`.
    pub fn suffix(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}
