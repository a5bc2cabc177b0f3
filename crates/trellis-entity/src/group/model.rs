//! Group entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use trellis_core::error::AppError;
use trellis_core::result::AppResult;

/// Parent ID used by top-level groups; the root group has no table row.
pub const ROOT_GROUP_ID: i64 = 0;

/// A group in the organizational hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: i64,
    /// Group name.
    pub name: String,
    /// URL path segment of this group.
    pub path: String,
    /// Parent group ID ([`ROOT_GROUP_ID`] for top-level groups).
    pub parent_id: i64,
    /// Comma-joined group IDs from the top-level ancestor down to this group.
    pub traversal_ids: String,
}

impl Group {
    /// Parse `traversal_ids` into root-to-node order.
    ///
    /// The result always ends with this group's own ID. Anything else,
    /// including an empty value, is an internal error.
    pub fn ancestor_ids(&self) -> AppResult<Vec<i64>> {
        let malformed = || {
            AppError::internal(format!(
                "Group {} has malformed traversal ids '{}'",
                self.id, self.traversal_ids
            ))
        };
        let ids = parse_traversal_ids(&self.traversal_ids).map_err(|_| malformed())?;
        match ids.last() {
            Some(last) if *last == self.id => Ok(ids),
            _ => Err(malformed()),
        }
    }
}

/// Split a comma-joined traversal string into IDs.
pub fn parse_traversal_ids(raw: &str) -> Result<Vec<i64>, std::num::ParseIntError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<i64>)
        .collect()
}

/// Build the traversal string for a group created under `parent_traversal`.
pub fn child_traversal_ids(parent_traversal: Option<&str>, id: i64) -> String {
    match parent_traversal {
        Some(parent) if !parent.is_empty() => format!("{parent},{id}"),
        _ => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: i64, parent_id: i64, traversal_ids: &str) -> Group {
        Group {
            id,
            name: format!("g{id}"),
            path: format!("g{id}"),
            parent_id,
            traversal_ids: traversal_ids.to_string(),
        }
    }

    #[test]
    fn test_ancestor_ids_in_root_to_node_order() {
        let g = group(9, 5, "1,5,9");
        assert_eq!(g.ancestor_ids().unwrap(), vec![1, 5, 9]);
        assert_eq!(group(1, ROOT_GROUP_ID, "1").ancestor_ids().unwrap(), vec![1]);
    }

    #[test]
    fn test_malformed_traversal_ids_is_internal_error() {
        let err = group(3, 1, "1,x,3").ancestor_ids().unwrap_err();
        assert_eq!(err.kind, trellis_core::error::ErrorKind::Internal);
    }

    #[test]
    fn test_traversal_ids_must_end_with_own_id() {
        for raw in ["", " ", "1,5"] {
            let err = group(9, 5, raw).ancestor_ids().unwrap_err();
            assert_eq!(err.kind, trellis_core::error::ErrorKind::Internal, "{raw:?}");
        }
    }

    #[test]
    fn test_child_traversal_ids() {
        assert_eq!(child_traversal_ids(None, 4), "4");
        assert_eq!(child_traversal_ids(Some("1,2"), 4), "1,2,4");
    }
}
