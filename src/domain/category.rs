//! Domain types representing funding categories.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// One node of the funding taxonomy.
///
/// `parent` names another category (by id, or by name when no id matches);
/// a missing or empty parent marks the root of the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_reference")]
    pub parent: Option<String>,
    pub direction: Direction,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            direction,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Returns the parent reference, treating an empty string as no parent.
    pub fn parent_ref(&self) -> Option<&str> {
        self.parent.as_deref().filter(|parent| !parent.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent_ref().is_none()
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}
