use serde::{Deserialize, Serialize};

/// A single menu entry: what is served and under which board heading.
/// Both strings are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub category: String,
    pub name: String,
}

impl Meal {
    #[must_use]
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}
