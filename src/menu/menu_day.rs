use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Meal;

/// One restaurant's meals for one calendar day. `meals` keeps parse order,
/// first seen first; parsers never produce a day with an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDay {
    pub date: DateTime<Utc>,
    pub meals: Vec<Meal>,
}

impl MenuDay {
    #[must_use]
    pub fn new(date: DateTime<Utc>, meals: Vec<Meal>) -> Self {
        Self { date, meals }
    }
}
