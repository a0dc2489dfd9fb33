use serde::{Deserialize, Serialize};

use super::MenuDay;

/// Query-time view of one restaurant's stored menu, days ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedRestaurant {
    pub restaurant_name: String,
    pub days: Vec<MenuDay>,
}
