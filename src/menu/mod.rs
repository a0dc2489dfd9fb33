mod grouped;
mod meal;
mod menu_day;

pub use grouped::GroupedRestaurant;
pub use meal::Meal;
pub use menu_day::MenuDay;
