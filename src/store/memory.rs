use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{DateRange, JoinedMealRow, MealRow, Restaurant};

/// In-process store used by tests and as the fallback when no database is
/// configured. Enforces the same dedup key as the SQL schema and keeps
/// insertion order, which stands in for the serial row ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    restaurants: Vec<Restaurant>,
    meals: Vec<StoredMeal>,
}

#[derive(Debug)]
struct StoredMeal {
    row: MealRow,
    #[allow(dead_code)] // mirrors the SQL schema's created_at column
    created_at: DateTime<Utc>,
}

impl MemoryStore {
    pub(super) fn select_restaurants(&self) -> Vec<Restaurant> {
        self.inner.lock().expect("store lock").restaurants.clone()
    }

    pub(super) fn select_meals(&self, (start, end): DateRange) -> Vec<JoinedMealRow> {
        let inner = self.inner.lock().expect("store lock");
        inner
            .meals
            .iter()
            .filter(|meal| start <= meal.row.served_on && meal.row.served_on < end)
            .filter_map(|meal| {
                let restaurant = inner
                    .restaurants
                    .iter()
                    .find(|r| r.id == meal.row.restaurant_id)?;
                Some(JoinedMealRow {
                    restaurant_id: restaurant.id,
                    restaurant_name: restaurant.name.clone(),
                    name: meal.row.name.clone(),
                    category: meal.row.category.clone(),
                    served_on: meal.row.served_on,
                })
            })
            .collect()
    }

    pub(super) fn upsert_meals(&self, rows: &[MealRow]) {
        let mut inner = self.inner.lock().expect("store lock");
        for row in rows {
            if inner.meals.iter().any(|meal| meal.row == *row) {
                continue;
            }
            inner.meals.push(StoredMeal {
                row: row.clone(),
                created_at: Utc::now(),
            });
        }
    }

    pub(super) fn ensure_restaurants(&self, names: &[&str]) {
        let mut inner = self.inner.lock().expect("store lock");
        for name in names {
            if inner.restaurants.iter().any(|r| r.name == *name) {
                continue;
            }
            let id = inner.restaurants.len() as i64 + 1;
            inner.restaurants.push(Restaurant {
                id,
                name: (*name).to_string(),
            });
        }
    }
}
