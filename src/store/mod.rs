mod memory;
mod sql;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::MemoryStore;
pub use sql::SqlStore;

/// Half-open `[start, end)` range over `served_on`.
pub type DateRange = (DateTime<Utc>, DateTime<Utc>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
}

/// One meal as persisted. The tuple (name, category, served_on,
/// restaurant_id) is the dedup key: re-ingesting a week that is already
/// stored updates nothing and inserts nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRow {
    pub name: String,
    pub category: String,
    pub served_on: DateTime<Utc>,
    pub restaurant_id: i64,
}

/// A stored meal joined to its restaurant, as the queries read it back.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct JoinedMealRow {
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub name: String,
    pub category: String,
    pub served_on: DateTime<Utc>,
}

#[derive(Debug)]
#[non_exhaustive]
pub enum Store {
    Sql(SqlStore),
    Memory(MemoryStore),
}

impl Store {
    #[inline]
    pub async fn sql(database_url: &str) -> crate::Result<Self> {
        SqlStore::connect(database_url).await.map(Self::Sql)
    }

    #[inline]
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    pub async fn select_restaurants(&self) -> crate::Result<Vec<Restaurant>> {
        match self {
            Self::Sql(s) => s.select_restaurants().await,
            Self::Memory(m) => Ok(m.select_restaurants()),
        }
    }

    /// Rows whose `served_on` lies in `range`, joined to restaurant names,
    /// in insertion order.
    pub async fn select_meals(&self, range: DateRange) -> crate::Result<Vec<JoinedMealRow>> {
        match self {
            Self::Sql(s) => s.select_meals(range).await,
            Self::Memory(m) => Ok(m.select_meals(range)),
        }
    }

    /// Persists one parsed batch. Conflicts on the dedup key rewrite a
    /// trivial field and change nothing.
    pub async fn upsert_meals(&self, rows: &[MealRow]) -> crate::Result<()> {
        match self {
            Self::Sql(s) => s.upsert_meals(rows).await,
            Self::Memory(m) => {
                m.upsert_meals(rows);
                Ok(())
            }
        }
    }

    /// Seeds restaurant rows for any of `names` not yet present.
    pub async fn ensure_restaurants(&self, names: &[&str]) -> crate::Result<()> {
        match self {
            Self::Sql(s) => s.ensure_restaurants(names).await,
            Self::Memory(m) => {
                m.ensure_restaurants(names);
                Ok(())
            }
        }
    }
}
