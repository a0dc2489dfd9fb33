use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{DateRange, JoinedMealRow, MealRow, Restaurant};

/// Postgres-backed store. The unique index on (name, category, served_on,
/// restaurant_id) carries the idempotency contract; everything else is
/// plain selects.
#[derive(Debug)]
pub struct SqlStore {
    pool: PgPool,
}

impl SqlStore {
    pub async fn connect(database_url: &str) -> crate::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub(super) async fn select_restaurants(&self) -> crate::Result<Vec<Restaurant>> {
        sqlx::query_as::<_, Restaurant>("SELECT id, name FROM restaurant ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(From::from)
    }

    pub(super) async fn select_meals(
        &self,
        (start, end): DateRange,
    ) -> crate::Result<Vec<JoinedMealRow>> {
        sqlx::query_as::<_, JoinedMealRow>(
            r"SELECT m.restaurant_id, r.name AS restaurant_name,
                     m.name, m.category, m.served_on
              FROM meal m
              INNER JOIN restaurant r ON r.id = m.restaurant_id
              WHERE m.served_on >= $1 AND m.served_on < $2
              ORDER BY m.id",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(From::from)
    }

    pub(super) async fn upsert_meals(&self, rows: &[MealRow]) -> crate::Result<()> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r"INSERT INTO meal (name, category, served_on, restaurant_id)
                  VALUES ($1, $2, $3, $4)
                  ON CONFLICT (name, category, served_on, restaurant_id)
                  DO UPDATE SET name = EXCLUDED.name",
            )
            .bind(&row.name)
            .bind(&row.category)
            .bind(row.served_on)
            .bind(row.restaurant_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await.map_err(From::from)
    }

    pub(super) async fn ensure_restaurants(&self, names: &[&str]) -> crate::Result<()> {
        for name in names {
            sqlx::query("INSERT INTO restaurant (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                .bind(name)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}
