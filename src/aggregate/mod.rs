use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use futures::future::join_all;

use crate::menu::{GroupedRestaurant, Meal, MenuDay};
use crate::source::Source;
use crate::store::{DateRange, JoinedMealRow, MealRow, Store};
use crate::{fetch, week};

/// Fetches, persists and serves the week's menus. The store is an explicit
/// dependency; there is no process-wide cache. Concurrent refreshes are
/// safe because the upsert key makes re-ingestion a no-op, not because of
/// any lock.
#[derive(Debug)]
pub struct Aggregator {
    client: reqwest::Client,
    store: Store,
}

impl Aggregator {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            client: fetch::make_client(),
            store,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Fetches every configured source concurrently and persists whatever
    /// parsed. A source that fails to fetch is logged and contributes
    /// nothing; only store errors surface.
    pub async fn refresh_week(&self) -> crate::Result<()> {
        let reference = Utc::now();
        let client = &self.client;
        let fetched = join_all(Source::ALL.map(|source| async move {
            (source, fetch::fetch_text(client, source.url()).await)
        }))
        .await;

        let mut parsed = Vec::with_capacity(fetched.len());
        for (source, outcome) in fetched {
            match outcome {
                Ok(text) => parsed.push((source, source.parse(&text, reference))),
                Err(e) => tracing::warn!(source = source.name(), "fetch failed: {e}"),
            }
        }
        self.persist(&parsed).await
    }

    /// All restaurants' menus for the week containing now.
    pub async fn menu_for_week(&self) -> crate::Result<Vec<GroupedRestaurant>> {
        self.query_range(week::week_bounds(Utc::now(), week::TIME_ZONE))
            .await
    }

    /// All restaurants' menus for one calendar day.
    pub async fn menu_for_day(&self, date: NaiveDate) -> crate::Result<Vec<GroupedRestaurant>> {
        self.query_range(week::day_bounds(date, week::TIME_ZONE)).await
    }

    /// Read-through query: if the stored rows cover fewer restaurants than
    /// are configured, refresh once and re-read.
    async fn query_range(&self, range: DateRange) -> crate::Result<Vec<GroupedRestaurant>> {
        let total = self.store.select_restaurants().await?.len();
        let mut rows = self.store.select_meals(range).await?;
        let represented: HashSet<i64> = rows.iter().map(|row| row.restaurant_id).collect();
        if represented.len() < total {
            self.refresh_week().await?;
            rows = self.store.select_meals(range).await?;
        }
        Ok(group_by_restaurant(&rows))
    }

    async fn persist(&self, parsed: &[(Source, Vec<MenuDay>)]) -> crate::Result<()> {
        let restaurants = self.store.select_restaurants().await?;
        let ids: HashMap<&str, i64> = restaurants
            .iter()
            .map(|r| (r.name.as_str(), r.id))
            .collect();

        let mut rows = Vec::new();
        for (source, days) in parsed {
            let Some(&restaurant_id) = ids.get(source.name()) else {
                tracing::warn!(source = source.name(), "restaurant not seeded, skipping");
                continue;
            };
            for day in days {
                for meal in &day.meals {
                    rows.push(MealRow {
                        name: meal.name.clone(),
                        category: meal.category.clone(),
                        served_on: day.date,
                        restaurant_id,
                    });
                }
            }
        }
        if rows.is_empty() {
            return Ok(());
        }
        self.store.upsert_meals(&rows).await
    }
}

/// Groups joined rows by restaurant (first-seen order) and, within one, by
/// the Stockholm calendar day the meal is served on. Days come out sorted
/// ascending; meals keep row order.
fn group_by_restaurant(rows: &[JoinedMealRow]) -> Vec<GroupedRestaurant> {
    struct Group {
        name: String,
        day_index: HashMap<NaiveDate, usize>,
        days: Vec<MenuDay>,
    }

    let mut order = Vec::new();
    let mut groups: HashMap<i64, Group> = HashMap::new();
    for row in rows {
        let group = groups.entry(row.restaurant_id).or_insert_with(|| {
            order.push(row.restaurant_id);
            Group {
                name: row.restaurant_name.clone(),
                day_index: HashMap::new(),
                days: Vec::new(),
            }
        });
        let day_key = row.served_on.with_timezone(&week::TIME_ZONE).date_naive();
        let index = match group.day_index.get(&day_key) {
            Some(&index) => index,
            None => {
                group.days.push(MenuDay::new(row.served_on, Vec::new()));
                group.day_index.insert(day_key, group.days.len() - 1);
                group.days.len() - 1
            }
        };
        group.days[index]
            .meals
            .push(Meal::new(row.category.clone(), row.name.clone()));
    }

    order
        .into_iter()
        .filter_map(|id| groups.remove(&id))
        .map(|mut group| {
            group.days.sort_by_key(|day| day.date);
            GroupedRestaurant {
                restaurant_name: group.name,
                days: group.days,
            }
        })
        .collect()
}
