use std::env;

use lindholmen_lunch::{Aggregator, Result, Source, Store};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let store = match env::var("DATABASE_URL") {
        Ok(url) => Store::sql(&url).await?,
        Err(_) => {
            log::warn!("env var DATABASE_URL not set, using in-memory store.");
            Store::memory()
        }
    };
    let names: Vec<&str> = Source::ALL.iter().map(|source| source.name()).collect();
    store.ensure_restaurants(&names).await?;

    let aggregator = Aggregator::new(store);
    log::info!("Refreshing the week's menus");
    aggregator.refresh_week().await?;
    let menu = aggregator.menu_for_week().await?;
    println!("{}", serde_json::to_string_pretty(&menu)?);
    Ok(())
}
