//! Aggregates the daily lunch menus of four Lindholmen restaurants into a
//! normalized schedule. Each restaurant publishes its menu in a different,
//! undocumented markup format; one parser per source recovers
//! {date, category, meal} records from it, and the aggregator persists
//! them idempotently and serves them back grouped by restaurant and day.
//!
//! This crate is the core library; the web layer consuming it lives
//! elsewhere.
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod menu;
pub mod parse;
pub mod recommend;
pub mod source;
pub mod store;
pub mod week;

pub use aggregate::Aggregator;
pub use error::{Error, Result};
pub use menu::{GroupedRestaurant, Meal, MenuDay};
pub use source::Source;
pub use store::Store;
