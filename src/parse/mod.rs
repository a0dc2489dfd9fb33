//! Per-source menu extraction. Each submodule turns one restaurant's raw
//! markup into `MenuDay`s with its own algorithm; the only thing they share
//! is the signature and the bold-run category fold two of them use.

pub mod bombay_bistro;
mod category_fold;
pub mod district_one;
pub mod kooperativet;
pub(crate) mod static_selector;
mod weekday;
pub mod world_of_food;
