// Core business logic lives here - the brain of the operation
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod recommend;
pub mod search;
pub mod stores;

pub use calculator::{BulbOption, CalculationResult, LightingCalculator, RoomType, BULB_OPTIONS};
pub use catalog::Catalog;
pub use config::Config;
pub use debounce::Debouncer;
pub use error::Error;
pub use stores::{NewSelection, SelectionStore, WishlistStore};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
