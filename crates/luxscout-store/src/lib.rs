// SQLite-backed persistence layer
// The desktop equivalent of the site's browser-local wishlist and cart

pub mod store;

pub use store::{Error, Result, StoreManager};
