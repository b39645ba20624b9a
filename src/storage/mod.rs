mod feedings;
mod store;
mod types;

pub use store::Store;
pub use types::{FeedRecord, StoreError};
