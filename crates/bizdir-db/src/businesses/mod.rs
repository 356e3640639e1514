//! Database operations for the `businesses` table.

mod read;
mod types;
mod write;

pub use read::{count_businesses, list_categories, search_businesses};
pub use types::{BusinessRow, BusinessSearch, CategoryCountRow, UpsertOutcome};
pub use write::upsert_business;
