//! papertrack-core – domain model and storage for past-paper progress records.
//!
//! - [`paper`]: the [`PastPaper`] entity.
//! - [`query`]: typed filter criteria and search terms.
//! - [`store`]: the [`PaperStore`] trait and its SQLite implementation.
//! - [`seed`]: explicit store initialisation with demonstration data.

pub mod error;
pub mod paper;
pub mod query;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use paper::{NewPastPaper, PaperStatus, PastPaper};
pub use query::{FilterCriteria, FilterError, FilterRequest, SearchQuery, SearchRequest};
pub use seed::{init_store, InitOptions, InitReport};
pub use store::{sqlite::SqliteStore, PaperStore};
