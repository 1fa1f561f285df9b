//! Record store abstraction.
//!
//! [`PaperStore`] is the read/seed interface the HTTP layer depends on.
//! The default implementation is [`sqlite::SqliteStore`].
//!
//! All trait methods use `impl Future` in their signatures so no extra
//! `async-trait` crate is required.

pub mod sqlite;

use std::future::Future;

use crate::error::StoreError;
use crate::paper::{NewPastPaper, PastPaper};
use crate::query::{FilterCriteria, SearchQuery};

pub trait PaperStore: Send + Sync + 'static {
    /// Every record, in store order (ascending `id`).
    fn list_all(&self) -> impl Future<Output = Result<Vec<PastPaper>, StoreError>> + Send;

    /// Records matching every present criterion.
    fn filter(
        &self,
        criteria: &FilterCriteria,
    ) -> impl Future<Output = Result<Vec<PastPaper>, StoreError>> + Send;

    /// Records matching the search term in any searchable field.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<PastPaper>, StoreError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Insert all papers in a single transaction; returns the number inserted.
    fn insert_many(
        &self,
        papers: &[NewPastPaper],
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
