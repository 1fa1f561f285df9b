//! SQLite implementation of [`PaperStore`].
//!
//! The schema lives in `migrations/` and is embedded at compile time via
//! `sqlx::migrate!`, resolved relative to `CARGO_MANIFEST_DIR`. The database
//! file location is a runtime setting.
//!
//! Queries use the runtime-checked `sqlx::query` form so no `DATABASE_URL`
//! is needed at compile time.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use super::PaperStore;
use crate::error::StoreError;
use crate::paper::{NewPastPaper, PastPaper};
use crate::query::{FilterCriteria, SearchQuery};

const SELECT_PAPERS: &str = "SELECT id, name, subject, exam_board, year, paper_num, \
     progress, recent_mark, status, time_taken FROM past_papers";

type PaperRow = (
    i64,
    String,
    String,
    String,
    i64,
    i64,
    i64,
    Option<String>,
    String,
    Option<String>,
);

fn from_row(row: PaperRow) -> PastPaper {
    let (id, name, subject, exam_board, year, paper_num, progress, recent_mark, status, time_taken) =
        row;
    PastPaper {
        id,
        name,
        subject,
        exam_board,
        year,
        paper_num,
        progress,
        recent_mark,
        status,
        time_taken,
    }
}

/// SQLite-backed past-paper store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and apply the schema.
    ///
    /// `url` is a sqlx SQLite URL such as `"sqlite://papertrack.db"`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.apply_schema().await?;
        Ok(store)
    }

    /// A private in-memory database.
    ///
    /// Pinned to one long-lived connection, since every SQLite `:memory:`
    /// connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.apply_schema().await?;
        Ok(store)
    }

    /// Drop every record and the table itself, then recreate the schema.
    ///
    /// Destructive: only meant for development start-up, see
    /// [`crate::seed::init_store`].
    pub async fn reset(&self) -> Result<(), StoreError> {
        info!("dropping past_papers table");
        sqlx::query("DROP TABLE IF EXISTS past_papers")
            .execute(&self.pool)
            .await?;
        sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
            .execute(&self.pool)
            .await?;
        self.apply_schema().await
    }

    /// Close every pooled connection. Later queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn apply_schema(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn fetch(&self, mut qb: QueryBuilder<'_, Sqlite>) -> Result<Vec<PastPaper>, StoreError> {
        qb.push(" ORDER BY id");
        debug!(sql = qb.sql(), "querying past papers");
        let rows: Vec<PaperRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(from_row).collect())
    }
}

impl PaperStore for SqliteStore {
    async fn list_all(&self) -> Result<Vec<PastPaper>, StoreError> {
        self.fetch(QueryBuilder::new(SELECT_PAPERS)).await
    }

    async fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<PastPaper>, StoreError> {
        let mut qb = QueryBuilder::new(SELECT_PAPERS);
        criteria.push_predicates(&mut qb);
        self.fetch(qb).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<PastPaper>, StoreError> {
        let mut qb = QueryBuilder::new(SELECT_PAPERS);
        query.push_predicates(&mut qb);
        self.fetch(qb).await
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM past_papers")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn insert_many(&self, papers: &[NewPastPaper]) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for paper in papers {
            let result = sqlx::query(
                "INSERT INTO past_papers \
                 (name, subject, exam_board, year, paper_num, progress, recent_mark, status, time_taken) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .bind(&paper.name)
            .bind(&paper.subject)
            .bind(&paper.exam_board)
            .bind(paper.year)
            .bind(paper.paper_num)
            .bind(paper.progress)
            .bind(&paper.recent_mark)
            .bind(&paper.status)
            .bind(&paper.time_taken)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
