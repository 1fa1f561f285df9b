//! One-time store initialisation.
//!
//! [`init_store`] is called once by the hosting process at start-up. It never
//! runs on a request path, and it only wipes data when the caller explicitly
//! opts in through [`InitOptions::allow_destructive_reset`].

use tracing::{info, warn};

use crate::error::StoreError;
use crate::paper::NewPastPaper;
use crate::store::sqlite::SqliteStore;
use crate::store::PaperStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOptions {
    /// Drop all existing records before seeding. Development only.
    pub allow_destructive_reset: bool,
    /// Insert the demonstration papers when the store is empty.
    pub seed_if_empty: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            allow_destructive_reset: false,
            seed_if_empty: true,
        }
    }
}

/// What [`init_store`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitReport {
    pub reset: bool,
    pub inserted: u64,
}

pub async fn init_store(store: &SqliteStore, options: InitOptions) -> Result<InitReport, StoreError> {
    let mut report = InitReport::default();

    if options.allow_destructive_reset {
        warn!("destructive reset requested; all past-paper records will be dropped");
        store.reset().await?;
        report.reset = true;
    }

    if options.seed_if_empty {
        let existing = store.count().await?;
        if existing == 0 {
            report.inserted = store.insert_many(&sample_papers()).await?;
            info!(inserted = report.inserted, "sample past papers added");
        } else {
            info!(existing, "store already populated; skipping seed");
        }
    }

    Ok(report)
}

/// The demonstration data set.
pub fn sample_papers() -> Vec<NewPastPaper> {
    vec![
        // Physics
        NewPastPaper::not_started("Physics 9702/42 M/J/22", "Physics", "Cambridge", 2022, 2)
            .attempted(75, "38/60", "45 minutes"),
        NewPastPaper::not_started("Physics 9702/41 O/N/23", "Physics", "Cambridge", 2023, 1)
            .attempted(100, "52/60", "1 hour 15 minutes"),
        NewPastPaper::not_started("Physics 9702/43 M/J/23", "Physics", "Cambridge", 2023, 3),
        // Mathematics
        NewPastPaper::not_started("Mathematics 9709/32 O/N/23", "Mathematics", "Cambridge", 2023, 2)
            .attempted(100, "72/75", "1 hour 30 minutes"),
        NewPastPaper::not_started("Mathematics 9709/31 M/J/23", "Mathematics", "Cambridge", 2023, 1)
            .attempted(45, "35/75", "50 minutes"),
        NewPastPaper::not_started("Mathematics 9709/33 M/J/22", "Mathematics", "Cambridge", 2022, 3)
            .attempted(100, "68/75", "1 hour 25 minutes"),
        // Computer Science
        NewPastPaper::not_started(
            "Computer Science 9618/41 M/J/23",
            "Computer Science",
            "Cambridge",
            2023,
            1,
        ),
        NewPastPaper::not_started(
            "Computer Science 9618/42 O/N/22",
            "Computer Science",
            "Cambridge",
            2022,
            2,
        )
        .attempted(85, "68/75", "1 hour 10 minutes"),
        NewPastPaper::not_started(
            "Computer Science 9618/43 M/J/22",
            "Computer Science",
            "Cambridge",
            2022,
            3,
        )
        .attempted(100, "71/75", "1 hour 20 minutes"),
        // Other boards
        NewPastPaper::not_started("Physics IAL WPH14/01 Jan/23", "Physics", "Edexcel", 2023, 1)
            .attempted(60, "45/80", "1 hour"),
        NewPastPaper::not_started("Mathematics IAL WMA14/01 Jun/23", "Mathematics", "Edexcel", 2023, 1)
            .attempted(100, "87/100", "1 hour 45 minutes"),
        NewPastPaper::not_started("Computer Science 7517/2 Jun/23", "Computer Science", "AQA", 2023, 2),
    ]
}
