//! The past-paper entity.

use strum::{AsRefStr, Display, EnumString};

/// A row in the `past_papers` table.
///
/// `progress` is conventionally 0–100 and `status` conventionally one of the
/// [`PaperStatus`] values; neither is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastPaper {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub exam_board: String,
    pub year: i64,
    pub paper_num: i64,
    pub progress: i64,
    pub recent_mark: Option<String>,
    pub status: String,
    pub time_taken: Option<String>,
}

/// A record to insert; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPastPaper {
    pub name: String,
    pub subject: String,
    pub exam_board: String,
    pub year: i64,
    pub paper_num: i64,
    pub progress: i64,
    pub recent_mark: Option<String>,
    pub status: String,
    pub time_taken: Option<String>,
}

impl NewPastPaper {
    /// A paper nobody has attempted yet.
    pub fn not_started(
        name: impl Into<String>,
        subject: impl Into<String>,
        exam_board: impl Into<String>,
        year: i64,
        paper_num: i64,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            exam_board: exam_board.into(),
            year,
            paper_num,
            progress: 0,
            recent_mark: None,
            status: PaperStatus::NotStarted.to_string(),
            time_taken: None,
        }
    }

    /// Record an attempt: progress, latest mark and time spent.
    ///
    /// Status follows the progress: 100 is `Completed`, anything else
    /// `In Progress`.
    pub fn attempted(
        self,
        progress: i64,
        recent_mark: impl Into<String>,
        time_taken: impl Into<String>,
    ) -> Self {
        let status = if progress >= 100 {
            PaperStatus::Completed
        } else {
            PaperStatus::InProgress
        };
        Self {
            progress,
            recent_mark: Some(recent_mark.into()),
            status: status.to_string(),
            time_taken: Some(time_taken.into()),
            ..self
        }
    }
}

/// Conventional values of [`PastPaper::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
pub enum PaperStatus {
    #[default]
    #[strum(serialize = "Not Started")]
    NotStarted,
    #[strum(serialize = "In Progress")]
    InProgress,
    #[strum(serialize = "Completed")]
    Completed,
}
