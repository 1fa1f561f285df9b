use papertrack_core::PastPaper;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A past-paper record as exposed over HTTP.
///
/// The stored `name` is published as `paper`; progress fields keep the
/// camel-case keys clients already depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PastPaperResponse {
    pub id: i64,
    #[schema(example = "Physics 9702/42 M/J/22")]
    pub paper: String,
    #[schema(example = "Physics")]
    pub subject: String,
    #[schema(example = "Cambridge")]
    pub exam_board: String,
    #[schema(example = 2022)]
    pub year: i64,
    #[schema(example = 2)]
    pub paper_num: i64,
    #[schema(example = 75)]
    pub progress: i64,
    #[serde(rename = "recentMark")]
    #[schema(example = "38/60")]
    pub recent_mark: Option<String>,
    #[schema(example = "In Progress")]
    pub status: String,
    #[serde(rename = "timeTaken")]
    #[schema(example = "45 minutes")]
    pub time_taken: Option<String>,
}

impl From<PastPaper> for PastPaperResponse {
    fn from(p: PastPaper) -> Self {
        Self {
            id: p.id,
            paper: p.name,
            subject: p.subject,
            exam_board: p.exam_board,
            year: p.year,
            paper_num: p.paper_num,
            progress: p.progress,
            recent_mark: p.recent_mark,
            status: p.status,
            time_taken: p.time_taken,
        }
    }
}
