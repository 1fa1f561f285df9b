//! Filter and search query construction.
//!
//! Request payloads are validated into [`FilterCriteria`] / [`SearchQuery`],
//! which know how to append their predicates to a `sqlx` [`QueryBuilder`].
//! Nothing here touches the database directly.

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;
use utoipa::ToSchema;

pub const ALL_SUBJECTS: &str = "All Subjects";
pub const ALL_BOARDS: &str = "All Boards";
pub const ALL_YEARS: &str = "All Years";
pub const ALL_PAPERS: &str = "All Papers";

/// Validation failures for a filter request.
///
/// The `Display` text is the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("No filter data provided")]
    MissingCriteria,
    #[error("Invalid year format")]
    InvalidYear,
    #[error("Invalid paper type format")]
    InvalidPaperType,
}

/// A year criterion as sent by clients: either `"2023"` or `2023`.
///
/// Any other JSON value is kept so validation can reject it as a bad year
/// rather than a bad payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

/// Body of `POST /api/past-papers/filter`.
///
/// Every field is optional; a missing field, `null`, or the field's
/// "All …" sentinel imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterRequest {
    #[schema(example = "Physics")]
    pub subject: Option<String>,
    #[schema(example = "Cambridge")]
    pub exam_board: Option<String>,
    #[schema(value_type = Option<String>, example = "2023")]
    pub year: Option<YearInput>,
    /// `"<label> <number>"`, e.g. `"Paper 2"`.
    #[schema(example = "Paper 2")]
    pub paper_type: Option<String>,
}

impl FilterRequest {
    /// Drop sentinel values and parse the numeric criteria.
    pub fn validate(self) -> Result<FilterCriteria, FilterError> {
        let year = match self.year {
            None => None,
            Some(YearInput::Number(n)) => Some(n),
            Some(YearInput::Text(t)) if t == ALL_YEARS => None,
            Some(YearInput::Text(t)) => {
                Some(t.trim().parse::<i64>().map_err(|_| FilterError::InvalidYear)?)
            }
            Some(YearInput::Other(_)) => return Err(FilterError::InvalidYear),
        };

        let paper_num = match self.paper_type.as_deref() {
            None | Some(ALL_PAPERS) => None,
            Some(raw) => Some(parse_paper_number(raw)?),
        };

        Ok(FilterCriteria {
            subject: self.subject.filter(|s| s != ALL_SUBJECTS),
            exam_board: self.exam_board.filter(|b| b != ALL_BOARDS),
            year,
            paper_num,
        })
    }
}

/// `"Paper 2"` → `2`. The number is the second space-separated piece.
fn parse_paper_number(raw: &str) -> Result<i64, FilterError> {
    raw.split(' ')
        .nth(1)
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or(FilterError::InvalidPaperType)
}

/// Validated exact-match criteria, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub subject: Option<String>,
    pub exam_board: Option<String>,
    pub year: Option<i64>,
    pub paper_num: Option<i64>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.subject.is_none()
            && self.exam_board.is_none()
            && self.year.is_none()
            && self.paper_num.is_none()
    }

    /// Append ` WHERE a = ? AND b = ? …` for every present criterion.
    pub fn push_predicates(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut sep = " WHERE ";
        if let Some(subject) = &self.subject {
            qb.push(sep).push("subject = ").push_bind(subject.clone());
            sep = " AND ";
        }
        if let Some(board) = &self.exam_board {
            qb.push(sep).push("exam_board = ").push_bind(board.clone());
            sep = " AND ";
        }
        if let Some(year) = self.year {
            qb.push(sep).push("year = ").push_bind(year);
            sep = " AND ";
        }
        if let Some(paper_num) = self.paper_num {
            qb.push(sep).push("paper_num = ").push_bind(paper_num);
        }
    }
}

/// Body of `POST /api/past-papers/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    #[schema(example = "physics")]
    pub search_term: Option<String>,
}

/// A case-folded free-text search term plus its numeric readings.
///
/// Folding is ASCII-only to agree with SQLite's `LOWER`, so non-ASCII
/// letters are compared as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    year: Option<i64>,
    paper_num: Option<i64>,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        let term = raw.to_ascii_lowercase();
        let year = term.trim().parse::<i64>().ok();
        let paper_num = if !term.is_empty() && term.chars().all(|c| c.is_ascii_digit()) {
            term.parse::<i64>().ok()
        } else {
            None
        };
        Self { term, year, paper_num }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// The term read as a year, if it is an integer.
    pub fn year(&self) -> Option<i64> {
        self.year
    }

    /// The term read as a paper number, if it is made only of digits.
    pub fn paper_num(&self) -> Option<i64> {
        self.paper_num
    }

    /// Append ` WHERE (… OR …)` matching any text field or numeric reading.
    pub fn push_predicates(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let pattern = format!("%{}%", escape_like(&self.term));

        qb.push(" WHERE (");
        for (i, column) in ["name", "subject", "exam_board"].into_iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push("LOWER(")
                .push(column)
                .push(") LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }
        if let Some(year) = self.year {
            qb.push(" OR year = ").push_bind(year);
        }
        if let Some(paper_num) = self.paper_num {
            qb.push(" OR paper_num = ").push_bind(paper_num);
        }
        qb.push(")");
    }
}

/// Escape LIKE metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn request(subject: &str, board: &str, year: &str, paper: &str) -> FilterRequest {
        FilterRequest {
            subject: Some(subject.into()),
            exam_board: Some(board.into()),
            year: Some(YearInput::Text(year.into())),
            paper_type: Some(paper.into()),
        }
    }

    #[test]
    fn sentinels_impose_no_constraint() {
        let criteria = request(ALL_SUBJECTS, ALL_BOARDS, ALL_YEARS, ALL_PAPERS)
            .validate()
            .unwrap();
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn absent_fields_impose_no_constraint() {
        let criteria = FilterRequest::default().validate().unwrap();
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn concrete_values_are_parsed() {
        let criteria = request("Physics", "Edexcel", " 2023 ", "Paper 2").validate().unwrap();
        assert_eq!(
            criteria,
            FilterCriteria {
                subject: Some("Physics".into()),
                exam_board: Some("Edexcel".into()),
                year: Some(2023),
                paper_num: Some(2),
            }
        );
    }

    #[test]
    fn numeric_year_is_accepted() {
        let req: FilterRequest = serde_json::from_str(r#"{"year": 2022}"#).unwrap();
        assert_eq!(req.validate().unwrap().year, Some(2022));
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        let err = request(ALL_SUBJECTS, ALL_BOARDS, "not-a-number", ALL_PAPERS)
            .validate()
            .unwrap_err();
        assert_eq!(err, FilterError::InvalidYear);
        assert_eq!(err.to_string(), "Invalid year format");
    }

    #[test]
    fn non_textual_year_is_rejected_as_bad_year() {
        for raw in [r#"{"year": 20.5}"#, r#"{"year": true}"#, r#"{"year": [2023]}"#] {
            let req: FilterRequest = serde_json::from_str(raw).unwrap();
            assert_eq!(req.validate().unwrap_err(), FilterError::InvalidYear, "{raw}");
        }
    }

    #[test]
    fn malformed_paper_type_is_rejected() {
        for bad in ["Paper", "Paper x", "Paper  2", ""] {
            let err = request(ALL_SUBJECTS, ALL_BOARDS, ALL_YEARS, bad)
                .validate()
                .unwrap_err();
            assert_eq!(err, FilterError::InvalidPaperType, "input {bad:?}");
        }
        assert_eq!(FilterError::InvalidPaperType.to_string(), "Invalid paper type format");
    }

    #[test]
    fn paper_type_uses_second_piece_only() {
        let criteria = request(ALL_SUBJECTS, ALL_BOARDS, ALL_YEARS, "Paper 3 extended")
            .validate()
            .unwrap();
        assert_eq!(criteria.paper_num, Some(3));
    }

    #[test]
    fn null_fields_deserialize_as_absent() {
        let req: FilterRequest =
            serde_json::from_str(r#"{"subject": null, "paper_type": null}"#).unwrap();
        assert!(req.validate().unwrap().is_unconstrained());
    }

    #[test]
    fn search_term_is_case_folded() {
        let q = SearchQuery::new("PhYsIcs");
        assert_eq!(q.term(), "physics");
        assert_eq!(q.year(), None);
        assert_eq!(q.paper_num(), None);
    }

    #[test]
    fn case_folding_leaves_non_ascii_letters_alone() {
        assert_eq!(SearchQuery::new("ÉCONOMIE 9708").term(), "Économie 9708");
    }

    #[test]
    fn digit_term_reads_as_year_and_paper_number() {
        let q = SearchQuery::new("2023");
        assert_eq!(q.year(), Some(2023));
        assert_eq!(q.paper_num(), Some(2023));
    }

    #[test]
    fn signed_term_reads_as_year_only() {
        let q = SearchQuery::new("-3");
        assert_eq!(q.year(), Some(-3));
        assert_eq!(q.paper_num(), None);
    }

    #[test]
    fn empty_term_has_no_numeric_reading() {
        let q = SearchQuery::new("");
        assert_eq!(q.year(), None);
        assert_eq!(q.paper_num(), None);
    }

    #[test]
    fn filter_sql_ands_present_criteria() {
        let criteria = FilterCriteria {
            subject: Some("Physics".into()),
            year: Some(2023),
            ..Default::default()
        };
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM past_papers");
        criteria.push_predicates(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT id FROM past_papers WHERE subject = ? AND year = ?"
        );
    }

    #[test]
    fn unconstrained_filter_adds_no_where_clause() {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM past_papers");
        FilterCriteria::default().push_predicates(&mut qb);
        assert_eq!(qb.sql(), "SELECT id FROM past_papers");
    }

    #[test]
    fn search_sql_includes_numeric_arms_only_when_numeric() {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM past_papers");
        SearchQuery::new("maths").push_predicates(&mut qb);
        let sql = qb.sql();
        assert_eq!(sql.matches("LIKE").count(), 3);
        assert!(!sql.contains("year ="));
        assert!(!sql.contains("paper_num ="));

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM past_papers");
        SearchQuery::new("3").push_predicates(&mut qb);
        let sql = qb.sql();
        assert!(sql.contains(" OR year = ?"));
        assert!(sql.contains(" OR paper_num = ?"));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
