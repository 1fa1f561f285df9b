use papertrack_core::query::{ALL_BOARDS, ALL_PAPERS, ALL_SUBJECTS, ALL_YEARS, YearInput};
use papertrack_core::{
    init_store, FilterCriteria, FilterRequest, InitOptions, NewPastPaper, PaperStore, PastPaper,
    SearchQuery, SqliteStore,
};

async fn seeded_store() -> SqliteStore {
    let store = SqliteStore::in_memory().await.expect("open store");
    init_store(&store, InitOptions::default()).await.expect("seed");
    store
}

fn ids(papers: &[PastPaper]) -> Vec<i64> {
    papers.iter().map(|p| p.id).collect()
}

fn filter_request(subject: &str, board: &str, year: &str, paper: &str) -> FilterRequest {
    FilterRequest {
        subject: Some(subject.into()),
        exam_board: Some(board.into()),
        year: Some(YearInput::Text(year.into())),
        paper_type: Some(paper.into()),
    }
}

#[tokio::test]
async fn list_all_returns_every_record_once() {
    let store = seeded_store().await;
    let all = store.list_all().await.unwrap();
    assert_eq!(ids(&all), (1..=12).collect::<Vec<_>>());

    let first = &all[0];
    assert_eq!(first.name, "Physics 9702/42 M/J/22");
    assert_eq!(first.progress, 75);
    assert_eq!(first.recent_mark.as_deref(), Some("38/60"));
    assert_eq!(first.status, "In Progress");
    assert_eq!(first.time_taken.as_deref(), Some("45 minutes"));

    let untouched = &all[2];
    assert_eq!(untouched.status, "Not Started");
    assert_eq!(untouched.recent_mark, None);
}

#[tokio::test]
async fn list_all_is_unaffected_by_queries() {
    let store = seeded_store().await;
    let before = store.list_all().await.unwrap();

    let criteria = filter_request("Physics", ALL_BOARDS, "2023", ALL_PAPERS)
        .validate()
        .unwrap();
    store.filter(&criteria).await.unwrap();
    store.search(&SearchQuery::new("maths")).await.unwrap();

    assert_eq!(store.list_all().await.unwrap(), before);
}

#[tokio::test]
async fn all_sentinels_match_list_all() {
    let store = seeded_store().await;
    let criteria = filter_request(ALL_SUBJECTS, ALL_BOARDS, ALL_YEARS, ALL_PAPERS)
        .validate()
        .unwrap();
    assert_eq!(
        store.filter(&criteria).await.unwrap(),
        store.list_all().await.unwrap()
    );
}

#[tokio::test]
async fn subject_filter_is_exact_and_case_sensitive() {
    let store = seeded_store().await;
    let physics = store
        .filter(&FilterCriteria {
            subject: Some("Physics".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&physics), vec![1, 2, 3, 10]);
    assert!(physics.iter().all(|p| p.subject == "Physics"));

    let lower = store
        .filter(&FilterCriteria {
            subject: Some("physics".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(lower.is_empty());
}

#[tokio::test]
async fn mathematics_scenario_returns_four_records() {
    let store = seeded_store().await;
    let criteria = filter_request("Mathematics", ALL_BOARDS, ALL_YEARS, ALL_PAPERS)
        .validate()
        .unwrap();
    let maths = store.filter(&criteria).await.unwrap();
    assert_eq!(ids(&maths), vec![4, 5, 6, 11]);
    assert_eq!(maths.iter().filter(|p| p.exam_board == "Cambridge").count(), 3);
    assert_eq!(maths.iter().filter(|p| p.exam_board == "Edexcel").count(), 1);
}

#[tokio::test]
async fn criteria_are_anded() {
    let store = seeded_store().await;

    let criteria = filter_request(ALL_SUBJECTS, ALL_BOARDS, "2022", "Paper 3")
        .validate()
        .unwrap();
    assert_eq!(ids(&store.filter(&criteria).await.unwrap()), vec![6, 9]);

    let criteria = filter_request(ALL_SUBJECTS, "Cambridge", "2023", "Paper 1")
        .validate()
        .unwrap();
    assert_eq!(ids(&store.filter(&criteria).await.unwrap()), vec![2, 5, 7]);

    let criteria = filter_request("Computer Science", "AQA", "2022", ALL_PAPERS)
        .validate()
        .unwrap();
    assert!(store.filter(&criteria).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_text_fields_case_insensitively() {
    let store = seeded_store().await;

    let physics = store.search(&SearchQuery::new("physics")).await.unwrap();
    assert_eq!(ids(&physics), vec![1, 2, 3, 10]);
    assert!(physics.iter().any(|p| p.name == "Physics 9702/42 M/J/22"));

    let cambridge = store.search(&SearchQuery::new("CAMBRIDGE")).await.unwrap();
    assert_eq!(ids(&cambridge), (1..=9).collect::<Vec<_>>());

    let science = store.search(&SearchQuery::new("science 96")).await.unwrap();
    assert_eq!(ids(&science), vec![7, 8, 9]);
}

#[tokio::test]
async fn search_year_term_matches_year() {
    let store = seeded_store().await;
    let found = store.search(&SearchQuery::new("2023")).await.unwrap();
    assert_eq!(ids(&found), vec![2, 3, 4, 5, 7, 10, 11, 12]);
    assert!(found.iter().all(|p| p.year == 2023));
}

#[tokio::test]
async fn search_digit_term_matches_paper_number_or_text() {
    let store = seeded_store().await;
    let found = store.search(&SearchQuery::new("3")).await.unwrap();
    // Every paper except the two 2022 papers whose names carry no "3".
    assert_eq!(ids(&found), vec![2, 3, 4, 5, 6, 7, 9, 10, 11, 12]);
    for paper in &found {
        assert!(paper.paper_num == 3 || paper.name.contains('3'), "{}", paper.name);
    }
}

#[tokio::test]
async fn search_empty_term_matches_everything() {
    let store = seeded_store().await;
    assert_eq!(store.search(&SearchQuery::new("")).await.unwrap().len(), 12);
}

#[tokio::test]
async fn search_wildcards_are_literal() {
    let store = seeded_store().await;
    assert!(store.search(&SearchQuery::new("%")).await.unwrap().is_empty());
    assert!(store.search(&SearchQuery::new("_")).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_without_hits_is_empty() {
    let store = seeded_store().await;
    assert!(store.search(&SearchQuery::new("biology")).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_finds_names_with_non_ascii_letters() {
    let store = SqliteStore::in_memory().await.unwrap();
    store
        .insert_many(&[NewPastPaper::not_started(
            "Économie 9708/22 O/N/23",
            "Economics",
            "Cambridge",
            2023,
            2,
        )])
        .await
        .unwrap();

    for term in ["Économie", "ÉCONOMIE 9708", "conomie"] {
        let found = store.search(&SearchQuery::new(term)).await.unwrap();
        assert_eq!(found.len(), 1, "{term}");
    }
}
