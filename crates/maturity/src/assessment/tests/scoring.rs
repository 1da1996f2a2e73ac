use crate::assessment::catalog::QuestionCatalog;
use crate::assessment::domain::{AnswerStore, Category};
use crate::assessment::scoring::ScoreRecord;

fn answered(entries: &[(u32, u8)]) -> AnswerStore {
    let mut store = AnswerStore::new();
    for (id, score) in entries {
        store.insert(*id, *score);
    }
    store
}

fn uniform(score: u8) -> AnswerStore {
    answered(&(1..=15).map(|id| (id, score)).collect::<Vec<_>>())
}

#[test]
fn all_top_scores_yield_one_hundred_per_category() {
    let catalog = QuestionCatalog::standard();
    let record = ScoreRecord::compute(&uniform(100), &catalog);
    assert_eq!(
        record,
        ScoreRecord {
            technology: 100,
            security: 100,
            analytics: 100
        }
    );
}

#[test]
fn all_zero_scores_yield_zero_per_category() {
    let catalog = QuestionCatalog::standard();
    let record = ScoreRecord::compute(&uniform(0), &catalog);
    assert_eq!(record, ScoreRecord::default());
}

#[test]
fn category_average_rounds_the_sum_over_five() {
    let catalog = QuestionCatalog::standard();
    // Technology sums to 250 -> 50; the other categories are mixed.
    let store = answered(&[
        (1, 0),
        (2, 25),
        (3, 50),
        (4, 75),
        (5, 100),
        (6, 75),
        (7, 100),
        (8, 0),
        (9, 50),
        (10, 25),
        (11, 25),
        (12, 25),
        (13, 25),
        (14, 25),
        (15, 25),
    ]);

    let record = ScoreRecord::compute(&store, &catalog);
    assert_eq!(record.technology, 50);
    assert_eq!(record.security, 50);
    assert_eq!(record.analytics, 25);
}

#[test]
fn averages_stay_independent_across_categories() {
    let catalog = QuestionCatalog::standard();
    let mut store = uniform(0);
    for id in 6..=10 {
        store.insert(id, 100);
    }

    let record = ScoreRecord::compute(&store, &catalog);
    assert_eq!(record.technology, 0);
    assert_eq!(record.security, 100);
    assert_eq!(record.analytics, 0);
}

#[test]
fn unknown_question_ids_are_dropped_without_failing() {
    let catalog = QuestionCatalog::standard();
    let mut store = uniform(50);
    store.insert(999, 100);
    store.insert(42, 100);

    let record = ScoreRecord::compute(&store, &catalog);
    assert_eq!(
        record,
        ScoreRecord {
            technology: 50,
            security: 50,
            analytics: 50
        }
    );
}

#[test]
fn partial_answers_average_lower_instead_of_erroring() {
    let catalog = QuestionCatalog::standard();
    // A single technology answer of 100 averages to 20 over the five slots.
    let record = ScoreRecord::compute(&answered(&[(1, 100)]), &catalog);
    assert_eq!(record.technology, 20);
    assert_eq!(record.security, 0);
    assert_eq!(record.analytics, 0);
}

#[test]
fn score_record_lookup_by_category() {
    let record = ScoreRecord {
        technology: 10,
        security: 20,
        analytics: 30,
    };
    assert_eq!(record.get(Category::Technology), 10);
    assert_eq!(record.get(Category::Security), 20);
    assert_eq!(record.get(Category::Analytics), 30);
}
