use super::*;
use crate::comparator::{by_date, by_text};
use crate::predicate::{always, range, text};
use cinelist_core::{Record, SortDirection};

fn title(r: &Record) -> Option<&str> {
    Some(r.title.as_str())
}

fn sort_key(r: &Record) -> &str {
    r.sort_key()
}

fn date(r: &Record) -> Option<&str> {
    r.date.as_deref()
}

fn year(r: &Record) -> Option<f64> {
    r.release_year.map(f64::from)
}

/// 95 records: "Film 0" .. "Film 94", dated 2000-01-01 + i days (mod 28).
fn films() -> Vec<Record> {
    (0..95)
        .map(|i| {
            Record::new(i.to_string(), format!("Film {}", i))
                .with_release_year(1950 + (i % 50) as i32)
                .with_date(format!("2000-{:02}-{:02}", 1 + i % 12, 1 + i % 28))
        })
        .collect()
}

fn engine() -> ListEngine<Record> {
    let mut engine = ListEngine::new(films(), 20);
    engine
        .comparators_mut()
        .register_pair("title", |d| by_text(sort_key, d));
    engine
        .comparators_mut()
        .register_pair("date", |d| by_date(date, d));
    engine
}

fn page_ids(engine: &ListEngine<Record>) -> Vec<String> {
    engine.page_items().iter().map(|r| r.id.clone()).collect()
}

#[test]
fn test_new_engine_shows_first_page_in_source_order() {
    let engine = engine();
    assert_eq!(engine.phase(), EnginePhase::Idle);
    assert_eq!(engine.visible_count(), 95);
    assert_eq!(engine.current_page(), 1);
    assert_eq!(engine.page_indices(), (0..20usize).collect::<Vec<_>>().as_slice());
    assert_eq!(engine.active_sort(), None);
}

#[test]
fn test_last_page_is_partial() {
    let mut engine = engine();
    assert_eq!(engine.set_page(5), 5);
    let pagination = engine.pagination();
    assert_eq!(pagination.num_pages, 5);
    assert_eq!((pagination.start, pagination.end), (80, 95));
    assert_eq!(engine.page_items().len(), 15);
}

#[test]
fn test_set_page_clamps() {
    let mut engine = engine();
    assert_eq!(engine.set_page(0), 1);
    assert_eq!(engine.set_page(42), 5);
    assert_eq!(engine.current_page(), 5);
}

#[test]
fn test_filter_resets_to_first_page() {
    let mut engine = engine();
    engine.set_page(3);
    engine.set_filter("title", text(title, "film 1"));

    assert_eq!(engine.current_page(), 1);
    // Film 1, Film 10..19
    assert_eq!(engine.visible_count(), 11);
    assert!(!engine.pagination().shows_controls());
}

#[test]
fn test_filters_combine_with_and() {
    let mut engine = engine();
    engine.set_filter("title", text(title, "film 1"));
    engine.set_filter("year", range(year, 1960.0..=1969.0, 1950.0..=1999.0));

    let records = engine.records().clone();
    for (i, record) in records.iter().enumerate() {
        let expected = record.title.to_lowercase().contains("film 1")
            && record.release_year.is_some_and(|y| (1960..=1969).contains(&y));
        assert_eq!(engine.is_visible(i), expected);
    }
    assert_eq!(engine.visible_count(), engine.visibility().iter().filter(|v| **v).count());
}

#[test]
fn test_same_filter_twice_is_idempotent() {
    let mut engine = engine();
    engine.set_filter("title", text(title, "film 2"));
    let once = engine.ordered().to_vec();
    engine.set_filter("title", text(title, "film 2"));
    assert_eq!(engine.ordered(), once.as_slice());
}

#[test]
fn test_always_predicate_matches_everything() {
    let mut engine = engine();
    engine.set_filter("title", always());
    assert_eq!(engine.visible_count(), 95);
    assert_eq!(engine.predicates().len(), 1);
}

#[test]
fn test_clear_filter_and_reset() {
    let mut engine = engine();
    engine.set_filter("title", text(title, "film 3"));
    engine.set_filter("year", range(year, 1950.0..=1951.0, 1950.0..=1999.0));
    assert!(engine.visible_count() < 95);

    assert!(engine.clear_filter("year"));
    assert!(!engine.clear_filter("year"));
    assert_eq!(engine.visible_count(), 11);

    engine.reset();
    assert!(engine.predicates().is_empty());
    assert_eq!(engine.visible_count(), 95);
    assert_eq!(engine.current_page(), 1);
}

#[test]
fn test_no_matches_is_a_valid_state() {
    let mut engine = engine();
    engine.set_filter("title", text(title, "zzz"));
    assert_eq!(engine.visible_count(), 0);
    assert!(engine.page_items().is_empty());
    let pagination = engine.pagination();
    assert_eq!(pagination.num_pages, 1);
    assert!(!pagination.shows_controls());
}

#[test]
fn test_sort_keeps_page() {
    let mut engine = engine();
    engine.set_page(2);
    engine.set_sort("title-desc").unwrap();
    assert_eq!(engine.current_page(), 2);
    assert_eq!(engine.active_sort(), Some("title-desc"));

    engine.set_page(1);
    // Natural collation: Film 94 first when descending
    assert_eq!(page_ids(&engine)[0], "94");
}

#[test]
fn test_unknown_sort_key_leaves_state_untouched() {
    let mut engine = engine();
    engine.set_sort("date-asc").unwrap();
    let before = engine.snapshot();

    let err = engine.set_sort("rating-asc").unwrap_err();
    assert_eq!(err, EngineError::UnknownSortKey("rating-asc".to_string()));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_sort_is_permutation_of_visible() {
    let mut engine = engine();
    engine.set_filter("year", range(year, 1970.0..=1990.0, 1950.0..=1999.0));
    let mut before = engine.ordered().to_vec();
    engine.set_sort("date-desc").unwrap();
    let mut after = engine.ordered().to_vec();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn test_sort_filter_sort_preserves_relative_order() {
    let mut engine = engine();
    engine.set_sort("date-asc").unwrap();
    let original = engine.ordered().to_vec();

    engine.set_filter("title", text(title, "film 4"));
    engine.set_sort("date-asc").unwrap();
    let filtered = engine.ordered().to_vec();

    let expected: Vec<usize> = original
        .into_iter()
        .filter(|i| filtered.contains(i))
        .collect();
    assert_eq!(filtered, expected);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let records = vec![
        Record::new("a", "Same").with_date("2020-01-01"),
        Record::new("b", "Same").with_date("2020-01-01"),
        Record::new("c", "Other").with_date("2019-01-01"),
        Record::new("d", "Same").with_date("2020-01-01"),
    ];
    let mut engine = ListEngine::new(records, 10);
    engine.register_comparator("date-desc", by_date(date, SortDirection::Desc));
    engine.set_sort("date-desc").unwrap();
    assert_eq!(page_ids(&engine), vec!["a", "b", "d", "c"]);
}

#[test]
fn test_subscribers_see_snapshots() {
    let mut engine = engine();
    let mut rx = engine.subscribe();
    assert_eq!(rx.borrow().visible_count, 95);
    assert!(!rx.has_changed().unwrap());

    engine.set_filter("title", text(title, "film 9"));
    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.visible_count, 6);
    assert_eq!(snapshot.page_indices, engine.page_indices());

    // Same page again publishes nothing new
    engine.set_page(1);
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn test_snapshot_serializes_for_templates() {
    let mut engine = engine();
    engine.set_sort("title-asc").unwrap();
    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["visibleCount"], 95);
    assert_eq!(json["sort"], "title-asc");
    assert_eq!(json["pagination"]["numPages"], 5);
    assert_eq!(json["pagination"]["nextPage"], 2);
}
