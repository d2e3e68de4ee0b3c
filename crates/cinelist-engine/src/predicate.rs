//! Predicate Registry
//!
//! Filters are named predicates over a record. Registering a predicate under a
//! name that is already taken replaces the old one, so each filter control owns
//! exactly one slot. A record is visible when every registered predicate
//! accepts it; with no predicates everything is visible.
//!
//! ## Builders
//!
//! - [`always`] - accepts everything (empty text box, "All", full range)
//! - [`text`] - case-insensitive literal substring match
//! - [`range`] - inclusive numeric range
//! - [`equals`] - select box over a single-valued field
//! - [`includes`] - select box over a multi-valued field

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use regex::RegexBuilder;

/// A shared record predicate.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

// =============================================================================
// Registry
// =============================================================================

/// Registry of named predicates combined with logical AND.
pub struct PredicateRegistry<T> {
    predicates: BTreeMap<String, Predicate<T>>,
}

impl<T> PredicateRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            predicates: BTreeMap::new(),
        }
    }

    /// Register a predicate, replacing any previous one with the same name.
    ///
    /// Returns the replaced predicate, if any.
    pub fn register(&mut self, name: impl Into<String>, predicate: Predicate<T>) -> Option<Predicate<T>> {
        let name = name.into();
        let old = self.predicates.insert(name.clone(), predicate);
        tracing::debug!(
            "{} predicate '{}' ({} active)",
            if old.is_some() { "Replaced" } else { "Registered" },
            name,
            self.predicates.len()
        );
        old
    }

    /// Remove a predicate by name.
    ///
    /// Returns true if a predicate was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.predicates.remove(name).is_some()
    }

    /// Remove every predicate.
    pub fn clear(&mut self) {
        self.predicates.clear();
    }

    /// Evaluate the combined predicate for a record.
    pub fn evaluate(&self, record: &T) -> bool {
        self.predicates.values().all(|p| p(record))
    }

    /// Check if a predicate is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Registered predicate names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.predicates.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<T> Default for PredicateRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Builders
// =============================================================================

/// The always-true predicate.
pub fn always<T: 'static>() -> Predicate<T> {
    Arc::new(|_: &T| true)
}

/// Case-insensitive substring match against one text field.
///
/// The query is escaped before compiling, so it always matches literally,
/// surrounding whitespace included. An empty or whitespace-only query matches
/// everything; a missing field never matches any other query.
pub fn text<T, F>(accessor: F, query: &str) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> Option<&str> + Send + Sync + 'static,
{
    if query.trim().is_empty() {
        return always();
    }

    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(regex) => Arc::new(move |record: &T| accessor(record).is_some_and(|v| regex.is_match(v))),
        Err(e) => {
            tracing::warn!("Text filter fell back to plain matching: {}", e);
            let needle = query.to_lowercase();
            Arc::new(move |record: &T| {
                accessor(record).is_some_and(|v| v.to_lowercase().contains(&needle))
            })
        }
    }
}

/// Inclusive numeric range over one field.
///
/// When `selected` covers `bounds` the predicate is always-true, so records
/// lacking the field stay visible until the user narrows the range.
pub fn range<T, F>(accessor: F, selected: RangeInclusive<f64>, bounds: RangeInclusive<f64>) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> Option<f64> + Send + Sync + 'static,
{
    if selected.start() <= bounds.start() && selected.end() >= bounds.end() {
        return always();
    }

    Arc::new(move |record: &T| accessor(record).is_some_and(|v| selected.contains(&v)))
}

/// Select-box filter over a single-valued field.
///
/// `None`, an empty string or "All" match everything.
pub fn equals<T, F>(accessor: F, selection: Option<&str>) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> Option<&str> + Send + Sync + 'static,
{
    let Some(wanted) = selection.and_then(specific_selection) else {
        return always();
    };

    Arc::new(move |record: &T| accessor(record).is_some_and(|v| v.eq_ignore_ascii_case(&wanted)))
}

/// Select-box filter over a multi-valued field such as people or collections.
///
/// `None`, an empty string or "All" match everything.
pub fn includes<T, F>(accessor: F, selection: Option<&str>) -> Predicate<T>
where
    T: 'static,
    F: Fn(&T) -> &[String] + Send + Sync + 'static,
{
    let Some(wanted) = selection.and_then(specific_selection) else {
        return always();
    };

    Arc::new(move |record: &T| accessor(record).iter().any(|v| v.eq_ignore_ascii_case(&wanted)))
}

fn specific_selection(selection: &str) -> Option<String> {
    let selection = selection.trim();
    if selection.is_empty() || selection.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(selection.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cinelist_core::Record;

    fn title(r: &Record) -> Option<&str> {
        Some(r.title.as_str())
    }

    fn year(r: &Record) -> Option<f64> {
        r.release_year.map(f64::from)
    }

    fn venue(r: &Record) -> Option<&str> {
        r.venue.as_deref()
    }

    fn people(r: &Record) -> &[String] {
        r.people.as_slice()
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new("1", "Se7en").with_release_year(1995),
            Record::new("2", "Rio Bravo").with_release_year(1959),
            Record::new("3", "a.b*c"),
            Record::new("4", "Seven Samurai").with_release_year(1954),
        ]
    }

    #[test]
    fn test_empty_registry_matches_everything() {
        let registry = PredicateRegistry::<Record>::new();
        assert!(registry.is_empty());
        assert!(records().iter().all(|r| registry.evaluate(r)));
    }

    #[test]
    fn test_evaluate_is_and_of_predicates() {
        let mut registry = PredicateRegistry::new();
        registry.register("title", text(title, "se"));
        registry.register("year", range(year, 1990.0..=2000.0, 1950.0..=2000.0));

        let records = records();
        for r in &records {
            let expected = title(r).unwrap().to_lowercase().contains("se")
                && r.release_year.is_some_and(|y| (1990..=2000).contains(&y));
            assert_eq!(registry.evaluate(r), expected, "record {}", r.id);
        }
    }

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = PredicateRegistry::new();
        assert!(registry.register("title", text(title, "rio")).is_none());
        assert!(registry.register("title", text(title, "seven")).is_some());
        assert_eq!(registry.len(), 1);

        let visible: Vec<_> = records()
            .into_iter()
            .filter(|r| registry.evaluate(r))
            .map(|r| r.id)
            .collect();
        assert_eq!(visible, vec!["4"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = PredicateRegistry::new();
        registry.register("a", always::<Record>());
        registry.register("b", always::<Record>());
        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert_eq!(registry.names(), vec!["b".to_string()]);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_text_matches_case_insensitively() {
        let p = text(title, "SE7EN");
        assert!(p(&Record::new("1", "Se7en")));
        assert!(!p(&Record::new("2", "Seven")));
    }

    #[test]
    fn test_text_escapes_metacharacters() {
        let p = text(title, "a.b*c");
        assert!(p(&Record::new("1", "a.b*c")));
        assert!(!p(&Record::new("2", "axbbbc")));

        for query in ["(", "[", "\\", "*?", "+)"] {
            let p = text(title, query);
            assert!(p(&Record::new("x", format!("before {} after", query))));
        }
    }

    #[test]
    fn test_text_keeps_trailing_space() {
        let p = text(title, "film 1 ");
        assert!(p(&Record::new("1", "Film 1 (1999)")));
        assert!(!p(&Record::new("2", "Film 10")));
    }

    #[test]
    fn test_empty_text_matches_everything() {
        let p = text(title, "   ");
        assert!(records().iter().all(|r| p(r)));
    }

    #[test]
    fn test_range_full_bounds_is_always_true() {
        let p = range(year, 1950.0..=2000.0, 1950.0..=2000.0);
        // Record without a year is still visible
        assert!(p(&Record::new("3", "a.b*c")));
    }

    #[test]
    fn test_range_is_inclusive() {
        let p = range(year, 1954.0..=1959.0, 1950.0..=2000.0);
        assert!(p(&Record::new("a", "x").with_release_year(1954)));
        assert!(p(&Record::new("b", "x").with_release_year(1959)));
        assert!(!p(&Record::new("c", "x").with_release_year(1960)));
        assert!(!p(&Record::new("d", "x")));
    }

    #[test]
    fn test_equals_all_matches_everything() {
        assert!(equals(venue, None)(&Record::new("1", "x")));
        assert!(equals(venue, Some("All"))(&Record::new("1", "x")));

        let p = equals(venue, Some("alamo drafthouse"));
        assert!(p(&Record::new("1", "x").with_venue("Alamo Drafthouse")));
        assert!(!p(&Record::new("2", "x").with_venue("Criterion Channel")));
        assert!(!p(&Record::new("3", "x")));
    }

    #[test]
    fn test_includes_multi_valued_field() {
        let p = includes(people, Some("Howard Hawks"));
        assert!(p(&Record::new("1", "Rio Bravo")
            .with_person("John Wayne")
            .with_person("Howard Hawks")));
        assert!(!p(&Record::new("2", "Se7en").with_person("David Fincher")));
        assert!(includes(people, Some(""))(&Record::new("3", "x")));
    }
}
