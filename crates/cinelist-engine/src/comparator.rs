//! Comparator Registry
//!
//! Sorts are named comparators over a record. Only one sort is active at a
//! time; selecting a name the registry does not know is an error rather than
//! a silent no-op, since that would leave a stale ordering on screen.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use cinelist_core::{EngineError, SortDirection};

/// A shared record comparator.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

// =============================================================================
// Registry
// =============================================================================

/// Registry of named comparators.
pub struct ComparatorRegistry<T> {
    comparators: HashMap<String, Comparator<T>>,
}

impl<T> ComparatorRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            comparators: HashMap::new(),
        }
    }

    /// Register a comparator, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, comparator: Comparator<T>) {
        let name = name.into();
        tracing::debug!("Registered comparator '{}'", name);
        self.comparators.insert(name, comparator);
    }

    /// Register the ascending and descending variants of a keyed comparator
    /// as `{prefix}-asc` and `{prefix}-desc`.
    pub fn register_pair<F>(&mut self, prefix: &str, build: F)
    where
        F: Fn(SortDirection) -> Comparator<T>,
    {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            self.register(format!("{}-{}", prefix, direction.suffix()), build(direction));
        }
    }

    /// Look up a comparator by name.
    pub fn select(&self, name: &str) -> Result<Comparator<T>, EngineError> {
        self.comparators
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownSortKey(name.to_string()))
    }

    /// Check if a comparator with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.comparators.contains_key(name)
    }

    /// Registered comparator names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.comparators.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }
}

impl<T> Default for ComparatorRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Sort by a text field using [`collate`].
pub fn by_text<T, F>(accessor: F, direction: SortDirection) -> Comparator<T>
where
    T: 'static,
    F: Fn(&T) -> &str + Send + Sync + 'static,
{
    Arc::new(move |a: &T, b: &T| direction.apply(collate(accessor(a), accessor(b))))
}

/// Sort by an ISO-8601 date string.
///
/// ISO dates order correctly as plain strings. Records without a date go
/// last in either direction.
pub fn by_date<T, F>(accessor: F, direction: SortDirection) -> Comparator<T>
where
    T: 'static,
    F: Fn(&T) -> Option<&str> + Send + Sync + 'static,
{
    Arc::new(move |a: &T, b: &T| missing_last(accessor(a), accessor(b), direction, |x, y| x.cmp(y)))
}

/// Sort by a numeric field. Missing values go last in either direction.
pub fn by_number<T, F>(accessor: F, direction: SortDirection) -> Comparator<T>
where
    T: 'static,
    F: Fn(&T) -> Option<f64> + Send + Sync + 'static,
{
    Arc::new(move |a: &T, b: &T| missing_last(accessor(a), accessor(b), direction, |x, y| x.total_cmp(&y)))
}

fn missing_last<V>(
    a: Option<V>,
    b: Option<V>,
    direction: SortDirection,
    cmp: impl Fn(V, V) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(cmp(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// =============================================================================
// Collation
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    /// Digit run with leading zeros stripped.
    Number(String),
    Text(String),
}

/// Compare two strings the way a reader expects a title list to be ordered.
///
/// Case, punctuation, whitespace and Latin-1 accents are ignored, and digit
/// runs compare by numeric value, so "Part 2" sorts before "Part 10".
pub fn collate(a: &str, b: &str) -> Ordering {
    let a = collation_key(a);
    let b = collation_key(b);

    for (x, y) in a.iter().zip(b.iter()) {
        let ordering = match (x, y) {
            (Chunk::Number(x), Chunk::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a.len().cmp(&b.len())
}

fn collation_key(s: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Option<Chunk> = None;

    for c in s.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_digit() {
            match &mut current {
                Some(Chunk::Number(digits)) => digits.push(c),
                _ => {
                    if let Some(chunk) = current.take() {
                        chunks.push(chunk);
                    }
                    current = Some(Chunk::Number(c.to_string()));
                }
            }
        } else if c.is_alphanumeric() {
            match &mut current {
                Some(Chunk::Text(text)) => text.push(c),
                _ => {
                    if let Some(chunk) = current.take() {
                        chunks.push(chunk);
                    }
                    current = Some(Chunk::Text(c.to_string()));
                }
            }
        }
    }
    if let Some(chunk) = current {
        chunks.push(chunk);
    }

    for chunk in &mut chunks {
        if let Chunk::Number(digits) = chunk {
            let trimmed = digits.trim_start_matches('0');
            *digits = if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() };
        }
    }

    chunks
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

// =============================================================================
// Tests
// =============================================================================
