//! Filter controls and the predicates they install.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use cinelist_core::Record;
use cinelist_engine::comparator::collate;
use cinelist_engine::{predicate, Predicate};
use serde::{Deserialize, Serialize};

use crate::error::ControlError;

/// A filter control. The name doubles as the predicate registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterId {
    Title,
    ReleaseYear,
    Grade,
    ReviewYear,
    Venue,
    Medium,
    Person,
    Collection,
}

/// Value coming out of a filter control.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput {
    Text(String),
    Range(RangeInclusive<f64>),
    /// `None` or "All" selects everything.
    Select(Option<String>),
}

impl FilterId {
    pub fn name(self) -> &'static str {
        match self {
            FilterId::Title => "title",
            FilterId::ReleaseYear => "release-year",
            FilterId::Grade => "grade",
            FilterId::ReviewYear => "review-year",
            FilterId::Venue => "venue",
            FilterId::Medium => "medium",
            FilterId::Person => "person",
            FilterId::Collection => "collection",
        }
    }

    /// Whether the control is a min/max range.
    pub fn is_range(self) -> bool {
        matches!(self, FilterId::ReleaseYear | FilterId::Grade | FilterId::ReviewYear)
    }

    /// Whether the control is a select box.
    pub fn is_select(self) -> bool {
        matches!(
            self,
            FilterId::Venue | FilterId::Medium | FilterId::Person | FilterId::Collection
        )
    }

    /// Numeric field read by a range control.
    pub fn number(self, record: &Record) -> Option<f64> {
        match self {
            FilterId::ReleaseYear => record.release_year.map(f64::from),
            FilterId::Grade => record.grade_value(),
            FilterId::ReviewYear => record.date_year().map(f64::from),
            _ => None,
        }
    }

    /// Build the predicate for a control value.
    ///
    /// Range controls need the bounds of the loaded list so that a full
    /// selection installs the always-true predicate.
    pub fn predicate(
        self,
        input: &FilterInput,
        bounds: &FilterBounds,
    ) -> Result<Predicate<Record>, ControlError> {
        let predicate = match (self, input) {
            (FilterId::Title, FilterInput::Text(query)) => predicate::text(title, query),
            (id, FilterInput::Range(selected)) if id.is_range() => match bounds.get(id) {
                Some(full) => predicate::range(
                    move |r: &Record| id.number(r),
                    selected.clone(),
                    full,
                ),
                // Nothing in the list carries this field.
                None => predicate::always(),
            },
            (FilterId::Venue, FilterInput::Select(choice)) => {
                predicate::equals(venue, choice.as_deref())
            }
            (FilterId::Medium, FilterInput::Select(choice)) => {
                predicate::equals(medium, choice.as_deref())
            }
            (FilterId::Person, FilterInput::Select(choice)) => {
                predicate::includes(people, choice.as_deref())
            }
            (FilterId::Collection, FilterInput::Select(choice)) => {
                predicate::includes(collections, choice.as_deref())
            }
            (id, _) => {
                return Err(ControlError::InputMismatch {
                    filter: id.name(),
                    expected: id.expected_input(),
                })
            }
        };
        Ok(predicate)
    }

    /// Distinct values offered by a select control, in collation order.
    pub fn options(self, records: &[Record]) -> Vec<String> {
        let mut values: Vec<String> = match self {
            FilterId::Venue => records.iter().filter_map(|r| r.venue.clone()).collect(),
            FilterId::Medium => records.iter().filter_map(|r| r.medium.clone()).collect(),
            FilterId::Person => records.iter().flat_map(|r| r.people.iter().cloned()).collect(),
            FilterId::Collection => records
                .iter()
                .flat_map(|r| r.collections.iter().cloned())
                .collect(),
            _ => Vec::new(),
        };
        values.sort_by(|a, b| collate(a, b).then_with(|| a.cmp(b)));
        values.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        values
    }

    fn expected_input(self) -> &'static str {
        if self.is_range() {
            "range"
        } else if self.is_select() {
            "select"
        } else {
            "text"
        }
    }
}

fn title(record: &Record) -> Option<&str> {
    Some(&record.title)
}

fn venue(record: &Record) -> Option<&str> {
    record.venue.as_deref()
}

fn medium(record: &Record) -> Option<&str> {
    record.medium.as_deref()
}

fn people(record: &Record) -> &[String] {
    &record.people
}

fn collections(record: &Record) -> &[String] {
    &record.collections
}

/// Min/max of every range control, measured once per loaded list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBounds {
    bounds: HashMap<FilterId, RangeInclusive<f64>>,
}

impl FilterBounds {
    pub fn from_records(records: &[Record], filters: &[FilterId]) -> Self {
        let mut bounds = HashMap::new();
        for &id in filters.iter().filter(|id| id.is_range()) {
            let mut values = records.iter().filter_map(|r| id.number(r));
            let Some(first) = values.next() else {
                continue;
            };
            let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
            bounds.insert(id, min..=max);
        }
        Self { bounds }
    }

    pub fn get(&self, id: FilterId) -> Option<RangeInclusive<f64>> {
        self.bounds.get(&id).cloned()
    }
}
