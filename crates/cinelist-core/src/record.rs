//! Record type for list entries.

use serde::{Deserialize, Serialize};

use crate::grade::Grade;

/// A record is one displayable list entry.
///
/// Reviews, viewings and watchlist titles all share this shape; fields a
/// page has no use for are simply absent. Records are read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier within the list.
    pub id: String,

    /// Display title, e.g. "The Man Who Shot Liberty Valance (1962)".
    pub title: String,

    /// Title used for sorting, e.g. "Man Who Shot Liberty Valance, The".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_title: Option<String>,

    /// URL slug of the title page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,

    /// Review or viewing date as an ISO-8601 `YYYY-MM-DD` string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Where it was watched (theater or service).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    /// Format it was watched in, e.g. "Blu-ray".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,

    /// Associated people (directors, performers, writers).
    #[serde(default)]
    pub people: Vec<String>,

    /// Collections the title belongs to.
    #[serde(default)]
    pub collections: Vec<String>,
}

impl Record {
    /// Create a new record with required fields.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sort_title: None,
            slug: None,
            release_year: None,
            date: None,
            venue: None,
            medium: None,
            grade: None,
            people: Vec::new(),
            collections: Vec::new(),
        }
    }

    /// Title to sort by, falling back to the display title.
    pub fn sort_key(&self) -> &str {
        self.sort_title.as_deref().unwrap_or(&self.title)
    }

    /// Year part of the review/viewing date.
    pub fn date_year(&self) -> Option<i32> {
        self.date.as_deref()?.get(..4)?.parse().ok()
    }

    /// Numeric grade value for range filters and sorting.
    pub fn grade_value(&self) -> Option<f64> {
        self.grade.map(|g| f64::from(g.value()))
    }

    pub fn with_sort_title(mut self, sort_title: impl Into<String>) -> Self {
        self.sort_title = Some(sort_title.into());
        self
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn with_person(mut self, person: impl Into<String>) -> Self {
        self.people.push(person.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collections.push(collection.into());
        self
    }
}
