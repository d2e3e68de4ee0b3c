//! List pages and their bindings.
//!
//! Reviews, viewings, the watchlist and the to-watch list all run the same
//! engine; a `PageKind` supplies the field accessors, filters and sorts that
//! differ between them.

use std::fmt;
use std::str::FromStr;

use cinelist_core::{Record, SortDirection};
use cinelist_engine::comparator::{by_date, by_number, by_text};
use cinelist_engine::{predicate, ListEngine};
use serde::{Deserialize, Serialize};

use super::filters::FilterId;

/// A list page on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Reviews,
    Viewings,
    Watchlist,
    ToWatch,
}

impl PageKind {
    /// Every page kind.
    pub const ALL: [PageKind; 4] = [
        PageKind::Reviews,
        PageKind::Viewings,
        PageKind::Watchlist,
        PageKind::ToWatch,
    ];

    /// Site path of page 1.
    pub fn base_path(self) -> &'static str {
        match self {
            PageKind::Reviews => "/reviews",
            PageKind::Viewings => "/viewings",
            PageKind::Watchlist => "/watchlist",
            PageKind::ToWatch => "/to-watch",
        }
    }

    /// Filter controls shown on the page.
    pub fn filters(self) -> &'static [FilterId] {
        match self {
            PageKind::Reviews => &[
                FilterId::Title,
                FilterId::ReleaseYear,
                FilterId::Grade,
                FilterId::ReviewYear,
            ],
            PageKind::Viewings => &[
                FilterId::Title,
                FilterId::Venue,
                FilterId::Medium,
                FilterId::ReleaseYear,
            ],
            PageKind::Watchlist | PageKind::ToWatch => &[
                FilterId::Title,
                FilterId::Person,
                FilterId::Collection,
                FilterId::ReleaseYear,
            ],
        }
    }

    /// Sort name prefixes offered by the page; each has `-asc` and `-desc`.
    ///
    /// Release dates are year-only, so `release-date` orders by year.
    pub fn sorts(self) -> &'static [&'static str] {
        match self {
            PageKind::Reviews => &["reviewed", "title", "release-date", "grade"],
            PageKind::Viewings => &["viewing-date", "title", "release-date"],
            PageKind::Watchlist | PageKind::ToWatch => &["title", "release-date"],
        }
    }

    /// Sort selected when the page loads.
    pub fn default_sort(self) -> &'static str {
        match self {
            PageKind::Reviews => "reviewed-desc",
            PageKind::Viewings => "viewing-date-desc",
            PageKind::Watchlist | PageKind::ToWatch => "title-asc",
        }
    }

    /// Register the page's comparators and an always-true predicate for
    /// every filter, then select the default sort.
    pub fn install(self, engine: &mut ListEngine<Record>) {
        let comparators = engine.comparators_mut();
        for &prefix in self.sorts() {
            match prefix {
                "title" => comparators.register_pair(prefix, |d| {
                    by_text(|r: &Record| r.sort_key(), d)
                }),
                "release-date" => comparators.register_pair(prefix, |d| {
                    by_number(|r: &Record| r.release_year.map(f64::from), d)
                }),
                "grade" => comparators.register_pair(prefix, |d| {
                    by_number(|r: &Record| r.grade_value(), d)
                }),
                "reviewed" | "viewing-date" => comparators.register_pair(prefix, |d| {
                    by_date(|r: &Record| r.date.as_deref(), d)
                }),
                other => tracing::warn!("No comparator for sort '{}'", other),
            }
        }

        for filter in self.filters() {
            engine.set_filter(filter.name(), predicate::always());
        }

        if let Err(e) = engine.set_sort(self.default_sort()) {
            tracing::error!("Default sort for {} is not registered: {}", self, e);
        }
    }

    /// Sort name for a prefix and direction, e.g. `title-desc`.
    pub fn sort_name(prefix: &str, direction: SortDirection) -> String {
        format!("{}-{}", prefix, direction.suffix())
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Reviews => "reviews",
            PageKind::Viewings => "viewings",
            PageKind::Watchlist => "watchlist",
            PageKind::ToWatch => "to-watch",
        };
        f.write_str(name)
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| format!("unknown page '{}'", s))
    }
}
