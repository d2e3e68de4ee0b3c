//! Letter grades.
//!
//! Reviews carry a letter grade from `A+` down to `F`. Range filters and
//! grade sorts work on the numeric scale: `A+` = 13 down to `F` = 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Grade(u8);

impl Grade {
    /// Highest grade value (`A+`).
    pub const MAX: u8 = 13;
    /// Lowest grade value (`F`).
    pub const MIN: u8 = 1;

    /// Numeric value on the 1..=13 scale.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Build a grade from its numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or_else(|| "empty grade".to_string())?
            .to_ascii_uppercase();

        let base = match letter {
            'A' => 12,
            'B' => 9,
            'C' => 6,
            'D' => 3,
            'F' => 1,
            other => return Err(format!("unknown grade letter '{}'", other)),
        };

        let value = match (letter, chars.as_str()) {
            (_, "") => base,
            ('F', _) => return Err(format!("invalid grade '{}'", s)),
            (_, "+") => base + 1,
            (_, "-") => base - 1,
            _ => return Err(format!("invalid grade '{}'", s)),
        };

        Ok(Self(value))
    }
}

impl TryFrom<String> for Grade {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            return write!(f, "F");
        }
        let letter = match (self.0 - 2) / 3 {
            3 => 'A',
            2 => 'B',
            1 => 'C',
            _ => 'D',
        };
        let modifier = match (self.0 - 2) % 3 {
            0 => "-",
            1 => "",
            _ => "+",
        };
        write!(f, "{}{}", letter, modifier)
    }
}
