//! Category allow-list
//!
//! Maps user-facing category names onto upstream tags. Anything outside the
//! list means "no tag filter".

use std::fmt;
use std::str::FromStr;

/// Recognized quote categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Motivational,
    Success,
    Wisdom,
    Life,
    Business,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Self; 5] = [
        Self::Motivational,
        Self::Success,
        Self::Wisdom,
        Self::Life,
        Self::Business,
    ];

    /// Upstream tag for this category
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Motivational => "motivational",
            Self::Success => "success",
            Self::Wisdom => "wisdom",
            Self::Life => "life",
            Self::Business => "business",
        }
    }

    /// Human readable label for the landing page
    pub const fn label(self) -> &'static str {
        match self {
            Self::Motivational => "Motivational",
            Self::Success => "Success",
            Self::Wisdom => "Wisdom",
            Self::Life => "Life",
            Self::Business => "Business",
        }
    }

    /// Resolve an optional user-supplied category (case-insensitive)
    pub fn resolve(input: Option<&str>) -> Option<Self> {
        input.and_then(|s| s.parse().ok())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_tag() == lower)
            .ok_or(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
