//! Relationship categories and the link buckets keyed by them

use super::NodeId;
use std::fmt;
use std::str::FromStr;

/// One of the six relationship categories, formed from the `uninfected` and
/// `infected` columns of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// `++`
    PlusPlus,
    /// `+-`
    PlusMinus,
    /// `-+`
    MinusPlus,
    /// `--`
    MinusMinus,
    /// `?+`
    UnknownPlus,
    /// `?-`
    UnknownMinus,
}

impl Category {
    /// All categories in drawing and legend order
    pub const ALL: [Self; 6] = [
        Self::PlusPlus,
        Self::PlusMinus,
        Self::MinusPlus,
        Self::MinusMinus,
        Self::UnknownPlus,
        Self::UnknownMinus,
    ];

    /// The two-character code, e.g. `"+-"`
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PlusPlus => "++",
            Self::PlusMinus => "+-",
            Self::MinusPlus => "-+",
            Self::MinusMinus => "--",
            Self::UnknownPlus => "?+",
            Self::UnknownMinus => "?-",
        }
    }

    /// Position in [`Category::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Recognise a code. Anything outside the six codes yields `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Category of a row given its `uninfected` and `infected` fields
    #[must_use]
    pub fn from_columns(uninfected: &str, infected: &str) -> Option<Self> {
        Self::from_code(&format!("{uninfected}{infected}"))
    }

    /// Legend text: the two characters joined by an arrow (`+→-`)
    #[must_use]
    pub fn legend_label(self) -> String {
        let mut chars = self.code().chars();
        let before = chars.next().unwrap_or_default();
        let after = chars.next().unwrap_or_default();
        format!("{before}\u{2192}{after}")
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown category code: '{s}'"))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A directed link between two taxonomy nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRecord {
    /// Node resolved from the `source` column
    pub source: NodeId,
    /// Node resolved from the `target` column
    pub target: NodeId,
}

/// Six ordered link sequences, one per category
#[derive(Debug, Clone, Default)]
pub struct LinkBuckets {
    buckets: [Vec<LinkRecord>; 6],
}

impl LinkBuckets {
    /// Append a link to its category's bucket
    pub fn push(&mut self, category: Category, link: LinkRecord) {
        self.buckets[category.index()].push(link);
    }

    /// Links of one category in insertion order
    #[must_use]
    pub fn get(&self, category: Category) -> &[LinkRecord] {
        &self.buckets[category.index()]
    }

    /// Iterate `(category, links)` in [`Category::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[LinkRecord])> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }

    /// Total number of links across all categories
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognised_codes() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(category.code()), Some(category));
        }
        assert_eq!(Category::from_columns("?", "-"), Some(Category::UnknownMinus));
    }

    #[test]
    fn test_unrecognised_codes() {
        assert_eq!(Category::from_code("x+"), None);
        assert_eq!(Category::from_code("+?"), None);
        assert_eq!(Category::from_code("+"), None);
        assert_eq!(Category::from_code(""), None);
        assert!("++-".parse::<Category>().is_err());
    }

    #[test]
    fn test_order_matches_index() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_legend_label() {
        assert_eq!(Category::PlusMinus.legend_label(), "+\u{2192}-");
        assert_eq!(Category::UnknownPlus.legend_label(), "?\u{2192}+");
    }

    #[test]
    fn test_buckets_start_empty() {
        let buckets = LinkBuckets::default();
        assert_eq!(buckets.total(), 0);
        assert!(buckets.iter().all(|(_, links)| links.is_empty()));
        assert_eq!(buckets.iter().count(), 6);
    }
}
