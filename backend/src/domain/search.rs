//! Catalog search and filtering.
//!
//! Pure functions over a bill sequence: a category filter with an
//! "All" sentinel and a case-insensitive free-text search across
//! title, location and description. Both filters combine with AND and
//! the input order is preserved.

use crate::domain::models::bill::{Bill, BillCategory};

/// Category selection for catalog browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No category restriction
    All,
    /// Only bills with exactly this category
    Only(BillCategory),
}

impl CategoryFilter {
    /// Parse a user-supplied filter value. "All" (any casing) or an
    /// empty string means no restriction; anything else names a
    /// category.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(BillCategory::from(trimmed.to_string()))
        }
    }

    fn matches(&self, bill: &Bill) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => bill.category == *category,
        }
    }
}

/// Filter `bills` by category and free-text term.
///
/// An empty term applies no text filter; otherwise a bill passes when
/// the term occurs as a case-insensitive substring of its title,
/// location or description. Stable: survivors keep their relative
/// input order.
pub fn filter_bills(bills: &[Bill], category: &CategoryFilter, term: &str) -> Vec<Bill> {
    let needle = term.trim().to_lowercase();
    bills
        .iter()
        .filter(|bill| category.matches(bill))
        .filter(|bill| {
            if needle.is_empty() {
                return true;
            }
            bill.title.to_lowercase().contains(&needle)
                || bill.location.to_lowercase().contains(&needle)
                || bill.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
