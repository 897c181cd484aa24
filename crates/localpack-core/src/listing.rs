//! Domain types for extracted business listings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One business listing extracted from a search-results card.
///
/// Every field is always present: a piece that could not be extracted keeps
/// its typed zero-value (`"N/A"` for the title, empty string or `0`
/// elsewhere), never a null. `reviews` and `stars` are always finite numbers.
///
/// A `Listing` is a pure value object — two listings are the same entry if
/// and only if every field matches. Two cards that differ by as little as an
/// address suffix stay distinct even when they denote the same business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Business display name. `"N/A"` when no heading could be found.
    pub title: String,
    /// Business category (e.g. `"Gym"`). Empty when unknown.
    pub category: String,
    /// Review count. `0` when unknown or unparseable.
    pub reviews: u32,
    /// Star rating, nominally `0.0..=5.0`. `0.0` when unknown.
    pub stars: f64,
    /// Canonical E.164 phone number (e.g. `"+817012740809"`), or empty.
    pub phone: String,
    /// Free-text street address, whitespace-normalized. May be empty.
    pub address: String,
    /// Link to the business website as found on the page — often an upstream
    /// redirect wrapper, passed through verbatim. May be empty.
    pub website: String,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            title: "N/A".to_owned(),
            category: String::new(),
            reviews: 0,
            stars: 0.0,
            phone: String::new(),
            address: String::new(),
            website: String::new(),
        }
    }
}

impl Listing {
    /// Returns `true` if a phone number was extracted for this listing.
    #[must_use]
    pub fn has_phone(&self) -> bool {
        !self.phone.is_empty()
    }

    /// Hashable identity over all fields for value-equality dedup.
    ///
    /// `stars` is folded in through its bit pattern: `f64` has no `Hash`,
    /// and extracted ratings are parsed literals (never NaN), so bitwise
    /// identity coincides with value equality here.
    fn dedup_key(&self) -> DedupKey {
        DedupKey {
            title: self.title.clone(),
            category: self.category.clone(),
            reviews: self.reviews,
            stars_bits: self.stars.to_bits(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            website: self.website.clone(),
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
struct DedupKey {
    title: String,
    category: String,
    reviews: u32,
    stars_bits: u64,
    phone: String,
    address: String,
    website: String,
}

/// Removes structural duplicates from an accumulated result set,
/// keeping the first occurrence of each distinct listing in its
/// original (fetch) order.
#[must_use]
pub fn dedup_listings(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|listing| seen.insert(listing.dedup_key()))
        .collect()
}
