//! CSS selectors that locate the pieces of one search-results layout.
//!
//! Every class-based selector here is a fragile layout marker chosen by the
//! upstream source, not a stable API. When the upstream markup shifts, this
//! is the one place to update — no parsing logic depends on the literal
//! strings.

/// The selector set for one result-page layout.
///
/// All selectors are standard CSS and are compiled once per extraction pass;
/// an unparseable selector surfaces as
/// [`crate::ExtractError::InvalidLayout`].
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Element wrapping the whole result list. Absent on "no results" and
    /// interstitial pages.
    pub results_container: &'static str,
    /// One listing card. Zero matches inside a present container means an
    /// empty (terminal) page.
    pub listing_card: &'static str,
    /// The card's business-name heading.
    pub heading: &'static str,
    /// Container grouping the card's free-text detail lines.
    pub details_block: &'static str,
    /// Text-bearing line elements inside the details block.
    pub detail_line: &'static str,
    /// Star-rating icon; its presence marks a line as a rating line.
    pub rating_icon: &'static str,
    /// Sub-element holding the numeric star value (e.g. `"5.0"`).
    pub star_value: &'static str,
    /// Fallback for [`Self::star_value`] on layout variants without the
    /// dedicated class.
    pub star_value_fallback: &'static str,
    /// Sub-element whose accessible label carries the review count.
    pub reviews_label: &'static str,
    /// Anchor elements scanned for the "Website" link.
    pub anchor: &'static str,
}

/// Layout markers for the map/local-pack result layout as served in 2025.
pub const GOOGLE_LOCAL_PACK: PageLayout = PageLayout {
    results_container: "#search",
    listing_card: ".VkpGBb",
    heading: r#"[role="heading"]"#,
    details_block: ".rllt__details",
    detail_line: "div",
    rating_icon: r#"[role="img"]"#,
    star_value: ".yi40Hd",
    star_value_fallback: r#"[aria-hidden="true"]"#,
    reviews_label: r#"[aria-label*="reviews"]"#,
    anchor: "a",
};
