//! HTML record extractor: one parsed result page in, normalized listings out.
//!
//! This is deliberately heuristic code over an uncontrolled, frequently
//! changing layout. The policy throughout is to prefer partial data over
//! aborting the page: a card missing any sub-element degrades to the field
//! defaults and extraction moves on. The only page-level failure is a page
//! with no results container at all, which callers treat as "no more pages".
//!
//! ## Line disambiguation
//!
//! A card's details block is a flat run of free-text lines. A line holding
//! an image-role element or opening with a `d.d` decimal is a *rating line*
//! (stars, review count, category); any other non-empty line is a *metadata
//! line* (address and/or phone). Metadata lines are split on the middle-dot
//! separator; the phone, when present, sits in the last segment and the
//! address in the one before it. Lines are evaluated in document order and
//! later lines overwrite earlier ones, except for the whole-line address
//! fallback, which is first-fit.

use localpack_core::Listing;
use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;
use crate::layout::PageLayout;
use crate::phone::{normalize_phone, Region};

/// Caller-supplied knobs for one extraction pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Region assumed for phone candidates without a `+CC` prefix.
    pub default_region: Region,
}

/// Extracts all listing cards from one search-results page, in document
/// order.
///
/// Idempotent and free of I/O. Individual malformed cards never fail — their
/// missing pieces keep the [`Listing`] defaults.
///
/// # Errors
///
/// - [`ExtractError::NoResultsContainer`] — the page has no results
///   container element (callers interpret this as "zero results").
/// - [`ExtractError::InvalidLayout`] — a selector in `layout` does not parse.
pub fn extract_listings(
    html: &str,
    layout: &PageLayout,
    options: &ExtractOptions,
) -> Result<Vec<Listing>, ExtractError> {
    let selectors = Selectors::compile(layout)?;
    extract_with_selectors(html, &selectors, options)
}

/// The compiled form of a [`PageLayout`], parsed once per search call.
pub(crate) struct Selectors {
    container: Selector,
    container_source: &'static str,
    card: Selector,
    heading: Selector,
    details: Selector,
    line: Selector,
    rating_icon: Selector,
    star_value: Selector,
    star_value_fallback: Selector,
    reviews_label: Selector,
    anchor: Selector,
}

impl Selectors {
    pub(crate) fn compile(layout: &PageLayout) -> Result<Self, ExtractError> {
        let parse = |source: &'static str| {
            Selector::parse(source).map_err(|e| ExtractError::InvalidLayout {
                selector: source.to_owned(),
                reason: e.to_string(),
            })
        };
        Ok(Self {
            container: parse(layout.results_container)?,
            container_source: layout.results_container,
            card: parse(layout.listing_card)?,
            heading: parse(layout.heading)?,
            details: parse(layout.details_block)?,
            line: parse(layout.detail_line)?,
            rating_icon: parse(layout.rating_icon)?,
            star_value: parse(layout.star_value)?,
            star_value_fallback: parse(layout.star_value_fallback)?,
            reviews_label: parse(layout.reviews_label)?,
            anchor: parse(layout.anchor)?,
        })
    }
}

pub(crate) fn extract_with_selectors(
    html: &str,
    sel: &Selectors,
    options: &ExtractOptions,
) -> Result<Vec<Listing>, ExtractError> {
    let document = Html::parse_document(html);

    let container = document.select(&sel.container).next().ok_or_else(|| {
        ExtractError::NoResultsContainer {
            selector: sel.container_source.to_owned(),
        }
    })?;

    // Every card is yielded, phoneless or not: the pagination driver keys
    // its termination on the raw per-page yield, and any phone filtering
    // happens over the completed result set.
    Ok(container
        .select(&sel.card)
        .map(|card| extract_card(&card, sel, options.default_region))
        .collect())
}

fn extract_card(card: &ElementRef<'_>, sel: &Selectors, region: Region) -> Listing {
    let mut listing = Listing::default();

    if let Some(heading) = card.select(&sel.heading).next() {
        let title = collapse_whitespace(&element_text(&heading));
        if !title.is_empty() {
            listing.title = title;
        }
    }

    if let Some(details) = card.select(&sel.details).next() {
        for line in details.select(&sel.line) {
            let raw = element_text(&line);
            let text = raw.trim();
            if line.select(&sel.rating_icon).next().is_some() || starts_with_rating(text) {
                apply_rating_line(&mut listing, &line, text, sel);
            } else if !text.is_empty() {
                apply_metadata_line(&mut listing, text, region);
            }
        }
    }

    // The "Website" button is a plain anchor somewhere in the card; the raw
    // href (often an upstream redirect wrapper) is taken verbatim.
    listing.website = card
        .select(&sel.anchor)
        .find(|a| element_text(a).contains("Website"))
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default()
        .to_owned();

    listing
}

/// Rating lines may repeat; real pages have exactly one, but a later line
/// overwriting an earlier one is tolerated (last match wins).
fn apply_rating_line(listing: &mut Listing, line: &ElementRef<'_>, text: &str, sel: &Selectors) {
    let star_el = line
        .select(&sel.star_value)
        .next()
        .or_else(|| line.select(&sel.star_value_fallback).next());
    if let Some(el) = star_el {
        // Keep the previous value when the sub-element text does not parse.
        if let Some(value) = parse_leading_f64(element_text(&el).trim()) {
            listing.stars = value;
        }
    }

    if let Some(el) = line.select(&sel.reviews_label).next() {
        let digits: String = element_text(&el)
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        listing.reviews = digits.parse().unwrap_or(0);
    }

    // "5.0 ★★★★★ (23) · Gym" — the category trails the last middle dot.
    if text.contains('·') {
        if let Some(last) = text.split('·').next_back() {
            listing.category = last.trim().to_owned();
        }
    }
}

fn apply_metadata_line(listing: &mut Listing, text: &str, region: Region) {
    let segments: Vec<&str> = text.split('·').map(str::trim).collect();

    // The upstream source puts the phone number in the last segment.
    let last = segments.last().copied().unwrap_or_default();
    if let Some(phone) = normalize_phone(&collapse_whitespace(last), region) {
        listing.phone = phone;
        if segments.len() > 1 {
            // The segment before the phone is usually the address, unless it
            // is tenure ("12 years in business") or hours ("Open ...") text.
            let candidate = segments[segments.len() - 2];
            if !candidate.contains("years in business") && !candidate.contains("Open") {
                listing.address = collapse_whitespace(candidate);
            }
        }
    } else if !text.contains("Opens")
        && !text.contains("Closed")
        && text.contains(',')
        && listing.address.is_empty()
    {
        // No phone anywhere: the whole line may itself be an address.
        // First fit only — a later phone-bearing line can still overwrite.
        listing.address = collapse_whitespace(text);
    }
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Collapses runs of whitespace (including newlines) to single spaces and
/// drops leading/trailing whitespace.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `true` for text opening with a `d.d` decimal, e.g. `"4.2 (8) · Cafe"`.
fn starts_with_rating(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some('.'), Some(c)) if a.is_ascii_digit() && c.is_ascii_digit()
    )
}

/// Parses the leading decimal prefix of `s`, tolerating trailing text
/// (`"4.2 stars"` → `4.2`).
fn parse_leading_f64(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, b) in s.bytes().enumerate() {
        if b.is_ascii_digit() {
            end = i + 1;
        } else if b == b'.' && !seen_dot && end == i {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    s[..end].trim_end_matches('.').parse().ok()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
