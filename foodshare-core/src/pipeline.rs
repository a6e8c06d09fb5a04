//! Turns raw listings and their ratings into what the browse page shows.
//!
//! Everything here is pure: inputs are borrowed and never changed, and the same
//! inputs always produce the same output.

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt::Display,
    str::FromStr,
};

use crate::models::{Listing, Rating};

/// Direction of the price sort.
#[derive(SerializeDisplay, DeserializeFromStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Ascending
    }
}

impl SortOrder {
    /// The other direction, as flipped by the sort button.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => anyhow::bail!("unknown sort order `{}` (expected `asc` or `desc`)", other),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Ascending => "asc",
                Self::Descending => "desc",
            }
        )
    }
}

/// What the user typed and picked in the filter bar.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    /// Case-insensitive substring of the title or description. Empty matches everything.
    pub search_term: String,
    /// Exact location. Empty means all locations.
    pub location_filter: String,
    pub sort_order: SortOrder,
}

impl Query {
    fn matches(&self, listing: &Listing, needle: &str) -> bool {
        let text_match = needle.is_empty()
            || listing.title.to_lowercase().contains(needle)
            || listing.description.to_lowercase().contains(needle);
        let location_match =
            self.location_filter.is_empty() || listing.location == self.location_filter;
        text_match && location_match
    }
}

/// Average and number of a listing's ratings.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Rounded half away from zero to one decimal place; 0 when there are no ratings.
    pub avg_rating: f64,
    pub review_count: usize,
}

impl RatingSummary {
    pub fn of(ratings: &[Rating]) -> Self {
        let count = ratings.len();
        if count == 0 {
            return Self::default();
        }
        let sum: u64 = ratings.iter().map(|r| u64::from(r.rating.get())).sum();
        Self {
            avg_rating: tenths_rounded(sum, count as u64) as f64 / 10.0,
            review_count: count,
        }
    }
}

/// `sum / count` in tenths, rounded half up, without going through floats.
fn tenths_rounded(sum: u64, count: u64) -> u64 {
    (sum * 20 + count) / (count * 2)
}

/// A listing plus its rating summary, ready to render.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(flatten)]
    pub summary: RatingSummary,
}

impl ListingView {
    /// How many of the five stars to fill.
    pub fn stars(&self) -> u8 {
        self.summary.avg_rating.round().max(0.0).min(5.0) as u8
    }
}

/// The listing's price, if it is a real number.
fn usable_price(listing: &Listing) -> Option<f64> {
    listing.price.filter(|p| p.is_finite())
}

/// Compare two prices, with a missing price below every real one.
fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Aggregate, filter and sort `listings` for display.
///
/// Listings with no entry in `ratings_by_listing` count as unrated. Listings whose
/// price could not be read sort as cheaper than anything else. The sort is stable,
/// so listings with equal prices keep their input order in both directions.
pub fn build_view(
    listings: &[Listing],
    ratings_by_listing: &HashMap<String, Vec<Rating>>,
    query: &Query,
) -> Vec<ListingView> {
    let needle = query.search_term.to_lowercase();

    let mut views: Vec<ListingView> = listings
        .iter()
        .filter(|listing| query.matches(listing, &needle))
        .map(|listing| ListingView {
            summary: ratings_by_listing
                .get(&listing.id)
                .map(|ratings| RatingSummary::of(ratings))
                .unwrap_or_default(),
            listing: listing.clone(),
        })
        .collect();

    for view in views.iter().filter(|v| usable_price(&v.listing).is_none()) {
        tracing::warn!(
            listing = %view.listing.id,
            "listing has no usable price; sorting it as the cheapest"
        );
    }

    match query.sort_order {
        SortOrder::Ascending => {
            views.sort_by(|a, b| compare_price(usable_price(&a.listing), usable_price(&b.listing)))
        }
        SortOrder::Descending => {
            views.sort_by(|a, b| compare_price(usable_price(&b.listing), usable_price(&a.listing)))
        }
    }

    tracing::debug!(
        total = listings.len(),
        shown = views.len(),
        sort = %query.sort_order,
        "built listing view"
    );
    views
}

/// Distinct locations in the order they first appear, for the location picker.
pub fn locations(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .filter(|listing| seen.insert(listing.location.as_str()))
        .map(|listing| listing.location.clone())
        .collect()
}
