//! Typed payload models for the remote API
//!
//! These mirror the JSON shapes the service returns. Every field the remote
//! may omit is an `Option`, so a response that leaves out optional data still
//! decodes. Unknown fields are ignored by serde's default behavior, which
//! keeps the client tolerant of additive remote-side changes.

use serde::{Deserialize, Serialize};
use url::Url;

/// One business as returned by the search, detail, and bulk-lookup endpoints
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Stable identifier of the business
    pub id: String,
    /// URL-friendly alias
    #[serde(default)]
    pub alias: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Link to the business page on the remote service
    #[serde(default)]
    pub url: Option<String>,
    /// Primary photo URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Additional photo URLs (detail endpoint only)
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    /// Phone number in E.164 format
    #[serde(default)]
    pub phone: Option<String>,
    /// Phone number formatted for display
    #[serde(default)]
    pub display_phone: Option<String>,
    /// Number of reviews on record
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Aggregate rating, 1.0 through 5.0 in half steps
    #[serde(default)]
    pub rating: Option<f64>,
    /// Price tier rendered as currency glyphs
    #[serde(default)]
    pub price: Option<String>,
    /// Whether the business is permanently closed
    #[serde(default)]
    pub is_closed: Option<bool>,
    /// Whether the owner has claimed the listing (detail endpoint only)
    #[serde(default)]
    pub is_claimed: Option<bool>,
    /// Categories the business is listed under
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Geographic position
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
    /// Street address
    #[serde(default)]
    pub location: Option<Location>,
    /// Opening hours (detail endpoint only)
    #[serde(default)]
    pub hours: Option<Vec<OpenHours>>,
    /// Distance from the search origin in meters, when the search had one
    #[serde(default)]
    pub distance: Option<f64>,
}

/// A category a business is listed under
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Machine-readable category key
    pub alias: String,
    /// Human-readable category title
    #[serde(default)]
    pub title: Option<String>,
}

/// A latitude/longitude pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north of the equator, -90 through 90
    pub latitude: f64,
    /// Degrees east of the prime meridian, -180 through 180
    pub longitude: f64,
}

/// Street address of a business
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// First address line
    #[serde(default)]
    pub address1: Option<String>,
    /// Second address line
    #[serde(default)]
    pub address2: Option<String>,
    /// Third address line
    #[serde(default)]
    pub address3: Option<String>,
    /// City name
    #[serde(default)]
    pub city: Option<String>,
    /// State or province code
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code
    #[serde(default)]
    pub zip_code: Option<String>,
    /// ISO 3166-1 country code
    #[serde(default)]
    pub country: Option<String>,
    /// Ready-to-render address lines
    #[serde(default)]
    pub display_address: Vec<String>,
}

/// Opening hours block for one hours type (regular, delivery, ...)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenHours {
    /// Kind of hours described, e.g. `REGULAR`
    #[serde(default)]
    pub hours_type: Option<String>,
    /// Whether the business is open at the time the response was produced
    #[serde(default)]
    pub is_open_now: Option<bool>,
    /// The open periods, one per day segment
    #[serde(default)]
    pub open: Vec<OpenPeriod>,
}

/// One contiguous open period within a week
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenPeriod {
    /// Day of week, 0 = Monday
    pub day: u8,
    /// Opening time as `HHMM` in the business's local time
    pub start: String,
    /// Closing time as `HHMM` in the business's local time
    pub end: String,
    /// Whether the period crosses midnight into the next day
    #[serde(default)]
    pub is_overnight: Option<bool>,
}

/// Response of the search endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matches the service knows about (may exceed the page)
    #[serde(default)]
    pub total: u32,
    /// The page of matching businesses
    #[serde(default)]
    pub businesses: Vec<Business>,
    /// Geographic center of the result set
    #[serde(default)]
    pub region: Option<Region>,
}

/// Geographic center of a search result set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Center point of the region
    #[serde(default)]
    pub center: Option<Coordinate>,
}

/// A user review of a business
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Identifier of the review
    #[serde(default)]
    pub id: Option<String>,
    /// Star rating the reviewer gave, 1 through 5
    #[serde(default)]
    pub rating: Option<u8>,
    /// Excerpt of the review text
    #[serde(default)]
    pub text: Option<String>,
    /// Creation time as reported by the service
    #[serde(default)]
    pub time_created: Option<String>,
    /// Link to the full review
    #[serde(default)]
    pub url: Option<String>,
    /// The reviewing user
    #[serde(default)]
    pub user: Option<User>,
}

/// The author of a review
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identifier of the user
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Response of the reviews endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewsResponse {
    /// Total number of reviews on record
    #[serde(default)]
    pub total: u32,
    /// The returned page of reviews
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Languages reviews are available in
    #[serde(default)]
    pub possible_languages: Vec<String>,
}

/// Response of the autocomplete endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    /// Business name completions
    #[serde(default)]
    pub businesses: Vec<Business>,
    /// Category completions
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Free-text term completions
    #[serde(default)]
    pub terms: Vec<Term>,
}

/// A free-text completion suggestion
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// The suggested text
    pub text: String,
}

/// Query parameters for the search endpoint
///
/// Only fields that were explicitly set are sent, so the remote's defaults
/// apply to everything left as `None`.
///
/// # Example
///
/// ```
/// use localsearch::SearchParameters;
///
/// let params = SearchParameters::new(37.7749, -122.4194)
///     .term("coffee")
///     .limit(10)
///     .open_now(true);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Search text, e.g. a cuisine or business name
    pub term: Option<String>,
    /// Latitude of the search origin
    pub latitude: f64,
    /// Longitude of the search origin
    pub longitude: f64,
    /// Search radius in meters
    pub radius: Option<u32>,
    /// Comma-separated category aliases to restrict to
    pub categories: Option<String>,
    /// Locale code, e.g. `en_US`
    pub locale: Option<String>,
    /// Maximum number of results to return
    pub limit: Option<u32>,
    /// Offset into the full result list, for paging
    pub offset: Option<u32>,
    /// Sort order: `best_match`, `rating`, `review_count`, or `distance`
    pub sort_by: Option<String>,
    /// Comma-separated price tiers to restrict to, e.g. `1,2`
    pub price: Option<String>,
    /// Only return businesses open at query time
    pub open_now: Option<bool>,
}

impl SearchParameters {
    /// Create search parameters centered on the given coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Self::default()
        }
    }

    /// Set the search text
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Set the search radius in meters
    pub fn radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Restrict results to the given category aliases
    pub fn categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    /// Set the locale
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Limit the number of results
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` results
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the sort order
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Restrict results to the given price tiers
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Only return businesses that are open now
    pub fn open_now(mut self, open_now: bool) -> Self {
        self.open_now = Some(open_now);
        self
    }

    /// Append the set parameters to a request URL as query pairs
    pub(crate) fn apply_to(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        if let Some(term) = &self.term {
            pairs.append_pair("term", term);
        }
        pairs.append_pair("latitude", &self.latitude.to_string());
        pairs.append_pair("longitude", &self.longitude.to_string());
        if let Some(radius) = self.radius {
            pairs.append_pair("radius", &radius.to_string());
        }
        if let Some(categories) = &self.categories {
            pairs.append_pair("categories", categories);
        }
        if let Some(locale) = &self.locale {
            pairs.append_pair("locale", locale);
        }
        if let Some(limit) = self.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(offset) = self.offset {
            pairs.append_pair("offset", &offset.to_string());
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.append_pair("sort_by", sort_by);
        }
        if let Some(price) = &self.price {
            pairs.append_pair("price", price);
        }
        if let Some(open_now) = self.open_now {
            pairs.append_pair("open_now", if open_now { "true" } else { "false" });
        }
    }
}
