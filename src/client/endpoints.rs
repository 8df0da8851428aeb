//! Typed single-request API operations
//!
//! Thin plumbing over the shared request path: each method builds its URL,
//! validates caller input, and decodes the typed response. All retry and
//! rate-limit behavior lives in [`Client::send_with_retry`].

use super::Client;
use crate::error::{Error, Result};
use crate::models::{
    AutocompleteResponse, Business, ReviewsResponse, SearchParameters, SearchResponse,
};

impl Client {
    /// Search businesses matching the given parameters
    pub async fn search(&self, parameters: &SearchParameters) -> Result<SearchResponse> {
        validate_coordinates(parameters.latitude, parameters.longitude)?;

        let mut url = self.endpoint_url("/businesses/search")?;
        parameters.apply_to(&mut url);
        self.get_json(url, self.fresh_retry_state()).await
    }

    /// Search businesses that deliver, matching the given text near a location
    pub async fn search_delivery(
        &self,
        term: Option<&str>,
        latitude: f64,
        longitude: f64,
    ) -> Result<SearchResponse> {
        validate_coordinates(latitude, longitude)?;

        let mut url = self.endpoint_url("/transactions/delivery/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(term) = term {
                pairs.append_pair("term", term);
            }
            pairs.append_pair("latitude", &latitude.to_string());
            pairs.append_pair("longitude", &longitude.to_string());
        }
        self.get_json(url, self.fresh_retry_state()).await
    }

    /// Autocomplete business names, categories, and search terms
    pub async fn autocomplete(
        &self,
        text: &str,
        latitude: f64,
        longitude: f64,
        locale: Option<&str>,
    ) -> Result<AutocompleteResponse> {
        validate_coordinates(latitude, longitude)?;

        let mut url = self.endpoint_url("/autocomplete")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("text", text);
            pairs.append_pair("latitude", &latitude.to_string());
            pairs.append_pair("longitude", &longitude.to_string());
            if let Some(locale) = locale {
                pairs.append_pair("locale", locale);
            }
        }
        self.get_json(url, self.fresh_retry_state()).await
    }

    /// Get the full details of one business by identifier
    pub async fn business_details(&self, business_id: &str) -> Result<Business> {
        self.business_details_with_state(business_id, self.fresh_retry_state())
            .await
    }

    /// Detail lookup with an explicit retry state, used by the batch layer
    pub(crate) async fn business_details_with_state(
        &self,
        business_id: &str,
        retry_state: crate::retry::RetryState,
    ) -> Result<Business> {
        let path = format!("/businesses/{}", urlencoding::encode(business_id));
        let url = self.endpoint_url(&path)?;
        self.get_json(url, retry_state).await
    }

    /// Get user reviews of a business
    pub async fn reviews(
        &self,
        business_id: &str,
        locale: Option<&str>,
    ) -> Result<ReviewsResponse> {
        let path = format!("/businesses/{}/reviews", urlencoding::encode(business_id));
        let mut url = self.endpoint_url(&path)?;
        if let Some(locale) = locale {
            url.query_pairs_mut().append_pair("locale", locale);
        }
        self.get_json(url, self.fresh_retry_state()).await
    }
}

/// Reject coordinates outside the valid latitude/longitude ranges
fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_argument(format!(
            "latitude {latitude} is outside -90..=90"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_argument(format!(
            "longitude {longitude} is outside -180..=180"
        )));
    }
    Ok(())
}
