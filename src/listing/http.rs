//! Listing source backed by the `/api/v1/hostels` endpoint.

use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::filter::FilterState;
use crate::domain::hostel::Hostel;
use crate::domain::page::PageResult;
use crate::listing::session::SessionContext;
use crate::listing::source::{ListingSource, QueryError, clamp_limit};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Query string for one listing request.
pub fn query_pairs(filter: &FilterState, page: usize, limit: usize) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("page", page.max(1).to_string()),
        ("limit", clamp_limit(limit).to_string()),
    ];
    if let Some(search) = &filter.search {
        pairs.push(("search", search.clone()));
    }
    if let Some(hostel_type) = filter.hostel_type {
        pairs.push(("type", hostel_type.to_string()));
    }
    if let Some(occupancy) = filter.students_per_room {
        pairs.push(("studentsPerRoom", occupancy.to_string()));
    }
    if let Some(min) = filter.min_rent {
        pairs.push(("minRent", min.to_string()));
    }
    if let Some(max) = filter.max_rent {
        pairs.push(("maxRent", max.to_string()));
    }
    if let Some(amenities) = filter.amenities_param() {
        pairs.push(("amenities", amenities));
    }
    pairs
}

pub struct HttpListingSource {
    client: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl HttpListingSource {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionContext {
        &mut self.session
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/v1/hostels", self.base_url)
    }
}

impl ListingSource for HttpListingSource {
    type Item = Hostel;

    async fn fetch_page(
        &self,
        filter: &FilterState,
        page: usize,
        limit: usize,
    ) -> Result<PageResult<Hostel>, QueryError> {
        let mut request = self
            .client
            .get(self.endpoint())
            .query(&query_pairs(filter, page, limit));
        if let Some(token) = self.session.bearer(Utc::now()) {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<PageResult<Hostel>>()
                .await
                .map_err(|e| QueryError::Decode(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(QueryError::Unauthorized),
            StatusCode::BAD_REQUEST => {
                let message = match response.json::<ErrorBody>().await {
                    Ok(body) => body.error,
                    Err(_) => "bad request".to_string(),
                };
                Err(QueryError::Validation(message))
            }
            status => Err(QueryError::Server(status.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hostel::{Amenity, HostelType};
    use crate::domain::types::{Occupancy, Rent};

    #[test]
    fn empty_filter_sends_only_paging() {
        let pairs = query_pairs(&FilterState::new(), 0, 500);
        assert_eq!(
            pairs,
            vec![("page", "1".to_string()), ("limit", "50".to_string())]
        );
    }

    #[test]
    fn every_filter_field_is_encoded() {
        let filter = FilterState::new()
            .search(" Pune ")
            .hostel_type(HostelType::Girls)
            .students_per_room(Occupancy::new(2).unwrap())
            .rent_between(Some(Rent::new(1000).unwrap()), Some(Rent::new(5000).unwrap()))
            .amenity(Amenity::Wifi)
            .amenity(Amenity::Gym);

        let pairs = query_pairs(&filter, 2, 10);

        assert!(pairs.contains(&("search", "Pune".to_string())));
        assert!(pairs.contains(&("type", "girls".to_string())));
        assert!(pairs.contains(&("studentsPerRoom", "2".to_string())));
        assert!(pairs.contains(&("minRent", "1000".to_string())));
        assert!(pairs.contains(&("maxRent", "5000".to_string())));
        assert!(pairs.contains(&("amenities", "wifi,gym".to_string())));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let source = HttpListingSource::new("http://localhost:8080/", SessionContext::anonymous());
        assert_eq!(source.endpoint(), "http://localhost:8080/api/v1/hostels");
    }
}
