//! Query parameters of the listing API and the search page.

use serde::{Deserialize, Serialize};

use crate::domain::filter::FilterState;
use crate::domain::types::{Occupancy, Rent, TypeConstraintError};
use crate::forms::hostel::parse_amenities;
use crate::listing::source::clamp_limit;

/// Raw listing query string. Every value arrives as text so that blank form
/// inputs read as "not set" instead of failing to parse.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub hostel_type: Option<String>,
    pub students_per_room: Option<String>,
    pub min_rent: Option<String>,
    pub max_rent: Option<String>,
    /// Comma separated and/or repeated.
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub filter: FilterState,
    pub page: usize,
    pub limit: usize,
}

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(name: &str, value: &Option<String>) -> Result<Option<i64>, TypeConstraintError> {
    blank_to_none(value)
        .map(|v| {
            v.parse::<i64>().map_err(|_| {
                TypeConstraintError::InvalidValue(format!("`{name}` must be a whole number"))
            })
        })
        .transpose()
}

impl HostelsQuery {
    pub fn from_query_string(query: &str) -> Result<Self, TypeConstraintError> {
        serde_html_form::from_str(query)
            .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))
    }

    pub fn into_request(self, default_limit: usize) -> Result<ListingRequest, TypeConstraintError> {
        let page = match parse_number("page", &self.page)? {
            Some(page) if page < 1 => {
                return Err(TypeConstraintError::InvalidValue(
                    "`page` must be at least 1".to_string(),
                ));
            }
            Some(page) => page as usize,
            None => 1,
        };
        let limit = match parse_number("limit", &self.limit)? {
            Some(limit) => clamp_limit(limit.max(1) as usize),
            None => clamp_limit(default_limit),
        };

        let mut filter = FilterState::new();
        if let Some(search) = blank_to_none(&self.search) {
            filter = filter.search(search);
        }
        if let Some(hostel_type) = blank_to_none(&self.hostel_type) {
            filter = filter.hostel_type(hostel_type.parse()?);
        }
        if let Some(occupancy) = parse_number("studentsPerRoom", &self.students_per_room)? {
            filter = filter.students_per_room(Occupancy::new(occupancy)?);
        }
        let min_rent = parse_number("minRent", &self.min_rent)?
            .map(Rent::new)
            .transpose()?;
        let max_rent = parse_number("maxRent", &self.max_rent)?
            .map(Rent::new)
            .transpose()?;
        filter = filter.rent_between(min_rent, max_rent);

        let amenities = parse_amenities(self.amenities.iter().flat_map(|v| v.split(',')))
            .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?;
        filter.amenities = amenities;

        filter.validate()?;
        Ok(ListingRequest {
            filter,
            page,
            limit,
        })
    }
}

impl ListingRequest {
    /// Query string reproducing this request for another page.
    pub fn query_for_page(&self, page: usize) -> String {
        let mut pairs = vec![("page", page.to_string())];
        if let Some(search) = &self.filter.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(hostel_type) = self.filter.hostel_type {
            pairs.push(("type", hostel_type.to_string()));
        }
        if let Some(occupancy) = self.filter.students_per_room {
            pairs.push(("studentsPerRoom", occupancy.to_string()));
        }
        if let Some(min) = self.filter.min_rent {
            pairs.push(("minRent", min.to_string()));
        }
        if let Some(max) = self.filter.max_rent {
            pairs.push(("maxRent", max.to_string()));
        }
        if let Some(amenities) = self.filter.amenities_param() {
            pairs.push(("amenities", amenities));
        }
        serde_html_form::to_string(&pairs).unwrap_or_default()
    }
}
