//! Listing search parameters and their identity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::hostel::{Amenity, HostelType};
use crate::domain::types::{Occupancy, Rent, TypeConstraintError};

/// Active search/filter parameters for a listing query.
///
/// Values are normalized on the way in so that two states describing the same
/// query compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: Option<String>,
    pub hostel_type: Option<HostelType>,
    pub students_per_room: Option<Occupancy>,
    pub min_rent: Option<Rent>,
    pub max_rent: Option<Rent>,
    pub amenities: BTreeSet<Amenity>,
}

/// Identity of a [`FilterState`]; accumulated pages are only valid for one key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilterKey {
    search: Option<String>,
    hostel_type: Option<HostelType>,
    students_per_room: Option<Occupancy>,
    min_rent: Option<Rent>,
    max_rent: Option<Rent>,
    amenities: BTreeSet<Amenity>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn hostel_type(mut self, hostel_type: HostelType) -> Self {
        self.hostel_type = Some(hostel_type);
        self
    }

    pub fn students_per_room(mut self, occupancy: Occupancy) -> Self {
        self.students_per_room = Some(occupancy);
        self
    }

    pub fn rent_between(mut self, min: Option<Rent>, max: Option<Rent>) -> Self {
        self.min_rent = min;
        self.max_rent = max;
        self
    }

    pub fn amenity(mut self, amenity: Amenity) -> Self {
        self.amenities.insert(amenity);
        self
    }

    /// Rejects contradictory bounds.
    pub fn validate(&self) -> Result<(), TypeConstraintError> {
        match (self.min_rent, self.max_rent) {
            (Some(min), Some(max)) if min > max => Err(TypeConstraintError::InvalidValue(
                format!("minimum rent {min} exceeds maximum rent {max}"),
            )),
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key() == FilterState::default().key()
    }

    pub fn key(&self) -> FilterKey {
        FilterKey {
            search: self.search.as_ref().map(|s| s.to_lowercase()),
            hostel_type: self.hostel_type,
            students_per_room: self.students_per_room,
            min_rent: self.min_rent,
            max_rent: self.max_rent,
            amenities: self.amenities.clone(),
        }
    }

    /// Comma separated amenity list as used in query strings.
    pub fn amenities_param(&self) -> Option<String> {
        if self.amenities.is_empty() {
            return None;
        }
        Some(
            self.amenities
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_no_search() {
        let filter = FilterState::new().search("   ");
        assert_eq!(filter.search, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn key_ignores_search_case_and_amenity_order() {
        let a = FilterState::new()
            .search("Sunrise")
            .amenity(Amenity::Wifi)
            .amenity(Amenity::Gym);
        let b = FilterState::new()
            .search("sunrise ")
            .amenity(Amenity::Gym)
            .amenity(Amenity::Wifi);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn key_changes_with_any_key_argument() {
        let base = FilterState::new().hostel_type(HostelType::Boys);
        let girls = FilterState::new().hostel_type(HostelType::Girls);
        let with_rent = base
            .clone()
            .rent_between(Some(Rent::new(1000).unwrap()), None);
        let with_room = base.clone().students_per_room(Occupancy::new(2).unwrap());

        assert_ne!(base.key(), girls.key());
        assert_ne!(base.key(), with_rent.key());
        assert_ne!(base.key(), with_room.key());
    }

    #[test]
    fn inverted_rent_bounds_are_rejected() {
        let filter = FilterState::new().rent_between(
            Some(Rent::new(5000).unwrap()),
            Some(Rent::new(1000).unwrap()),
        );
        assert!(filter.validate().is_err());
    }

    #[test]
    fn amenities_param_is_sorted_and_joined() {
        let filter = FilterState::new()
            .amenity(Amenity::Wifi)
            .amenity(Amenity::Laundry);
        assert_eq!(filter.amenities_param().as_deref(), Some("wifi,laundry"));
    }
}
