//! Hostel listing aggregate.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::feedback::{Complaint, Feedback};
use crate::domain::types::{
    Address, BedCount, City, EmailAddress, HostelId, HostelName, MediaUrl, Occupancy, OwnerId,
    PhoneNumber, Rent, TypeConstraintError,
};

/// Listing category.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HostelType {
    Boys,
    Girls,
}

impl HostelType {
    pub fn as_str(self) -> &'static str {
        match self {
            HostelType::Boys => "boys",
            HostelType::Girls => "girls",
        }
    }
}

impl Display for HostelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostelType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boys" => Ok(HostelType::Boys),
            "girls" => Ok(HostelType::Girls),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown hostel type `{other}`"
            ))),
        }
    }
}

/// Amenity flags a listing can advertise.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Wifi,
    Laundry,
    Mess,
    Parking,
    AirConditioning,
    HotWater,
    Security,
    Gym,
    StudyRoom,
    PowerBackup,
}

impl Amenity {
    pub const ALL: [Amenity; 10] = [
        Amenity::Wifi,
        Amenity::Laundry,
        Amenity::Mess,
        Amenity::Parking,
        Amenity::AirConditioning,
        Amenity::HotWater,
        Amenity::Security,
        Amenity::Gym,
        Amenity::StudyRoom,
        Amenity::PowerBackup,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Amenity::Wifi => "wifi",
            Amenity::Laundry => "laundry",
            Amenity::Mess => "mess",
            Amenity::Parking => "parking",
            Amenity::AirConditioning => "air_conditioning",
            Amenity::HotWater => "hot_water",
            Amenity::Security => "security",
            Amenity::Gym => "gym",
            Amenity::StudyRoom => "study_room",
            Amenity::PowerBackup => "power_backup",
        }
    }
}

impl Display for Amenity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Amenity {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Amenity::ALL
            .into_iter()
            .find(|amenity| amenity.as_str() == needle)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown amenity `{needle}`")))
    }
}

/// Price for a room shared by `occupancy` students.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RentTier {
    pub occupancy: Occupancy,
    pub price: Rent,
}

impl RentTier {
    pub fn try_new(occupancy: i64, price: i64) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            occupancy: Occupancy::new(occupancy)?,
            price: Rent::new(price)?,
        })
    }
}

/// Orders tiers by occupancy and rejects duplicated occupancies.
pub fn normalize_rent_tiers(mut tiers: Vec<RentTier>) -> Result<Vec<RentTier>, TypeConstraintError> {
    tiers.sort_by_key(|tier| tier.occupancy);
    if tiers
        .windows(2)
        .any(|pair| pair[0].occupancy == pair[1].occupancy)
    {
        return Err(TypeConstraintError::InvalidValue(
            "duplicate occupancy in rent tiers".to_string(),
        ));
    }
    Ok(tiers)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hostel {
    pub id: HostelId,
    pub owner_id: OwnerId,
    pub name: HostelName,
    pub phone: PhoneNumber,
    pub email: Option<EmailAddress>,
    pub address: Address,
    pub city: City,
    pub hostel_type: HostelType,
    pub total_beds: BedCount,
    pub vacant_beds: BedCount,
    pub description: Option<String>,
    pub amenities: BTreeSet<Amenity>,
    /// Ordered by occupancy.
    pub rent_tiers: Vec<RentTier>,
    pub media: Vec<MediaUrl>,
    pub is_verified: bool,
    /// Only populated when a single listing is loaded.
    #[serde(default)]
    pub feedback: Vec<Feedback>,
    /// Only populated when a single listing is loaded.
    #[serde(default)]
    pub complaints: Vec<Complaint>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Hostel {
    /// Cheapest advertised rent, if any tier exists.
    pub fn starting_rent(&self) -> Option<Rent> {
        self.rent_tiers.iter().map(|tier| tier.price).min()
    }

    /// Mean feedback rating rounded to one decimal.
    pub fn average_rating(&self) -> Option<f32> {
        if self.feedback.is_empty() {
            return None;
        }
        let sum: u32 = self
            .feedback
            .iter()
            .map(|f| u32::from(f.rating.get()))
            .sum();
        let avg = sum as f32 / self.feedback.len() as f32;
        Some((avg * 10.0).round() / 10.0)
    }
}

/// Listing details supplied by an owner.
#[derive(Clone, Debug, PartialEq)]
pub struct HostelDraft {
    pub name: HostelName,
    pub phone: PhoneNumber,
    pub email: Option<EmailAddress>,
    pub address: Address,
    pub city: City,
    pub hostel_type: HostelType,
    pub total_beds: BedCount,
    pub description: Option<String>,
    pub amenities: BTreeSet<Amenity>,
    pub rent_tiers: Vec<RentTier>,
    pub media: Vec<MediaUrl>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewHostel {
    pub owner_id: OwnerId,
    pub draft: HostelDraft,
}

impl NewHostel {
    #[must_use]
    pub fn new(owner_id: OwnerId, draft: HostelDraft) -> Self {
        Self { owner_id, draft }
    }
}

/// Replacement listing details; vacancies are recomputed from admissions.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateHostel {
    pub draft: HostelDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostel_type_parses_case_insensitively() {
        assert_eq!("Boys".parse::<HostelType>(), Ok(HostelType::Boys));
        assert_eq!(" girls ".parse::<HostelType>(), Ok(HostelType::Girls));
        assert!("mixed".parse::<HostelType>().is_err());
    }

    #[test]
    fn amenity_round_trips_through_str() {
        for amenity in Amenity::ALL {
            assert_eq!(amenity.as_str().parse::<Amenity>(), Ok(amenity));
        }
        assert!("pool".parse::<Amenity>().is_err());
    }

    #[test]
    fn rent_tiers_are_sorted_and_deduplicated() {
        let tiers = vec![
            RentTier::try_new(3, 3000).unwrap(),
            RentTier::try_new(1, 6000).unwrap(),
        ];
        let sorted = normalize_rent_tiers(tiers).unwrap();
        assert_eq!(sorted[0].occupancy.get(), 1);
        assert_eq!(sorted[1].occupancy.get(), 3);

        let duplicated = vec![
            RentTier::try_new(2, 3000).unwrap(),
            RentTier::try_new(2, 3500).unwrap(),
        ];
        assert!(normalize_rent_tiers(duplicated).is_err());
    }
}
