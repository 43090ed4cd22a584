//! Listing form submitted from the owner dashboard.
//!
//! The form repeats `amenities`, `tier_occupancy` and `tier_price`, so it is
//! decoded with `serde_html_form` rather than `web::Form`.

use std::collections::BTreeSet;

use serde::Deserialize;
use validator::Validate;

use crate::domain::hostel::{Amenity, HostelDraft, RentTier, normalize_rent_tiers};
use crate::domain::types::{
    Address, BedCount, City, EmailAddress, HostelName, MediaUrl, PhoneNumber, SanitizedText,
};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct HostelForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    pub hostel_type: String,
    #[validate(range(min = 1, max = 10000))]
    pub total_beds: i64,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub tier_occupancy: Vec<String>,
    #[serde(default)]
    pub tier_price: Vec<String>,
    /// Image URLs separated by newlines or spaces.
    #[serde(default)]
    pub media: String,
}

impl HostelForm {
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Malformed(e.to_string()))
    }
}

/// Parses amenity names, ignoring blanks and duplicates.
pub fn parse_amenities<'a>(
    values: impl IntoIterator<Item = &'a str>,
) -> Result<BTreeSet<Amenity>, FormError> {
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<Amenity>()
                .map_err(|_| FormError::InvalidAmenity(v.to_string()))
        })
        .collect()
}

/// Pairs occupancy and price columns into ordered rent tiers. Rows left
/// entirely blank are skipped.
pub fn parse_rent_tiers(occupancy: &[String], price: &[String]) -> Result<Vec<RentTier>, FormError> {
    if occupancy.len() != price.len() {
        return Err(FormError::InvalidRentTiers(
            "every tier needs an occupancy and a price".to_string(),
        ));
    }

    let mut tiers = Vec::new();
    for (occupancy, price) in occupancy.iter().zip(price) {
        let (occupancy, price) = (occupancy.trim(), price.trim());
        if occupancy.is_empty() && price.is_empty() {
            continue;
        }
        let occupancy = occupancy.parse::<i64>().map_err(|_| {
            FormError::InvalidRentTiers(format!("`{occupancy}` is not a room size"))
        })?;
        let price = price
            .parse::<i64>()
            .map_err(|_| FormError::InvalidRentTiers(format!("`{price}` is not a price")))?;
        tiers.push(RentTier::try_new(occupancy, price)?);
    }

    if tiers.is_empty() {
        return Err(FormError::InvalidRentTiers(
            "at least one rent tier is required".to_string(),
        ));
    }
    normalize_rent_tiers(tiers)
        .map_err(|e| FormError::InvalidRentTiers(e.to_string()))
}

pub fn parse_media<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Vec<MediaUrl>, FormError> {
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| MediaUrl::new(line).map_err(|_| FormError::InvalidUrl(line.to_string())))
        .collect()
}

impl TryFrom<HostelForm> for HostelDraft {
    type Error = FormError;

    fn try_from(form: HostelForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = non_blank(form.email)
            .map(EmailAddress::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let description = non_blank(form.description)
            .map(SanitizedText::new)
            .transpose()?
            .map(SanitizedText::into_inner);

        Ok(Self {
            name: HostelName::new(form.name).map_err(|_| FormError::InvalidName)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            email,
            address: Address::new(form.address)?,
            city: City::new(form.city)?,
            hostel_type: form.hostel_type.trim().parse()?,
            total_beds: BedCount::new(form.total_beds)?,
            description,
            amenities: parse_amenities(form.amenities.iter().map(String::as_str))?,
            rent_tiers: parse_rent_tiers(&form.tier_occupancy, &form.tier_price)?,
            media: parse_media(form.media.split_whitespace())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hostel::HostelType;

    const BODY: &str = "name=Sunrise+Hostel&phone=%2B14155552671&email=&address=1+Main+St\
        &city=Pune&hostel_type=girls&total_beds=40&description=%3Cb%3ECalm%3C%2Fb%3E\
        &amenities=wifi&amenities=gym\
        &tier_occupancy=3&tier_price=3000&tier_occupancy=1&tier_price=7000\
        &tier_occupancy=&tier_price=\
        &media=https%3A%2F%2Fcdn.example.com%2Fa.jpg%0D%0A%0D%0Ahttps%3A%2F%2Fcdn.example.com%2Fb.jpg";

    #[test]
    fn repeated_fields_are_decoded_into_a_draft() {
        let form = HostelForm::from_bytes(BODY.as_bytes()).unwrap();
        let draft = HostelDraft::try_from(form).unwrap();

        assert_eq!(draft.name.as_str(), "Sunrise Hostel");
        assert_eq!(draft.email, None);
        assert_eq!(draft.hostel_type, HostelType::Girls);
        assert_eq!(draft.description.as_deref(), Some("<b>Calm</b>"));
        assert!(draft.amenities.contains(&Amenity::Wifi));
        assert!(draft.amenities.contains(&Amenity::Gym));
        assert_eq!(
            draft
                .rent_tiers
                .iter()
                .map(|t| (t.occupancy.get(), t.price.get()))
                .collect::<Vec<_>>(),
            vec![(1, 7000), (3, 3000)]
        );
        assert_eq!(draft.media.len(), 2);
    }

    #[test]
    fn duplicate_occupancy_is_rejected() {
        let occupancy = vec!["2".to_string(), "2".to_string()];
        let price = vec!["4000".to_string(), "4500".to_string()];
        assert!(matches!(
            parse_rent_tiers(&occupancy, &price),
            Err(FormError::InvalidRentTiers(_))
        ));
    }

    #[test]
    fn half_filled_tier_is_rejected() {
        let occupancy = vec!["2".to_string()];
        let price = vec![String::new()];
        assert!(parse_rent_tiers(&occupancy, &price).is_err());
    }

    #[test]
    fn listing_without_tiers_is_rejected() {
        assert!(parse_rent_tiers(&[], &[]).is_err());
    }

    #[test]
    fn unknown_amenity_is_rejected() {
        assert!(matches!(
            parse_amenities(["wifi", "jacuzzi"]),
            Err(FormError::InvalidAmenity(name)) if name == "jacuzzi"
        ));
    }

    #[test]
    fn zero_beds_fail_validation() {
        let form = HostelForm {
            name: "Sunrise".into(),
            phone: "+14155552671".into(),
            address: "1 Main St".into(),
            city: "Pune".into(),
            hostel_type: "boys".into(),
            total_beds: 0,
            tier_occupancy: vec!["1".into()],
            tier_price: vec!["5000".into()],
            ..HostelForm::default()
        };
        assert!(matches!(
            HostelDraft::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
