//! Diesel models for hostel listings and their child rows.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::hostel::{
    Amenity, Hostel as DomainHostel, HostelDraft, NewHostel as DomainNewHostel, RentTier,
    normalize_rent_tiers,
};
use crate::domain::types::{
    Address, BedCount, City, EmailAddress, HostelId, HostelName, MediaUrl, OwnerId, PhoneNumber,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::hostels)]
/// Diesel model for [`crate::domain::hostel::Hostel`].
pub struct Hostel {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub hostel_type: String,
    pub total_beds: i32,
    pub vacant_beds: i32,
    pub description: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::hostels)]
/// Insertable form of [`Hostel`].
pub struct NewHostel<'a> {
    pub owner_id: i32,
    pub name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub address: &'a str,
    pub city: &'a str,
    pub hostel_type: &'a str,
    pub total_beds: i32,
    pub vacant_beds: i32,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::hostels)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Hostel`] record.
pub struct UpdateHostel<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub address: &'a str,
    pub city: &'a str,
    pub hostel_type: &'a str,
    pub total_beds: i32,
    pub description: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::hostel_amenities)]
pub struct HostelAmenity {
    pub hostel_id: i32,
    pub amenity: String,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::rent_tiers)]
pub struct DbRentTier {
    pub hostel_id: i32,
    pub occupancy: i32,
    pub price: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::hostel_media)]
pub struct HostelMedia {
    pub id: i32,
    pub hostel_id: i32,
    pub url: String,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::hostel_media)]
pub struct NewHostelMedia<'a> {
    pub hostel_id: i32,
    pub url: &'a str,
    pub position: i32,
}

/// Child rows loaded alongside a page of hostels.
#[derive(Debug, Default)]
pub struct HostelChildren {
    pub amenities: Vec<HostelAmenity>,
    pub rent_tiers: Vec<DbRentTier>,
    pub media: Vec<HostelMedia>,
}

impl Hostel {
    /// Assembles the domain aggregate from the row and the children that
    /// belong to it. Children of other hostels are ignored.
    pub fn into_domain(self, children: &HostelChildren) -> Result<DomainHostel, TypeConstraintError> {
        let amenities = children
            .amenities
            .iter()
            .filter(|row| row.hostel_id == self.id)
            .map(|row| row.amenity.parse::<Amenity>())
            .collect::<Result<_, _>>()?;

        let tiers = children
            .rent_tiers
            .iter()
            .filter(|row| row.hostel_id == self.id)
            .map(|row| RentTier::try_new(row.occupancy.into(), row.price.into()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut media_rows = children
            .media
            .iter()
            .filter(|row| row.hostel_id == self.id)
            .collect::<Vec<_>>();
        media_rows.sort_by_key(|row| (row.position, row.id));
        let media = media_rows
            .into_iter()
            .map(|row| MediaUrl::new(row.url.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DomainHostel {
            id: HostelId::new(self.id)?,
            owner_id: OwnerId::new(self.owner_id)?,
            name: HostelName::new(self.name)?,
            phone: PhoneNumber::new(self.phone)?,
            email: self.email.map(EmailAddress::new).transpose()?,
            address: Address::new(self.address)?,
            city: City::new(self.city)?,
            hostel_type: self.hostel_type.parse()?,
            total_beds: BedCount::new(self.total_beds.into())?,
            vacant_beds: BedCount::new(self.vacant_beds.into())?,
            description: self.description,
            amenities,
            rent_tiers: normalize_rent_tiers(tiers)?,
            media,
            is_verified: self.is_verified,
            feedback: Vec::new(),
            complaints: Vec::new(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewHostel> for NewHostel<'a> {
    fn from(hostel: &'a DomainNewHostel) -> Self {
        let draft = &hostel.draft;
        let beds = draft.total_beds.get() as i32;
        Self {
            owner_id: hostel.owner_id.get(),
            name: draft.name.as_str(),
            phone: draft.phone.as_str(),
            email: draft.email.as_ref().map(|e| e.as_str()),
            address: draft.address.as_str(),
            city: draft.city.as_str(),
            hostel_type: draft.hostel_type.as_str(),
            total_beds: beds,
            vacant_beds: beds,
            description: draft.description.as_deref(),
        }
    }
}

impl<'a> UpdateHostel<'a> {
    pub fn from_draft(draft: &'a HostelDraft, updated_at: NaiveDateTime) -> Self {
        Self {
            name: draft.name.as_str(),
            phone: draft.phone.as_str(),
            email: draft.email.as_ref().map(|e| e.as_str()),
            address: draft.address.as_str(),
            city: draft.city.as_str(),
            hostel_type: draft.hostel_type.as_str(),
            total_beds: draft.total_beds.get() as i32,
            description: draft.description.as_deref(),
            updated_at,
        }
    }
}

/// Child rows to insert for a freshly created or replaced listing.
pub fn child_rows(
    hostel_id: i32,
    draft: &HostelDraft,
) -> (Vec<HostelAmenity>, Vec<DbRentTier>, Vec<NewHostelMedia<'_>>) {
    let amenities = draft
        .amenities
        .iter()
        .map(|amenity| HostelAmenity {
            hostel_id,
            amenity: amenity.as_str().to_string(),
        })
        .collect();
    let tiers = draft
        .rent_tiers
        .iter()
        .map(|tier| DbRentTier {
            hostel_id,
            occupancy: i32::from(tier.occupancy.get()),
            price: tier.price.get() as i32,
        })
        .collect();
    let media = draft
        .media
        .iter()
        .enumerate()
        .map(|(position, url)| NewHostelMedia {
            hostel_id,
            url: url.as_str(),
            position: position as i32,
        })
        .collect();
    (amenities, tiers, media)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn db_hostel(id: i32) -> Hostel {
        let now = Utc::now().naive_utc();
        Hostel {
            id,
            owner_id: 3,
            name: "Sunrise".to_string(),
            phone: "+14155552671".to_string(),
            email: Some("desk@sunrise.example".to_string()),
            address: "1 Main St".to_string(),
            city: "Pune".to_string(),
            hostel_type: "boys".to_string(),
            total_beds: 40,
            vacant_beds: 12,
            description: None,
            is_verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn into_domain_collects_only_own_children() {
        let children = HostelChildren {
            amenities: vec![
                HostelAmenity {
                    hostel_id: 1,
                    amenity: "wifi".to_string(),
                },
                HostelAmenity {
                    hostel_id: 2,
                    amenity: "gym".to_string(),
                },
            ],
            rent_tiers: vec![
                DbRentTier {
                    hostel_id: 1,
                    occupancy: 3,
                    price: 3000,
                },
                DbRentTier {
                    hostel_id: 1,
                    occupancy: 1,
                    price: 7000,
                },
            ],
            media: vec![
                HostelMedia {
                    id: 9,
                    hostel_id: 1,
                    url: "https://cdn.example.com/b.jpg".to_string(),
                    position: 1,
                },
                HostelMedia {
                    id: 8,
                    hostel_id: 1,
                    url: "https://cdn.example.com/a.jpg".to_string(),
                    position: 0,
                },
            ],
        };

        let hostel = db_hostel(1).into_domain(&children).unwrap();

        assert_eq!(hostel.amenities.len(), 1);
        assert!(hostel.amenities.contains(&Amenity::Wifi));
        assert_eq!(hostel.rent_tiers[0].occupancy.get(), 1);
        assert_eq!(hostel.starting_rent().map(|r| r.get()), Some(3000));
        assert_eq!(hostel.media[0].as_str(), "https://cdn.example.com/a.jpg");
        assert_eq!(hostel.vacant_beds.get(), 12);
    }

    #[test]
    fn into_domain_rejects_unknown_type() {
        let mut row = db_hostel(1);
        row.hostel_type = "mixed".to_string();
        assert!(row.into_domain(&HostelChildren::default()).is_err());
    }
}
