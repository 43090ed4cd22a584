//! Bulk listing import for administrators.

use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;

use crate::domain::hostel::HostelDraft;
use crate::domain::types::{
    Address, BedCount, City, EmailAddress, HostelName, PhoneNumber, SanitizedText,
};
use crate::forms::FormError;
use crate::forms::hostel::{parse_amenities, parse_media, parse_rent_tiers};

#[derive(MultipartForm)]
pub struct UploadHostelsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

/// One CSV line: the listing and the email of the owner it belongs to.
#[derive(Debug)]
pub struct HostelCsvRow {
    pub owner_email: EmailAddress,
    pub draft: HostelDraft,
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    owner_email: String,
    name: String,
    phone: String,
    #[serde(default)]
    email: String,
    address: String,
    city: String,
    #[serde(rename = "type")]
    hostel_type: String,
    total_beds: i64,
    #[serde(default)]
    description: String,
    /// `wifi;gym`
    #[serde(default)]
    amenities: String,
    /// `1:7000;3:3000`
    rent: String,
    /// Space separated image URLs.
    #[serde(default)]
    media: String,
}

fn split_rent(rent: &str) -> Result<(Vec<String>, Vec<String>), FormError> {
    let mut occupancy = Vec::new();
    let mut price = Vec::new();
    for tier in rent.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        let (o, p) = tier
            .split_once(':')
            .ok_or_else(|| FormError::InvalidRentTiers(format!("`{tier}` is not size:price")))?;
        occupancy.push(o.to_string());
        price.push(p.to_string());
    }
    Ok((occupancy, price))
}

impl TryFrom<CsvRecord> for HostelCsvRow {
    type Error = FormError;

    fn try_from(record: CsvRecord) -> Result<Self, Self::Error> {
        let email = Some(record.email.trim())
            .filter(|e| !e.is_empty())
            .map(EmailAddress::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let description = Some(record.description.trim())
            .filter(|d| !d.is_empty())
            .map(SanitizedText::new)
            .transpose()?
            .map(SanitizedText::into_inner);
        let (occupancy, price) = split_rent(&record.rent)?;

        let draft = HostelDraft {
            name: HostelName::new(record.name).map_err(|_| FormError::InvalidName)?,
            phone: PhoneNumber::new(record.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            email,
            address: Address::new(record.address)?,
            city: City::new(record.city)?,
            hostel_type: record.hostel_type.parse()?,
            total_beds: BedCount::new(record.total_beds)?,
            description,
            amenities: parse_amenities(record.amenities.split(';'))?,
            rent_tiers: parse_rent_tiers(&occupancy, &price)?,
            media: parse_media(record.media.split_whitespace())?,
        };

        Ok(Self {
            owner_email: EmailAddress::new(record.owner_email)
                .map_err(|_| FormError::InvalidEmail)?,
            draft,
        })
    }
}

/// Parses the whole file; the first bad line aborts the import.
pub fn parse_hostels_csv<R: Read>(reader: R) -> Result<Vec<HostelCsvRow>, FormError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    rdr.deserialize::<CsvRecord>()
        .enumerate()
        .map(|(index, record)| {
            let line = index + 2;
            let record = record.map_err(|e| FormError::Csv(format!("line {line}: {e}")))?;
            HostelCsvRow::try_from(record).map_err(|e| FormError::Csv(format!("line {line}: {e}")))
        })
        .collect()
}

impl UploadHostelsForm {
    pub fn parse(&mut self) -> Result<Vec<HostelCsvRow>, FormError> {
        parse_hostels_csv(self.csv.file.as_file_mut())
    }
}
