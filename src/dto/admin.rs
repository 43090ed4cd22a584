use crate::domain::hostel::Hostel;
use crate::domain::owner::Owner;
use crate::pagination::Paginated;

/// Query parameters of the owners table.
#[derive(Debug, Default, serde::Deserialize)]
pub struct OwnersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

pub struct OwnersPageData {
    pub owners: Paginated<Owner>,
    pub search_query: Option<String>,
}

/// Listings waiting for (or holding) verification.
pub struct VerificationPageData {
    pub hostels: Paginated<Hostel>,
    pub show_verified: bool,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct VerificationQuery {
    pub page: Option<usize>,
    #[serde(default)]
    pub verified: bool,
}
