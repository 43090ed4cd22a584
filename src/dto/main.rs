use serde::Serialize;

use crate::domain::hostel::{Amenity, Hostel};
use crate::dto::api::{HostelsQuery, ListingRequest};
use crate::pagination::Paginated;

/// Data required to render the public search page.
pub struct SearchPageData {
    pub hostels: Paginated<Hostel>,
    /// The validated request, used to build page links.
    pub request: ListingRequest,
    /// Raw inputs echoed back into the filter form.
    pub query: HostelsQuery,
}

impl SearchPageData {
    /// Query strings for each rendered page link, keyed by page number.
    pub fn page_links(&self) -> Vec<PageLink> {
        self.hostels
            .pages
            .iter()
            .map(|page| PageLink {
                page: *page,
                query: page.map(|n| self.request.query_for_page(n)),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct PageLink {
    pub page: Option<usize>,
    pub query: Option<String>,
}

/// Amenity checkbox state for the filter form.
#[derive(Debug, Serialize)]
pub struct AmenityOption {
    pub value: &'static str,
    pub checked: bool,
}

pub fn amenity_options(request: &ListingRequest) -> Vec<AmenityOption> {
    Amenity::ALL
        .iter()
        .map(|amenity| AmenityOption {
            value: amenity.as_str(),
            checked: request.filter.amenities.contains(amenity),
        })
        .collect()
}

/// Data required to render a single listing.
pub struct HostelPageData {
    pub hostel: Hostel,
    /// Owner of the listing or an administrator.
    pub can_manage: bool,
    pub average_rating: Option<f32>,
}
