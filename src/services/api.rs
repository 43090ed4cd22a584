//! JSON listing API.

use crate::domain::hostel::Hostel;
use crate::domain::page::PageResult;
use crate::dto::api::HostelsQuery;
use crate::listing::RepositoryListingSource;
use crate::models::auth::AuthenticatedUser;
use crate::repository::HostelReader;
use crate::services::main::load_hostel_page;
use crate::services::{ServiceError, ServiceResult};

/// Returns one page of verified listings.
pub fn list_hostels<R>(
    repo: &R,
    query: HostelsQuery,
    default_limit: usize,
) -> ServiceResult<PageResult<Hostel>>
where
    R: HostelReader + ?Sized,
{
    let request = query
        .into_request(default_limit)
        .map_err(|e| ServiceError::Form(e.to_string()))?;

    let mut page = RepositoryListingSource::new(repo).query(
        &request.filter,
        request.page,
        request.limit,
    )?;
    for hostel in &mut page.items {
        hostel.complaints.clear();
    }
    Ok(page)
}

/// Returns a single listing with its feedback. Complaints and unverified
/// listings are only visible to the owner and administrators.
pub fn get_hostel<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    hostel_id: i32,
) -> ServiceResult<Hostel>
where
    R: HostelReader + ?Sized,
{
    match load_hostel_page(repo, user, hostel_id) {
        Ok(data) => Ok(data.hostel),
        Err(ServiceError::TypeConstraint(_)) => Err(ServiceError::NotFound),
        Err(err) => Err(err),
    }
}
