//! Administrator dashboard: owner accounts, verification and bulk import.

use std::collections::HashMap;

use crate::domain::filter::FilterState;
use crate::domain::hostel::NewHostel;
use crate::domain::owner::{NewOwner, Owner};
use crate::domain::role::Role;
use crate::domain::types::{HostelId, OwnerId};
use crate::dto::admin::{OwnersPageData, OwnersQuery, VerificationPageData, VerificationQuery};
use crate::forms::admin::UploadHostelsForm;
use crate::forms::owner::AddOwnerForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    HostelListQuery, HostelReader, HostelWriter, OwnerListQuery, OwnerReader, OwnerWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};

pub fn load_owners<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OwnersQuery,
) -> ServiceResult<OwnersPageData>
where
    R: OwnerReader + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = OwnerListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(search) = &query.search {
        list_query = list_query.search(search.as_str());
    }
    let search_query = list_query.search.clone();

    let (total, owners) = repo.list_owners(list_query).map_err(|err| {
        log::error!("Failed to list owners: {err}");
        ServiceError::from(err)
    })?;

    Ok(OwnersPageData {
        owners: Paginated::new(owners, page, total, DEFAULT_ITEMS_PER_PAGE),
        search_query,
    })
}

/// Registers a new owner account. Emails are unique.
pub fn add_owner<R>(repo: &R, user: &AuthenticatedUser, form: AddOwnerForm) -> ServiceResult<Owner>
where
    R: OwnerReader + OwnerWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    let new_owner = NewOwner::try_from(form).map_err(|err| {
        log::error!("Failed to validate owner form: {err}");
        ServiceError::from(err)
    })?;

    if repo.get_owner_by_email(&new_owner.email)?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "owner {} already exists",
            new_owner.email
        )));
    }

    repo.create_owner(&new_owner).map_err(|err| {
        log::error!("Failed to create owner: {err}");
        ServiceError::from(err)
    })
}

pub fn set_owner_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    owner_id: i32,
    active: bool,
) -> ServiceResult<()>
where
    R: OwnerWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;
    let owner_id = OwnerId::new(owner_id)?;
    repo.set_owner_active(owner_id, active).map_err(|err| {
        log::error!("Failed to update owner {owner_id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes an owner together with their listings.
pub fn delete_owner<R>(repo: &R, user: &AuthenticatedUser, owner_id: i32) -> ServiceResult<()>
where
    R: OwnerWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;
    let owner_id = OwnerId::new(owner_id)?;
    repo.delete_owner(owner_id).map_err(|err| {
        log::error!("Failed to delete owner {owner_id}: {err}");
        ServiceError::from(err)
    })
}

/// Listings awaiting verification, or the verified ones when requested.
pub fn load_verification_queue<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: VerificationQuery,
) -> ServiceResult<VerificationPageData>
where
    R: HostelReader + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    let page = query.page.unwrap_or(1).max(1);
    let list_query = HostelListQuery::new(FilterState::new())
        .verified(query.verified)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, hostels) = repo.list_hostels(list_query).map_err(|err| {
        log::error!("Failed to list hostels for verification: {err}");
        ServiceError::from(err)
    })?;

    Ok(VerificationPageData {
        hostels: Paginated::new(hostels, page, total, DEFAULT_ITEMS_PER_PAGE),
        show_verified: query.verified,
    })
}

pub fn set_hostel_verified<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
    verified: bool,
) -> ServiceResult<()>
where
    R: HostelWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;
    let hostel_id = HostelId::new(hostel_id)?;
    repo.set_hostel_verified(hostel_id, verified)
        .map_err(|err| {
            log::error!("Failed to set verification of hostel {hostel_id}: {err}");
            ServiceError::from(err)
        })
}

/// Parses the uploaded CSV and creates every listing in one transaction.
/// Imported listings start unverified. Returns how many were created.
pub fn upload_hostels<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadHostelsForm,
) -> ServiceResult<usize>
where
    R: OwnerReader + HostelWriter + ?Sized,
{
    ensure_role(user, &[Role::Admin])?;

    let rows = form.parse().map_err(|err| {
        log::error!("Failed to parse hostels csv: {err}");
        ServiceError::from(err)
    })?;

    let mut owners: HashMap<String, OwnerId> = HashMap::new();
    let mut new_hostels = Vec::with_capacity(rows.len());
    for row in rows {
        let owner_id = match owners.get(row.owner_email.as_str()) {
            Some(id) => *id,
            None => {
                let owner = repo.get_owner_by_email(&row.owner_email)?.ok_or_else(|| {
                    ServiceError::Form(format!("unknown owner {}", row.owner_email))
                })?;
                owners.insert(row.owner_email.as_str().to_string(), owner.id);
                owner.id
            }
        };
        new_hostels.push(NewHostel::new(owner_id, row.draft));
    }

    repo.create_hostels(&new_hostels).map_err(|err| {
        log::error!("Failed to import hostels: {err}");
        ServiceError::from(err)
    })
}
