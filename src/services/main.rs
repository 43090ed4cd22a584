//! Public search pages and listing detail.

use crate::domain::role::Role;
use crate::domain::types::HostelId;
use crate::dto::api::HostelsQuery;
use crate::dto::main::{HostelPageData, SearchPageData};
use crate::forms::feedback::{ComplaintForm, FeedbackForm};
use crate::listing::RepositoryListingSource;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{FeedbackWriter, HostelReader};
use crate::services::{ServiceError, ServiceResult};

/// Loads one page of verified listings matching the submitted filters.
pub fn load_search_page<R>(
    repo: &R,
    query: HostelsQuery,
    default_limit: usize,
) -> ServiceResult<SearchPageData>
where
    R: HostelReader + ?Sized,
{
    let request = query
        .clone()
        .into_request(default_limit)
        .map_err(|e| ServiceError::Form(e.to_string()))?;

    let source = RepositoryListingSource::new(repo);
    let page = source.query(&request.filter, request.page, request.limit)?;

    Ok(SearchPageData {
        hostels: Paginated::from(page),
        request,
        query,
    })
}

fn can_manage(user: Option<&AuthenticatedUser>, owner_id: i32) -> bool {
    user.is_some_and(|user| user.role.can_manage_owner(user.profile_id, owner_id))
}

/// Loads a listing for its detail page. Unverified listings and complaints
/// are only shown to the owner and administrators.
pub fn load_hostel_page<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    hostel_id: i32,
) -> ServiceResult<HostelPageData>
where
    R: HostelReader + ?Sized,
{
    let hostel_id = HostelId::new(hostel_id)?;
    let mut hostel = repo
        .get_hostel_by_id(hostel_id)?
        .ok_or(ServiceError::NotFound)?;

    let can_manage = can_manage(user, hostel.owner_id.get());
    if !hostel.is_verified && !can_manage {
        return Err(ServiceError::NotFound);
    }
    if !can_manage {
        hostel.complaints.clear();
    }

    Ok(HostelPageData {
        average_rating: hostel.average_rating(),
        hostel,
        can_manage,
    })
}

fn visible_hostel<R>(repo: &R, hostel_id: HostelId) -> ServiceResult<()>
where
    R: HostelReader + ?Sized,
{
    match repo.get_hostel_by_id(hostel_id)? {
        Some(hostel) if hostel.is_verified => Ok(()),
        _ => Err(ServiceError::NotFound),
    }
}

/// Records a student's review of a verified listing.
pub fn add_feedback<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
    form: FeedbackForm,
) -> ServiceResult<()>
where
    R: HostelReader + FeedbackWriter + ?Sized,
{
    match user.role {
        Role::Student => {}
        Role::HostelOwner | Role::Admin => return Err(ServiceError::Unauthorized),
    }

    let hostel_id = HostelId::new(hostel_id)?;
    visible_hostel(repo, hostel_id)?;

    let feedback = form.into_new_feedback(hostel_id).map_err(|err| {
        log::error!("Failed to validate feedback form: {err}");
        ServiceError::from(err)
    })?;
    repo.add_feedback(&feedback)?;
    Ok(())
}

/// Files a complaint about a verified listing.
pub fn add_complaint<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
    form: ComplaintForm,
) -> ServiceResult<()>
where
    R: HostelReader + FeedbackWriter + ?Sized,
{
    match user.role {
        Role::Student => {}
        Role::HostelOwner | Role::Admin => return Err(ServiceError::Unauthorized),
    }

    let hostel_id = HostelId::new(hostel_id)?;
    visible_hostel(repo, hostel_id)?;

    let complaint = form.into_new_complaint(hostel_id).map_err(|err| {
        log::error!("Failed to validate complaint form: {err}");
        ServiceError::from(err)
    })?;
    repo.add_complaint(&complaint)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::Feedback;
    use crate::domain::types::{FeedbackId, PersonName, Rating, SanitizedText};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{hostel, user};

    #[test]
    fn search_page_uses_verified_listings() {
        let mut repo = MockRepository::new();
        repo.expect_list_hostels()
            .withf(|query| query.verified == Some(true))
            .returning(|_| Ok((12, vec![hostel(1, 1, true), hostel(2, 1, true)])));

        let query = HostelsQuery::from_query_string("page=2&limit=10").unwrap();
        let data = load_search_page(&repo, query, 10).unwrap();

        assert_eq!(data.hostels.items.len(), 2);
        assert_eq!(data.hostels.total_pages, 2);
        assert_eq!(data.hostels.page, 2);
    }

    #[test]
    fn invalid_filters_are_form_errors() {
        let repo = MockRepository::new();
        let query = HostelsQuery::from_query_string("minRent=9000&maxRent=10").unwrap();
        assert!(matches!(
            load_search_page(&repo, query, 10),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn unverified_listing_is_hidden_from_students() {
        let mut repo = MockRepository::new();
        repo.expect_get_hostel_by_id()
            .returning(|_| Ok(Some(hostel(5, 3, false))));

        let student = user(Role::Student, None);
        assert!(matches!(
            load_hostel_page(&repo, Some(&student), 5),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            load_hostel_page(&repo, None, 5),
            Err(ServiceError::NotFound)
        ));

        let owner = user(Role::HostelOwner, Some(3));
        let data = load_hostel_page(&repo, Some(&owner), 5).unwrap();
        assert!(data.can_manage);
    }

    #[test]
    fn feedback_is_only_accepted_from_students() {
        let mut repo = MockRepository::new();
        repo.expect_get_hostel_by_id()
            .returning(|_| Ok(Some(hostel(5, 3, true))));
        repo.expect_add_feedback().times(1).returning(|new| {
            Ok(Feedback {
                id: FeedbackId::new(1).unwrap(),
                hostel_id: new.hostel_id,
                author_name: PersonName::new("Meera").unwrap(),
                rating: Rating::new(5).unwrap(),
                message: SanitizedText::new("Great").unwrap(),
                created_at: chrono::Utc::now().naive_utc(),
            })
        });

        let form = || FeedbackForm {
            author_name: "Meera".into(),
            rating: 5,
            message: "Great".into(),
        };

        assert!(add_feedback(&repo, &user(Role::Student, None), 5, form()).is_ok());
        assert!(matches!(
            add_feedback(&repo, &user(Role::HostelOwner, Some(3)), 5, form()),
            Err(ServiceError::Unauthorized)
        ));
    }
}
