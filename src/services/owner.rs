//! Owner dashboard: listings, admissions and complaint handling.

use crate::domain::filter::FilterState;
use crate::domain::hostel::{Hostel, HostelDraft, NewHostel, UpdateHostel};
use crate::domain::owner::Owner;
use crate::domain::role::Role;
use crate::domain::types::{ComplaintId, HostelId, StudentId};
use crate::dto::owner::{OwnerDashboardData, StudentsPageData};
use crate::forms::hostel::HostelForm;
use crate::forms::student::AdmitStudentForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    FeedbackWriter, HostelListQuery, HostelReader, HostelWriter, OwnerReader, StudentReader,
    StudentWriter,
};
use crate::services::{ServiceError, ServiceResult, owner_profile};

/// Resolves the session's owner profile and checks it is still active.
fn active_owner<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Owner>
where
    R: OwnerReader + ?Sized,
{
    let owner_id = owner_profile(user)?;
    match repo.get_owner_by_id(owner_id)? {
        Some(owner) if owner.is_active => Ok(owner),
        Some(_) => {
            log::warn!("Deactivated owner {owner_id} tried to use the dashboard");
            Err(ServiceError::Unauthorized)
        }
        None => Err(ServiceError::Unauthorized),
    }
}

/// Loads a listing the user may manage. Owners must also be active.
fn managed_hostel<R>(repo: &R, user: &AuthenticatedUser, hostel_id: i32) -> ServiceResult<Hostel>
where
    R: HostelReader + OwnerReader + ?Sized,
{
    let hostel_id = HostelId::new(hostel_id)?;
    let hostel = repo
        .get_hostel_by_id(hostel_id)?
        .ok_or(ServiceError::NotFound)?;

    if !user
        .role
        .can_manage_owner(user.profile_id, hostel.owner_id.get())
    {
        return Err(ServiceError::Unauthorized);
    }
    match user.role {
        Role::HostelOwner => {
            active_owner(repo, user)?;
        }
        Role::Admin | Role::Student => {}
    }
    Ok(hostel)
}

fn draft_from_form(form: HostelForm) -> ServiceResult<HostelDraft> {
    HostelDraft::try_from(form).map_err(|err| {
        log::error!("Failed to validate hostel form: {err}");
        ServiceError::from(err)
    })
}

pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
) -> ServiceResult<OwnerDashboardData>
where
    R: HostelReader + OwnerReader + ?Sized,
{
    let owner = active_owner(repo, user)?;
    let page = page.max(1);

    let query = HostelListQuery::new(FilterState::new())
        .owner(owner.id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, hostels) = repo.list_hostels(query).map_err(|err| {
        log::error!("Failed to list hostels of owner {}: {err}", owner.id);
        ServiceError::from(err)
    })?;

    Ok(OwnerDashboardData {
        owner,
        hostels: Paginated::new(hostels, page, total, DEFAULT_ITEMS_PER_PAGE),
    })
}

/// Creates an unverified listing for the signed-in owner.
pub fn add_hostel<R>(repo: &R, user: &AuthenticatedUser, form: HostelForm) -> ServiceResult<Hostel>
where
    R: OwnerReader + HostelWriter + ?Sized,
{
    let owner = active_owner(repo, user)?;
    let draft = draft_from_form(form)?;

    repo.create_hostel(&NewHostel::new(owner.id, draft))
        .map_err(|err| {
            log::error!("Failed to create hostel: {err}");
            ServiceError::from(err)
        })
}

/// Replaces the details of a listing. Vacancies are recomputed from admissions.
pub fn save_hostel<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
    form: HostelForm,
) -> ServiceResult<Hostel>
where
    R: HostelReader + HostelWriter + OwnerReader + ?Sized,
{
    let hostel = managed_hostel(repo, user, hostel_id)?;
    let draft = draft_from_form(form)?;

    repo.update_hostel(hostel.id, &UpdateHostel { draft })
        .map_err(|err| {
            log::error!("Failed to update hostel {}: {err}", hostel.id);
            ServiceError::from(err)
        })
}

pub fn delete_hostel<R>(repo: &R, user: &AuthenticatedUser, hostel_id: i32) -> ServiceResult<()>
where
    R: HostelReader + HostelWriter + OwnerReader + ?Sized,
{
    let hostel = managed_hostel(repo, user, hostel_id)?;
    repo.delete_hostel(hostel.id).map_err(|err| {
        log::error!("Failed to delete hostel {}: {err}", hostel.id);
        ServiceError::from(err)
    })
}

pub fn load_students<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
) -> ServiceResult<StudentsPageData>
where
    R: HostelReader + OwnerReader + StudentReader + ?Sized,
{
    let hostel = managed_hostel(repo, user, hostel_id)?;
    let students = repo.list_students(hostel.id)?;
    Ok(StudentsPageData { hostel, students })
}

/// Admits a student, taking one vacant bed.
pub fn admit_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
    form: AdmitStudentForm,
) -> ServiceResult<()>
where
    R: HostelReader + OwnerReader + StudentWriter + ?Sized,
{
    let hostel = managed_hostel(repo, user, hostel_id)?;
    if hostel.vacant_beds.get() == 0 {
        return Err(ServiceError::Conflict("no vacant beds left".to_string()));
    }

    let student = form.into_new_student(hostel.id).map_err(|err| {
        log::error!("Failed to validate student form: {err}");
        ServiceError::from(err)
    })?;
    repo.admit_student(&student).map_err(|err| {
        log::error!("Failed to admit student to hostel {}: {err}", hostel.id);
        ServiceError::from(err)
    })?;
    Ok(())
}

pub fn remove_student<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
    student_id: i32,
) -> ServiceResult<()>
where
    R: HostelReader + OwnerReader + StudentReader + StudentWriter + ?Sized,
{
    let hostel = managed_hostel(repo, user, hostel_id)?;
    let student_id = StudentId::new(student_id)?;

    match repo.get_student_by_id(student_id)? {
        Some(student) if student.hostel_id == hostel.id => {}
        _ => return Err(ServiceError::NotFound),
    }
    repo.remove_student(student_id).map_err(|err| {
        log::error!("Failed to remove student {student_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn resolve_complaint<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hostel_id: i32,
    complaint_id: i32,
) -> ServiceResult<()>
where
    R: HostelReader + OwnerReader + FeedbackWriter + ?Sized,
{
    let hostel = managed_hostel(repo, user, hostel_id)?;
    let complaint_id = ComplaintId::new(complaint_id)?;
    repo.resolve_complaint(complaint_id, hostel.id)
        .map_err(|err| {
            log::error!("Failed to resolve complaint {complaint_id}: {err}");
            ServiceError::from(err)
        })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::student::Student;
    use crate::domain::types::{BedCount, EmailAddress, PersonName};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{hostel, owner, user};

    fn hostel_form() -> HostelForm {
        HostelForm {
            name: "Sunrise".into(),
            phone: "+14155552671".into(),
            address: "1 Main St".into(),
            city: "Pune".into(),
            hostel_type: "boys".into(),
            total_beds: 20,
            tier_occupancy: vec!["2".into()],
            tier_price: vec!["4500".into()],
            ..HostelForm::default()
        }
    }

    fn student(id: i32, hostel_id: i32) -> Student {
        Student {
            id: StudentId::new(id).unwrap(),
            hostel_id: HostelId::new(hostel_id).unwrap(),
            name: PersonName::new("Ravi").unwrap(),
            email: EmailAddress::new("ravi@example.com").unwrap(),
            phone: None,
            room: None,
            admitted_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn dashboard_lists_only_own_hostels() {
        let mut repo = MockRepository::new();
        repo.expect_get_owner_by_id()
            .returning(|id| Ok(Some(owner(id.get(), true))));
        repo.expect_list_hostels()
            .withf(|query| query.owner_id.map(|id| id.get()) == Some(7) && query.verified.is_none())
            .returning(|_| Ok((1, vec![hostel(1, 7, false)])));

        let data = load_dashboard(&repo, &user(Role::HostelOwner, Some(7)), 1).unwrap();
        assert_eq!(data.owner.id.get(), 7);
        assert_eq!(data.hostels.items.len(), 1);
    }

    #[test]
    fn deactivated_owner_cannot_add_listings() {
        let mut repo = MockRepository::new();
        repo.expect_get_owner_by_id()
            .returning(|id| Ok(Some(owner(id.get(), false))));
        repo.expect_create_hostel().never();

        let result = add_hostel(&repo, &user(Role::HostelOwner, Some(7)), hostel_form());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn add_hostel_binds_owner_from_session() {
        let mut repo = MockRepository::new();
        repo.expect_get_owner_by_id()
            .returning(|id| Ok(Some(owner(id.get(), true))));
        repo.expect_create_hostel()
            .withf(|new| new.owner_id.get() == 7 && new.draft.name.as_str() == "Sunrise")
            .returning(|new| Ok(hostel(1, new.owner_id.get(), false)));

        let created = add_hostel(&repo, &user(Role::HostelOwner, Some(7)), hostel_form()).unwrap();
        assert!(!created.is_verified);
    }

    #[test]
    fn owner_cannot_edit_someone_elses_listing() {
        let mut repo = MockRepository::new();
        repo.expect_get_hostel_by_id()
            .returning(|_| Ok(Some(hostel(3, 8, true))));
        repo.expect_update_hostel().never();

        let result = save_hostel(&repo, &user(Role::HostelOwner, Some(7)), 3, hostel_form());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn admin_may_delete_any_listing() {
        let mut repo = MockRepository::new();
        repo.expect_get_hostel_by_id()
            .returning(|_| Ok(Some(hostel(3, 8, true))));
        repo.expect_delete_hostel().times(1).returning(|_| Ok(()));

        assert!(delete_hostel(&repo, &user(Role::Admin, None), 3).is_ok());
    }

    #[test]
    fn full_hostel_refuses_admission() {
        let mut repo = MockRepository::new();
        repo.expect_get_owner_by_id()
            .returning(|id| Ok(Some(owner(id.get(), true))));
        repo.expect_get_hostel_by_id().returning(|_| {
            let mut full = hostel(3, 7, true);
            full.vacant_beds = BedCount::new(0).unwrap();
            Ok(Some(full))
        });
        repo.expect_admit_student().never();

        let form = AdmitStudentForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: None,
            room: None,
        };
        let result = admit_student(&repo, &user(Role::HostelOwner, Some(7)), 3, form);
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn student_from_another_hostel_is_not_removed() {
        let mut repo = MockRepository::new();
        repo.expect_get_owner_by_id()
            .returning(|id| Ok(Some(owner(id.get(), true))));
        repo.expect_get_hostel_by_id()
            .returning(|_| Ok(Some(hostel(3, 7, true))));
        repo.expect_get_student_by_id()
            .returning(|id| Ok(Some(student(id.get(), 4))));
        repo.expect_remove_student().never();

        let result = remove_student(&repo, &user(Role::HostelOwner, Some(7)), 3, 11);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
