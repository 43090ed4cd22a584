use crate::db::{DbConnection, DbPool};
use crate::domain::feedback::{Complaint, Feedback, NewComplaint, NewFeedback};
use crate::domain::filter::FilterState;
use crate::domain::hostel::{Hostel, NewHostel, UpdateHostel};
use crate::domain::owner::{NewOwner, Owner};
use crate::domain::student::{NewStudent, Student};
use crate::domain::types::{ComplaintId, EmailAddress, HostelId, OwnerId, StudentId};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod errors;
pub mod feedback;
pub mod hostel;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod owner;
pub mod student;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(|e| {
            log::error!("Failed to get connection from pool: {e}");
            RepositoryError::from(e)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip. Fails when the page lies beyond what SQLite can address.
    pub fn offset(&self) -> RepositoryResult<i64> {
        (self.page.max(1) - 1)
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())
            .ok_or_else(|| {
                RepositoryError::ValidationError(format!("page {} is out of range", self.page))
            })
    }

    pub fn limit(&self) -> RepositoryResult<i64> {
        i64::try_from(self.per_page).map_err(|_| {
            RepositoryError::ValidationError(format!("page size {} is out of range", self.per_page))
        })
    }
}

/// `LIKE` pattern matching `term` anywhere, with `\` as the escape character
/// so `%` and `_` in the term match literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Selection of listings; rows are always ordered by id so pages are stable.
#[derive(Debug, Clone, Default)]
pub struct HostelListQuery {
    pub filter: FilterState,
    pub owner_id: Option<OwnerId>,
    pub verified: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl HostelListQuery {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct OwnerListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl OwnerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait HostelReader {
    /// Loads a listing together with its feedback and complaints.
    fn get_hostel_by_id(&self, id: HostelId) -> RepositoryResult<Option<Hostel>>;
    fn list_hostels(&self, query: HostelListQuery) -> RepositoryResult<(usize, Vec<Hostel>)>;
}

impl<T: HostelReader + ?Sized> HostelReader for &T {
    fn get_hostel_by_id(&self, id: HostelId) -> RepositoryResult<Option<Hostel>> {
        (**self).get_hostel_by_id(id)
    }

    fn list_hostels(&self, query: HostelListQuery) -> RepositoryResult<(usize, Vec<Hostel>)> {
        (**self).list_hostels(query)
    }
}

pub trait HostelWriter {
    fn create_hostel(&self, new_hostel: &NewHostel) -> RepositoryResult<Hostel>;
    fn create_hostels(&self, new_hostels: &[NewHostel]) -> RepositoryResult<usize>;
    fn update_hostel(&self, id: HostelId, updates: &UpdateHostel) -> RepositoryResult<Hostel>;
    fn set_hostel_verified(&self, id: HostelId, verified: bool) -> RepositoryResult<()>;
    fn delete_hostel(&self, id: HostelId) -> RepositoryResult<()>;
}

pub trait OwnerReader {
    fn get_owner_by_id(&self, id: OwnerId) -> RepositoryResult<Option<Owner>>;
    fn get_owner_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<Owner>>;
    fn list_owners(&self, query: OwnerListQuery) -> RepositoryResult<(usize, Vec<Owner>)>;
}

pub trait OwnerWriter {
    fn create_owner(&self, new_owner: &NewOwner) -> RepositoryResult<Owner>;
    fn set_owner_active(&self, id: OwnerId, active: bool) -> RepositoryResult<()>;
    fn delete_owner(&self, id: OwnerId) -> RepositoryResult<()>;
}

pub trait StudentReader {
    fn get_student_by_id(&self, id: StudentId) -> RepositoryResult<Option<Student>>;
    fn list_students(&self, hostel_id: HostelId) -> RepositoryResult<Vec<Student>>;
}

pub trait StudentWriter {
    /// Admits a student, consuming one vacant bed.
    fn admit_student(&self, new_student: &NewStudent) -> RepositoryResult<Student>;
    /// Removes a student, releasing their bed.
    fn remove_student(&self, id: StudentId) -> RepositoryResult<()>;
}

pub trait FeedbackWriter {
    fn add_feedback(&self, feedback: &NewFeedback) -> RepositoryResult<Feedback>;
    fn add_complaint(&self, complaint: &NewComplaint) -> RepositoryResult<Complaint>;
    fn resolve_complaint(&self, id: ComplaintId, hostel_id: HostelId) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(pagination.offset().unwrap(), 40);
        assert_eq!(pagination.limit().unwrap(), 20);
    }

    #[test]
    fn offset_overflow_is_a_validation_error() {
        let pagination = Pagination {
            page: i64::MAX as usize,
            per_page: 50,
        };
        assert!(matches!(
            pagination.offset(),
            Err(RepositoryError::ValidationError(_))
        ));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(contains_pattern("pune"), "%pune%");
        assert_eq!(contains_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }
}
