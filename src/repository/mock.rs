//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::feedback::{Complaint, Feedback, NewComplaint, NewFeedback};
use crate::domain::hostel::{Hostel, NewHostel, UpdateHostel};
use crate::domain::owner::{NewOwner, Owner};
use crate::domain::student::{NewStudent, Student};
use crate::domain::types::{ComplaintId, EmailAddress, HostelId, OwnerId, StudentId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    FeedbackWriter, HostelListQuery, HostelReader, HostelWriter, OwnerListQuery, OwnerReader,
    OwnerWriter, StudentReader, StudentWriter,
};

mock! {
    pub Repository {}

    impl HostelReader for Repository {
        fn get_hostel_by_id(&self, id: HostelId) -> RepositoryResult<Option<Hostel>>;
        fn list_hostels(&self, query: HostelListQuery) -> RepositoryResult<(usize, Vec<Hostel>)>;
    }

    impl HostelWriter for Repository {
        fn create_hostel(&self, new_hostel: &NewHostel) -> RepositoryResult<Hostel>;
        fn create_hostels(&self, new_hostels: &[NewHostel]) -> RepositoryResult<usize>;
        fn update_hostel(&self, id: HostelId, updates: &UpdateHostel) -> RepositoryResult<Hostel>;
        fn set_hostel_verified(&self, id: HostelId, verified: bool) -> RepositoryResult<()>;
        fn delete_hostel(&self, id: HostelId) -> RepositoryResult<()>;
    }

    impl OwnerReader for Repository {
        fn get_owner_by_id(&self, id: OwnerId) -> RepositoryResult<Option<Owner>>;
        fn get_owner_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<Owner>>;
        fn list_owners(&self, query: OwnerListQuery) -> RepositoryResult<(usize, Vec<Owner>)>;
    }

    impl OwnerWriter for Repository {
        fn create_owner(&self, new_owner: &NewOwner) -> RepositoryResult<Owner>;
        fn set_owner_active(&self, id: OwnerId, active: bool) -> RepositoryResult<()>;
        fn delete_owner(&self, id: OwnerId) -> RepositoryResult<()>;
    }

    impl StudentReader for Repository {
        fn get_student_by_id(&self, id: StudentId) -> RepositoryResult<Option<Student>>;
        fn list_students(&self, hostel_id: HostelId) -> RepositoryResult<Vec<Student>>;
    }

    impl StudentWriter for Repository {
        fn admit_student(&self, new_student: &NewStudent) -> RepositoryResult<Student>;
        fn remove_student(&self, id: StudentId) -> RepositoryResult<()>;
    }

    impl FeedbackWriter for Repository {
        fn add_feedback(&self, feedback: &NewFeedback) -> RepositoryResult<Feedback>;
        fn add_complaint(&self, complaint: &NewComplaint) -> RepositoryResult<Complaint>;
        fn resolve_complaint(&self, id: ComplaintId, hostel_id: HostelId) -> RepositoryResult<()>;
    }
}
