use crate::domain::hostel::Hostel;
use crate::domain::owner::Owner;
use crate::domain::student::Student;
use crate::pagination::Paginated;

/// Data required to render the owner dashboard.
pub struct OwnerDashboardData {
    pub owner: Owner,
    pub hostels: Paginated<Hostel>,
}

/// Data required to render the admitted students of one hostel.
pub struct StudentsPageData {
    pub hostel: Hostel,
    pub students: Vec<Student>,
}
