use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::student::{NewStudent as DomainNewStudent, Student as DomainStudent};
use crate::domain::types::{
    EmailAddress, HostelId, PersonName, PhoneNumber, RoomLabel, StudentId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::students)]
pub struct Student {
    pub id: i32,
    pub hostel_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub room: Option<String>,
    pub admitted_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::students)]
pub struct NewStudent<'a> {
    pub hostel_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub room: Option<&'a str>,
}

impl TryFrom<Student> for DomainStudent {
    type Error = TypeConstraintError;

    fn try_from(student: Student) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StudentId::new(student.id)?,
            hostel_id: HostelId::new(student.hostel_id)?,
            name: PersonName::new(student.name)?,
            email: EmailAddress::new(student.email)?,
            phone: student.phone.map(PhoneNumber::new).transpose()?,
            room: student.room.map(RoomLabel::new).transpose()?,
            admitted_at: student.admitted_at,
        })
    }
}

impl<'a> From<&'a DomainNewStudent> for NewStudent<'a> {
    fn from(student: &'a DomainNewStudent) -> Self {
        Self {
            hostel_id: student.hostel_id.get(),
            name: student.name.as_str(),
            email: student.email.as_str(),
            phone: student.phone.as_ref().map(PhoneNumber::as_str),
            room: student.room.as_ref().map(RoomLabel::as_str),
        }
    }
}
