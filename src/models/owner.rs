//! Diesel models representing hostel owners.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::owner::{NewOwner as DomainNewOwner, Owner as DomainOwner};
use crate::domain::types::{EmailAddress, OwnerId, PersonName, PhoneNumber, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::owners)]
/// Diesel model for [`crate::domain::owner::Owner`].
pub struct Owner {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::owners)]
/// Insertable form of [`Owner`].
pub struct NewOwner<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
}

impl TryFrom<Owner> for DomainOwner {
    type Error = TypeConstraintError;

    fn try_from(owner: Owner) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OwnerId::try_from(owner.id)?,
            name: PersonName::new(owner.name)?,
            email: EmailAddress::new(owner.email)?,
            phone: owner.phone.map(PhoneNumber::new).transpose()?,
            is_active: owner.is_active,
            created_at: owner.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewOwner> for NewOwner<'a> {
    fn from(owner: &'a DomainNewOwner) -> Self {
        Self {
            name: owner.name.as_str(),
            email: owner.email.as_str(),
            phone: owner.phone.as_ref().map(PhoneNumber::as_str),
        }
    }
}
