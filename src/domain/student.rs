use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, HostelId, PersonName, PhoneNumber, RoomLabel, StudentId};

/// A student admitted to a hostel by its owner.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub hostel_id: HostelId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub room: Option<RoomLabel>,
    pub admitted_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewStudent {
    pub hostel_id: HostelId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub room: Option<RoomLabel>,
}
