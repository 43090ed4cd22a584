use serde::Deserialize;
use validator::Validate;

use crate::domain::student::NewStudent;
use crate::domain::types::{EmailAddress, HostelId, PersonName, PhoneNumber, RoomLabel};
use crate::forms::{FormError, non_blank};

/// Owner form admitting a student into one of their hostels.
#[derive(Debug, Deserialize, Validate)]
pub struct AdmitStudentForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub room: Option<String>,
}

impl AdmitStudentForm {
    pub fn into_new_student(self, hostel_id: HostelId) -> Result<NewStudent, FormError> {
        self.validate()?;
        Ok(NewStudent {
            hostel_id,
            name: PersonName::new(self.name).map_err(|_| FormError::InvalidName)?,
            email: EmailAddress::new(self.email).map_err(|_| FormError::InvalidEmail)?,
            phone: non_blank(self.phone)
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|_| FormError::InvalidPhoneNumber)?,
            room: non_blank(self.room).map(RoomLabel::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_become_none() {
        let form = AdmitStudentForm {
            name: "Kiran".into(),
            email: "Kiran@Example.com".into(),
            phone: Some("  ".into()),
            room: Some(String::new()),
        };
        let student = form.into_new_student(HostelId::new(2).unwrap()).unwrap();
        assert_eq!(student.email.as_str(), "kiran@example.com");
        assert_eq!(student.phone, None);
        assert_eq!(student.room, None);
    }

    #[test]
    fn bad_phone_is_rejected() {
        let form = AdmitStudentForm {
            name: "Kiran".into(),
            email: "kiran@example.com".into(),
            phone: Some("call me".into()),
            room: Some("B-12".into()),
        };
        assert!(matches!(
            form.into_new_student(HostelId::new(2).unwrap()),
            Err(FormError::InvalidPhoneNumber)
        ));
    }
}
