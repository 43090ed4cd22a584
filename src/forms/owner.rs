use serde::Deserialize;
use validator::Validate;

use crate::domain::owner::NewOwner;
use crate::domain::types::{EmailAddress, PersonName, PhoneNumber};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
pub struct AddOwnerForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl TryFrom<AddOwnerForm> for NewOwner {
    type Error = FormError;

    fn try_from(form: AddOwnerForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let phone = non_blank(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;
        Ok(NewOwner::new(
            PersonName::new(form.name).map_err(|_| FormError::InvalidName)?,
            EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone,
        ))
    }
}

/// Toggle submitted from the owners table.
#[derive(Debug, Deserialize)]
pub struct OwnerActiveForm {
    #[serde(default)]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_form_normalizes_email() {
        let form = AddOwnerForm {
            name: "Asha".into(),
            email: "ASHA@example.com".into(),
            phone: None,
        };
        let owner = NewOwner::try_from(form).unwrap();
        assert_eq!(owner.email.as_str(), "asha@example.com");
    }

    #[test]
    fn owner_form_rejects_blank_name() {
        let form = AddOwnerForm {
            name: String::new(),
            email: "asha@example.com".into(),
            phone: None,
        };
        assert!(matches!(
            NewOwner::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
