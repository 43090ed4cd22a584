use serde::Deserialize;
use validator::Validate;

use crate::domain::feedback::{NewComplaint, NewFeedback};
use crate::domain::types::{EmailAddress, HostelId, PersonName, Rating, SanitizedText};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackForm {
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

impl FeedbackForm {
    pub fn into_new_feedback(self, hostel_id: HostelId) -> Result<NewFeedback, FormError> {
        self.validate()?;
        Ok(NewFeedback {
            hostel_id,
            author_name: PersonName::new(self.author_name).map_err(|_| FormError::InvalidName)?,
            rating: Rating::new(self.rating)?,
            message: SanitizedText::new(self.message)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ComplaintForm {
    #[validate(email)]
    pub author_email: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

impl ComplaintForm {
    pub fn into_new_complaint(self, hostel_id: HostelId) -> Result<NewComplaint, FormError> {
        self.validate()?;
        Ok(NewComplaint {
            hostel_id,
            author_email: EmailAddress::new(self.author_email)
                .map_err(|_| FormError::InvalidEmail)?,
            message: SanitizedText::new(self.message)?,
        })
    }
}
