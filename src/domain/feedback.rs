use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ComplaintId, EmailAddress, FeedbackId, HostelId, PersonName, Rating, SanitizedText,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub id: FeedbackId,
    pub hostel_id: HostelId,
    pub author_name: PersonName,
    pub rating: Rating,
    pub message: SanitizedText,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewFeedback {
    pub hostel_id: HostelId,
    pub author_name: PersonName,
    pub rating: Rating,
    pub message: SanitizedText,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Complaint {
    pub id: ComplaintId,
    pub hostel_id: HostelId,
    pub author_email: EmailAddress,
    pub message: SanitizedText,
    pub resolved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewComplaint {
    pub hostel_id: HostelId,
    pub author_email: EmailAddress,
    pub message: SanitizedText,
}
