//! Diesel models for listing feedback and complaints.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::feedback::{
    Complaint as DomainComplaint, Feedback as DomainFeedback, NewComplaint as DomainNewComplaint,
    NewFeedback as DomainNewFeedback,
};
use crate::domain::types::{
    ComplaintId, EmailAddress, FeedbackId, HostelId, PersonName, Rating, SanitizedText,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::feedbacks)]
pub struct Feedback {
    pub id: i32,
    pub hostel_id: i32,
    pub author_name: String,
    pub rating: i32,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::feedbacks)]
pub struct NewFeedback<'a> {
    pub hostel_id: i32,
    pub author_name: &'a str,
    pub rating: i32,
    pub message: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::complaints)]
pub struct Complaint {
    pub id: i32,
    pub hostel_id: i32,
    pub author_email: String,
    pub message: String,
    pub resolved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::complaints)]
pub struct NewComplaint<'a> {
    pub hostel_id: i32,
    pub author_email: &'a str,
    pub message: &'a str,
}

impl TryFrom<Feedback> for DomainFeedback {
    type Error = TypeConstraintError;

    fn try_from(row: Feedback) -> Result<Self, Self::Error> {
        Ok(Self {
            id: FeedbackId::new(row.id)?,
            hostel_id: HostelId::new(row.hostel_id)?,
            author_name: PersonName::new(row.author_name)?,
            rating: Rating::new(row.rating.into())?,
            message: SanitizedText::new(row.message)?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<Complaint> for DomainComplaint {
    type Error = TypeConstraintError;

    fn try_from(row: Complaint) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ComplaintId::new(row.id)?,
            hostel_id: HostelId::new(row.hostel_id)?,
            author_email: EmailAddress::new(row.author_email)?,
            message: SanitizedText::new(row.message)?,
            resolved: row.resolved,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewFeedback> for NewFeedback<'a> {
    fn from(feedback: &'a DomainNewFeedback) -> Self {
        Self {
            hostel_id: feedback.hostel_id.get(),
            author_name: feedback.author_name.as_str(),
            rating: i32::from(feedback.rating.get()),
            message: feedback.message.as_str(),
        }
    }
}

impl<'a> From<&'a DomainNewComplaint> for NewComplaint<'a> {
    fn from(complaint: &'a DomainNewComplaint) -> Self {
        Self {
            hostel_id: complaint.hostel_id.get(),
            author_email: complaint.author_email.as_str(),
            message: complaint.message.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn feedback_with_bad_rating_is_rejected() {
        let row = Feedback {
            id: 1,
            hostel_id: 1,
            author_name: "Meera".into(),
            rating: 9,
            message: "Nice".into(),
            created_at: Utc::now().naive_utc(),
        };
        assert!(DomainFeedback::try_from(row).is_err());
    }

    #[test]
    fn new_feedback_maps_to_insertable() {
        let domain = DomainNewFeedback {
            hostel_id: HostelId::new(4).unwrap(),
            author_name: PersonName::new("Meera").unwrap(),
            rating: Rating::new(4).unwrap(),
            message: SanitizedText::new("Quiet and clean").unwrap(),
        };
        let insertable: NewFeedback = (&domain).into();
        assert_eq!(insertable.hostel_id, 4);
        assert_eq!(insertable.rating, 4);
        assert_eq!(insertable.message, "Quiet and clean");
    }
}
