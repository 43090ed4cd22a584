use diesel::prelude::*;

use crate::domain::feedback::{Complaint, Feedback, NewComplaint, NewFeedback};
use crate::domain::types::{ComplaintId, HostelId};
use crate::models::feedback::{
    Complaint as DbComplaint, Feedback as DbFeedback, NewComplaint as DbNewComplaint,
    NewFeedback as DbNewFeedback,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, FeedbackWriter};

impl FeedbackWriter for DieselRepository {
    fn add_feedback(&self, feedback: &NewFeedback) -> RepositoryResult<Feedback> {
        use crate::schema::feedbacks;

        let mut conn = self.conn()?;
        let db_new_feedback: DbNewFeedback = feedback.into();

        let db_feedback = diesel::insert_into(feedbacks::table)
            .values(&db_new_feedback)
            .returning(DbFeedback::as_returning())
            .get_result::<DbFeedback>(&mut conn)?;

        Ok(Feedback::try_from(db_feedback)?)
    }

    fn add_complaint(&self, complaint: &NewComplaint) -> RepositoryResult<Complaint> {
        use crate::schema::complaints;

        let mut conn = self.conn()?;
        let db_new_complaint: DbNewComplaint = complaint.into();

        let db_complaint = diesel::insert_into(complaints::table)
            .values(&db_new_complaint)
            .returning(DbComplaint::as_returning())
            .get_result::<DbComplaint>(&mut conn)?;

        Ok(Complaint::try_from(db_complaint)?)
    }

    fn resolve_complaint(&self, id: ComplaintId, hostel_id: HostelId) -> RepositoryResult<()> {
        use crate::schema::complaints;

        let mut conn = self.conn()?;
        let affected = diesel::update(
            complaints::table
                .filter(complaints::id.eq(id.get()))
                .filter(complaints::hostel_id.eq(hostel_id.get())),
        )
        .set(complaints::resolved.eq(true))
        .execute(&mut conn)?;

        match affected {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }
}
