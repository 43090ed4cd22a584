//! Repository implementation for admitted students.
//!
//! Admission and removal keep `hostels.vacant_beds` in step with the student
//! rows inside one transaction.

use diesel::prelude::*;

use crate::domain::student::{NewStudent, Student};
use crate::domain::types::{HostelId, StudentId};
use crate::models::student::{NewStudent as DbNewStudent, Student as DbStudent};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, StudentReader, StudentWriter};

impl StudentReader for DieselRepository {
    fn get_student_by_id(&self, id: StudentId) -> RepositoryResult<Option<Student>> {
        use crate::schema::students;

        let mut conn = self.conn()?;
        let db_student = students::table
            .find(id.get())
            .select(DbStudent::as_select())
            .first::<DbStudent>(&mut conn)
            .optional()?;

        match db_student {
            Some(db_student) => Ok(Some(Student::try_from(db_student)?)),
            None => Ok(None),
        }
    }

    fn list_students(&self, hostel_id: HostelId) -> RepositoryResult<Vec<Student>> {
        use crate::schema::students;

        let mut conn = self.conn()?;
        let students = students::table
            .filter(students::hostel_id.eq(hostel_id.get()))
            .order((students::name.asc(), students::id.asc()))
            .select(DbStudent::as_select())
            .load::<DbStudent>(&mut conn)?
            .into_iter()
            .map(Student::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }
}

impl StudentWriter for DieselRepository {
    fn admit_student(&self, new_student: &NewStudent) -> RepositoryResult<Student> {
        use crate::schema::{hostels, students};

        let mut conn = self.conn()?;
        let hostel_id = new_student.hostel_id.get();
        let db_new_student: DbNewStudent = new_student.into();

        let db_student = conn.transaction::<_, RepositoryError, _>(|conn| {
            let vacant = hostels::table
                .find(hostel_id)
                .select(hostels::vacant_beds)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            if vacant <= 0 {
                return Err(RepositoryError::ConstraintViolation(
                    "no vacant beds left".to_string(),
                ));
            }

            let db_student = diesel::insert_into(students::table)
                .values(&db_new_student)
                .returning(DbStudent::as_returning())
                .get_result::<DbStudent>(conn)?;

            diesel::update(hostels::table.find(hostel_id))
                .set(hostels::vacant_beds.eq(hostels::vacant_beds - 1))
                .execute(conn)?;

            Ok(db_student)
        })?;

        Ok(Student::try_from(db_student)?)
    }

    fn remove_student(&self, id: StudentId) -> RepositoryResult<()> {
        use crate::schema::{hostels, students};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let hostel_id = students::table
                .find(id.get())
                .select(students::hostel_id)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            diesel::delete(students::table.find(id.get())).execute(conn)?;

            diesel::update(
                hostels::table
                    .find(hostel_id)
                    .filter(hostels::vacant_beds.lt(hostels::total_beds)),
            )
            .set(hostels::vacant_beds.eq(hostels::vacant_beds + 1))
            .execute(conn)?;

            Ok(())
        })
    }
}
