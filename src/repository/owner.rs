//! Repository implementation for hostel owners.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::owner::{NewOwner, Owner};
use crate::domain::types::{EmailAddress, OwnerId};
use crate::models::owner::{NewOwner as DbNewOwner, Owner as DbOwner};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, OwnerListQuery, OwnerReader, OwnerWriter, contains_pattern,
};

impl OwnerReader for DieselRepository {
    fn get_owner_by_id(&self, id: OwnerId) -> RepositoryResult<Option<Owner>> {
        use crate::schema::owners;

        let mut conn = self.conn()?;
        let db_owner = owners::table
            .find(id.get())
            .select(DbOwner::as_select())
            .first::<DbOwner>(&mut conn)
            .optional()?;

        match db_owner {
            Some(db_owner) => Ok(Some(Owner::try_from(db_owner)?)),
            None => Ok(None),
        }
    }

    fn get_owner_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<Owner>> {
        use crate::schema::owners;

        let mut conn = self.conn()?;
        let db_owner = owners::table
            .filter(owners::email.eq(email.as_str()))
            .select(DbOwner::as_select())
            .first::<DbOwner>(&mut conn)
            .optional()?;

        match db_owner {
            Some(db_owner) => Ok(Some(Owner::try_from(db_owner)?)),
            None => Ok(None),
        }
    }

    fn list_owners(&self, query: OwnerListQuery) -> RepositoryResult<(usize, Vec<Owner>)> {
        use crate::schema::owners;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = owners::table.into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                let pattern = contains_pattern(term);
                items = items.filter(
                    owners::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(owners::email.like(pattern).escape('\\')),
                );
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(owners::name.asc());
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset()?)
                .limit(pagination.limit()?);
        }

        let owners = items
            .select(DbOwner::as_select())
            .load::<DbOwner>(&mut conn)?
            .into_iter()
            .map(Owner::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total, owners))
    }
}

impl OwnerWriter for DieselRepository {
    fn create_owner(&self, new_owner: &NewOwner) -> RepositoryResult<Owner> {
        use crate::schema::owners;

        let mut conn = self.conn()?;
        let db_new_owner: DbNewOwner = new_owner.into();

        let db_owner = diesel::insert_into(owners::table)
            .values(&db_new_owner)
            .returning(DbOwner::as_returning())
            .get_result::<DbOwner>(&mut conn)?;

        Ok(Owner::try_from(db_owner)?)
    }

    fn set_owner_active(&self, id: OwnerId, active: bool) -> RepositoryResult<()> {
        use crate::schema::owners;

        let mut conn = self.conn()?;
        let affected = diesel::update(owners::table.find(id.get()))
            .set(owners::is_active.eq(active))
            .execute(&mut conn)?;

        match affected {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }

    fn delete_owner(&self, id: OwnerId) -> RepositoryResult<()> {
        use crate::schema::owners;

        let mut conn = self.conn()?;
        let affected = diesel::delete(owners::table.find(id.get())).execute(&mut conn)?;

        match affected {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }
}
