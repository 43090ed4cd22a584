//! Repository implementation for hostel listings.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::DbConnection;
use crate::domain::feedback::{Complaint, Feedback};
use crate::domain::filter::FilterState;
use crate::domain::hostel::{Amenity, Hostel, HostelDraft, NewHostel, UpdateHostel};
use crate::domain::types::HostelId;
use crate::models::feedback::{Complaint as DbComplaint, Feedback as DbFeedback};
use crate::models::hostel::{
    DbRentTier, Hostel as DbHostel, HostelAmenity, HostelChildren, HostelMedia,
    NewHostel as DbNewHostel, UpdateHostel as DbUpdateHostel, child_rows,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, HostelListQuery, HostelReader, HostelWriter, contains_pattern,
};

/// Ids of hostels with at least one tier satisfying the occupancy and rent
/// bounds together. `None` when the filter does not constrain tiers.
fn matching_tier_hostels(
    conn: &mut DbConnection,
    filter: &FilterState,
) -> RepositoryResult<Option<Vec<i32>>> {
    use crate::schema::rent_tiers;

    if filter.students_per_room.is_none() && filter.min_rent.is_none() && filter.max_rent.is_none()
    {
        return Ok(None);
    }

    let mut tiers = rent_tiers::table
        .select(rent_tiers::hostel_id)
        .distinct()
        .into_boxed::<Sqlite>();

    if let Some(occupancy) = filter.students_per_room {
        tiers = tiers.filter(rent_tiers::occupancy.eq(i32::from(occupancy.get())));
    }
    if let Some(min) = filter.min_rent {
        tiers = tiers.filter(rent_tiers::price.ge(min.get() as i32));
    }
    if let Some(max) = filter.max_rent {
        tiers = tiers.filter(rent_tiers::price.le(max.get() as i32));
    }

    Ok(Some(tiers.load::<i32>(conn)?))
}

/// Ids of hostels offering every requested amenity. `None` when no amenity
/// was requested.
fn matching_amenity_hostels(
    conn: &mut DbConnection,
    amenities: &BTreeSet<Amenity>,
) -> RepositoryResult<Option<Vec<i32>>> {
    use crate::schema::hostel_amenities;

    if amenities.is_empty() {
        return Ok(None);
    }

    let wanted: Vec<String> = amenities.iter().map(|a| a.as_str().to_string()).collect();
    let rows = hostel_amenities::table
        .filter(hostel_amenities::amenity.eq_any(wanted.clone()))
        .select(hostel_amenities::hostel_id)
        .load::<i32>(conn)?;

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for hostel_id in rows {
        *counts.entry(hostel_id).or_default() += 1;
    }

    let mut ids: Vec<i32> = counts
        .into_iter()
        .filter(|(_, count)| *count == wanted.len())
        .map(|(hostel_id, _)| hostel_id)
        .collect();
    ids.sort_unstable();
    Ok(Some(ids))
}

fn load_children(conn: &mut DbConnection, ids: &[i32]) -> RepositoryResult<HostelChildren> {
    use crate::schema::{hostel_amenities, hostel_media, rent_tiers};

    if ids.is_empty() {
        return Ok(HostelChildren::default());
    }

    let amenities = hostel_amenities::table
        .filter(hostel_amenities::hostel_id.eq_any(ids.to_vec()))
        .load::<HostelAmenity>(conn)?;
    let rent_tiers = rent_tiers::table
        .filter(rent_tiers::hostel_id.eq_any(ids.to_vec()))
        .load::<DbRentTier>(conn)?;
    let media = hostel_media::table
        .filter(hostel_media::hostel_id.eq_any(ids.to_vec()))
        .select(HostelMedia::as_select())
        .load::<HostelMedia>(conn)?;

    Ok(HostelChildren {
        amenities,
        rent_tiers,
        media,
    })
}

fn assemble(conn: &mut DbConnection, rows: Vec<DbHostel>) -> RepositoryResult<Vec<Hostel>> {
    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let children = load_children(conn, &ids)?;
    rows.into_iter()
        .map(|row| row.into_domain(&children).map_err(RepositoryError::from))
        .collect()
}

fn load_hostel(conn: &mut DbConnection, id: i32) -> RepositoryResult<Option<Hostel>> {
    use crate::schema::hostels;

    let row = hostels::table
        .find(id)
        .select(DbHostel::as_select())
        .first::<DbHostel>(conn)
        .optional()?;

    match row {
        Some(row) => Ok(assemble(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

fn replace_children(
    conn: &mut DbConnection,
    hostel_id: i32,
    draft: &HostelDraft,
) -> Result<(), diesel::result::Error> {
    use crate::schema::{hostel_amenities, hostel_media, rent_tiers};

    diesel::delete(hostel_amenities::table.filter(hostel_amenities::hostel_id.eq(hostel_id)))
        .execute(conn)?;
    diesel::delete(rent_tiers::table.filter(rent_tiers::hostel_id.eq(hostel_id))).execute(conn)?;
    diesel::delete(hostel_media::table.filter(hostel_media::hostel_id.eq(hostel_id)))
        .execute(conn)?;

    let (amenities, tiers, media) = child_rows(hostel_id, draft);
    if !amenities.is_empty() {
        diesel::insert_into(hostel_amenities::table)
            .values(&amenities)
            .execute(conn)?;
    }
    if !tiers.is_empty() {
        diesel::insert_into(rent_tiers::table)
            .values(&tiers)
            .execute(conn)?;
    }
    if !media.is_empty() {
        diesel::insert_into(hostel_media::table)
            .values(&media)
            .execute(conn)?;
    }
    Ok(())
}

fn insert_hostel(conn: &mut DbConnection, new_hostel: &NewHostel) -> RepositoryResult<i32> {
    use crate::schema::hostels;

    let insertable: DbNewHostel = new_hostel.into();
    let hostel_id = diesel::insert_into(hostels::table)
        .values(&insertable)
        .returning(hostels::id)
        .get_result::<i32>(conn)?;
    replace_children(conn, hostel_id, &new_hostel.draft)?;
    Ok(hostel_id)
}

impl HostelReader for DieselRepository {
    fn get_hostel_by_id(&self, id: HostelId) -> RepositoryResult<Option<Hostel>> {
        use crate::schema::{complaints, feedbacks};

        let mut conn = self.conn()?;
        let Some(mut hostel) = load_hostel(&mut conn, id.get())? else {
            return Ok(None);
        };

        hostel.feedback = feedbacks::table
            .filter(feedbacks::hostel_id.eq(id.get()))
            .order((feedbacks::created_at.desc(), feedbacks::id.desc()))
            .select(DbFeedback::as_select())
            .load::<DbFeedback>(&mut conn)?
            .into_iter()
            .map(Feedback::try_from)
            .collect::<Result<_, _>>()?;

        hostel.complaints = complaints::table
            .filter(complaints::hostel_id.eq(id.get()))
            .order((complaints::created_at.desc(), complaints::id.desc()))
            .select(DbComplaint::as_select())
            .load::<DbComplaint>(&mut conn)?
            .into_iter()
            .map(Complaint::try_from)
            .collect::<Result<_, _>>()?;

        Ok(Some(hostel))
    }

    fn list_hostels(&self, query: HostelListQuery) -> RepositoryResult<(usize, Vec<Hostel>)> {
        use crate::schema::hostels;

        let mut conn = self.conn()?;
        let filter = &query.filter;

        let tier_ids = matching_tier_hostels(&mut conn, filter)?;
        let amenity_ids = matching_amenity_hostels(&mut conn, &filter.amenities)?;

        let query_builder = || {
            let mut items = hostels::table.into_boxed::<Sqlite>();

            if let Some(owner_id) = query.owner_id {
                items = items.filter(hostels::owner_id.eq(owner_id.get()));
            }
            if let Some(verified) = query.verified {
                items = items.filter(hostels::is_verified.eq(verified));
            }
            if let Some(hostel_type) = filter.hostel_type {
                items = items.filter(hostels::hostel_type.eq(hostel_type.as_str()));
            }
            if let Some(term) = &filter.search {
                let pattern = contains_pattern(term);
                items = items.filter(
                    hostels::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(hostels::address.like(pattern.clone()).escape('\\'))
                        .or(hostels::city.like(pattern).escape('\\')),
                );
            }
            if let Some(ids) = &tier_ids {
                items = items.filter(hostels::id.eq_any(ids.clone()));
            }
            if let Some(ids) = &amenity_ids {
                items = items.filter(hostels::id.eq_any(ids.clone()));
            }
            items
        };

        // Get the total count before applying pagination
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(hostels::id.asc());
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset()?)
                .limit(pagination.limit()?);
        }

        let rows = items
            .select(DbHostel::as_select())
            .load::<DbHostel>(&mut conn)?;
        let hostels = assemble(&mut conn, rows)?;

        Ok((total, hostels))
    }
}

impl HostelWriter for DieselRepository {
    fn create_hostel(&self, new_hostel: &NewHostel) -> RepositoryResult<Hostel> {
        let mut conn = self.conn()?;

        let hostel_id = conn.transaction::<_, RepositoryError, _>(|conn| {
            insert_hostel(conn, new_hostel)
        })?;

        load_hostel(&mut conn, hostel_id)?.ok_or(RepositoryError::NotFound)
    }

    fn create_hostels(&self, new_hostels: &[NewHostel]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            for new_hostel in new_hostels {
                insert_hostel(conn, new_hostel)?;
            }
            Ok(new_hostels.len())
        })
    }

    fn update_hostel(&self, id: HostelId, updates: &UpdateHostel) -> RepositoryResult<Hostel> {
        use crate::schema::{hostels, students};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let admitted = students::table
                .filter(students::hostel_id.eq(id.get()))
                .count()
                .get_result::<i64>(conn)? as i32;

            let total_beds = updates.draft.total_beds.get() as i32;
            if total_beds < admitted {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "{admitted} students are admitted, capacity cannot drop to {total_beds}"
                )));
            }

            let changes = DbUpdateHostel::from_draft(&updates.draft, Utc::now().naive_utc());
            let affected = diesel::update(hostels::table.find(id.get()))
                .set((&changes, hostels::vacant_beds.eq(total_beds - admitted)))
                .execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            replace_children(conn, id.get(), &updates.draft)?;
            Ok(())
        })?;

        load_hostel(&mut conn, id.get())?.ok_or(RepositoryError::NotFound)
    }

    fn set_hostel_verified(&self, id: HostelId, verified: bool) -> RepositoryResult<()> {
        use crate::schema::hostels;

        let mut conn = self.conn()?;
        let affected = diesel::update(hostels::table.find(id.get()))
            .set(hostels::is_verified.eq(verified))
            .execute(&mut conn)?;

        match affected {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }

    fn delete_hostel(&self, id: HostelId) -> RepositoryResult<()> {
        use crate::schema::hostels;

        let mut conn = self.conn()?;
        let affected = diesel::delete(hostels::table.find(id.get())).execute(&mut conn)?;

        match affected {
            0 => Err(RepositoryError::NotFound),
            _ => Ok(()),
        }
    }
}
