//! Shared fixtures for integration tests: a migrated SQLite file per test.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use hostel_hub::db::{DbPool, establish_connection_pool};
use hostel_hub::domain::hostel::{Amenity, HostelDraft, HostelType, NewHostel, RentTier};
use hostel_hub::domain::owner::{NewOwner, Owner};
use hostel_hub::domain::types::{
    Address, BedCount, City, EmailAddress, HostelId, HostelName, OwnerId, PersonName, PhoneNumber,
};
use hostel_hub::models::config::ServerConfig;
use hostel_hub::repository::{DieselRepository, HostelWriter, OwnerWriter};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const SECRET: &str = "integration-test-secret";

pub fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 8080,
        database_url: String::new(),
        templates_dir: "templates/**/*".into(),
        secret: SECRET.into(),
        auth_service_url: "http://localhost:8000/signin".into(),
        items_per_page: 10,
    }
}

pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn create_owner(repo: &DieselRepository, email: &str) -> Owner {
    repo.create_owner(&NewOwner::new(
        PersonName::new("Asha Rao").unwrap(),
        EmailAddress::new(email).unwrap(),
        None,
    ))
    .unwrap()
}

pub fn draft(name: &str, hostel_type: HostelType, tiers: &[(i64, i64)], amenities: &[Amenity]) -> HostelDraft {
    HostelDraft {
        name: HostelName::new(name).unwrap(),
        phone: PhoneNumber::new("+14155552671").unwrap(),
        email: None,
        address: Address::new("12 College Road").unwrap(),
        city: City::new("Pune").unwrap(),
        hostel_type,
        total_beds: BedCount::new(10).unwrap(),
        description: None,
        amenities: amenities.iter().copied().collect(),
        rent_tiers: tiers
            .iter()
            .map(|(occupancy, price)| RentTier::try_new(*occupancy, *price).unwrap())
            .collect(),
        media: vec![],
    }
}

/// Creates a listing and optionally verifies it.
pub fn create_hostel(
    repo: &DieselRepository,
    owner_id: OwnerId,
    draft: HostelDraft,
    verified: bool,
) -> HostelId {
    let hostel = repo.create_hostel(&NewHostel::new(owner_id, draft)).unwrap();
    if verified {
        repo.set_hostel_verified(hostel.id, true).unwrap();
    }
    hostel.id
}
