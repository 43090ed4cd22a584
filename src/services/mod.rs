//! Business operations behind the routes. Every function takes the
//! repository as a trait bound so it can be tested against the mock.

use crate::domain::role::Role;
use crate::domain::types::OwnerId;
use crate::models::auth::AuthenticatedUser;

pub mod admin;
pub mod api;
pub mod errors;
pub mod main;
pub mod owner;

pub use errors::{ServiceError, ServiceResult};

/// Fails with [`ServiceError::Unauthorized`] unless the user holds one of
/// `allowed`.
pub fn ensure_role(user: &AuthenticatedUser, allowed: &[Role]) -> ServiceResult<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Owner profile bound to a `HostelOwner` session.
pub fn owner_profile(user: &AuthenticatedUser) -> ServiceResult<OwnerId> {
    match user.role {
        Role::HostelOwner => user
            .profile_id
            .and_then(|id| OwnerId::new(id).ok())
            .ok_or(ServiceError::Unauthorized),
        Role::Student | Role::Admin => Err(ServiceError::Unauthorized),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use crate::domain::hostel::{Amenity, Hostel, HostelType, RentTier};
    use crate::domain::owner::Owner;
    use crate::domain::role::Role;
    use crate::domain::types::{
        Address, BedCount, City, EmailAddress, HostelId, HostelName, OwnerId, PersonName,
        PhoneNumber,
    };
    use crate::models::auth::AuthenticatedUser;

    pub fn user(role: Role, profile_id: Option<i32>) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            email: "user@example.com".into(),
            name: "User".into(),
            role,
            profile_id,
            exp: 4_102_444_800,
        }
    }

    pub fn owner(id: i32, active: bool) -> Owner {
        Owner {
            id: OwnerId::new(id).unwrap(),
            name: PersonName::new("Asha").unwrap(),
            email: EmailAddress::new("asha@example.com").unwrap(),
            phone: None,
            is_active: active,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn hostel(id: i32, owner_id: i32, verified: bool) -> Hostel {
        let now = Utc::now().naive_utc();
        Hostel {
            id: HostelId::new(id).unwrap(),
            owner_id: OwnerId::new(owner_id).unwrap(),
            name: HostelName::new(format!("Hostel {id}")).unwrap(),
            phone: PhoneNumber::new("+14155552671").unwrap(),
            email: None,
            address: Address::new("1 Main St").unwrap(),
            city: City::new("Pune").unwrap(),
            hostel_type: HostelType::Boys,
            total_beds: BedCount::new(10).unwrap(),
            vacant_beds: BedCount::new(4).unwrap(),
            description: None,
            amenities: [Amenity::Wifi].into_iter().collect(),
            rent_tiers: vec![RentTier::try_new(2, 4500).unwrap()],
            media: vec![],
            is_verified: verified,
            feedback: vec![],
            complaints: vec![],
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::user;
    use super::*;

    #[test]
    fn owner_profile_requires_owner_role_and_profile() {
        assert_eq!(
            owner_profile(&user(Role::HostelOwner, Some(3))).map(|id| id.get()).ok(),
            Some(3)
        );
        assert!(owner_profile(&user(Role::HostelOwner, None)).is_err());
        assert!(owner_profile(&user(Role::Admin, Some(3))).is_err());
    }

    #[test]
    fn ensure_role_matches_membership() {
        assert!(ensure_role(&user(Role::Admin, None), &[Role::Admin]).is_ok());
        assert!(ensure_role(&user(Role::Student, None), &[Role::Admin, Role::HostelOwner]).is_err());
    }
}
