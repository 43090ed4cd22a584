use hostel_hub::domain::feedback::{NewComplaint, NewFeedback};
use hostel_hub::domain::filter::FilterState;
use hostel_hub::domain::hostel::{Amenity, HostelType, UpdateHostel};
use hostel_hub::domain::student::NewStudent;
use hostel_hub::domain::types::{
    BedCount, ComplaintId, EmailAddress, Occupancy, PersonName, Rating, Rent, SanitizedText,
};
use hostel_hub::repository::errors::RepositoryError;
use hostel_hub::repository::{
    FeedbackWriter, HostelListQuery, HostelReader, HostelWriter, OwnerListQuery, OwnerReader,
    OwnerWriter, StudentReader, StudentWriter,
};

mod common;

use common::{create_hostel, create_owner, draft};

fn names(hostels: &[hostel_hub::domain::hostel::Hostel]) -> Vec<String> {
    hostels.iter().map(|h| h.name.as_str().to_string()).collect()
}

#[test]
fn test_hostel_search_filters() {
    let test_db = common::TestDb::new("test_hostel_search_filters.db");
    let repo = test_db.repo();
    let owner = create_owner(&repo, "asha@example.com");

    create_hostel(
        &repo,
        owner.id,
        draft(
            "Alpha",
            HostelType::Boys,
            &[(1, 7000), (3, 3000)],
            &[Amenity::Wifi, Amenity::Gym],
        ),
        true,
    );
    create_hostel(
        &repo,
        owner.id,
        draft("Beta", HostelType::Girls, &[(2, 4500)], &[Amenity::Wifi]),
        true,
    );
    create_hostel(
        &repo,
        owner.id,
        draft("Gamma", HostelType::Boys, &[(2, 4000)], &[Amenity::Wifi]),
        false,
    );
    create_hostel(
        &repo,
        owner.id,
        draft("Delta", HostelType::Boys, &[(1, 900)], &[Amenity::Mess]),
        true,
    );

    let verified = |filter: FilterState| {
        repo.list_hostels(HostelListQuery::new(filter).verified(true))
            .unwrap()
    };

    let (total, items) = verified(FilterState::new());
    assert_eq!(total, 3);
    assert_eq!(names(&items), vec!["Alpha", "Beta", "Delta"]);

    let (_, boys) = verified(FilterState::new().hostel_type(HostelType::Boys));
    assert_eq!(names(&boys), vec!["Alpha", "Delta"]);

    // One tier has to satisfy both rent bounds.
    let (_, in_budget) = verified(
        FilterState::new()
            .hostel_type(HostelType::Boys)
            .rent_between(Some(Rent::new(1000).unwrap()), Some(Rent::new(5000).unwrap())),
    );
    assert_eq!(names(&in_budget), vec!["Alpha"]);

    let (_, singles) = verified(
        FilterState::new()
            .students_per_room(Occupancy::new(1).unwrap())
            .rent_between(None, Some(Rent::new(5000).unwrap())),
    );
    assert_eq!(names(&singles), vec!["Delta"]);

    let (_, equipped) = verified(FilterState::new().amenity(Amenity::Wifi).amenity(Amenity::Gym));
    assert_eq!(names(&equipped), vec!["Alpha"]);

    let (_, searched) = verified(FilterState::new().search("bet"));
    assert_eq!(names(&searched), vec!["Beta"]);

    // Wildcards in the search text match literally.
    let (wild_total, _) = verified(FilterState::new().search("_"));
    assert_eq!(wild_total, 0);
    let (percent_total, _) = verified(FilterState::new().search("%"));
    assert_eq!(percent_total, 0);

    let (all_total, _) = repo
        .list_hostels(HostelListQuery::new(FilterState::new()))
        .unwrap();
    assert_eq!(all_total, 4);
}

#[test]
fn test_hostel_pagination_is_stable() {
    let test_db = common::TestDb::new("test_hostel_pagination_is_stable.db");
    let repo = test_db.repo();
    let owner = create_owner(&repo, "asha@example.com");

    for n in 0..5 {
        create_hostel(
            &repo,
            owner.id,
            draft(&format!("Hostel {n}"), HostelType::Girls, &[(2, 3000)], &[]),
            true,
        );
    }

    let page = |n| {
        repo.list_hostels(HostelListQuery::new(FilterState::new()).paginate(n, 2))
            .unwrap()
    };
    let (total, first) = page(1);
    let (_, second) = page(2);
    let (_, third) = page(3);

    assert_eq!(total, 5);
    assert_eq!(names(&first), vec!["Hostel 0", "Hostel 1"]);
    assert_eq!(names(&second), vec!["Hostel 2", "Hostel 3"]);
    assert_eq!(names(&third), vec!["Hostel 4"]);
}

#[test]
fn test_hostel_update_and_delete() {
    let test_db = common::TestDb::new("test_hostel_update_and_delete.db");
    let repo = test_db.repo();
    let owner = create_owner(&repo, "asha@example.com");
    let id = create_hostel(
        &repo,
        owner.id,
        draft("Alpha", HostelType::Boys, &[(1, 7000)], &[Amenity::Wifi]),
        false,
    );

    let created = repo.get_hostel_by_id(id).unwrap().unwrap();
    assert!(!created.is_verified);
    assert_eq!(created.vacant_beds.get(), 10);

    let mut changed = draft("Alpha Prime", HostelType::Boys, &[(2, 5000)], &[Amenity::Mess]);
    changed.total_beds = BedCount::new(6).unwrap();
    let updated = repo
        .update_hostel(id, &UpdateHostel { draft: changed })
        .unwrap();

    assert_eq!(updated.name.as_str(), "Alpha Prime");
    assert_eq!(updated.vacant_beds.get(), 6);
    assert_eq!(updated.rent_tiers.len(), 1);
    assert!(updated.amenities.contains(&Amenity::Mess));
    assert!(!updated.amenities.contains(&Amenity::Wifi));

    repo.delete_hostel(id).unwrap();
    assert!(repo.get_hostel_by_id(id).unwrap().is_none());
    assert!(matches!(
        repo.delete_hostel(id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_admissions_track_vacancies() {
    let test_db = common::TestDb::new("test_admissions_track_vacancies.db");
    let repo = test_db.repo();
    let owner = create_owner(&repo, "asha@example.com");
    let mut small = draft("Tiny", HostelType::Girls, &[(1, 6000)], &[]);
    small.total_beds = BedCount::new(1).unwrap();
    let id = create_hostel(&repo, owner.id, small, true);

    let student = |email: &str| NewStudent {
        hostel_id: id,
        name: PersonName::new("Meera").unwrap(),
        email: EmailAddress::new(email).unwrap(),
        phone: None,
        room: None,
    };

    let admitted = repo.admit_student(&student("meera@example.com")).unwrap();
    assert_eq!(repo.get_hostel_by_id(id).unwrap().unwrap().vacant_beds.get(), 0);

    assert!(matches!(
        repo.admit_student(&student("zoya@example.com")),
        Err(RepositoryError::ConstraintViolation(_))
    ));

    // Capacity cannot drop below the admitted count.
    let mut shrunk = draft("Tiny", HostelType::Girls, &[(1, 6000)], &[]);
    shrunk.total_beds = BedCount::new(0).unwrap();
    assert!(matches!(
        repo.update_hostel(id, &UpdateHostel { draft: shrunk }),
        Err(RepositoryError::ConstraintViolation(_))
    ));

    assert_eq!(repo.list_students(id).unwrap().len(), 1);
    repo.remove_student(admitted.id).unwrap();
    assert!(repo.get_student_by_id(admitted.id).unwrap().is_none());
    assert_eq!(repo.get_hostel_by_id(id).unwrap().unwrap().vacant_beds.get(), 1);
}

#[test]
fn test_feedback_and_complaints() {
    let test_db = common::TestDb::new("test_feedback_and_complaints.db");
    let repo = test_db.repo();
    let owner = create_owner(&repo, "asha@example.com");
    let id = create_hostel(
        &repo,
        owner.id,
        draft("Alpha", HostelType::Boys, &[(1, 7000)], &[]),
        true,
    );
    let other = create_hostel(
        &repo,
        owner.id,
        draft("Beta", HostelType::Boys, &[(1, 7000)], &[]),
        true,
    );

    for rating in [4, 5] {
        repo.add_feedback(&NewFeedback {
            hostel_id: id,
            author_name: PersonName::new("Ravi").unwrap(),
            rating: Rating::new(rating).unwrap(),
            message: SanitizedText::new("Clean rooms").unwrap(),
        })
        .unwrap();
    }
    let complaint = repo
        .add_complaint(&NewComplaint {
            hostel_id: id,
            author_email: EmailAddress::new("ravi@example.com").unwrap(),
            message: SanitizedText::new("Hot water is cold").unwrap(),
        })
        .unwrap();

    let hostel = repo.get_hostel_by_id(id).unwrap().unwrap();
    assert_eq!(hostel.feedback.len(), 2);
    assert_eq!(hostel.average_rating(), Some(4.5));
    assert_eq!(hostel.complaints.len(), 1);
    assert!(!hostel.complaints[0].resolved);

    assert!(matches!(
        repo.resolve_complaint(complaint.id, other),
        Err(RepositoryError::NotFound)
    ));
    repo.resolve_complaint(complaint.id, id).unwrap();
    let hostel = repo.get_hostel_by_id(id).unwrap().unwrap();
    assert!(hostel.complaints[0].resolved);

    assert!(matches!(
        repo.resolve_complaint(ComplaintId::new(999).unwrap(), id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_owner_repository_crud() {
    let test_db = common::TestDb::new("test_owner_repository_crud.db");
    let repo = test_db.repo();
    let asha = create_owner(&repo, "asha@example.com");
    let bela = create_owner(&repo, "bela@example.com");
    create_hostel(
        &repo,
        bela.id,
        draft("Beta", HostelType::Girls, &[(2, 4500)], &[]),
        true,
    );

    let found = repo
        .get_owner_by_email(&EmailAddress::new("ASHA@example.com").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(found.id, asha.id);
    assert!(found.is_active);

    let (total, owners) = repo
        .list_owners(OwnerListQuery::new().search("bela"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(owners[0].id, bela.id);

    repo.set_owner_active(asha.id, false).unwrap();
    assert!(!repo.get_owner_by_id(asha.id).unwrap().unwrap().is_active);

    repo.delete_owner(bela.id).unwrap();
    assert!(repo.get_owner_by_id(bela.id).unwrap().is_none());
    let (remaining, _) = repo
        .list_hostels(HostelListQuery::new(FilterState::new()))
        .unwrap();
    assert_eq!(remaining, 0);
}
