use hostel_hub::domain::filter::FilterState;
use hostel_hub::domain::hostel::{Hostel, HostelType};
use hostel_hub::listing::{Completion, Navigation, PaginationController, RepositoryListingSource};

mod common;

use common::{create_hostel, create_owner, draft};

fn names(controller: &PaginationController<Hostel>) -> Vec<String> {
    controller
        .items()
        .into_iter()
        .map(|h| h.name.as_str().to_string())
        .collect()
}

#[actix_web::test]
async fn test_controller_accumulates_pages_from_repository() {
    let test_db = common::TestDb::new("test_controller_accumulates_pages.db");
    let repo = test_db.repo();
    let owner = create_owner(&repo, "asha@example.com");
    for n in 0..5 {
        create_hostel(
            &repo,
            owner.id,
            draft(&format!("Boys {n}"), HostelType::Boys, &[(2, 3000)], &[]),
            true,
        );
    }
    for n in 0..2 {
        create_hostel(
            &repo,
            owner.id,
            draft(&format!("Girls {n}"), HostelType::Girls, &[(2, 3000)], &[]),
            true,
        );
    }

    let source = RepositoryListingSource::new(&repo);
    let mut controller =
        PaginationController::new(FilterState::new().hostel_type(HostelType::Boys), 2);

    assert_eq!(
        controller.go_to_page(&source, 1).await,
        Navigation::Completed(Completion::Applied)
    );
    assert_eq!(names(&controller), vec!["Boys 0", "Boys 1"]);
    assert_eq!(controller.total_pages(), 3);
    assert_eq!(controller.total_items(), 5);
    assert!(controller.has_prefetched(2));

    assert_eq!(controller.go_to_page(&source, 1).await, Navigation::Ignored);

    assert_eq!(controller.go_to_page(&source, 2).await, Navigation::Cached);
    assert_eq!(controller.go_to_page(&source, 3).await, Navigation::Cached);
    assert_eq!(
        names(&controller),
        vec!["Boys 0", "Boys 1", "Boys 2", "Boys 3", "Boys 4"]
    );
    assert_eq!(controller.page_items().len(), 1);

    assert_eq!(controller.go_to_page(&source, 4).await, Navigation::Ignored);
    assert_eq!(controller.current_page(), 3);
}

#[actix_web::test]
async fn test_filter_change_starts_over() {
    let test_db = common::TestDb::new("test_filter_change_starts_over.db");
    let repo = test_db.repo();
    let owner = create_owner(&repo, "asha@example.com");
    for (name, hostel_type) in [
        ("Boys 0", HostelType::Boys),
        ("Boys 1", HostelType::Boys),
        ("Boys 2", HostelType::Boys),
        ("Girls 0", HostelType::Girls),
    ] {
        create_hostel(
            &repo,
            owner.id,
            draft(name, hostel_type, &[(2, 3000)], &[]),
            true,
        );
    }

    let source = RepositoryListingSource::new(&repo);
    let mut controller =
        PaginationController::new(FilterState::new().hostel_type(HostelType::Boys), 2);
    controller.go_to_page(&source, 1).await;
    controller.go_to_page(&source, 2).await;
    assert_eq!(names(&controller).len(), 3);

    // Same key: nothing is dropped.
    assert!(!controller.set_filter(FilterState::new().hostel_type(HostelType::Boys)));
    assert_eq!(names(&controller).len(), 3);

    assert!(controller.set_filter(FilterState::new().hostel_type(HostelType::Girls)));
    assert!(controller.items().is_empty());
    assert_eq!(controller.current_page(), 0);

    assert_eq!(
        controller.go_to_page(&source, 1).await,
        Navigation::Completed(Completion::Applied)
    );
    assert_eq!(names(&controller), vec!["Girls 0"]);
    assert_eq!(controller.total_pages(), 1);
    assert!(!controller.has_prefetched(2));
}
