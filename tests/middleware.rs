use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};

use hostel_hub::middleware::{RedirectUnauthorized, SIGNIN_PATH};
use hostel_hub::routes::api::{api_v1_hostel, api_v1_hostels};
use hostel_hub::routes::owner::{admit_student, show_dashboard};

mod common;

use common::server_config;

/// The public API next to the dashboard scope, wired the way the server does.
macro_rules! owner_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($test_db.repo()))
                .app_data(web::Data::new(server_config()))
                .service(
                    web::scope("/api")
                        .service(api_v1_hostels)
                        .service(api_v1_hostel),
                )
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_dashboard)
                        .service(admit_student),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn dashboard_without_session_redirects_to_signin() {
    let test_db = common::TestDb::new("dashboard_without_session_redirects.db");
    let app = owner_app!(test_db);

    let req = test::TestRequest::get().uri("/owner").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), SIGNIN_PATH);

    let req = test::TestRequest::post()
        .uri("/owner/hostels/1/students/admit")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn invalid_bearer_token_is_redirected_on_pages() {
    let test_db = common::TestDb::new("invalid_bearer_token_is_redirected.db");
    let app = owner_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/owner")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), SIGNIN_PATH);
}

#[actix_web::test]
async fn api_is_never_redirected() {
    let test_db = common::TestDb::new("api_is_never_redirected.db");
    let app = owner_app!(test_db);

    let req = test::TestRequest::get().uri("/api/v1/hostels").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/hostels?page=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/hostels/42")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().get(header::LOCATION).is_none());
}
