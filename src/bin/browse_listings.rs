//! Walks the listing API page by page and prints every hostel found.
//!
//! Usage: `browse_listings [query] [max_pages]`, e.g.
//! `browse_listings "type=boys&minRent=1000&maxRent=5000" 3`.

use std::env;

use dotenvy::dotenv;

use hostel_hub::domain::role::Role;
use hostel_hub::dto::api::HostelsQuery;
use hostel_hub::listing::http::HttpListingSource;
use hostel_hub::listing::{Completion, Navigation, PaginationController, SessionContext};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let query = args.next().unwrap_or_default();
    let max_pages = args
        .next()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(usize::MAX);

    let request = match HostelsQuery::from_query_string(&query)
        .and_then(|query| query.into_request(10))
    {
        Ok(request) => request,
        Err(err) => {
            log::error!("Invalid listing query `{query}`: {err}");
            std::process::exit(2);
        }
    };

    let mut session = SessionContext::anonymous();
    if let Ok(token) = env::var("HOSTEL_API_TOKEN") {
        session.establish(token, Role::Student, None, None);
    }
    let base_url = env::var("HOSTEL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let source = HttpListingSource::new(base_url, session);

    let mut controller = PaginationController::new(request.filter, request.limit);
    let mut page = request.page;
    let mut walked = 0;

    while walked < max_pages {
        match controller.go_to_page(&source, page).await {
            Navigation::Ignored => break,
            Navigation::Completed(Completion::Failed) => {
                if let Some(err) = controller.last_error() {
                    log::error!("Failed to load page {page}: {err}");
                }
                std::process::exit(1);
            }
            Navigation::Cached | Navigation::Completed(_) => {}
        }

        println!(
            "-- page {}/{} ({} listings) --",
            controller.current_page(),
            controller.total_pages(),
            controller.total_items()
        );
        for hostel in controller.page_items() {
            let rent = hostel
                .starting_rent()
                .map(|rent| format!("from {rent}"))
                .unwrap_or_else(|| "no rent set".to_string());
            println!(
                "#{} {} [{}] {} - {} vacant, {}",
                hostel.id,
                hostel.name,
                hostel.hostel_type,
                hostel.city,
                hostel.vacant_beds.get(),
                rent
            );
        }

        walked += 1;
        page += 1;
        if page > controller.total_pages() {
            break;
        }
    }
}
