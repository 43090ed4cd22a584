use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde_json::json;

use crate::dto::api::HostelsQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, api as api_service};

fn bad_request(message: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message.to_string() }))
}

#[get("/v1/hostels")]
pub async fn api_v1_hostels(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let query = match HostelsQuery::from_query_string(req.query_string()) {
        Ok(query) => query,
        Err(err) => return bad_request(err),
    };

    match api_service::list_hostels(repo.get_ref(), query, server_config.items_per_page) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(ServiceError::Form(message)) => bad_request(message),
        Err(err) => {
            log::error!("Failed to list hostels: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}

#[get("/v1/hostels/{hostel_id}")]
pub async fn api_v1_hostel(
    hostel_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::get_hostel(repo.get_ref(), user.as_ref(), hostel_id.into_inner()) {
        Ok(hostel) => HttpResponse::Ok().json(hostel),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": "hostel not found" }))
        }
        Err(err) => {
            log::error!("Failed to load hostel: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}
