use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::hostel::HostelType;
use crate::dto::api::HostelsQuery;
use crate::dto::main::amenity_options;
use crate::forms::feedback::{ComplaintForm, FeedbackForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{amenity_values, base_context, redirect, render_template};
use crate::services::{ServiceError, main as main_service};

#[get("/")]
pub async fn show_index(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = match HostelsQuery::from_query_string(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            FlashMessage::error(format!("Invalid search: {err}")).send();
            return redirect("/");
        }
    };

    match main_service::load_search_page(repo.get_ref(), query, server_config.items_per_page) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "index",
                &server_config.auth_service_url,
            );
            context.insert("hostels", &data.hostels);
            context.insert("page_links", &data.page_links());
            context.insert("query", &data.query);
            context.insert("amenities", &amenity_options(&data.request));
            context.insert(
                "hostel_types",
                &[HostelType::Boys.as_str(), HostelType::Girls.as_str()],
            );

            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load search page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/hostel/{hostel_id}")]
pub async fn show_hostel(
    hostel_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_hostel_page(repo.get_ref(), user.as_ref(), hostel_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "hostel",
                &server_config.auth_service_url,
            );
            context.insert("hostel", &data.hostel);
            context.insert("can_manage", &data.can_manage);
            context.insert("average_rating", &data.average_rating);
            context.insert("starting_rent", &data.hostel.starting_rent());
            context.insert("amenity_values", &amenity_values());

            render_template(&tera, "hostel/show.html", &context)
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            FlashMessage::error("Hostel not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load hostel page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/hostel/{hostel_id}/feedback")]
pub async fn add_feedback(
    hostel_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<FeedbackForm>,
) -> impl Responder {
    let hostel_id = hostel_id.into_inner();
    let back = format!("/hostel/{hostel_id}");

    match main_service::add_feedback(repo.get_ref(), &user, hostel_id, form) {
        Ok(()) => {
            FlashMessage::success("Thank you for your feedback.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Only students can leave feedback.").send();
            redirect(&back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Hostel not found.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to add feedback: {err}");
            FlashMessage::error("Failed to save feedback.").send();
            redirect(&back)
        }
    }
}

#[post("/hostel/{hostel_id}/complaint")]
pub async fn add_complaint(
    hostel_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ComplaintForm>,
) -> impl Responder {
    let hostel_id = hostel_id.into_inner();
    let back = format!("/hostel/{hostel_id}");

    match main_service::add_complaint(repo.get_ref(), &user, hostel_id, form) {
        Ok(()) => {
            FlashMessage::success("Complaint sent to the hostel owner.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Only students can file complaints.").send();
            redirect(&back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Hostel not found.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to add complaint: {err}");
            FlashMessage::error("Failed to send complaint.").send();
            redirect(&back)
        }
    }
}
