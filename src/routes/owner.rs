use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::hostel::HostelType;
use crate::forms::hostel::HostelForm;
use crate::forms::student::AdmitStudentForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{amenity_values, base_context, redirect, render_template};
use crate::services::{ServiceError, owner as owner_service};

#[derive(Deserialize)]
struct DashboardQueryParams {
    page: Option<usize>,
}

#[get("/owner")]
pub async fn show_dashboard(
    params: web::Query<DashboardQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match owner_service::load_dashboard(repo.get_ref(), &user, params.page.unwrap_or(1)) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "owner",
                &server_config.auth_service_url,
            );
            context.insert("owner", &data.owner);
            context.insert("hostels", &data.hostels);
            context.insert("amenity_values", &amenity_values());
            context.insert(
                "hostel_types",
                &[HostelType::Boys.as_str(), HostelType::Girls.as_str()],
            );

            render_template(&tera, "owner/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Owner access required.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load owner dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/owner/hostels/add")]
pub async fn add_hostel(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match HostelForm::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/owner");
        }
    };

    match owner_service::add_hostel(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Listing added. It will appear in search once verified.").send();
            redirect("/owner")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Owner access required.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/owner")
        }
        Err(err) => {
            log::error!("Failed to add hostel: {err}");
            FlashMessage::error("Failed to add the listing.").send();
            redirect("/owner")
        }
    }
}

#[post("/owner/hostels/{hostel_id}/save")]
pub async fn save_hostel(
    hostel_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let hostel_id = hostel_id.into_inner();
    let back = format!("/hostel/{hostel_id}");

    let form = match HostelForm::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&back);
        }
    };

    match owner_service::save_hostel(repo.get_ref(), &user, hostel_id, form) {
        Ok(_) => {
            FlashMessage::success("Listing saved.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You cannot edit this listing.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Hostel not found.").send();
            redirect("/owner")
        }
        Err(ServiceError::Form(message) | ServiceError::Conflict(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to save hostel: {err}");
            FlashMessage::error("Failed to save the listing.").send();
            redirect(&back)
        }
    }
}

#[post("/owner/hostels/{hostel_id}/delete")]
pub async fn delete_hostel(
    hostel_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match owner_service::delete_hostel(repo.get_ref(), &user, hostel_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Listing deleted.").send();
            redirect(user.role.home_path())
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You cannot delete this listing.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Hostel not found.").send();
            redirect(user.role.home_path())
        }
        Err(err) => {
            log::error!("Failed to delete hostel: {err}");
            FlashMessage::error("Failed to delete the listing.").send();
            redirect(user.role.home_path())
        }
    }
}

#[get("/owner/hostels/{hostel_id}/students")]
pub async fn show_students(
    hostel_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match owner_service::load_students(repo.get_ref(), &user, hostel_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "owner",
                &server_config.auth_service_url,
            );
            context.insert("hostel", &data.hostel);
            context.insert("students", &data.students);

            render_template(&tera, "owner/students.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You cannot manage this listing.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            FlashMessage::error("Hostel not found.").send();
            redirect(user.role.home_path())
        }
        Err(err) => {
            log::error!("Failed to load students: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/owner/hostels/{hostel_id}/students/admit")]
pub async fn admit_student(
    hostel_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AdmitStudentForm>,
) -> impl Responder {
    let hostel_id = hostel_id.into_inner();
    let back = format!("/owner/hostels/{hostel_id}/students");

    match owner_service::admit_student(repo.get_ref(), &user, hostel_id, form) {
        Ok(()) => {
            FlashMessage::success("Student admitted.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You cannot manage this listing.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message) | ServiceError::Conflict(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to admit student: {err}");
            FlashMessage::error("Failed to admit the student.").send();
            redirect(&back)
        }
    }
}

#[post("/owner/hostels/{hostel_id}/students/{student_id}/remove")]
pub async fn remove_student(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (hostel_id, student_id) = path.into_inner();
    let back = format!("/owner/hostels/{hostel_id}/students");

    match owner_service::remove_student(repo.get_ref(), &user, hostel_id, student_id) {
        Ok(()) => {
            FlashMessage::success("Student removed.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You cannot manage this listing.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Student not found.").send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to remove student: {err}");
            FlashMessage::error("Failed to remove the student.").send();
            redirect(&back)
        }
    }
}

#[post("/owner/hostels/{hostel_id}/complaints/{complaint_id}/resolve")]
pub async fn resolve_complaint(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (hostel_id, complaint_id) = path.into_inner();
    let back = format!("/hostel/{hostel_id}");

    match owner_service::resolve_complaint(repo.get_ref(), &user, hostel_id, complaint_id) {
        Ok(()) => {
            FlashMessage::success("Complaint resolved.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("You cannot manage this listing.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Complaint not found.").send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to resolve complaint: {err}");
            FlashMessage::error("Failed to resolve the complaint.").send();
            redirect(&back)
        }
    }
}
