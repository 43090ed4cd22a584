use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::dto::admin::{OwnersQuery, VerificationQuery};
use crate::forms::admin::UploadHostelsForm;
use crate::forms::owner::{AddOwnerForm, OwnerActiveForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, admin as admin_service};

#[derive(Deserialize)]
pub struct VerifyForm {
    #[serde(default)]
    pub verified: bool,
}

#[get("/admin/owners")]
pub async fn show_owners(
    params: web::Query<OwnersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_owners(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "owners",
                &server_config.auth_service_url,
            );
            let page_base = match &data.search_query {
                Some(search) => format!(
                    "/admin/owners?{}&",
                    serde_html_form::to_string([("search", search)]).unwrap_or_default()
                ),
                None => "/admin/owners?".to_string(),
            };
            context.insert("owners", &data.owners);
            context.insert("search_query", &data.search_query);
            context.insert("page_base", &page_base);

            render_template(&tera, "admin/owners.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Administrator access required.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list owners: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/owners/add")]
pub async fn add_owner(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddOwnerForm>,
) -> impl Responder {
    match admin_service::add_owner(repo.get_ref(), &user, form) {
        Ok(owner) => {
            FlashMessage::success(format!("Owner {} added.", owner.email)).send();
            redirect("/admin/owners")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Administrator access required.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message) | ServiceError::Conflict(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/owners")
        }
        Err(err) => {
            log::error!("Failed to add owner: {err}");
            FlashMessage::error("Failed to add the owner.").send();
            redirect("/admin/owners")
        }
    }
}

#[post("/admin/owners/{owner_id}/active")]
pub async fn set_owner_active(
    owner_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<OwnerActiveForm>,
) -> impl Responder {
    match admin_service::set_owner_active(repo.get_ref(), &user, owner_id.into_inner(), form.active)
    {
        Ok(()) => {
            let message = if form.active {
                "Owner activated."
            } else {
                "Owner deactivated."
            };
            FlashMessage::success(message).send();
            redirect("/admin/owners")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Administrator access required.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Owner not found.").send();
            redirect("/admin/owners")
        }
        Err(err) => {
            log::error!("Failed to update owner: {err}");
            FlashMessage::error("Failed to update the owner.").send();
            redirect("/admin/owners")
        }
    }
}

#[post("/admin/owners/{owner_id}/delete")]
pub async fn delete_owner(
    owner_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match admin_service::delete_owner(repo.get_ref(), &user, owner_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Owner deleted.").send();
            redirect("/admin/owners")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Administrator access required.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Owner not found.").send();
            redirect("/admin/owners")
        }
        Err(err) => {
            log::error!("Failed to delete owner: {err}");
            FlashMessage::error("Failed to delete the owner.").send();
            redirect("/admin/owners")
        }
    }
}

#[get("/admin/hostels")]
pub async fn show_verification_queue(
    params: web::Query<VerificationQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_verification_queue(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "hostels",
                &server_config.auth_service_url,
            );
            context.insert("hostels", &data.hostels);
            context.insert("show_verified", &data.show_verified);

            render_template(&tera, "admin/hostels.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Administrator access required.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load verification queue: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/hostels/{hostel_id}/verify")]
pub async fn verify_hostel(
    hostel_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<VerifyForm>,
) -> impl Responder {
    match admin_service::set_hostel_verified(
        repo.get_ref(),
        &user,
        hostel_id.into_inner(),
        form.verified,
    ) {
        Ok(()) => {
            let message = if form.verified {
                "Listing verified."
            } else {
                "Listing moved back to the queue."
            };
            FlashMessage::success(message).send();
            redirect("/admin/hostels")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Administrator access required.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Hostel not found.").send();
            redirect("/admin/hostels")
        }
        Err(err) => {
            log::error!("Failed to verify hostel: {err}");
            FlashMessage::error("Failed to update the listing.").send();
            redirect("/admin/hostels")
        }
    }
}

#[post("/admin/hostels/upload")]
pub async fn upload_hostels(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadHostelsForm>,
) -> impl Responder {
    match admin_service::upload_hostels(repo.get_ref(), &user, &mut form) {
        Ok(count) => {
            FlashMessage::success(format!("Imported {count} listings.")).send();
            redirect("/admin/hostels")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Administrator access required.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message) | ServiceError::Conflict(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/hostels")
        }
        Err(err) => {
            log::error!("Failed to import hostels: {err}");
            FlashMessage::error("Failed to import listings.").send();
            redirect("/admin/hostels")
        }
    }
}
