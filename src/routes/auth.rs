//! Sign-in hand-off with the external identity provider.

use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};

#[derive(Deserialize)]
struct CallbackParams {
    token: String,
}

#[get("/auth/signin")]
pub async fn signin(server_config: web::Data<ServerConfig>) -> impl Responder {
    redirect(&server_config.auth_service_url)
}

/// The identity provider returns here with a signed session token.
#[get("/auth/callback")]
pub async fn callback(
    req: HttpRequest,
    params: web::Query<CallbackParams>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let user = match AuthenticatedUser::from_jwt(&params.token, &server_config.secret) {
        Ok(user) => user,
        Err(err) => {
            log::warn!("Rejected sign-in token: {err}");
            FlashMessage::error("Sign-in failed.").send();
            return redirect("/");
        }
    };

    if let Err(err) = Identity::login(&req.extensions(), params.token.clone()) {
        log::error!("Failed to store identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }
    log::info!("User {} signed in as {}", user.email, user.role);
    redirect(user.role.home_path())
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}

#[get("/na")]
pub async fn not_assigned(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        user.as_ref(),
        "index",
        &server_config.auth_service_url,
    );
    render_template(&tera, "main/not_assigned.html", &context)
}
