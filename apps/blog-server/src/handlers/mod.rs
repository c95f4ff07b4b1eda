//! HTTP handlers and route configuration.

mod auth;
mod blog;
mod pages;

#[cfg(test)]
mod tests;

use actix_web::cookie::Cookie;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};

use inkwell_core::domain::CommentGate;

/// Name of the one-shot comment-gate flash cookie. Its presence on a request
/// is the `BlockedPendingLogin` state; absence is `Open`.
pub(crate) const GATE_COOKIE: &str = "inkwell_gate";

pub(crate) fn gate_from_request(req: &HttpRequest) -> CommentGate {
    if req.cookie(GATE_COOKIE).is_some() {
        CommentGate::BlockedPendingLogin
    } else {
        CommentGate::Open
    }
}

pub(crate) fn blocked_gate_cookie() -> Cookie<'static> {
    Cookie::build(GATE_COOKIE, "1")
        .path("/")
        .http_only(true)
        .finish()
}

pub(crate) fn clear_gate_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(GATE_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(blog::index))
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::get().to(auth::logout))
        .service(
            web::resource("/post/{id}")
                .route(web::get().to(blog::show_post))
                .route(web::post().to(blog::add_comment)),
        )
        .service(
            web::resource("/new-post")
                .route(web::get().to(blog::new_post_form))
                .route(web::post().to(blog::new_post)),
        )
        .service(
            web::resource("/edit-post/{id}")
                .route(web::get().to(blog::edit_post_form))
                .route(web::post().to(blog::edit_post)),
        )
        .route("/delete/{id}", web::get().to(blog::delete_post))
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact));
}
