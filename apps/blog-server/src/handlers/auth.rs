//! Registration, login, and logout handlers.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use inkwell_core::domain::{Role, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, PasswordService, SessionService, UserRepository};
use inkwell_shared::{LoginForm, RegisterForm};

use crate::middleware::auth::{Identity, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

use super::{clear_gate_cookie, gate_from_request, html, see_other};

const DUPLICATE_USER_ERROR: &str = "The user already exists!";
const INVALID_CREDENTIALS_ERROR: &str = "Invalid Credentials!";

/// GET /register
pub async fn register_form() -> HttpResponse {
    html(views::register_page(None))
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    // Exact-email lookup; an existing account re-presents the form.
    if state.users.find_by_email(&form.email).await?.is_some() {
        return Ok(html(views::register_page(Some(DUPLICATE_USER_ERROR))));
    }

    // The plaintext stops here.
    let password_hash = password_service
        .hash(&form.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // First account on the site becomes the admin.
    let role = if state.users.count().await? == 0 {
        Role::Admin
    } else {
        Role::Reader
    };

    let user = User::new(form.email, password_hash, form.name, role);
    match state.users.save(user).await {
        Ok(saved) => {
            tracing::info!(user_id = saved.id, role = ?saved.role, "User registered");
            Ok(see_other("/login"))
        }
        // Lost a duplicate race: the unique index caught it, same outcome as
        // the lookup above.
        Err(RepoError::Constraint(_)) => {
            Ok(html(views::register_page(Some(DUPLICATE_USER_ERROR))))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login
///
/// Rendering this page consumes the comment gate: the notice shows exactly
/// once, then the gate is back to `Open`.
pub async fn login_form(req: HttpRequest) -> HttpResponse {
    let (_, notice) = gate_from_request(&req).consume();

    let mut response = HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::login_page(notice, None));
    if notice.is_some() {
        if let Err(e) = response.add_cookie(&clear_gate_cookie()) {
            tracing::error!("Failed to clear gate cookie: {}", e);
        }
    }
    response
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    session_service: web::Data<Arc<dyn SessionService>>,
    body: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    // Unknown email and wrong password take the same fall-through and
    // produce the same response; nothing distinguishes which check failed.
    if let Some(user) = state.users.find_by_email(&form.email).await? {
        let valid = password_service
            .verify(&form.password, &user.password_hash)
            .unwrap_or(false);

        if valid {
            let token = session_service
                .issue(user.id, &user.name, user.role)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            tracing::info!(user_id = user.id, "User logged in");

            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish();

            return Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .cookie(cookie)
                .finish());
        }
    }

    Ok(html(views::login_page(
        None,
        Some(INVALID_CREDENTIALS_ERROR),
    )))
}

/// GET /logout - requires a session; unconditionally tears it down.
pub async fn logout(identity: Identity) -> HttpResponse {
    tracing::info!(user_id = identity.user_id, "User logged out");

    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}
