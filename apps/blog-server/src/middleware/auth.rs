//! Identity extractors - the session side of authentication.
//!
//! The session cookie carries a signed token; these extractors resolve it to
//! an identity once per request, so handlers never touch ambient globals.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};
use std::sync::Arc;

use inkwell_core::domain::Role;
use inkwell_core::ports::{AuthError, SessionClaims, SessionService};

use super::error::AppError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "inkwell_session";

/// Authenticated user identity extractor.
///
/// Use this in handlers that require a logged-in user:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// Error for routes that need a session: the visitor is sent to the login
/// page instead of being shown an error.
#[derive(Debug)]
pub struct LoginRequired(pub AuthError);

impl std::fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for LoginRequired {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/login"))
            .finish()
    }
}

fn resolve_identity(req: &HttpRequest) -> Result<Identity, AuthError> {
    let sessions = req
        .app_data::<actix_web::web::Data<Arc<dyn SessionService>>>()
        .ok_or_else(|| {
            tracing::error!("SessionService not found in app data");
            AuthError::InvalidToken("Server configuration error".to_string())
        })?;

    let cookie = req.cookie(SESSION_COOKIE).ok_or(AuthError::MissingSession)?;

    sessions.validate(cookie.value()).map(Identity::from)
}

impl FromRequest for Identity {
    type Error = LoginRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_identity(req).map_err(LoginRequired))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(resolve_identity(req).ok())))
    }
}

/// Admin guard for the post edit/delete routes.
///
/// Every denial cause (no cookie, bad token, expired session, non-admin
/// role) collapses into the one Forbidden outcome; the 403 page never says
/// which check failed.
pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let outcome = match resolve_identity(req) {
            Ok(identity) if identity.is_admin() => Ok(AdminIdentity(identity)),
            Ok(_) | Err(_) => Err(AppError::Forbidden),
        };
        ready(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::{test, web};
    use inkwell_infra::{SessionConfig, SignedSessionService};

    fn sessions() -> Arc<dyn SessionService> {
        Arc::new(SignedSessionService::new(SessionConfig {
            secret: "test-secret".to_string(),
            ttl_hours: 1,
            issuer: "test".to_string(),
        }))
    }

    #[actix_rt::test]
    async fn test_identity_from_valid_cookie() {
        let service = sessions();
        let token = service.issue(4, "Ann", Role::Reader).unwrap();

        let req = test::TestRequest::default()
            .app_data(web::Data::new(service))
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_http_request();

        let identity = Identity::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(identity.user_id, 4);
        assert!(!identity.is_admin());
    }

    #[actix_rt::test]
    async fn test_missing_cookie_redirects_to_login() {
        let req = test::TestRequest::default()
            .app_data(web::Data::new(sessions()))
            .to_http_request();

        let result = Identity::from_request(&req, &mut Payload::None).await;
        assert!(matches!(result, Err(LoginRequired(_))));
    }

    #[actix_rt::test]
    async fn test_admin_guard_denies_reader_and_anonymous_alike() {
        let service = sessions();
        let token = service.issue(2, "Bob", Role::Reader).unwrap();

        let as_reader = test::TestRequest::default()
            .app_data(web::Data::new(service.clone()))
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_http_request();
        let anonymous = test::TestRequest::default()
            .app_data(web::Data::new(service))
            .to_http_request();

        let denied_reader = AdminIdentity::from_request(&as_reader, &mut Payload::None).await;
        let denied_anon = AdminIdentity::from_request(&anonymous, &mut Payload::None).await;

        assert!(matches!(denied_reader, Err(AppError::Forbidden)));
        assert!(matches!(denied_anon, Err(AppError::Forbidden)));
    }

    #[actix_rt::test]
    async fn test_admin_guard_admits_admin() {
        let service = sessions();
        let token = service.issue(1, "Root", Role::Admin).unwrap();

        let req = test::TestRequest::default()
            .app_data(web::Data::new(service))
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_http_request();

        let admitted = AdminIdentity::from_request(&req, &mut Payload::None).await;
        assert!(admitted.is_ok());
    }
}
