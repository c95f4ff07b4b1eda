//! Static pages.

use actix_web::HttpResponse;

use crate::middleware::auth::OptionalIdentity;
use crate::views;

use super::html;

/// GET /about
pub async fn about(identity: OptionalIdentity) -> HttpResponse {
    html(views::about_page(identity.0.as_ref()))
}

/// GET /contact
pub async fn contact(identity: OptionalIdentity) -> HttpResponse {
    html(views::contact_page(identity.0.as_ref()))
}
