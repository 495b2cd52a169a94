use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};

use crate::config::Config;

/// Header carrying the shared admin secret.
pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

/// Proof that the request carried the admin secret.
///
/// The gate is a single static password with no sessions; every admin
/// request presents it again, and nothing is remembered server-side.
pub struct AdminAuth;

impl FromRequest for AdminAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let supplied = req
            .headers()
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|h| h.to_str().ok());

        match supplied {
            Some(p) if p == config.admin_password => ready(Ok(AdminAuth)),
            Some(_) => ready(Err(ErrorUnauthorized("Password admin salah"))),
            None => ready(Err(ErrorUnauthorized("Password admin diperlukan"))),
        }
    }
}
