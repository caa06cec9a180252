//! actix-web transport for the account service.

pub mod envelope;
pub mod handlers;
pub mod model;

use actix_web::error::InternalError;
use actix_web::{web, HttpRequest};
use envelope::{respond, Outcome};

/// Registers the `/accounts` scope.
///
/// Extractor rejections (malformed JSON body, query string, or path
/// segment) are rewritten here so clients always receive the standard
/// envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/accounts")
            .app_data(web::JsonConfig::default().error_handler(bad_request))
            .app_data(web::QueryConfig::default().error_handler(bad_request))
            .app_data(web::PathConfig::default().error_handler(bad_request))
            .service(handlers::create)
            .service(handlers::list)
            .service(handlers::detail)
            .service(handlers::update)
            .service(handlers::delete),
    );
}

fn bad_request<E>(error: E, _req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    InternalError::from_response(error, respond(Outcome::BadRequest)).into()
}
