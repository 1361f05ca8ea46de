pub mod admin;
pub mod error;
pub mod index;
pub mod polls;

use crate::queries::PollError;
use crate::store::StoreError;

/// Configures the web app by adding services from each web file.
///
/// @see https://docs.rs/actix-web/4.0.1/actix_web/struct.App.html#method.configure
pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    // Descending order. Order is important.
    // Route resolution will stop at the first match.
    index::configure(conf);
    admin::configure(conf);
    polls::configure(conf);
}

/// Map domain errors onto HTTP errors at the handler boundary.
pub(crate) fn map_poll_error(err: PollError) -> actix_web::Error {
    match err {
        PollError::NotFound => actix_web::error::ErrorNotFound("No such poll."),
        PollError::Store(e) => actix_web::error::ErrorInternalServerError(e),
    }
}

pub(crate) fn map_store_error(err: StoreError) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError(err)
}
