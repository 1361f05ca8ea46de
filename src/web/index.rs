//! Index page listing the latest published polls.

use crate::models::Question;
use crate::queries;
use crate::store::SharedStore;
use actix_web::{get, web, Error, Responder};
use askama_actix::{Template, TemplateToResponse};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_index);
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub latest_question_list: Vec<Question>,
}

#[get("/")]
pub async fn view_index(store: web::Data<SharedStore>) -> Result<impl Responder, Error> {
    let now = chrono::Utc::now().naive_utc();

    let latest_question_list = queries::latest_questions(store.get_ref().as_ref(), now)
        .await
        .map_err(super::map_poll_error)?;

    Ok(IndexTemplate {
        latest_question_list,
    }
    .to_response())
}
