//! Poll detail, results, and voting endpoints.

use crate::models::{Choice, Question};
use crate::queries;
use crate::store::SharedStore;
use crate::vote::{self, VoteOutcome};
use actix_web::http::header;
use actix_web::{get, post, web, Error, HttpResponse, Responder};
use askama_actix::{Template, TemplateToResponse};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_detail)
        .service(view_results)
        .service(vote_on_poll);
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub question: Question,
    pub choices: Vec<Choice>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub question: Question,
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct VoteFormData {
    /// Raw radio-button value. Absent when nothing was selected; kept as a
    /// string so an unparseable submission rejects instead of erroring.
    pub choice: Option<String>,
}

impl VoteFormData {
    fn choice_id(&self) -> Option<i32> {
        self.choice.as_deref().and_then(|s| s.parse().ok())
    }
}

#[get("/polls/{question_id}/")]
pub async fn view_detail(
    store: web::Data<SharedStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let question_id = path.into_inner();
    let now = chrono::Utc::now().naive_utc();
    let store = store.get_ref().as_ref();

    let question = queries::visible_question(store, question_id, now)
        .await
        .map_err(super::map_poll_error)?;
    let choices = store
        .choices_of(question.id)
        .await
        .map_err(super::map_store_error)?;

    Ok(DetailTemplate {
        question,
        choices,
        error_message: None,
    }
    .to_response())
}

#[get("/polls/{question_id}/results")]
pub async fn view_results(
    store: web::Data<SharedStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let question_id = path.into_inner();
    let now = chrono::Utc::now().naive_utc();
    let store = store.get_ref().as_ref();

    let question = queries::visible_question(store, question_id, now)
        .await
        .map_err(super::map_poll_error)?;
    let choices = store
        .choices_of(question.id)
        .await
        .map_err(super::map_store_error)?;

    Ok(ResultsTemplate { question, choices }.to_response())
}

#[post("/polls/{question_id}/vote")]
pub async fn vote_on_poll(
    store: web::Data<SharedStore>,
    path: web::Path<i32>,
    form: web::Form<VoteFormData>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner();
    let now = chrono::Utc::now().naive_utc();
    let store = store.get_ref().as_ref();

    let outcome = vote::record_vote(store, question_id, form.choice_id(), now)
        .await
        .map_err(super::map_poll_error)?;

    match outcome {
        // Redirect after a successful POST so back/refresh can't vote twice.
        VoteOutcome::Accepted { question, .. } => Ok(HttpResponse::SeeOther()
            .append_header((
                header::LOCATION,
                format!("/polls/{}/results", question.id),
            ))
            .finish()),
        VoteOutcome::Rejected { question, message } => {
            let choices = store
                .choices_of(question.id)
                .await
                .map_err(super::map_store_error)?;
            Ok(DetailTemplate {
                question,
                choices,
                error_message: Some(message.to_owned()),
            }
            .to_response())
        }
    }
}
