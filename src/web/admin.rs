//! Administration endpoints for managing questions and choices.
//!
//! Plain CRUD over the same storage interface the public pages use. The
//! dashboard shows unpublished questions too; vote tallies are not
//! editable here — they only move through the vote recorder.

use crate::models::{Choice, Question};
use crate::store::SharedStore;
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpResponse, Responder};
use askama_actix::{Template, TemplateToResponse};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// `<input type="datetime-local">` value format.
const FORM_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Empty choice slots offered on the create form.
const EXTRA_CHOICE_SLOTS: usize = 3;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_dashboard)
        .service(view_create_question_form)
        .service(create_question)
        .service(view_edit_question_form)
        .service(update_question)
        .service(delete_question)
        .service(create_choice)
        .service(delete_choice);
}

/// Dashboard row: a question with its publish state spelled out.
pub struct QuestionRow {
    pub question: Question,
    pub is_published: bool,
    pub was_published_recently: bool,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub questions: Vec<QuestionRow>,
}

#[derive(Template)]
#[template(path = "admin/question_form.html")]
pub struct QuestionFormTemplate {
    pub extra_choice_slots: Vec<usize>,
}

#[derive(Template)]
#[template(path = "admin/question_edit.html")]
pub struct QuestionEditTemplate {
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl QuestionEditTemplate {
    /// Publish date formatted for the datetime-local input.
    pub fn pub_date_value(&self) -> String {
        self.question.pub_date.format(FORM_DATE_FORMAT).to_string()
    }
}

#[derive(Deserialize)]
pub struct QuestionFormData {
    pub question_text: String,
    pub pub_date: String,
    pub choice_1: Option<String>,
    pub choice_2: Option<String>,
    pub choice_3: Option<String>,
}

#[derive(Deserialize)]
pub struct QuestionUpdateFormData {
    pub question_text: String,
    pub pub_date: String,
}

#[derive(Deserialize)]
pub struct ChoiceFormData {
    pub choice_text: String,
}

fn parse_form_date(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, FORM_DATE_FORMAT)
        .map_err(|_| error::ErrorBadRequest("Invalid publish date."))
}

fn validate_text(value: &str, label: &'static str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error::ErrorBadRequest(format!("{} cannot be empty.", label)));
    }
    Ok(trimmed.to_owned())
}

fn redirect_to(location: String) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location))
        .finish()
}

#[get("/admin")]
pub async fn view_dashboard(store: web::Data<SharedStore>) -> Result<impl Responder, Error> {
    let now = chrono::Utc::now().naive_utc();

    let questions = store
        .all_questions()
        .await
        .map_err(super::map_store_error)?
        .into_iter()
        .map(|question| QuestionRow {
            is_published: question.is_published(now),
            was_published_recently: question.was_published_recently(now),
            question,
        })
        .collect();

    Ok(DashboardTemplate { questions }.to_response())
}

#[get("/admin/questions/create")]
pub async fn view_create_question_form() -> Result<impl Responder, Error> {
    Ok(QuestionFormTemplate {
        extra_choice_slots: (1..=EXTRA_CHOICE_SLOTS).collect(),
    }
    .to_response())
}

#[post("/admin/questions")]
pub async fn create_question(
    store: web::Data<SharedStore>,
    form: web::Form<QuestionFormData>,
) -> Result<HttpResponse, Error> {
    let question_text = validate_text(&form.question_text, "Question text")?;
    let pub_date = parse_form_date(&form.pub_date)?;
    let store = store.get_ref().as_ref();

    let question = store
        .insert_question(&question_text, pub_date)
        .await
        .map_err(super::map_store_error)?;

    // Fill whichever of the optional choice slots were used.
    let slots = [&form.choice_1, &form.choice_2, &form.choice_3];
    for slot in slots.into_iter().flatten() {
        let choice_text = slot.trim();
        if choice_text.is_empty() {
            continue;
        }
        store
            .insert_choice(question.id, choice_text)
            .await
            .map_err(super::map_store_error)?;
    }

    log::info!("admin created question {}", question.id);
    Ok(redirect_to("/admin".to_owned()))
}

#[get("/admin/questions/{question_id}/edit")]
pub async fn view_edit_question_form(
    store: web::Data<SharedStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let question_id = path.into_inner();
    let store = store.get_ref().as_ref();

    // Admin sees unpublished questions, so no visibility filter here.
    let question = store
        .question_by_id(question_id)
        .await
        .map_err(super::map_store_error)?
        .ok_or_else(|| error::ErrorNotFound("No such question."))?;
    let choices = store
        .choices_of(question.id)
        .await
        .map_err(super::map_store_error)?;

    Ok(QuestionEditTemplate { question, choices }.to_response())
}

#[post("/admin/questions/{question_id}")]
pub async fn update_question(
    store: web::Data<SharedStore>,
    path: web::Path<i32>,
    form: web::Form<QuestionUpdateFormData>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner();
    let question_text = validate_text(&form.question_text, "Question text")?;
    let pub_date = parse_form_date(&form.pub_date)?;

    store
        .update_question(question_id, &question_text, pub_date)
        .await
        .map_err(super::map_store_error)?
        .ok_or_else(|| error::ErrorNotFound("No such question."))?;

    Ok(redirect_to("/admin".to_owned()))
}

#[post("/admin/questions/{question_id}/delete")]
pub async fn delete_question(
    store: web::Data<SharedStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner();

    let removed = store
        .delete_question(question_id)
        .await
        .map_err(super::map_store_error)?;
    if !removed {
        return Err(error::ErrorNotFound("No such question."));
    }

    log::info!("admin deleted question {}", question_id);
    Ok(redirect_to("/admin".to_owned()))
}

#[post("/admin/questions/{question_id}/choices")]
pub async fn create_choice(
    store: web::Data<SharedStore>,
    path: web::Path<i32>,
    form: web::Form<ChoiceFormData>,
) -> Result<HttpResponse, Error> {
    let question_id = path.into_inner();
    let choice_text = validate_text(&form.choice_text, "Choice text")?;

    store
        .insert_choice(question_id, &choice_text)
        .await
        .map_err(super::map_store_error)?
        .ok_or_else(|| error::ErrorNotFound("No such question."))?;

    Ok(redirect_to(format!(
        "/admin/questions/{}/edit",
        question_id
    )))
}

#[post("/admin/questions/{question_id}/choices/{choice_id}/delete")]
pub async fn delete_choice(
    store: web::Data<SharedStore>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, Error> {
    let (question_id, choice_id) = path.into_inner();

    let removed = store
        .delete_choice(question_id, choice_id)
        .await
        .map_err(super::map_store_error)?;
    if !removed {
        return Err(error::ErrorNotFound("No such choice."));
    }

    Ok(redirect_to(format!(
        "/admin/questions/{}/edit",
        question_id
    )))
}
