//! Integration tests for the admin CRUD screens

mod common;

use actix_web::body::MessageBody;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use rupoll::store::PollStore;

async fn body_of<B>(resp: actix_web::dev::ServiceResponse<B>) -> String
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).expect("response body should be utf-8")
}

macro_rules! init_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .configure(rupoll::web::configure),
        )
        .await
    };
}

#[actix_rt::test]
async fn dashboard_lists_unpublished_questions() {
    let store = common::test_store();
    common::create_question(&store, "future question.", 10).await;
    let app = init_app!(store);

    let req = test::TestRequest::get().uri("/admin").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;
    assert!(body.contains("future question."));
    assert!(body.contains("Scheduled"));
}

#[actix_rt::test]
async fn create_question_with_choice_slots() {
    let store = common::test_store();
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/admin/questions")
        .set_form([
            ("question_text", "Is this on?"),
            ("pub_date", "2020-01-15T10:30"),
            ("choice_1", "yes"),
            ("choice_2", ""),
            ("choice_3", "no"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/admin"
    );

    let questions = store.all_questions().await.expect("questions");
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].question_text, "Is this on?");

    let choices = store.choices_of(questions[0].id).await.expect("choices");
    let texts: Vec<&str> = choices.iter().map(|c| c.choice_text.as_str()).collect();
    assert_eq!(texts, vec!["yes", "no"]);
    assert!(choices.iter().all(|c| c.votes == 0));
}

#[actix_rt::test]
async fn create_question_rejects_invalid_date() {
    let store = common::test_store();
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/admin/questions")
        .set_form([
            ("question_text", "Is this on?"),
            ("pub_date", "next tuesday"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.all_questions().await.expect("questions").is_empty());
}

#[actix_rt::test]
async fn create_question_rejects_blank_text() {
    let store = common::test_store();
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/admin/questions")
        .set_form([("question_text", "   "), ("pub_date", "2020-01-15T10:30")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn edit_form_shows_question_and_choices() {
    let store = common::test_store();
    let question = common::create_question(&store, "Editable question.", -1).await;
    common::create_choice(&store, question.id, "first choice").await;
    let app = init_app!(store);

    let req = test::TestRequest::get()
        .uri(&format!("/admin/questions/{}/edit", question.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;
    assert!(body.contains("Editable question."));
    assert!(body.contains("first choice"));
}

#[actix_rt::test]
async fn update_question_changes_text_and_date() {
    let store = common::test_store();
    let question = common::create_question(&store, "Old text.", -1).await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/questions/{}", question.id))
        .set_form([
            ("question_text", "New text."),
            ("pub_date", "2021-06-01T09:00"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    let updated = store
        .question_by_id(question.id)
        .await
        .expect("query")
        .expect("question exists");
    assert_eq!(updated.question_text, "New text.");
    assert_eq!(updated.pub_date_display(), "2021-06-01 09:00");
}

#[actix_rt::test]
async fn update_unknown_question_is_404() {
    let store = common::test_store();
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/admin/questions/999")
        .set_form([
            ("question_text", "New text."),
            ("pub_date", "2021-06-01T09:00"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_question_cascades_to_choices() {
    let store = common::test_store();
    let question = common::create_question(&store, "Doomed question.", -1).await;
    common::create_choice(&store, question.id, "gone").await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/questions/{}/delete", question.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    assert!(store
        .question_by_id(question.id)
        .await
        .expect("query")
        .is_none());
    assert!(store
        .choices_of(question.id)
        .await
        .expect("choices")
        .is_empty());

    // Public detail view agrees.
    let req = test::TestRequest::get()
        .uri(&format!("/polls/{}/", question.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn add_choice_to_existing_question() {
    let store = common::test_store();
    let question = common::create_question(&store, "Growing question.", -1).await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/questions/{}/choices", question.id))
        .set_form([("choice_text", "brand new")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        &format!("/admin/questions/{}/edit", question.id)[..]
    );

    let choices = store.choices_of(question.id).await.expect("choices");
    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0].choice_text, "brand new");
    assert_eq!(choices[0].votes, 0);
}

#[actix_rt::test]
async fn add_choice_to_unknown_question_is_404() {
    let store = common::test_store();
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/admin/questions/999/choices")
        .set_form([("choice_text", "orphan")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn remove_choice_from_question() {
    let store = common::test_store();
    let question = common::create_question(&store, "Shrinking question.", -1).await;
    let choice = common::create_choice(&store, question.id, "doomed choice").await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!(
            "/admin/questions/{}/choices/{}/delete",
            question.id, choice.id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(store
        .choices_of(question.id)
        .await
        .expect("choices")
        .is_empty());
}
