//! Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::{Duration, Utc};
use rupoll::models::{Choice, Question};
use rupoll::store::mem::MemPollStore;
use rupoll::store::{PollStore, SharedStore};
use std::sync::Arc;

/// Fresh in-memory storage backend, shaped the way the app receives it.
pub fn test_store() -> SharedStore {
    Arc::new(MemPollStore::new())
}

/// Create a question published `days` offset from now (negative for the
/// past, positive for questions that have yet to be published).
pub async fn create_question(store: &SharedStore, text: &str, days: i64) -> Question {
    let pub_date = Utc::now().naive_utc() + Duration::days(days);
    store
        .insert_question(text, pub_date)
        .await
        .expect("Failed to create test question")
}

/// Create a choice for a question, starting at zero votes.
pub async fn create_choice(store: &SharedStore, question_id: i32, text: &str) -> Choice {
    store
        .insert_choice(question_id, text)
        .await
        .expect("Failed to create test choice")
        .expect("Test question should exist")
}

/// Current tallies of a question's choices, in insertion order.
pub async fn tallies(store: &SharedStore, question_id: i32) -> Vec<i32> {
    store
        .choices_of(question_id)
        .await
        .expect("Failed to read test choices")
        .iter()
        .map(|c| c.votes)
        .collect()
}
