//! Storage backend abstraction for poll data.
//!
//! Supports multiple backends:
//! - `sea`: SeaORM-backed relational storage (PostgreSQL)
//! - `mem`: In-memory storage for tests and demos
//!
//! Handlers never touch a database connection directly; they receive a
//! shared `dyn PollStore` and go through it for every read and write.

pub mod mem;
pub mod sea;

use crate::models::{Choice, Question};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Shared handle to the active storage backend, injected as actix app data.
pub type SharedStore = Arc<dyn PollStore>;

/// Storage operation errors.
#[derive(Debug)]
pub enum StoreError {
    /// Database error
    Db(sea_orm::DbErr),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Db(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        StoreError::Db(e)
    }
}

/// Trait for poll storage backends.
///
/// Reads return value snapshots; every method is a single storage
/// round-trip from the caller's point of view. `increment_votes` is the
/// only way a vote tally changes.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Fetch a question by id regardless of publish state.
    async fn question_by_id(&self, id: i32) -> Result<Option<Question>, StoreError>;

    /// Questions with `pub_date <= now`, most recent first, capped at `limit`.
    async fn latest_published(
        &self,
        now: NaiveDateTime,
        limit: u64,
    ) -> Result<Vec<Question>, StoreError>;

    /// All choices belonging to a question, in insertion order.
    async fn choices_of(&self, question_id: i32) -> Result<Vec<Choice>, StoreError>;

    /// Atomically add one vote to the choice, but only if it belongs to the
    /// question. The ownership check and the increment are one storage
    /// operation so concurrent votes can neither lose updates nor bleed
    /// into another question's choice.
    ///
    /// Returns the updated choice, or `None` (with nothing written) when the
    /// question owns no such choice.
    async fn increment_votes(
        &self,
        question_id: i32,
        choice_id: i32,
    ) -> Result<Option<Choice>, StoreError>;

    /// Every question, including unpublished ones, most recent first.
    /// Admin dashboard only.
    async fn all_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn insert_question(
        &self,
        question_text: &str,
        pub_date: NaiveDateTime,
    ) -> Result<Question, StoreError>;

    /// Update text and publish date. `None` when the id does not exist.
    async fn update_question(
        &self,
        id: i32,
        question_text: &str,
        pub_date: NaiveDateTime,
    ) -> Result<Option<Question>, StoreError>;

    /// Delete a question and, by cascade, its choices. Returns whether a
    /// row was actually removed.
    async fn delete_question(&self, id: i32) -> Result<bool, StoreError>;

    /// Add a choice under a question with a zero tally. `None` when the
    /// question does not exist.
    async fn insert_choice(
        &self,
        question_id: i32,
        choice_text: &str,
    ) -> Result<Option<Choice>, StoreError>;

    /// Delete one choice of one question. Returns whether a row was removed.
    async fn delete_choice(&self, question_id: i32, choice_id: i32) -> Result<bool, StoreError>;
}
