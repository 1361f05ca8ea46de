//! Read-side query service.
//!
//! The visibility rule lives here, at the data-access boundary: nothing
//! above this module can observe a question whose publish date is still
//! in the future.

use crate::models::Question;
use crate::store::{PollStore, StoreError};
use chrono::NaiveDateTime;

/// The index page shows at most this many questions.
pub const LATEST_QUESTION_LIMIT: u64 = 5;

/// Errors surfaced by the query service and the vote recorder.
#[derive(Debug)]
pub enum PollError {
    /// Question absent, or not yet published — deliberately
    /// indistinguishable so future questions cannot be peeked at.
    NotFound,
    /// Storage failure
    Store(StoreError),
}

impl std::fmt::Display for PollError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollError::NotFound => write!(f, "No such poll."),
            PollError::Store(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for PollError {}

impl From<StoreError> for PollError {
    fn from(e: StoreError) -> Self {
        PollError::Store(e)
    }
}

/// The last five published questions, most recent first. Questions with a
/// future `pub_date` are excluded; an empty store yields an empty list.
pub async fn latest_questions(
    store: &dyn PollStore,
    now: NaiveDateTime,
) -> Result<Vec<Question>, PollError> {
    let questions = store.latest_published(now, LATEST_QUESTION_LIMIT).await?;
    Ok(questions)
}

/// Fetch one published question. `NotFound` both for ids that don't exist
/// and for questions whose `pub_date` is still in the future.
pub async fn visible_question(
    store: &dyn PollStore,
    id: i32,
    now: NaiveDateTime,
) -> Result<Question, PollError> {
    match store.question_by_id(id).await? {
        Some(question) if question.is_published(now) => Ok(question),
        _ => Err(PollError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem::MemPollStore;
    use chrono::{Duration, Utc};

    async fn seed_question(store: &MemPollStore, text: &str, days: i64) -> Question {
        let pub_date = Utc::now().naive_utc() + Duration::days(days);
        store
            .insert_question(text, pub_date)
            .await
            .expect("insert question")
    }

    #[actix_rt::test]
    async fn latest_questions_excludes_future_and_orders_descending() {
        let store = MemPollStore::new();
        let now = Utc::now().naive_utc();

        seed_question(&store, "future question.", 10).await;
        let newer = seed_question(&store, "past question 1.", -3).await;
        let older = seed_question(&store, "past question 2.", -5).await;

        let latest = latest_questions(&store, now).await.expect("query");
        assert_eq!(latest, vec![newer, older]);
    }

    #[actix_rt::test]
    async fn latest_questions_caps_at_five() {
        let store = MemPollStore::new();
        let now = Utc::now().naive_utc();

        for day in 1..=8 {
            seed_question(&store, &format!("question {}.", day), -day).await;
        }

        let latest = latest_questions(&store, now).await.expect("query");
        assert_eq!(latest.len(), LATEST_QUESTION_LIMIT as usize);
        assert!(latest.windows(2).all(|w| w[0].pub_date >= w[1].pub_date));
    }

    #[actix_rt::test]
    async fn latest_questions_with_empty_store() {
        let store = MemPollStore::new();
        let now = Utc::now().naive_utc();

        let latest = latest_questions(&store, now).await.expect("query");
        assert!(latest.is_empty());
    }

    #[actix_rt::test]
    async fn visible_question_hides_future_questions() {
        let store = MemPollStore::new();
        let now = Utc::now().naive_utc();

        let future = seed_question(&store, "Future question.", 1).await;

        let result = visible_question(&store, future.id, now).await;
        assert!(matches!(result, Err(PollError::NotFound)));
    }

    #[actix_rt::test]
    async fn visible_question_absent_id_is_not_found() {
        let store = MemPollStore::new();
        let now = Utc::now().naive_utc();

        let result = visible_question(&store, 42, now).await;
        assert!(matches!(result, Err(PollError::NotFound)));
    }

    #[actix_rt::test]
    async fn visible_question_returns_past_question() {
        let store = MemPollStore::new();
        let now = Utc::now().naive_utc();

        let past = seed_question(&store, "Past question.", -1).await;

        let found = visible_question(&store, past.id, now).await.expect("query");
        assert_eq!(found, past);
    }
}
