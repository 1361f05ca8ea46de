//! In-memory storage backend.
//!
//! Backs the integration tests and makes the app runnable without a
//! database. State lives behind a mutex; no method holds the lock across
//! an await point.

use super::{PollStore, StoreError};
use crate::models::{Choice, Question};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    next_question_id: i32,
    next_choice_id: i32,
}

/// In-memory poll storage backend.
pub struct MemPollStore {
    inner: Mutex<Inner>,
}

impl MemPollStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_question_id: 1,
                next_choice_id: 1,
                ..Default::default()
            }),
        }
    }
}

impl Default for MemPollStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PollStore for MemPollStore {
    async fn question_by_id(&self, id: i32) -> Result<Option<Question>, StoreError> {
        let inner = self.inner.lock().expect("mem store lock poisoned");
        Ok(inner.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn latest_published(
        &self,
        now: NaiveDateTime,
        limit: u64,
    ) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.lock().expect("mem store lock poisoned");
        let mut published: Vec<Question> = inner
            .questions
            .iter()
            .filter(|q| q.pub_date <= now)
            .cloned()
            .collect();
        published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        published.truncate(limit as usize);
        Ok(published)
    }

    async fn choices_of(&self, question_id: i32) -> Result<Vec<Choice>, StoreError> {
        let inner = self.inner.lock().expect("mem store lock poisoned");
        Ok(inner
            .choices
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn increment_votes(
        &self,
        question_id: i32,
        choice_id: i32,
    ) -> Result<Option<Choice>, StoreError> {
        let mut inner = self.inner.lock().expect("mem store lock poisoned");
        let choice = inner
            .choices
            .iter_mut()
            .find(|c| c.id == choice_id && c.question_id == question_id);
        Ok(choice.map(|c| {
            c.votes += 1;
            c.clone()
        }))
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.lock().expect("mem store lock poisoned");
        let mut questions = inner.questions.clone();
        questions.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(questions)
    }

    async fn insert_question(
        &self,
        question_text: &str,
        pub_date: NaiveDateTime,
    ) -> Result<Question, StoreError> {
        let mut inner = self.inner.lock().expect("mem store lock poisoned");
        let question = Question {
            id: inner.next_question_id,
            question_text: question_text.to_owned(),
            pub_date,
        };
        inner.next_question_id += 1;
        inner.questions.push(question.clone());
        Ok(question)
    }

    async fn update_question(
        &self,
        id: i32,
        question_text: &str,
        pub_date: NaiveDateTime,
    ) -> Result<Option<Question>, StoreError> {
        let mut inner = self.inner.lock().expect("mem store lock poisoned");
        let question = inner.questions.iter_mut().find(|q| q.id == id);
        Ok(question.map(|q| {
            q.question_text = question_text.to_owned();
            q.pub_date = pub_date;
            q.clone()
        }))
    }

    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().expect("mem store lock poisoned");
        let before = inner.questions.len();
        inner.questions.retain(|q| q.id != id);
        let removed = inner.questions.len() != before;
        if removed {
            // Cascade, same as the relational schema.
            inner.choices.retain(|c| c.question_id != id);
        }
        Ok(removed)
    }

    async fn insert_choice(
        &self,
        question_id: i32,
        choice_text: &str,
    ) -> Result<Option<Choice>, StoreError> {
        let mut inner = self.inner.lock().expect("mem store lock poisoned");
        if !inner.questions.iter().any(|q| q.id == question_id) {
            return Ok(None);
        }
        let choice = Choice {
            id: inner.next_choice_id,
            question_id,
            choice_text: choice_text.to_owned(),
            votes: 0,
        };
        inner.next_choice_id += 1;
        inner.choices.push(choice.clone());
        Ok(Some(choice))
    }

    async fn delete_choice(&self, question_id: i32, choice_id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().expect("mem store lock poisoned");
        let before = inner.choices.len();
        inner
            .choices
            .retain(|c| !(c.id == choice_id && c.question_id == question_id));
        Ok(inner.choices.len() != before)
    }
}
