//! Value types for poll questions and choices.
//!
//! These are plain immutable snapshots of storage rows. Mutation happens
//! only through the [`crate::store::PollStore`] backends; the vote tally in
//! particular only moves through [`crate::vote::record_vote`].

use chrono::{Duration, NaiveDateTime};

/// A poll prompt with a publish timestamp.
///
/// Timestamps are naive UTC, matching the storage convention.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub id: i32,
    pub question_text: String,
    pub pub_date: NaiveDateTime,
}

impl Question {
    /// A question is published once its publish time has passed.
    pub fn is_published(&self, now: NaiveDateTime) -> bool {
        self.pub_date <= now
    }

    /// True iff the question was published within the last day.
    ///
    /// Both bounds are inclusive: exactly 24 hours old still counts,
    /// exactly `now` still counts. Future publish dates never count.
    pub fn was_published_recently(&self, now: NaiveDateTime) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }

    pub fn pub_date_display(&self) -> String {
        self.pub_date.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// One selectable answer under a question, with its vote tally.
#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub id: i32,
    pub question_id: i32,
    pub choice_text: String,
    pub votes: i32,
}
