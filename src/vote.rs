//! Vote recorder.
//!
//! One invocation, two terminal outcomes: either exactly one tally moved
//! by exactly one, or nothing was written at all.

use crate::models::{Choice, Question};
use crate::queries::{self, PollError};
use crate::store::PollStore;
use chrono::NaiveDateTime;

/// Shown on the voting form when a submission carries no usable choice.
pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

/// Terminal outcome of one vote submission.
#[derive(Debug)]
pub enum VoteOutcome {
    /// The tally was incremented; the caller must redirect to the results
    /// view rather than render, so a back/refresh can't double-submit.
    Accepted { question: Question, choice: Choice },
    /// No usable choice in the submission; nothing was written. The caller
    /// redisplays the voting form with the message.
    Rejected {
        question: Question,
        message: &'static str,
    },
}

/// Validate a vote submission against a visible question and apply it.
///
/// A question that is absent or not yet published escalates as
/// [`PollError::NotFound`]. A missing choice id, or one the question does
/// not own, is the `Rejected` outcome, not an error: the increment is
/// conditioned on ownership at the storage layer, so rejection and
/// acceptance are decided by the same atomic operation that moves the
/// tally.
pub async fn record_vote(
    store: &dyn PollStore,
    question_id: i32,
    submitted_choice: Option<i32>,
    now: NaiveDateTime,
) -> Result<VoteOutcome, PollError> {
    let question = queries::visible_question(store, question_id, now).await?;

    let choice_id = match submitted_choice {
        Some(id) => id,
        None => {
            return Ok(VoteOutcome::Rejected {
                question,
                message: NO_CHOICE_MESSAGE,
            })
        }
    };

    match store.increment_votes(question.id, choice_id).await? {
        Some(choice) => {
            log::debug!(
                "vote accepted: question {} choice {} now at {}",
                question.id,
                choice.id,
                choice.votes
            );
            Ok(VoteOutcome::Accepted { question, choice })
        }
        None => Ok(VoteOutcome::Rejected {
            question,
            message: NO_CHOICE_MESSAGE,
        }),
    }
}
