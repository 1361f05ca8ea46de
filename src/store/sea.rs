//! SeaORM storage backend.

use super::{PollStore, StoreError};
use crate::models::{Choice, Question};
use crate::orm::{choices, questions};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{entity::*, query::*, sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait};

/// Relational storage backend over a SeaORM connection pool.
pub struct SeaPollStore {
    db: DatabaseConnection,
}

impl SeaPollStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_question(model: questions::Model) -> Question {
    Question {
        id: model.id,
        question_text: model.question_text,
        pub_date: model.pub_date,
    }
}

fn to_choice(model: choices::Model) -> Choice {
    Choice {
        id: model.id,
        question_id: model.question_id,
        choice_text: model.choice_text,
        votes: model.votes,
    }
}

#[async_trait]
impl PollStore for SeaPollStore {
    async fn question_by_id(&self, id: i32) -> Result<Option<Question>, StoreError> {
        let question = questions::Entity::find_by_id(id).one(&self.db).await?;
        Ok(question.map(to_question))
    }

    async fn latest_published(
        &self,
        now: NaiveDateTime,
        limit: u64,
    ) -> Result<Vec<Question>, StoreError> {
        let models = questions::Entity::find()
            .filter(questions::Column::PubDate.lte(now))
            .order_by_desc(questions::Column::PubDate)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_question).collect())
    }

    async fn choices_of(&self, question_id: i32) -> Result<Vec<Choice>, StoreError> {
        let models = choices::Entity::find()
            .filter(choices::Column::QuestionId.eq(question_id))
            .order_by_asc(choices::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_choice).collect())
    }

    async fn increment_votes(
        &self,
        question_id: i32,
        choice_id: i32,
    ) -> Result<Option<Choice>, StoreError> {
        // Server-side `votes = votes + 1`, filtered on both ids. Ownership
        // check and increment are a single statement; zero rows affected
        // means the question owns no such choice and nothing was written.
        let result = choices::Entity::update_many()
            .col_expr(
                choices::Column::Votes,
                Expr::col(choices::Column::Votes).add(1),
            )
            .filter(choices::Column::Id.eq(choice_id))
            .filter(choices::Column::QuestionId.eq(question_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let updated = choices::Entity::find_by_id(choice_id).one(&self.db).await?;
        Ok(updated.map(to_choice))
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let models = questions::Entity::find()
            .order_by_desc(questions::Column::PubDate)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_question).collect())
    }

    async fn insert_question(
        &self,
        question_text: &str,
        pub_date: NaiveDateTime,
    ) -> Result<Question, StoreError> {
        let question = questions::ActiveModel {
            question_text: Set(question_text.to_owned()),
            pub_date: Set(pub_date),
            ..Default::default()
        };
        let model = question.insert(&self.db).await?;
        Ok(to_question(model))
    }

    async fn update_question(
        &self,
        id: i32,
        question_text: &str,
        pub_date: NaiveDateTime,
    ) -> Result<Option<Question>, StoreError> {
        let result = questions::Entity::update_many()
            .col_expr(
                questions::Column::QuestionText,
                Expr::value(question_text.to_owned()),
            )
            .col_expr(questions::Column::PubDate, Expr::value(pub_date))
            .filter(questions::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.question_by_id(id).await
    }

    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        // Choices go with it via the schema's ON DELETE CASCADE.
        let result = questions::Entity::delete_many()
            .filter(questions::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn insert_choice(
        &self,
        question_id: i32,
        choice_text: &str,
    ) -> Result<Option<Choice>, StoreError> {
        let question = questions::Entity::find_by_id(question_id)
            .one(&self.db)
            .await?;
        if question.is_none() {
            return Ok(None);
        }

        let choice = choices::ActiveModel {
            question_id: Set(question_id),
            choice_text: Set(choice_text.to_owned()),
            votes: Set(0),
            ..Default::default()
        };
        let model = choice.insert(&self.db).await?;
        Ok(Some(to_choice(model)))
    }

    async fn delete_choice(&self, question_id: i32, choice_id: i32) -> Result<bool, StoreError> {
        let result = choices::Entity::delete_many()
            .filter(choices::Column::Id.eq(choice_id))
            .filter(choices::Column::QuestionId.eq(question_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
