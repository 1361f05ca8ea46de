//! Database connection and schema bootstrap.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};

pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Idempotent DDL for the two poll tables.
///
/// Choices carry the `ON DELETE CASCADE` that makes question deletion take
/// its choices with it, and the check constraint that keeps tallies from
/// ever going negative.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let ddl = [
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question_text TEXT NOT NULL,
            pub_date TIMESTAMP NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS choices (
            id SERIAL PRIMARY KEY,
            question_id INTEGER NOT NULL REFERENCES questions (id) ON DELETE CASCADE,
            choice_text TEXT NOT NULL,
            votes INTEGER NOT NULL DEFAULT 0 CHECK (votes >= 0)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_questions_pub_date ON questions (pub_date)",
        "CREATE INDEX IF NOT EXISTS idx_choices_question_id ON choices (question_id)",
    ];

    for statement in ddl {
        db.execute(Statement::from_string(
            DbBackend::Postgres,
            statement.to_owned(),
        ))
        .await?;
    }

    Ok(())
}
