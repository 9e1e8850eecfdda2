use sqlx::MySqlPool;

use crate::models::Submission;

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS submissions (
        id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        value VARCHAR(255) NOT NULL,
        submitted_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

/// Idempotent: a no-op when the table already exists.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    Ok(())
}

/// Insert one row and return the store-assigned id.
pub async fn insert(pool: &MySqlPool, name: &str, value: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO submissions (name, value) VALUES (?, ?)")
        .bind(name)
        .bind(value)
        .execute(pool)
        .await?;
    Ok(result.last_insert_id())
}

pub async fn find_by_id(pool: &MySqlPool, id: u64) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}
