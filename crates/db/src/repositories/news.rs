use crate::models::DbNews;
use duxcall_core::models::news::NewsPriority;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

/// Published news of a hospital, newest first.
pub async fn get_published_news(
    pool: &Pool<Postgres>,
    hospital_id: Uuid,
    limit: i64,
) -> Result<Vec<DbNews>> {
    let news = sqlx::query_as::<_, DbNews>(
        r#"
        SELECT id, hospital_id, title, body, priority, is_published, updated_at
        FROM news
        WHERE hospital_id = $1 AND is_published = TRUE
        ORDER BY updated_at DESC
        LIMIT $2
        "#,
    )
    .bind(hospital_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(news)
}

/// Creates or refreshes a published news item, keyed by hospital and title.
pub async fn upsert_news(
    conn: &mut PgConnection,
    hospital_id: Uuid,
    title: &str,
    body: Option<&str>,
    priority: NewsPriority,
) -> Result<DbNews> {
    let existing = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM news
        WHERE hospital_id = $1 AND title = $2
        LIMIT 1
        "#,
    )
    .bind(hospital_id)
    .bind(title)
    .fetch_optional(&mut *conn)
    .await?;

    let news = match existing {
        Some(id) => {
            sqlx::query_as::<_, DbNews>(
                r#"
                UPDATE news
                SET body = $2, priority = $3, is_published = TRUE, updated_at = NOW()
                WHERE id = $1
                RETURNING id, hospital_id, title, body, priority, is_published, updated_at
                "#,
            )
            .bind(id)
            .bind(body)
            .bind(priority.as_str())
            .fetch_one(&mut *conn)
            .await?
        }
        None => {
            sqlx::query_as::<_, DbNews>(
                r#"
                INSERT INTO news (hospital_id, title, body, priority, is_published)
                VALUES ($1, $2, $3, $4, TRUE)
                RETURNING id, hospital_id, title, body, priority, is_published, updated_at
                "#,
            )
            .bind(hospital_id)
            .bind(title)
            .bind(body)
            .bind(priority.as_str())
            .fetch_one(&mut *conn)
            .await?
        }
    };

    tracing::debug!("News upserted: id={}, title={}", news.id, title);
    Ok(news)
}
