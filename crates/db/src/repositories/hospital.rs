use crate::models::DbHospital;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};

pub async fn get_active_hospital_by_code(
    pool: &Pool<Postgres>,
    code: &str,
) -> Result<Option<DbHospital>> {
    tracing::debug!("Getting active hospital by code: {}", code);

    let hospital = sqlx::query_as::<_, DbHospital>(
        r#"
        SELECT id, hospital_code, name, timezone, is_active, created_at, updated_at
        FROM hospitals
        WHERE hospital_code = $1 AND is_active = TRUE
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    if hospital.is_none() {
        tracing::debug!("Hospital not found or inactive: code={}", code);
    }

    Ok(hospital)
}

/// Creates the hospital or refreshes it, keyed by its code. An upserted
/// hospital is always active.
pub async fn upsert_hospital(
    conn: &mut PgConnection,
    code: &str,
    name: &str,
    timezone: &str,
) -> Result<DbHospital> {
    let hospital = sqlx::query_as::<_, DbHospital>(
        r#"
        INSERT INTO hospitals (hospital_code, name, timezone, is_active)
        VALUES ($1, $2, $3, TRUE)
        ON CONFLICT (hospital_code) DO UPDATE
        SET name = EXCLUDED.name,
            timezone = EXCLUDED.timezone,
            is_active = TRUE,
            updated_at = NOW()
        RETURNING id, hospital_code, name, timezone, is_active, created_at, updated_at
        "#,
    )
    .bind(code)
    .bind(name)
    .bind(timezone)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!("Hospital upserted: id={}, code={}", hospital.id, code);
    Ok(hospital)
}
