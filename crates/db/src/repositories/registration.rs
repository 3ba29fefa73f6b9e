use crate::models::DbPatientRegistration;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Longest user agent kept, in characters.
pub const USER_AGENT_MAX_CHARS: usize = 255;

pub fn truncate_user_agent(user_agent: &str) -> String {
    user_agent.chars().take(USER_AGENT_MAX_CHARS).collect()
}

pub async fn record_registration(
    pool: &Pool<Postgres>,
    hospital_code: &str,
    user_agent: Option<&str>,
) -> Result<DbPatientRegistration> {
    let user_agent = user_agent.map(truncate_user_agent);

    let registration = sqlx::query_as::<_, DbPatientRegistration>(
        r#"
        INSERT INTO patient_registrations (hospital_code, user_agent)
        VALUES ($1, $2)
        RETURNING id, hospital_code, user_agent, created_at
        "#,
    )
    .bind(hospital_code)
    .bind(user_agent)
    .fetch_one(pool)
    .await?;

    tracing::debug!(
        "Registration recorded: id={}, hospital_code={}",
        registration.id,
        hospital_code
    );
    Ok(registration)
}
